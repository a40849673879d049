//! wgpu renderer shared by the web and native front-ends.

use crate::camera::Camera;
use crate::frame::{SceneRenderer, SceneView};
use crate::scene::Scene;

mod helpers;
mod markers;
mod mesh;

use markers::MarkerResources;
use mesh::GpuMesh;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

impl Globals {
    fn new(scene: &Scene, camera: &Camera) -> Self {
        let lights = &scene.lights;
        let d = lights.direction_to_light();
        let lc = lights.directional.color;
        let a = lights.ambient.color.map(|c| c * lights.ambient.intensity);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: [d.x, d.y, d.z, lights.directional.intensity],
            light_color: [lc[0], lc[1], lc[2], 1.0],
            ambient: [a[0], a[1], a[2], 1.0],
        }
    }
}

pub struct GpuRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    ground: GpuMesh,
    skull: Option<GpuMesh>,
    skull_revision: u32,
    markers: MarkerResources,
    width: u32,
    height: u32,
}

impl<'w> GpuRenderer<'w> {
    /// Set up device, swapchain and pipelines for an existing surface.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        scene: &Scene,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = helpers::create_depth_texture(&device, width, height);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = mesh::create_mesh_pipeline(&device, &pipeline_layout, format);
        let markers = MarkerResources::new(&device, &pipeline_layout, format);
        let ground = GpuMesh::ground(&device, &scene.ground);

        log::info!("[render] surface {:?} {}x{}", format, config.width, config.height);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bg,
            mesh_pipeline,
            ground,
            skull: None,
            skull_revision: 0,
            markers,
            width: width.max(1),
            height: height.max(1),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Re-upload the skull whenever its slot resolves.
    fn sync_skull(&mut self, scene: &Scene) {
        if scene.skull.revision() == self.skull_revision {
            return;
        }
        self.skull_revision = scene.skull.revision();
        self.skull = scene
            .skull
            .ready()
            .map(|mesh| GpuMesh::from_mesh_data(&self.device, mesh, scene.skull_color));
        log::info!("[render] skull uploaded={}", self.skull.is_some());
    }
}

impl SceneRenderer for GpuRenderer<'_> {
    fn render(&mut self, view: &SceneView<'_>, camera: &Camera) -> anyhow::Result<()> {
        self.sync_skull(view.scene);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::new(view.scene, camera)),
        );
        self.markers.update(
            &self.device,
            &self.queue,
            view.hotspots,
            view.hovered,
            view.scene.marker_radius,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(helpers::to_wgpu_color(view.scene.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            rpass.set_pipeline(&self.mesh_pipeline);
            self.ground.draw(&mut rpass);
            if let Some(skull) = &self.skull {
                skull.draw(&mut rpass);
            }
            self.markers.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.depth_view = helpers::create_depth_texture(&self.device, width, height);
    }
}
