//! Instanced hotspot discs.

use super::helpers;
use crate::constants::HOVER_BRIGHTEN;
use crate::hotspot::HotspotRegistry;
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerInstance {
    center: [f32; 3],
    radius: f32,
    axis_x: [f32; 3],
    _pad0: f32,
    axis_y: [f32; 3],
    _pad1: f32,
    color: [f32; 4],
}

/// Per-frame instance data, in registry order.
pub(crate) fn build_instances(
    hotspots: &HotspotRegistry,
    hovered: Option<usize>,
    radius: f32,
    out: &mut Vec<MarkerInstance>,
) {
    out.clear();
    out.extend(hotspots.iter().enumerate().map(|(i, h)| {
        let rot = h.rotation();
        let mut c = h.color();
        if hovered == Some(i) {
            c = c.map(|v| (v * HOVER_BRIGHTEN).min(1.0));
        }
        MarkerInstance {
            center: h.position().to_array(),
            radius,
            axis_x: (rot * Vec3::X).to_array(),
            _pad0: 0.0,
            axis_y: (rot * Vec3::Y).to_array(),
            _pad1: 0.0,
            color: [c[0], c[1], c[2], 1.0],
        }
    }));
}

pub(crate) struct MarkerResources {
    pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    capacity: usize,
    count: u32,
    scratch: Vec<MarkerInstance>,
}

impl MarkerResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::MARKERS_WGSL.into()),
        });
        // Quad corners for two triangles, unit disc inscribed
        let quad_vertices: [f32; 12] = [
            -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let capacity = 16;
        let instance_vb = create_instance_buffer(device, capacity);

        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 5,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("markers_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(helpers::depth_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            pipeline,
            quad_vb,
            instance_vb,
            capacity,
            count: 0,
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Refresh instance data; grows the buffer when the registry outgrows it.
    pub(crate) fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        hotspots: &HotspotRegistry,
        hovered: Option<usize>,
        radius: f32,
    ) {
        build_instances(hotspots, hovered, radius, &mut self.scratch);
        if self.scratch.len() > self.capacity {
            self.capacity = self.scratch.len().next_power_of_two();
            self.instance_vb = create_instance_buffer(device, self.capacity);
            log::debug!("[render] marker buffer grown to {}", self.capacity);
        }
        self.count = self.scratch.len() as u32;
        if self.count > 0 {
            queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.scratch));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("marker_instance_vb"),
        size: (std::mem::size_of::<MarkerInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ACTIVE_MARKER_COLOR, DEFAULT_MARKER_COLOR};
    use crate::hotspot::HotspotSpec;

    fn registry() -> HotspotRegistry {
        HotspotRegistry::new(
            vec![
                HotspotSpec::new("a", Vec3::new(0.0, 0.1, 0.0)),
                HotspotSpec::new("b", Vec3::new(0.1, 0.1, 0.0)),
            ],
            &[],
        )
        .unwrap()
    }

    #[test]
    fn instance_layout_is_64_bytes() {
        assert_eq!(std::mem::size_of::<MarkerInstance>(), 64);
    }

    #[test]
    fn instances_follow_state_and_hover() {
        let mut reg = registry();
        reg.toggle("b");
        let mut out = Vec::new();
        build_instances(&reg, Some(0), 0.01, &mut out);
        assert_eq!(out.len(), 2);
        let brightened = DEFAULT_MARKER_COLOR.map(|v| (v * HOVER_BRIGHTEN).min(1.0));
        assert_eq!(&out[0].color[..3], &brightened[..]);
        assert_eq!(&out[1].color[..3], &ACTIVE_MARKER_COLOR[..]);
        assert_eq!(out[1].center, [0.1, 0.1, 0.0]);
    }
}
