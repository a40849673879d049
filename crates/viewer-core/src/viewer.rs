//! The viewer context: one owner for camera, controls, pointer, hotspots and
//! scene. Front-ends hold it behind `Rc<RefCell<_>>` and hand it to the frame
//! loop and the input handlers.

use crate::asset::{parse_obj, MeshData};
use crate::camera::{Camera, Viewport};
use crate::config::{MeshConfig, ViewerConfig};
use crate::constants::{GROUND_COLOR, SKULL_NAME};
use crate::controls::OrbitControls;
use crate::error::Result;
use crate::geometry::Ray;
use crate::hotspot::HotspotRegistry;
use crate::interaction::{self, Activation};
use crate::picking;
use crate::pointer::{DragState, PointerState};
use crate::scene::{Ground, Scene};
use glam::Vec2;

pub struct Viewer {
    pub camera: Camera,
    pub controls: OrbitControls,
    pub pointer: PointerState,
    pub drag: DragState,
    pub hotspots: HotspotRegistry,
    pub scene: Scene,
    viewport: Viewport,
    mesh_config: MeshConfig,
    ray: Option<Ray>,
    hovered: Option<usize>,
}

impl Viewer {
    pub fn new(config: ViewerConfig, viewport: Viewport) -> Result<Self> {
        let hotspots = HotspotRegistry::new(config.hotspots, &Scene::RESERVED_NAMES)?;
        let camera = Camera {
            eye: config.camera.position,
            target: config.camera.target,
            aspect: viewport.aspect(),
            fovy_radians: config.camera.fov_deg.to_radians(),
            znear: config.camera.near,
            zfar: config.camera.far,
            ..Camera::default()
        };
        let scene = Scene {
            ground: Ground {
                size: config.ground_size,
                color: GROUND_COLOR,
            },
            skull_color: config.skull.color,
            lights: config.lights,
            background: config.background,
            marker_radius: config.marker_radius,
            ..Scene::default()
        };
        log::info!(
            "[viewer] hotspots={} viewport={}x{} mesh={}",
            hotspots.len(),
            viewport.width,
            viewport.height,
            config.skull.path
        );
        Ok(Self {
            controls: OrbitControls::new(config.controls, config.camera.target),
            camera,
            pointer: PointerState::default(),
            drag: DragState::default(),
            hotspots,
            scene,
            viewport,
            mesh_config: config.skull,
            ray: None,
            hovered: None,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mesh_path(&self) -> &str {
        &self.mesh_config.path
    }

    /// Resize hook: camera aspect follows the viewport. The renderer surface is
    /// resized by the frame loop in the same call.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(&viewport);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Vec2 {
        if let Some(delta) = self.drag.update(x, y) {
            self.controls.on_drag(delta.x, delta.y, self.viewport.height);
        }
        self.pointer.on_pointer_move(x, y, &self.viewport)
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.drag.begin(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.drag.end();
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.controls.on_wheel(delta_y);
    }

    /// Click / touch-end handler.
    pub fn on_activate(&mut self) -> Activation {
        interaction::on_activate(&self.pointer, &self.camera, &self.scene, &mut self.hotspots)
    }

    /// Parse and install the main mesh, or record the failure.
    pub fn resolve_mesh_bytes(&mut self, bytes: Result<Vec<u8>>) {
        let placement = self.mesh_config.placement;
        let outcome = bytes.and_then(|b| parse_obj(&b, placement));
        self.resolve_mesh(outcome);
    }

    pub fn resolve_mesh(&mut self, outcome: Result<MeshData>) {
        if let Ok(mesh) = &outcome {
            log::info!(
                "[asset] {} triangles={} bounds={:?}",
                SKULL_NAME,
                mesh.triangle_count(),
                mesh.bounds
            );
        }
        self.scene.skull.resolve(SKULL_NAME, outcome);
    }

    /// Per-frame bookkeeping: re-cast the pointer ray and note which hotspot
    /// (if any) is under it. No activation side effects.
    pub fn refresh_ray(&mut self) {
        let ndc = self.pointer.ndc();
        self.ray = self
            .pointer
            .in_viewport()
            .then(|| self.camera.ray_through_ndc(ndc));
        self.hovered = picking::pick(ndc, &self.camera, self.scene.candidates(&self.hotspots))
            .and_then(|hit| self.hotspots.index_of(hit.name));
    }

    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    /// Registry index of the hotspot under the pointer as of the last frame.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }
}
