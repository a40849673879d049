use crate::asset::MeshPlacement;
use crate::constants::*;
use crate::controls::OrbitConfig;
use crate::hotspot::{default_hotspots, HotspotSpec};
use crate::scene::LightRig;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: camera_start_vec3(),
            target: Vec3::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MeshConfig {
    /// Opaque to the core; resolved by the front-end's loader.
    pub path: String,
    pub placement: MeshPlacement,
    pub color: [f32; 3],
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: SKULL_ASSET_PATH.to_string(),
            placement: MeshPlacement {
                scale: SKULL_SCALE,
                translation: Vec3::from(SKULL_POSITION),
            },
            color: SKULL_COLOR,
        }
    }
}

/// Everything needed to build a `Viewer`.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controls: OrbitConfig,
    pub skull: MeshConfig,
    pub ground_size: f32,
    pub lights: LightRig,
    pub background: [f32; 3],
    pub marker_radius: f32,
    pub hotspots: Vec<HotspotSpec>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            controls: OrbitConfig::default(),
            skull: MeshConfig::default(),
            ground_size: GROUND_SIZE,
            lights: LightRig::default(),
            background: BACKGROUND_COLOR,
            marker_radius: MARKER_RADIUS,
            hotspots: default_hotspots(),
        }
    }
}

impl ViewerConfig {
    pub fn with_mesh_path(mut self, path: impl Into<String>) -> Self {
        self.skull.path = path.into();
        self
    }

    pub fn with_hotspots(mut self, hotspots: Vec<HotspotSpec>) -> Self {
        self.hotspots = hotspots;
        self
    }
}
