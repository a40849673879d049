use glam::Vec3;

// Shared scene/interaction tuning constants used by both web and native frontends.

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0; // vertical field of view
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.4, 0.4];

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 0.2;
pub const ORBIT_MAX_DISTANCE: f32 = 0.7;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2; // keep the eye above the ground
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;

// Main mesh placement
pub const SKULL_NAME: &str = "skull";
pub const SKULL_ASSET_PATH: &str = "assets/skull.obj";
pub const SKULL_SCALE: f32 = 0.1;
pub const SKULL_POSITION: [f32; 3] = [0.0, 0.13, 0.0];
pub const SKULL_COLOR: [f32; 3] = [0.89, 0.85, 0.78]; // bone

// Ground plane
pub const GROUND_NAME: &str = "ground";
pub const GROUND_SIZE: f32 = 0.25;
pub const GROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_START: [f32; 3] = [0.0, 1.0, 0.0];
pub const SHADOW_MAP_SIZE: u32 = 512 * 3;
pub const LIGHT_STEP: f32 = 0.05; // one keyboard nudge
pub const LIGHT_X_RANGE: (f32, f32) = (-5.0, 5.0);
pub const LIGHT_Y_RANGE: (f32, f32) = (0.0, 5.0);
pub const LIGHT_Z_RANGE: (f32, f32) = (-5.0, 5.0);

pub const BACKGROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Device pixel ratio cap for the drawing surface
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Hotspot markers
pub const MARKER_RADIUS: f32 = 0.008; // disc radius and pick-sphere radius
pub const HOVER_BRIGHTEN: f32 = 1.3;

pub const DEFAULT_MARKER_COLOR: [f32; 3] = [0.95, 0.95, 0.95];
pub const ACTIVE_MARKER_COLOR: [f32; 3] = [0.9, 0.2, 0.2];

// Default hotspots: name, position, label text
pub const DEFAULT_HOTSPOTS: [(&str, [f32; 3], &str); 3] = [
    (
        "cranium",
        [0.0, 0.225, 0.01],
        "Cranium: the vault of bones that encloses the brain",
    ),
    (
        "orbit",
        [0.022, 0.165, 0.055],
        "Orbit: the socket that houses the eye",
    ),
    (
        "mandible",
        [0.0, 0.095, 0.06],
        "Mandible: the lower jaw, the only movable bone of the skull",
    ),
];

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::from(CAMERA_START)
}
