//! Platform-independent core of the skull viewer: pointer tracking, camera and
//! orbit controls, picking, the hotspot registry, click handling and the frame
//! loop. The web and native front-ends wire host events into `Viewer` and drive
//! `FrameLoop` from their display-refresh callback.

pub mod asset;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod hotspot;
pub mod interaction;
pub mod picking;
pub mod pointer;
pub mod scene;
pub mod viewer;

#[cfg(feature = "gpu")]
pub mod render;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

pub use asset::{parse_obj, AssetSlot, AssetStatus, MeshData, MeshPlacement};
pub use camera::{Camera, Viewport};
pub use config::{CameraConfig, MeshConfig, ViewerConfig};
pub use constants::*;
pub use controls::{OrbitConfig, OrbitControls};
pub use error::{Result, ViewerError};
pub use frame::{
    CancellationToken, FrameLoop, FrameStatus, LabelOverlay, SceneRenderer, SceneView,
};
pub use geometry::{Bounds, Ray};
pub use hotspot::{default_hotspots, Hotspot, HotspotRegistry, HotspotSpec, HotspotState, Label};
pub use interaction::Activation;
pub use picking::{pick, pick_nearest, PickHit};
pub use pointer::{to_ndc, DragState, PointerState};
pub use scene::{Candidate, LightAxis, LightRig, RenderKind, Scene};
pub use viewer::Viewer;
