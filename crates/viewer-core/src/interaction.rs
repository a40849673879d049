//! Click/tap activation: pick under the pointer and toggle the hotspot hit.

use crate::camera::Camera;
use crate::hotspot::{HotspotRegistry, HotspotState};
use crate::picking;
use crate::pointer::PointerState;
use crate::scene::Scene;

/// What an activation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// A hotspot was hit and flipped to `state`.
    Toggled { name: String, state: HotspotState },
    /// Something that is not a hotspot was hit (ground, skull).
    Ignored { name: String },
    /// Nothing under the pointer.
    Miss,
}

/// Resolve the current pick to a hotspot and flip it. Non-hotspot hits and
/// misses leave the registry untouched.
pub fn on_activate(
    pointer: &PointerState,
    camera: &Camera,
    scene: &Scene,
    hotspots: &mut HotspotRegistry,
) -> Activation {
    let hit = picking::pick(pointer.ndc(), camera, scene.candidates(hotspots))
        .map(|h| h.name.to_owned());
    let Some(name) = hit else {
        log::debug!("[click] miss");
        return Activation::Miss;
    };
    match hotspots.toggle(&name) {
        Some(state) => {
            log::info!("[click] toggle hotspot {} -> {:?}", name, state);
            Activation::Toggled { name, state }
        }
        None => {
            log::debug!("[click] ignored hit on {}", name);
            Activation::Ignored { name }
        }
    }
}
