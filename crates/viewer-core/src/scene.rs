//! Static scene contents: ground plane, main mesh slot and lights, plus the
//! candidate list picking walks over.

use crate::asset::{AssetSlot, MeshData};
use crate::constants::*;
use crate::geometry::Bounds;
use crate::hotspot::HotspotRegistry;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    Hotspot,
    Mesh,
    Ground,
}

/// Something picking can hit. Borrowed from the scene for one query only.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub kind: RenderKind,
    pub bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightAxis {
    X,
    Y,
    Z,
}

impl LightAxis {
    /// `x`, `y` or `z`, either case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "x" | "X" => Some(LightAxis::X),
            "y" | "Y" => Some(LightAxis::Y),
            "z" | "Z" => Some(LightAxis::Z),
            _ => None,
        }
    }

    fn range(self) -> (f32, f32) {
        match self {
            LightAxis::X => LIGHT_X_RANGE,
            LightAxis::Y => LIGHT_Y_RANGE,
            LightAxis::Z => LIGHT_Z_RANGE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    /// Lights toward the origin from here.
    pub position: Vec3,
    /// Shadow settings are carried as configuration only; the renderer does
    /// not draw shadows.
    pub cast_shadow: bool,
    pub shadow_map_size: u32,
}

#[derive(Clone, Debug)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: AMBIENT_INTENSITY,
            },
            directional: DirectionalLight {
                color: [1.0, 1.0, 1.0],
                intensity: DIRECTIONAL_INTENSITY,
                position: Vec3::from(DIRECTIONAL_START),
                cast_shadow: true,
                shadow_map_size: SHADOW_MAP_SIZE,
            },
        }
    }
}

impl LightRig {
    /// Move the directional light by `steps` increments along `axis`,
    /// snapped to the step grid and clamped to the tuning range.
    pub fn nudge_directional(&mut self, axis: LightAxis, steps: i32) -> Vec3 {
        let (lo, hi) = axis.range();
        let pos = &mut self.directional.position;
        let v = match axis {
            LightAxis::X => &mut pos.x,
            LightAxis::Y => &mut pos.y,
            LightAxis::Z => &mut pos.z,
        };
        let snapped = ((*v + steps as f32 * LIGHT_STEP) / LIGHT_STEP).round() * LIGHT_STEP;
        *v = snapped.clamp(lo, hi);
        *pos
    }

    /// Unit vector pointing from the scene toward the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.directional.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[derive(Clone, Debug)]
pub struct Ground {
    pub size: f32,
    pub color: [f32; 3],
}

impl Ground {
    pub fn bounds(&self) -> Bounds {
        let half = self.size * 0.5;
        Bounds::Rect {
            center: Vec3::ZERO,
            half_u: Vec3::new(half, 0.0, 0.0),
            half_v: Vec3::new(0.0, 0.0, half),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub ground: Ground,
    pub skull: AssetSlot<MeshData>,
    pub skull_color: [f32; 3],
    pub lights: LightRig,
    pub background: [f32; 3],
    pub marker_radius: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            ground: Ground {
                size: GROUND_SIZE,
                color: GROUND_COLOR,
            },
            skull: AssetSlot::pending(),
            skull_color: SKULL_COLOR,
            lights: LightRig::default(),
            background: BACKGROUND_COLOR,
            marker_radius: MARKER_RADIUS,
        }
    }
}

impl Scene {
    /// Names hotspots may not use.
    pub const RESERVED_NAMES: [&'static str; 2] = [GROUND_NAME, SKULL_NAME];

    /// Every pickable renderable, in tie-break order: hotspots (registry
    /// order), then the skull if loaded, then the ground.
    pub fn candidates<'a>(
        &'a self,
        hotspots: &'a HotspotRegistry,
    ) -> impl Iterator<Item = Candidate<'a>> + 'a {
        let radius = self.marker_radius;
        let markers = hotspots.iter().map(move |h| Candidate {
            name: h.name(),
            kind: RenderKind::Hotspot,
            bounds: Bounds::Sphere {
                center: h.position(),
                radius,
            },
        });
        let skull = self.skull.ready().map(|mesh| Candidate {
            name: SKULL_NAME,
            kind: RenderKind::Mesh,
            bounds: mesh.bounds,
        });
        let ground = Candidate {
            name: GROUND_NAME,
            kind: RenderKind::Ground,
            bounds: self.ground.bounds(),
        };
        markers.chain(skull).chain(std::iter::once(ground))
    }
}
