//! Hotspot registry: the fixed set of named, clickable markers.
//!
//! Hotspots are created once from their specs and live for the whole session.
//! The only mutations are `toggle` (state + label visibility together) and
//! `orient_all_toward` (billboarding), so the label invariant holds at every
//! point a caller can observe.

use crate::constants::*;
use crate::error::{Result, ViewerError};
use fnv::FnvHashMap;
use glam::{Mat3, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HotspotState {
    #[default]
    Default,
    Active,
}

impl HotspotState {
    pub fn flipped(self) -> Self {
        match self {
            HotspotState::Default => HotspotState::Active,
            HotspotState::Active => HotspotState::Default,
        }
    }

    pub fn is_active(self) -> bool {
        self == HotspotState::Active
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: String,
    visible: bool,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// Authoring-time description of a hotspot.
#[derive(Clone, Debug)]
pub struct HotspotSpec {
    pub name: String,
    pub position: Vec3,
    pub default_color: [f32; 3],
    pub active_color: [f32; 3],
    pub label: Option<String>,
}

impl HotspotSpec {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            default_color: DEFAULT_MARKER_COLOR,
            active_color: ACTIVE_MARKER_COLOR,
            label: None,
        }
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    pub fn with_colors(mut self, default_color: [f32; 3], active_color: [f32; 3]) -> Self {
        self.default_color = default_color;
        self.active_color = active_color;
        self
    }
}

/// The three labeled markers placed around the skull.
pub fn default_hotspots() -> Vec<HotspotSpec> {
    DEFAULT_HOTSPOTS
        .iter()
        .map(|(name, pos, text)| HotspotSpec::new(*name, Vec3::from(*pos)).with_label(*text))
        .collect()
}

#[derive(Clone, Debug)]
pub struct Hotspot {
    name: String,
    position: Vec3,
    state: HotspotState,
    label: Option<Label>,
    rotation: Quat,
    default_color: [f32; 3],
    active_color: [f32; 3],
}

impl Hotspot {
    fn from_spec(spec: HotspotSpec) -> Self {
        Self {
            name: spec.name,
            position: spec.position,
            state: HotspotState::Default,
            label: spec.label.map(|text| Label {
                text,
                visible: false,
            }),
            rotation: Quat::IDENTITY,
            default_color: spec.default_color,
            active_color: spec.active_color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn state(&self) -> HotspotState {
        self.state
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Local +Z axis in world space.
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Color for the current state.
    pub fn color(&self) -> [f32; 3] {
        match self.state {
            HotspotState::Default => self.default_color,
            HotspotState::Active => self.active_color,
        }
    }

    fn toggle(&mut self) -> HotspotState {
        self.state = self.state.flipped();
        if let Some(label) = &mut self.label {
            label.visible = self.state.is_active();
        }
        self.state
    }

    fn look_at(&mut self, point: Vec3) {
        if let Some(rotation) = look_rotation(point - self.position, Vec3::Y) {
            self.rotation = rotation;
        }
    }
}

/// Rotation whose local +Z points along `forward`, keeping local +Y as close
/// to `up` as possible. `None` when `forward` is degenerate.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let fwd = forward.try_normalize()?;
    match up.cross(fwd).try_normalize() {
        Some(right) => {
            let true_up = fwd.cross(right);
            Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, fwd)).normalize())
        }
        // forward parallel to up: any roll is as good as another
        None => Some(Quat::from_rotation_arc(Vec3::Z, fwd)),
    }
}

#[derive(Clone, Debug, Default)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    index: FnvHashMap<String, usize>,
}

impl HotspotRegistry {
    /// Build the registry. Names must be unique and must not collide with
    /// `reserved` (names of non-hotspot scene geometry).
    pub fn new(
        specs: impl IntoIterator<Item = HotspotSpec>,
        reserved: &[&str],
    ) -> Result<Self> {
        let mut registry = Self::default();
        for spec in specs {
            if reserved.contains(&spec.name.as_str()) {
                return Err(ViewerError::ReservedHotspotName(spec.name));
            }
            if registry.index.contains_key(&spec.name) {
                return Err(ViewerError::DuplicateHotspot(spec.name));
            }
            registry
                .index
                .insert(spec.name.clone(), registry.hotspots.len());
            registry.hotspots.push(Hotspot::from_spec(spec));
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Hotspot> {
        self.index.get(name).map(|&i| &self.hotspots[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Flip the named hotspot and its label. Returns the new state, or `None`
    /// when no hotspot has that name (nothing changes in that case).
    pub fn toggle(&mut self, name: &str) -> Option<HotspotState> {
        let i = self.index_of(name)?;
        Some(self.hotspots[i].toggle())
    }

    /// Billboard every hotspot toward `point` (normally the camera eye).
    pub fn orient_all_toward(&mut self, point: Vec3) {
        for h in &mut self.hotspots {
            h.look_at(point);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter()
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Labels currently shown, in registry order.
    pub fn visible_labels(&self) -> SmallVec<[&Label; 4]> {
        self.hotspots
            .iter()
            .filter_map(|h| h.label.as_ref().filter(|l| l.visible))
            .collect()
    }

    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.hotspots
            .iter()
            .filter(|h| h.state.is_active())
            .map(|h| h.name())
    }
}
