use crate::camera::Viewport;
use glam::Vec2;

/// Convert a pointer position in viewport pixels to normalized device
/// coordinates. Not clamped: positions outside the viewport map outside
/// [-1, 1].
#[inline]
pub fn to_ndc(raw_x: f32, raw_y: f32, viewport_width: f32, viewport_height: f32) -> Vec2 {
    let w = viewport_width.max(1.0);
    let h = viewport_height.max(1.0);
    Vec2::new((raw_x / w) * 2.0 - 1.0, -(raw_y / h) * 2.0 + 1.0)
}

/// Last known pointer position in NDC. Overwritten on every move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    ndc: Vec2,
}

impl PointerState {
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32, viewport: &Viewport) -> Vec2 {
        self.ndc = to_ndc(raw_x, raw_y, viewport.width, viewport.height);
        self.ndc
    }

    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// True when the last position lies inside the viewport.
    pub fn in_viewport(&self) -> bool {
        self.ndc.x.abs() <= 1.0 && self.ndc.y.abs() <= 1.0
    }
}

/// Drag bookkeeping for the orbit controls (pixels since the last move).
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Returns the pixel delta since the previous call while dragging.
    pub fn update(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = Vec2::new(x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
