// Pure input helpers. No DOM access here so host tests can include this file.

use glam::Vec2;
use viewer_core::LightAxis;

pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Client coordinates relative to the canvas's top-left corner, in CSS pixels.
#[inline]
pub fn canvas_css_px(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

/// Normalize a wheel delta to pixels whatever unit the browser reports.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height: f32, line_px: f32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        DOM_DELTA_LINE => d * line_px,
        DOM_DELTA_PAGE => d * page_height,
        _ => d,
    }
}

/// Keyboard tuning of the directional light: `x`, `y` or `z` steps that
/// coordinate up, with Shift held it steps down.
pub fn light_nudge_for_key(key: &str, shift: bool) -> Option<(LightAxis, i32)> {
    let axis = LightAxis::from_key(key)?;
    Some((axis, if shift { -1 } else { 1 }))
}

/// Hint overlay toggle.
#[inline]
pub fn is_hint_key(key: &str) -> bool {
    matches!(key, "h" | "H")
}

/// CSS transform placing a label's anchor at a viewport pixel.
pub fn label_transform(px: Vec2) -> String {
    format!("translate({:.1}px, {:.1}px)", px.x, px.y)
}
