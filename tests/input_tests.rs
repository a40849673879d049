// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}
mod constants {
    include!("../src/constants.rs");
}

use glam::Vec2;
use input::*;
use viewer_core::{to_ndc, LightAxis};

#[test]
fn canvas_px_is_relative_to_rect() {
    let p = canvas_css_px(150.0, 80.0, 50.0, 30.0);
    assert_eq!(p, Vec2::new(100.0, 50.0));
}

#[test]
fn canvas_px_feeds_ndc_corners() {
    // canvas offset on the page must not shift NDC
    let (left, top, w, h) = (20.0, 40.0, 800.0, 600.0);
    let tl = canvas_css_px(left, top, left, top);
    let br = canvas_css_px(left + w, top + h, left, top);
    assert_eq!(to_ndc(tl.x, tl.y, w, h), Vec2::new(-1.0, 1.0));
    assert_eq!(to_ndc(br.x, br.y, w, h), Vec2::new(1.0, -1.0));
}

#[test]
fn wheel_delta_units_are_normalized() {
    let line = constants::WHEEL_LINE_PX;
    assert_eq!(wheel_delta_px(120.0, DOM_DELTA_PIXEL, 600.0, line), 120.0);
    assert_eq!(wheel_delta_px(3.0, DOM_DELTA_LINE, 600.0, line), 3.0 * line);
    assert_eq!(wheel_delta_px(-1.0, DOM_DELTA_PAGE, 600.0, line), -600.0);
    // unknown modes pass through
    assert_eq!(wheel_delta_px(5.0, 7, 600.0, line), 5.0);
}

#[test]
fn light_keys_map_to_axes() {
    assert_eq!(light_nudge_for_key("x", false), Some((LightAxis::X, 1)));
    assert_eq!(light_nudge_for_key("Y", true), Some((LightAxis::Y, -1)));
    assert_eq!(light_nudge_for_key("z", false), Some((LightAxis::Z, 1)));
    assert_eq!(light_nudge_for_key("ArrowUp", false), None);
    assert_eq!(light_nudge_for_key("h", false), None);
}

#[test]
fn hint_key() {
    assert!(is_hint_key("h"));
    assert!(is_hint_key("H"));
    assert!(!is_hint_key("x"));
}

#[test]
fn label_transform_is_css_translate() {
    assert_eq!(
        label_transform(Vec2::new(12.345, 7.0)),
        "translate(12.3px, 7.0px)"
    );
}
