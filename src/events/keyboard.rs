use crate::constants::{HIDDEN_CLASS, HINT_ID};
use crate::dom;
use crate::input::{is_hint_key, light_nudge_for_key};
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn toggle_hint() {
    let Some(el) = dom::window_document().and_then(|d| d.get_element_by_id(HINT_ID)) else {
        return;
    };
    _ = el.class_list().toggle(HIDDEN_CLASS);
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, viewer: &Rc<RefCell<Viewer>>) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    if is_hint_key(&key) {
        toggle_hint();
        return;
    }
    let Some((axis, steps)) = light_nudge_for_key(&key, ev.shift_key()) else {
        return;
    };
    let pos = viewer
        .borrow_mut()
        .scene
        .lights
        .nudge_directional(axis, steps);
    log::info!(
        "[keys] light {:?} -> ({:.2}, {:.2}, {:.2})",
        axis,
        pos.x,
        pos.y,
        pos.z
    );
    ev.prevent_default();
}

pub fn wire_global_keydown(viewer: Rc<RefCell<Viewer>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &viewer);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
