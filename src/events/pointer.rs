use crate::constants::WHEEL_LINE_PX;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{Activation, Viewer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
}

impl InputWiring {
    fn canvas_px(&self, client_x: f32, client_y: f32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::canvas_css_px(client_x, client_y, rect.left() as f32, rect.top() as f32)
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_click(&w);
    wire_wheel(&w);
    wire_touch(&w);
}

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    // on window so drags keep orbiting past the canvas edge
    listen(&window, "pointermove", move |ev: web::PointerEvent| {
        let pos = w.canvas_px(ev.client_x() as f32, ev.client_y() as f32);
        w.viewer.borrow_mut().on_pointer_move(pos.x, pos.y);
    });
}

fn wire_pointerdown(w: &InputWiring) {
    let canvas = w.canvas.clone();
    let w = w.clone();
    listen(&canvas, "pointerdown", move |ev: web::PointerEvent| {
        // touch orbiting is driven by the touch handlers
        if ev.pointer_type() == "touch" {
            return;
        }
        let pos = w.canvas_px(ev.client_x() as f32, ev.client_y() as f32);
        w.viewer.borrow_mut().on_pointer_down(pos.x, pos.y);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointerup(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    listen(&window, "pointerup", move |_ev: web::PointerEvent| {
        w.viewer.borrow_mut().on_pointer_up();
    });
}

fn log_activation(source: &str, a: &Activation) {
    match a {
        Activation::Toggled { name, state } => {
            log::info!("[{}] {} -> {:?}", source, name, state)
        }
        Activation::Ignored { name } => log::debug!("[{}] not a hotspot: {}", source, name),
        Activation::Miss => log::debug!("[{}] miss", source),
    }
}

fn wire_click(w: &InputWiring) {
    let canvas = w.canvas.clone();
    let w = w.clone();
    listen(&canvas, "click", move |ev: web::MouseEvent| {
        let pos = w.canvas_px(ev.client_x() as f32, ev.client_y() as f32);
        let mut viewer = w.viewer.borrow_mut();
        viewer.on_pointer_move(pos.x, pos.y);
        let a = viewer.on_activate();
        log_activation("click", &a);
    });
}

fn wire_wheel(w: &InputWiring) {
    let canvas = w.canvas.clone();
    let w = w.clone();
    listen(&canvas, "wheel", move |ev: web::WheelEvent| {
        let page_h = w.viewer.borrow().viewport().height;
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), page_h, WHEEL_LINE_PX);
        w.viewer.borrow_mut().on_wheel(dy);
        ev.prevent_default();
    });
}

fn first_touch(list: &web::TouchList) -> Option<web::Touch> {
    list.get(0)
}

fn wire_touch(w: &InputWiring) {
    let canvas = w.canvas.clone();
    {
        let w = w.clone();
        listen(&canvas, "touchstart", move |ev: web::TouchEvent| {
            if let Some(t) = first_touch(&ev.touches()) {
                let pos = w.canvas_px(t.client_x() as f32, t.client_y() as f32);
                let mut viewer = w.viewer.borrow_mut();
                viewer.on_pointer_move(pos.x, pos.y);
                viewer.on_pointer_down(pos.x, pos.y);
            }
        });
    }
    {
        let w = w.clone();
        listen(&canvas, "touchmove", move |ev: web::TouchEvent| {
            if let Some(t) = first_touch(&ev.touches()) {
                let pos = w.canvas_px(t.client_x() as f32, t.client_y() as f32);
                w.viewer.borrow_mut().on_pointer_move(pos.x, pos.y);
            }
            ev.prevent_default();
        });
    }
    {
        let w = w.clone();
        listen(&canvas, "touchend", move |ev: web::TouchEvent| {
            let mut viewer = w.viewer.borrow_mut();
            if let Some(t) = first_touch(&ev.changed_touches()) {
                let pos = w.canvas_px(t.client_x() as f32, t.client_y() as f32);
                viewer.on_pointer_move(pos.x, pos.y);
                let a = viewer.on_activate();
                log_activation("tap", &a);
            }
            viewer.on_pointer_up();
            // suppress the synthesized click so one tap toggles once
            ev.prevent_default();
        });
    }
}
