use crate::dom;
use crate::labels::DomLabels;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::render::GpuRenderer;
use viewer_core::{CancellationToken, FrameLoop, FrameStatus, Scene, Viewer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Rc<RefCell<Viewer>>,
    pub frames: FrameLoop<Option<GpuRenderer<'static>>, DomLabels>,
    pub canvas: web::HtmlCanvasElement,
    pub hover_cursor: bool,
}

impl FrameContext {
    pub fn frame(&mut self) -> FrameStatus {
        let mut viewer = self.viewer.borrow_mut();
        // resize before the tick so aspect and surface agree for this frame
        let viewport = dom::canvas_viewport(&self.canvas);
        if viewport != viewer.viewport() {
            dom::sync_canvas_backing_size(&self.canvas, &viewport);
            self.frames.resize(&mut viewer, viewport);
        }
        let status = self.frames.tick(&mut viewer);

        let hovering = viewer.hovered().is_some();
        if hovering != self.hover_cursor {
            let cursor = if hovering { "pointer" } else { "" };
            _ = self.canvas.style().set_property("cursor", cursor);
            self.hover_cursor = hovering;
        }
        status
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Option<GpuRenderer<'static>> {
    let instance = wgpu::Instance::default();
    let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(s) => s,
        Err(e) => {
            log::error!("WebGPU surface error: {:?}", e);
            return None;
        }
    };
    match GpuRenderer::new(&instance, surface, canvas.width(), canvas.height(), scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Run the frame on every animation frame until the loop reports `Stopped`.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx.borrow_mut().frame() == FrameStatus::Stopped {
            log::info!("[frame] loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Signal the loop to stop when the page is being unloaded.
pub fn wire_pagehide_cancel(token: CancellationToken) {
    let closure = Closure::wrap(Box::new(move || {
        token.cancel();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
