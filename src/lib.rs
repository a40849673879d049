#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{CancellationToken, FrameLoop, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod labels;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;

    let viewport = dom::canvas_viewport(&canvas);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let viewer = Viewer::new(ViewerConfig::default(), viewport)?;

    let labels = labels::DomLabels::new(&document, constants::LABELS_CONTAINER_ID, &viewer.hotspots)?;
    let gpu = frame::init_gpu(&canvas, &viewer.scene).await;
    if gpu.is_none() {
        log::warn!("running without a renderer; hotspots stay clickable");
    }
    let viewer = Rc::new(RefCell::new(viewer));

    assets::load_skull(viewer.clone());

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
    });
    events::wire_global_keydown(viewer.clone());

    let token = CancellationToken::new();
    frame::wire_pagehide_cancel(token.clone());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        frames: FrameLoop::new(gpu, labels, token),
        canvas,
        hover_cursor: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
