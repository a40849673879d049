use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{Viewer, ViewerError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn io_error(path: &str, reason: impl std::fmt::Debug) -> ViewerError {
    ViewerError::AssetIo {
        path: path.to_string(),
        reason: format!("{:?}", reason),
    }
}

pub async fn fetch_bytes(path: &str) -> viewer_core::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| io_error(path, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| io_error(path, e))?;
    let resp: web::Response = resp.dyn_into().map_err(|e| io_error(path, e))?;
    if !resp.ok() {
        return Err(io_error(path, format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| io_error(path, e))?)
        .await
        .map_err(|e| io_error(path, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Start loading the skull mesh; the viewer keeps rendering while it is
/// pending and simply goes without it on failure.
pub fn load_skull(viewer: Rc<RefCell<Viewer>>) {
    let path = viewer.borrow().mesh_path().to_string();
    log::info!("[asset] fetching {}", path);
    spawn_local(async move {
        let bytes = fetch_bytes(&path).await;
        viewer.borrow_mut().resolve_mesh_bytes(bytes);
    });
}
