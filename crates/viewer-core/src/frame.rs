//! Per-frame driver. The host calls `tick` once per display refresh until the
//! cancellation token is signaled; `tick` never fails.

use crate::camera::{Camera, Viewport};
use crate::hotspot::HotspotRegistry;
use crate::scene::Scene;
use crate::viewer::Viewer;
use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Draws one frame. Implemented by the wgpu renderer and by test doubles.
pub trait SceneRenderer {
    fn render(&mut self, view: &SceneView<'_>, camera: &Camera) -> anyhow::Result<()>;

    /// New surface size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);
}

/// No GPU: picking, billboarding and labels still run, nothing is drawn.
impl<R: SceneRenderer> SceneRenderer for Option<R> {
    fn render(&mut self, view: &SceneView<'_>, camera: &Camera) -> anyhow::Result<()> {
        match self {
            Some(r) => r.render(view, camera),
            None => Ok(()),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(r) = self {
            r.resize(width, height);
        }
    }
}

/// Read-only snapshot of what to draw this frame.
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub hotspots: &'a HotspotRegistry,
    pub hovered: Option<usize>,
}

/// Screen-space label surface. Positions labels from their 3D anchors and
/// mirrors each label's visibility/content.
pub trait LabelOverlay {
    fn sync(&mut self, hotspots: &HotspotRegistry, camera: &Camera, viewport: &Viewport);
}

impl LabelOverlay for () {
    fn sync(&mut self, _: &HotspotRegistry, _: &Camera, _: &Viewport) {}
}

/// Shared stop flag for the loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

pub struct FrameLoop<R, O = ()> {
    renderer: R,
    overlay: O,
    cancel: CancellationToken,
    last_instant: Instant,
    frames: u64,
}

impl<R: SceneRenderer, O: LabelOverlay> FrameLoop<R, O> {
    pub fn new(renderer: R, overlay: O, cancel: CancellationToken) -> Self {
        Self {
            renderer,
            overlay,
            cancel,
            last_instant: Instant::now(),
            frames: 0,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// One iteration: controls, (a) ray refresh, (b) billboarding, (c) draw,
    /// then label sync. Draw errors are logged and the loop carries on.
    pub fn tick(&mut self, viewer: &mut Viewer) -> FrameStatus {
        if self.cancel.is_cancelled() {
            return FrameStatus::Stopped;
        }
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        if dt.as_secs_f32() > 0.25 {
            log::debug!("[frame] long frame {:.0}ms", dt.as_secs_f32() * 1000.0);
        }

        viewer.controls.update(&mut viewer.camera);
        viewer.refresh_ray();
        let eye = viewer.camera.eye;
        viewer.hotspots.orient_all_toward(eye);

        let view = SceneView {
            scene: &viewer.scene,
            hotspots: &viewer.hotspots,
            hovered: viewer.hovered(),
        };
        if let Err(e) = self.renderer.render(&view, &viewer.camera) {
            log::error!("render error: {:?}", e);
        }
        self.overlay
            .sync(&viewer.hotspots, &viewer.camera, &viewer.viewport());

        self.frames += 1;
        FrameStatus::Continue
    }

    /// Resize hook: camera aspect and surface size change together, before
    /// the next `tick`.
    pub fn resize(&mut self, viewer: &mut Viewer, viewport: Viewport) {
        viewer.resize(viewport);
        let (w, h) = viewport.physical_size();
        self.renderer.resize(w, h);
        log::info!("[frame] resize {}x{} ({}x{} px)", viewport.width, viewport.height, w, h);
    }
}
