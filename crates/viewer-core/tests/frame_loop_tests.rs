use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{
    parse_obj, AssetStatus, Camera, CancellationToken, FrameLoop, FrameStatus, HotspotRegistry,
    LabelOverlay, MeshPlacement, SceneRenderer, SceneView, Viewer, ViewerConfig, ViewerError,
    Viewport,
};

#[derive(Default)]
struct Calls {
    renders: usize,
    resizes: Vec<(u32, u32)>,
    /// Worst misalignment between a marker's facing and the eye, per render.
    facing_error: Vec<f32>,
    skull_ready: Vec<bool>,
}

struct MockRenderer {
    calls: Rc<RefCell<Calls>>,
    fail_every: Option<usize>,
}

impl MockRenderer {
    fn new() -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (
            Self {
                calls: Rc::clone(&calls),
                fail_every: None,
            },
            calls,
        )
    }
}

fn worst_facing_error(hotspots: &HotspotRegistry, eye: Vec3) -> f32 {
    hotspots
        .iter()
        .map(|h| {
            let want = (eye - h.position()).normalize();
            1.0 - h.facing().dot(want)
        })
        .fold(0.0, f32::max)
}

impl SceneRenderer for MockRenderer {
    fn render(&mut self, view: &SceneView<'_>, camera: &Camera) -> anyhow::Result<()> {
        let mut c = self.calls.borrow_mut();
        c.renders += 1;
        c.facing_error
            .push(worst_facing_error(view.hotspots, camera.eye));
        c.skull_ready.push(view.scene.skull.ready().is_some());
        match self.fail_every {
            Some(n) if c.renders % n == 0 => Err(anyhow::anyhow!("device lost")),
            _ => Ok(()),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.borrow_mut().resizes.push((width, height));
    }
}

#[derive(Default)]
struct RecordingOverlay {
    syncs: usize,
    visible: Vec<String>,
}

impl LabelOverlay for RecordingOverlay {
    fn sync(&mut self, hotspots: &HotspotRegistry, _camera: &Camera, _viewport: &Viewport) {
        self.syncs += 1;
        self.visible = hotspots
            .iter()
            .filter(|h| h.label().is_some_and(|l| l.visible()))
            .map(|h| h.name().to_string())
            .collect();
    }
}

fn viewer() -> Viewer {
    Viewer::new(ViewerConfig::default(), Viewport::new(800.0, 600.0, 1.0)).unwrap()
}

#[test]
fn markers_face_camera_before_every_draw() {
    let mut viewer = viewer();
    let (renderer, calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());
    for _ in 0..5 {
        assert_eq!(frames.tick(&mut viewer), FrameStatus::Continue);
    }
    let c = calls.borrow();
    assert_eq!(c.renders, 5);
    for err in &c.facing_error {
        assert!(*err < 1e-5, "facing error {err}");
    }
}

#[test]
fn stationary_camera_has_no_orientation_drift() {
    let mut viewer = viewer();
    let (renderer, _calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());
    frames.tick(&mut viewer);
    let first: Vec<Quat> = viewer.hotspots.iter().map(|h| h.rotation()).collect();
    for _ in 0..100 {
        frames.tick(&mut viewer);
    }
    for (h, q0) in viewer.hotspots.iter().zip(&first) {
        assert!(h.rotation().abs_diff_eq(*q0, 1e-5), "{} drifted", h.name());
        assert!(worst_facing_error(&viewer.hotspots, viewer.camera.eye) < 1e-5);
    }
}

#[test]
fn markers_track_a_moving_camera() {
    let mut viewer = viewer();
    let (renderer, calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());
    viewer.on_pointer_down(100.0, 100.0);
    viewer.on_pointer_move(300.0, 150.0);
    viewer.on_pointer_up();
    let start = viewer.camera.eye;
    for _ in 0..20 {
        frames.tick(&mut viewer);
    }
    assert!(!viewer.camera.eye.abs_diff_eq(start, 1e-4));
    assert!(calls.borrow().facing_error.iter().all(|e| *e < 1e-5));
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let mut viewer = viewer();
    let (mut renderer, calls) = MockRenderer::new();
    renderer.fail_every = Some(2);
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());
    for _ in 0..6 {
        assert_eq!(frames.tick(&mut viewer), FrameStatus::Continue);
    }
    assert_eq!(calls.borrow().renders, 6);
    assert_eq!(frames.frames(), 6);
}

#[test]
fn cancellation_stops_before_drawing() {
    let mut viewer = viewer();
    let (renderer, calls) = MockRenderer::new();
    let token = CancellationToken::new();
    let mut frames = FrameLoop::new(renderer, (), token.clone());
    frames.tick(&mut viewer);
    token.cancel();
    assert!(frames.token().is_cancelled());
    assert_eq!(frames.tick(&mut viewer), FrameStatus::Stopped);
    assert_eq!(frames.tick(&mut viewer), FrameStatus::Stopped);
    assert_eq!(calls.borrow().renders, 1);
}

#[test]
fn resize_updates_camera_and_surface_together() {
    let mut viewer = viewer();
    let (renderer, calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());
    frames.resize(&mut viewer, Viewport::new(400.0, 400.0, 3.0));
    assert!((viewer.camera.aspect - 1.0).abs() < 1e-6);
    // pixel ratio is capped at 2
    assert_eq!(calls.borrow().resizes, vec![(800, 800)]);
    assert_eq!(viewer.viewport().width, 400.0);
}

#[test]
fn overlay_mirrors_label_visibility() {
    let mut viewer = viewer();
    let (renderer, _calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, RecordingOverlay::default(), CancellationToken::new());
    let name = viewer.hotspots.iter().next().unwrap().name().to_string();
    frames.tick(&mut viewer);
    assert!(frames.overlay().visible.is_empty());
    viewer.hotspots.toggle(&name);
    frames.tick(&mut viewer);
    assert_eq!(frames.overlay().visible, vec![name]);
    assert_eq!(frames.overlay().syncs, 2);
}

const QUAD_OBJ: &[u8] = b"v -1 0 -1\nv 1 0 -1\nv 1 2 1\nv -1 2 1\nf 1 2 3\nf 1 3 4\n";

#[test]
fn loop_runs_while_mesh_pending_then_failed_then_ready() {
    let mut viewer = viewer();
    let (renderer, calls) = MockRenderer::new();
    let mut frames = FrameLoop::new(renderer, (), CancellationToken::new());

    assert!(viewer.scene.skull.is_pending());
    frames.tick(&mut viewer);

    viewer.resolve_mesh_bytes(Err(ViewerError::AssetIo {
        path: "assets/skull.obj".into(),
        reason: "404".into(),
    }));
    assert!(matches!(viewer.scene.skull.status(), AssetStatus::Failed(_)));
    frames.tick(&mut viewer);

    // hotspots stay interactive without the mesh
    let name = viewer.hotspots.iter().next().unwrap().name().to_string();
    assert!(viewer.hotspots.toggle(&name).is_some());

    let rev = viewer.scene.skull.revision();
    viewer.resolve_mesh_bytes(Ok(QUAD_OBJ.to_vec()));
    assert_eq!(viewer.scene.skull.revision(), rev + 1);
    frames.tick(&mut viewer);

    assert_eq!(calls.borrow().skull_ready, vec![false, false, true]);
}

#[test]
fn empty_mesh_is_recorded_as_failure() {
    let mut viewer = viewer();
    viewer.resolve_mesh_bytes(Ok(b"# exported with no geometry\n".to_vec()));
    assert!(matches!(viewer.scene.skull.status(), AssetStatus::Failed(_)));
}

#[test]
fn parsed_mesh_is_placed_in_world() {
    let placement = MeshPlacement {
        scale: 0.5,
        translation: Vec3::new(0.0, 1.0, 0.0),
    };
    let mesh = parse_obj(QUAD_OBJ, placement).unwrap();
    assert_eq!(mesh.triangle_count(), 2);
    let c = mesh.bounds.center();
    assert!(c.abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), 1e-5));
}
