use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use viewer_core::render::GpuRenderer;
use viewer_core::{
    Camera, CancellationToken, FrameLoop, FrameStatus, HotspotRegistry, LabelOverlay, LightAxis,
    Viewer, ViewerConfig, ViewerError, Viewport,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState},
    window::{CursorIcon, Window, WindowBuilder},
};

const WINDOW_TITLE: &str = "Skull Viewer";
// Line-based wheel deltas are scaled to roughly match browser pixels
const WHEEL_LINE_PX: f32 = 16.0;

type MeshBytes = viewer_core::Result<Vec<u8>>;

/// Shows the visible labels in the window title.
struct TitleOverlay {
    window: Arc<Window>,
    last: String,
}

impl LabelOverlay for TitleOverlay {
    fn sync(&mut self, hotspots: &HotspotRegistry, _camera: &Camera, _viewport: &Viewport) {
        let visible: Vec<&str> = hotspots
            .visible_labels()
            .into_iter()
            .map(|l| l.text())
            .collect();
        let title = if visible.is_empty() {
            WINDOW_TITLE.to_string()
        } else {
            format!("{} | {}", WINDOW_TITLE, visible.join(" | "))
        };
        if title != self.last {
            self.window.set_title(&title);
            self.last = title;
        }
    }
}

// Native viewport works in physical pixels; the surface matches the window.
fn viewport_of(size: winit::dpi::PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width as f32, size.height as f32, 1.0)
}

fn spawn_mesh_loader(path: String) -> Receiver<MeshBytes> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("mesh-loader".into())
        .spawn(move || {
            let bytes = std::fs::read(&path).map_err(|e| ViewerError::AssetIo {
                path: path.clone(),
                reason: e.to_string(),
            });
            _ = tx.send(bytes);
        });
    if let Err(e) = spawned {
        log::error!("[asset] loader thread failed to start: {}", e);
    }
    rx
}

/// Hand a finished load to the viewer. The receiver is dropped afterwards so
/// the load is resolved exactly once.
fn poll_mesh(rx: &mut Option<Receiver<MeshBytes>>, viewer: &mut Viewer) {
    let Some(r) = rx else {
        return;
    };
    let outcome = match r.try_recv() {
        Ok(bytes) => bytes,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => Err(ViewerError::AssetIo {
            path: viewer.mesh_path().to_string(),
            reason: "loader exited without a result".into(),
        }),
    };
    viewer.resolve_mesh_bytes(outcome);
    *rx = None;
}

fn handle_key(viewer: &mut Viewer, key: &Key, shift: bool) {
    let Key::Character(s) = key else {
        return;
    };
    let Some(axis) = LightAxis::from_key(s.as_str()) else {
        return;
    };
    let pos = viewer
        .scene
        .lights
        .nudge_directional(axis, if shift { -1 } else { 1 });
    log::info!(
        "[keys] light {:?} -> ({:.2}, {:.2}, {:.2})",
        axis,
        pos.x,
        pos.y,
        pos.z
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut config = ViewerConfig::default();
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_mesh_path(path);
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let mut viewer = Viewer::new(config, viewport_of(size))?;

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let renderer = pollster::block_on(GpuRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
        &viewer.scene,
    ))?;

    let token = CancellationToken::new();
    let overlay = TitleOverlay {
        window: window.clone(),
        last: WINDOW_TITLE.to_string(),
    };
    let mut frames = FrameLoop::new(renderer, overlay, token.clone());
    let mut mesh_rx = Some(spawn_mesh_loader(viewer.mesh_path().to_string()));
    let mut modifiers = ModifiersState::empty();
    let mut hover_cursor = false;
    let mut cursor = (0.0_f32, 0.0_f32);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => frames.resize(&mut viewer, viewport_of(size)),
            WindowEvent::CloseRequested => {
                token.cancel();
                elwt.exit();
            }
            WindowEvent::ModifiersChanged(m) => modifiers = m.state(),
            WindowEvent::CursorMoved { position, .. } => {
                cursor = (position.x as f32, position.y as f32);
                viewer.on_pointer_move(cursor.0, cursor.1);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => viewer.on_pointer_down(cursor.0, cursor.1),
                ElementState::Released => {
                    viewer.on_pointer_up();
                    viewer.on_activate();
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                viewer.on_wheel(dy);
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        viewer.on_pointer_move(x, y);
                        viewer.on_pointer_down(x, y);
                    }
                    TouchPhase::Moved => {
                        viewer.on_pointer_move(x, y);
                    }
                    TouchPhase::Ended => {
                        viewer.on_pointer_move(x, y);
                        viewer.on_activate();
                        viewer.on_pointer_up();
                    }
                    TouchPhase::Cancelled => viewer.on_pointer_up(),
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                handle_key(&mut viewer, &event.logical_key, modifiers.shift_key());
            }
            _ => {}
        },
        Event::AboutToWait => {
            poll_mesh(&mut mesh_rx, &mut viewer);
            if frames.tick(&mut viewer) == FrameStatus::Stopped {
                elwt.exit();
                return;
            }
            let hovering = viewer.hovered().is_some();
            if hovering != hover_cursor {
                window.set_cursor_icon(if hovering {
                    CursorIcon::Pointer
                } else {
                    CursorIcon::Default
                });
                hover_cursor = hovering;
            }
            window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
