use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::config::Options;
use crate::error::Result;
use crate::input::Input;
use crate::session::{FrameMatrices, Renderer, Session, SessionControl};

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Lock and hide the cursor so mouse motion only turns the camera.
    pub grab_cursor: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "trailcam".to_string(),
            width: 1000,
            height: 800,
            grab_cursor: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn grab_cursor(mut self, grab: bool) -> Self {
        self.grab_cursor = grab;
        self
    }
}

/// Reports the camera and path cube in the window title.
///
/// Stand-in for a real renderer: nothing is drawn into the window.
pub struct TitleRenderer {
    window: Arc<Window>,
    base: String,
    last_update: Option<Instant>,
}

impl TitleRenderer {
    const INTERVAL: Duration = Duration::from_millis(250);

    pub fn new(window: Arc<Window>, base: impl Into<String>) -> Self {
        Self {
            window,
            base: base.into(),
            last_update: None,
        }
    }
}

impl Renderer for TitleRenderer {
    fn draw(&mut self, frame: &FrameMatrices) {
        let now = Instant::now();
        if self
            .last_update
            .is_some_and(|last| now.duration_since(last) < Self::INTERVAL)
        {
            return;
        }
        self.last_update = Some(now);

        let eye = frame.camera.position;
        let mut title = format!(
            "{} | eye ({:.1}, {:.1}, {:.1}) | {} cubes",
            self.base,
            eye.x,
            eye.y,
            eye.z,
            frame.models.len()
        );
        if let Some(cube) = frame.path_cube {
            title.push_str(&format!(" | path cube ({:.1}, {:.1}, {:.1})", cube.x, cube.y, cube.z));
        }
        self.window.set_title(&title);
    }
}

/// Open a window and run a session with the default [`TitleRenderer`].
pub fn run(config: AppConfig, options: Options) -> Result<()> {
    let title = config.title.clone();
    run_with_renderer(config, options, move |window| {
        TitleRenderer::new(window, title)
    })
}

/// Open a window and run a session, drawing each frame with the renderer
/// built by `make_renderer` once the window exists.
pub fn run_with_renderer<R, F>(config: AppConfig, options: Options, make_renderer: F) -> Result<()>
where
    R: Renderer,
    F: FnOnce(Arc<Window>) -> R,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TrailcamApp::Pending {
        config,
        options,
        make_renderer: Some(make_renderer),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

enum TrailcamApp<R, F> {
    Pending {
        config: AppConfig,
        options: Options,
        make_renderer: Option<F>,
    },
    Running {
        window: Arc<Window>,
        session: Session,
        input: Input,
        renderer: R,
        last_frame: Instant,
    },
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => window.set_cursor_visible(false),
        Err(e) => log::warn!("cursor grab unavailable, mouse look needs the cursor inside the window: {e}"),
    }
}

impl<R, F> ApplicationHandler for TrailcamApp<R, F>
where
    R: Renderer,
    F: FnOnce(Arc<Window>) -> R,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let TrailcamApp::Pending {
            config,
            options,
            make_renderer,
        } = self
        else {
            return;
        };
        let Some(make_renderer) = make_renderer.take() else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        if config.grab_cursor {
            grab_cursor(&window);
        }

        let session = Session::new(options);
        let renderer = make_renderer(Arc::clone(&window));
        log::info!(
            "session started with {} cubes; camera at {:?}",
            session.scene().len(),
            session.camera().position
        );
        window.request_redraw();

        *self = TrailcamApp::Running {
            window,
            session,
            input: Input::new(),
            renderer,
            last_frame: Instant::now(),
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let TrailcamApp::Running {
            window,
            session,
            input,
            renderer,
            last_frame,
        } = self
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                if session.update(input, dt) == SessionControl::Quit {
                    log::info!("quit requested");
                    event_loop.exit();
                    return;
                }

                let size = window.inner_size();
                let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
                session.render(renderer, aspect);

                input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let TrailcamApp::Running { input, .. } = self {
            input.handle_device_event(&event);
        }
    }
}
