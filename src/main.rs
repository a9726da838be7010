use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info, warn};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, PoisonError};
use std::thread::JoinHandle;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use isometric_renderer::cli::{Cli, WindowMode};
use isometric_renderer::core::{
    translate_event, DisplayEngine, DisplayEvent, FrameBuffer, SharedFrame, SurfaceRenderer,
};
use isometric_renderer::demo::DemoGame;

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    presenter: SurfaceRenderer,
    front: SharedFrame,
    events: Sender<DisplayEvent>,
    engine: Option<JoinHandle<()>>,
    last_presented: u64,
}

struct App {
    cli: Cli,
    running: Option<Running>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            running: None,
            error: None,
        }
    }

    fn fullscreen(&self, event_loop: &ActiveEventLoop) -> Option<Fullscreen> {
        match self.cli.window_mode {
            WindowMode::Windowed => None,
            WindowMode::FullscreenWindow => Some(Fullscreen::Borderless(None)),
            WindowMode::Fullscreen => {
                let mode = event_loop
                    .primary_monitor()
                    .and_then(|monitor| monitor.video_modes().next());
                match mode {
                    Some(mode) => Some(Fullscreen::Exclusive(mode)),
                    None => {
                        warn!("No exclusive video mode available, using borderless fullscreen");
                        Some(Fullscreen::Borderless(None))
                    }
                }
            }
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let attributes = Window::default_attributes()
            .with_title("Isometric Renderer")
            .with_inner_size(winit::dpi::PhysicalSize::new(self.cli.width, self.cli.height))
            .with_fullscreen(self.fullscreen(event_loop));
        let window = Arc::new(event_loop.create_window(attributes).context("create window")?);
        let presenter = SurfaceRenderer::new(window.clone()).context("create presenter")?;

        let size = window.inner_size();
        let redraw = window.clone();
        let target = FrameBuffer::new(size.width, size.height)
            .with_present_hook(move || redraw.request_redraw());
        let front = target.front();

        let (events, receiver) = mpsc::channel();
        let game = Arc::new(DemoGame::new(self.cli.map_width, self.cli.map_height));
        let engine = DisplayEngine::create(game, &self.cli.resources, || Ok(target), receiver)
            .with_context(|| format!("load resources from {}", self.cli.resources.display()))?
            .with_frame_rate(self.cli.fps.unwrap_or(0));

        let engine = std::thread::Builder::new()
            .name("display-engine".into())
            .spawn(move || engine.run())
            .context("spawn engine thread")?;

        Ok(Running {
            window,
            presenter,
            front,
            events,
            engine: Some(engine),
            last_presented: 0,
        })
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_mut() {
            let _ = running.events.send(DisplayEvent::Close);
            if let Some(engine) = running.engine.take() {
                if engine.join().is_err() {
                    self.error = Some(anyhow!("engine thread panicked"));
                }
            }
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                info!("Controls: arrows/WASD pan, Escape quits");
                self.running = Some(running);
            }
            Err(e) => {
                error!("Startup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let translated = translate_event(&event);
        if translated == Some(DisplayEvent::Close) {
            self.shutdown(event_loop);
            return;
        }
        if let Some(display_event) = translated {
            let _ = running.events.send(display_event);
        }

        match event {
            WindowEvent::Resized(size) => running.presenter.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let frame = running.front.lock().unwrap_or_else(PoisonError::into_inner);
                if frame.number == running.last_presented {
                    return;
                }
                running.last_presented = frame.number;
                running.window.pre_present_notify();
                if let Err(e) = running.presenter.present(&frame) {
                    error!("Present failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let finished = self
            .running
            .as_ref()
            .and_then(|running| running.engine.as_ref())
            .is_some_and(|engine| engine.is_finished());
        if finished {
            info!("Engine stopped, closing window");
            self.shutdown(event_loop);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
