//! Frame-production engine: a pacing loop on the caller's thread, one
//! render thread per frame, and a long-lived event thread.

use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread;

use super::controller::DisplayEvent;
use super::display_config::DisplayConfig;
use super::error::DisplayError;
use super::frame_gate::{FrameGate, FramePermit};
use super::game::GameEngine;
use super::render_target::RenderTarget;
use super::sweep::{draw_frame, TileGrid};
use super::timer::{FpsMeter, FramePacer};
use super::viewport::Viewport;
use crate::resources::ResourceManager;

enum EventTask {
    /// No thread is consuming events
    Idle(Receiver<DisplayEvent>),
    Running,
    /// The receiver was lost with a thread that failed to start
    Gone,
}

/// State shared between the engine, its threads and every handle
struct Shared {
    running: RwLock<bool>,
    viewport: RwLock<Viewport>,
    gate: Arc<FrameGate>,
    resources: Arc<ResourceManager>,
    events: Mutex<EventTask>,
}

impl Shared {
    fn is_running(&self) -> bool {
        *self.running.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_running(&self, running: bool) {
        *self.running.write().unwrap_or_else(PoisonError::into_inner) = running;
    }

    fn viewport(&self) -> Viewport {
        *self.viewport.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_viewport(&self, f: impl FnOnce(&mut Viewport)) {
        let mut viewport = self.viewport.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut viewport);
    }

    fn events(&self) -> MutexGuard<'_, EventTask> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cheap, thread-safe handle given to the game
#[derive(Clone)]
pub struct DisplayHandle {
    shared: Arc<Shared>,
}

impl DisplayHandle {
    /// Ask the engine to stop. Returns immediately; the frame in flight
    /// finishes before `run` returns.
    pub fn stop(&self) {
        self.shared.set_running(false);
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.viewport()
    }

    /// Replace the whole viewport
    pub fn move_viewport(&self, viewport: Viewport) {
        self.shared.update_viewport(|current| *current = viewport);
    }

    pub fn resource_manager(&self) -> Arc<ResourceManager> {
        Arc::clone(&self.shared.resources)
    }
}

impl std::fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHandle")
            .field("running", &self.is_running())
            .field("viewport", &self.viewport())
            .finish()
    }
}

pub struct DisplayEngine<T: RenderTarget + 'static> {
    shared: Arc<Shared>,
    config: DisplayConfig,
    game: Arc<dyn GameEngine>,
    target: Arc<Mutex<T>>,
    frame_rate: Option<u32>,
}

impl<T: RenderTarget + 'static> DisplayEngine<T> {
    /// Load resources from `resource_dir` while `make_target` builds the
    /// render target on the calling thread, then wire everything up
    pub fn create<F>(
        game: Arc<dyn GameEngine>,
        resource_dir: impl AsRef<Path>,
        make_target: F,
        events: Receiver<DisplayEvent>,
    ) -> Result<Self, DisplayError>
    where
        F: FnOnce() -> Result<T, DisplayError>,
    {
        let resource_dir = resource_dir.as_ref();
        let (resources, target) = thread::scope(|s| {
            let loader = thread::Builder::new()
                .name("resource-loader".into())
                .spawn_scoped(s, || ResourceManager::load(resource_dir))
                .map_err(|e| DisplayError::Surface(format!("could not spawn loader: {e}")))?;

            let target = make_target();
            let resources = match loader.join() {
                Ok(resources) => resources,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            Ok::<_, DisplayError>((resources?, target?))
        })?;

        Self::new(game, resources, target, events)
    }

    /// Wire a game, loaded resources and a ready render target together
    pub fn new(
        game: Arc<dyn GameEngine>,
        resources: ResourceManager,
        target: T,
        events: Receiver<DisplayEvent>,
    ) -> Result<Self, DisplayError> {
        let config = game.display_config();
        config.validate()?;

        let (width, height) = target.dimensions();
        let shared = Arc::new(Shared {
            running: RwLock::new(false),
            viewport: RwLock::new(Viewport::centered(width as i32, height as i32)),
            gate: FrameGate::new(),
            resources: Arc::new(resources),
            events: Mutex::new(EventTask::Idle(events)),
        });

        let engine = Self {
            shared,
            config,
            game,
            target: Arc::new(Mutex::new(target)),
            frame_rate: None,
        };
        engine.game.register_display_engine(engine.handle());

        info!(
            "Display engine ready: {}x{} grid of {}x{} tiles, {}x{} target",
            config.map_w, config.map_h, config.tile_w, config.tile_h, width, height
        );
        Ok(engine)
    }

    /// Cap dispatch at `fps` frames per second. Zero removes the cap.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = (fps > 0).then_some(fps);
        self
    }

    pub fn handle(&self) -> DisplayHandle {
        DisplayHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn resource_manager(&self) -> Arc<ResourceManager> {
        Arc::clone(&self.shared.resources)
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.viewport()
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn stop(&self) {
        self.shared.set_running(false);
    }

    /// Borrow the render target between frames
    pub fn with_target<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut target)
    }

    /// Produce frames until stopped. Blocks the calling thread.
    pub fn run(&self) {
        self.start();
        info!("Display engine running");

        let mut meter = FpsMeter::new();
        let mut pacer = self.frame_rate.and_then(FramePacer::new);
        let mut frames = 0u64;

        loop {
            let permit = self.shared.gate.acquire();
            if !self.shared.is_running() {
                break;
            }

            frames += 1;
            if let Err(e) = self.spawn_render_task(permit, frames) {
                error!("Could not spawn render thread: {e}");
                self.shared.set_running(false);
                break;
            }

            if let Some(fps) = meter.tick() {
                debug!("FPS: {fps:.1}");
            }
            if let Some(pacer) = pacer.as_mut() {
                pacer.wait();
            }
        }

        self.shared.gate.wait_idle();
        info!("Display engine stopped after {frames} frames");
        self.game.game_finished();
    }

    /// Mark the engine running and make sure an event thread is consuming
    fn start(&self) {
        let mut task = self.shared.events();
        self.shared.set_running(true);

        let events = match std::mem::replace(&mut *task, EventTask::Running) {
            EventTask::Idle(events) => events,
            EventTask::Running => return,
            EventTask::Gone => {
                *task = EventTask::Gone;
                return;
            }
        };

        let shared = Arc::clone(&self.shared);
        let target = Arc::clone(&self.target);
        let spawned = thread::Builder::new()
            .name("display-events".into())
            .spawn(move || event_loop(shared, target, events));
        if let Err(e) = spawned {
            warn!("Could not spawn event thread, input is ignored: {e}");
            *task = EventTask::Gone;
        }
    }

    fn spawn_render_task(&self, permit: FramePermit, frame: u64) -> std::io::Result<()> {
        let shared = Arc::clone(&self.shared);
        let game = Arc::clone(&self.game);
        let target = Arc::clone(&self.target);
        let config = self.config;

        thread::Builder::new()
            .name(format!("render-frame-{frame}"))
            .spawn(move || {
                let _permit = permit;
                let grid = TileGrid::collect(&config, |x, y| game.tile(x, y));
                let mut target = target.lock().unwrap_or_else(PoisonError::into_inner);
                draw_frame(&config, &grid, || shared.viewport(), &mut *target);
            })
            .map(drop)
    }
}

fn event_loop<T: RenderTarget>(
    shared: Arc<Shared>,
    target: Arc<Mutex<T>>,
    events: Receiver<DisplayEvent>,
) {
    while let Ok(event) = events.recv() {
        match event {
            DisplayEvent::Close => {
                debug!("Close requested");
                shared.set_running(false);
            }
            DisplayEvent::Resize { width, height } => {
                shared.update_viewport(|vp| vp.resize(width as i32, height as i32));
                target
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .resize(width, height);
            }
            DisplayEvent::Key(key) => {
                let (dx, dy) = key.scroll_delta();
                if (dx, dy) != (0, 0) {
                    shared.update_viewport(|vp| vp.move_by(dx, dy));
                }
            }
        }

        let mut task = shared.events();
        if !shared.is_running() {
            *task = EventTask::Idle(events);
            return;
        }
    }

    debug!("Event senders dropped");
    *shared.events() = EventTask::Idle(events);
}
