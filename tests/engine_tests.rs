mod common;

use common::manager;
use isometric_renderer::core::{
    Canvas, DisplayConfig, DisplayEngine, DisplayEvent, DisplayHandle, FrameBuffer, GameEngine,
    Key, Viewport, SCROLL_SPEED,
};
use isometric_renderer::math::Color;
use isometric_renderer::resources::{Tile, TileSpec};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock};

const MAP_W: usize = 3;
const MAP_H: usize = 2;

/// Counts frames and render overlap; stops the engine when `stop_at` frames
/// have started
struct CountingGame {
    stop_at: Option<usize>,
    panic_on: Option<usize>,
    tile: OnceLock<Tile>,
    handle: OnceLock<DisplayHandle>,
    frames: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    finished: AtomicUsize,
}

impl CountingGame {
    fn new(stop_at: Option<usize>) -> Self {
        Self {
            stop_at,
            panic_on: None,
            tile: OnceLock::new(),
            handle: OnceLock::new(),
            frames: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }
}

impl GameEngine for CountingGame {
    fn display_config(&self) -> DisplayConfig {
        DisplayConfig::new(MAP_W, MAP_H, 8, 4).with_background(Color::rgb(9, 8, 7))
    }

    fn tile(&self, x: usize, y: usize) -> Vec<Tile> {
        if (x, y) == (0, 0) {
            let frame = self.frames.fetch_add(1, Ordering::SeqCst) + 1;
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
            if Some(frame) == self.stop_at {
                self.handle.get().unwrap().stop();
            }
            if Some(frame) == self.panic_on {
                self.active.fetch_sub(1, Ordering::SeqCst);
                panic!("game failed on frame {frame}");
            }
        }
        if (x, y) == (MAP_W - 1, MAP_H - 1) {
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
        self.tile.get().cloned().into_iter().collect()
    }

    fn register_display_engine(&self, handle: DisplayHandle) {
        let _ = self.tile.set(handle.resource_manager().get_tile_or_default("block"));
        let _ = self.handle.set(handle);
    }

    fn game_finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

fn resources() -> isometric_renderer::resources::ResourceManager {
    manager(vec![TileSpec::new("block", "8x4-50.png")])
}

#[test]
fn test_stop_lets_in_flight_frame_finish() {
    let game = Arc::new(CountingGame::new(Some(3)));
    let (_tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(64, 32), rx).unwrap();

    engine.run();

    assert_eq!(game.frames.load(Ordering::SeqCst), 3);
    assert_eq!(game.max_active.load(Ordering::SeqCst), 1);
    assert_eq!(game.active.load(Ordering::SeqCst), 0);
    assert_eq!(game.finished.load(Ordering::SeqCst), 1);
    assert!(!engine.is_running());
}

#[test]
fn test_frames_never_overlap_with_frame_cap() {
    let game = Arc::new(CountingGame::new(Some(5)));
    let (_tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(64, 32), rx)
        .unwrap()
        .with_frame_rate(200);

    engine.run();

    assert_eq!(game.frames.load(Ordering::SeqCst), 5);
    assert_eq!(game.max_active.load(Ordering::SeqCst), 1);
}

#[test]
fn test_events_move_resize_and_close() {
    let game = Arc::new(CountingGame::new(None));
    let (tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(40, 20), rx).unwrap();
    assert_eq!(engine.viewport(), Viewport::centered(40, 20));

    tx.send(DisplayEvent::Resize { width: 100, height: 50 }).unwrap();
    tx.send(DisplayEvent::Key(Key::Right)).unwrap();
    tx.send(DisplayEvent::Key(Key::Right)).unwrap();
    tx.send(DisplayEvent::Key(Key::Down)).unwrap();
    tx.send(DisplayEvent::Key(Key::Other)).unwrap();
    tx.send(DisplayEvent::Close).unwrap();

    engine.run();

    let vp = engine.viewport();
    assert_eq!((vp.w, vp.h), (100, 50));
    assert_eq!((vp.x, vp.y), (-20 + 2 * SCROLL_SPEED, -10 + SCROLL_SPEED));
    assert_eq!(engine.with_target(|canvas| canvas.dimensions()), (100, 50));
    assert_eq!(game.finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_engine_can_restart_after_close() {
    let game = Arc::new(CountingGame::new(None));
    let (tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(16, 16), rx).unwrap();

    tx.send(DisplayEvent::Close).unwrap();
    engine.run();
    let first_run = game.frames.load(Ordering::SeqCst);

    tx.send(DisplayEvent::Key(Key::Left)).unwrap();
    tx.send(DisplayEvent::Close).unwrap();
    engine.run();

    assert!(game.frames.load(Ordering::SeqCst) >= first_run);
    assert_eq!(engine.viewport().x, -8 - SCROLL_SPEED);
    assert_eq!(game.finished.load(Ordering::SeqCst), 2);
}

#[test]
fn test_panicking_frame_does_not_wedge_engine() {
    let mut game = CountingGame::new(Some(3));
    game.panic_on = Some(1);
    let game = Arc::new(game);
    let (_tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(8, 8), rx).unwrap();

    engine.run();

    assert_eq!(game.frames.load(Ordering::SeqCst), 3);
    assert_eq!(game.finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_frame_buffer_publishes_frames() {
    let game = Arc::new(CountingGame::new(Some(2)));
    let redraws = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&redraws);
    let target = FrameBuffer::new(32, 16).with_present_hook(move || {
        *counter.lock().unwrap() += 1;
    });
    let front = target.front();
    let (_tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game, resources(), target, rx).unwrap();

    engine.run();

    assert_eq!(*redraws.lock().unwrap(), 2);
    let frame = front.lock().unwrap();
    assert_eq!(frame.number, 2);
    assert_eq!((frame.width, frame.height), (32, 16));
    // Top-left corner lies outside every tile
    assert_eq!(&frame.pixels()[0..4], &[9, 8, 7, 255]);
}

#[test]
fn test_handle_controls_engine() {
    let game = Arc::new(CountingGame::new(None));
    let (_tx, rx) = mpsc::channel();
    let engine = DisplayEngine::new(game.clone(), resources(), Canvas::new(10, 10), rx).unwrap();
    let handle = game.handle.get().unwrap().clone();

    handle.move_viewport(Viewport::new(1, 2, 3, 4));
    assert_eq!(engine.viewport(), Viewport::new(1, 2, 3, 4));
    assert!(handle.resource_manager().get_tile("block").is_some());

    let runner = std::thread::spawn(move || {
        engine.run();
        engine
    });
    while game.frames.load(Ordering::SeqCst) == 0 {
        std::thread::yield_now();
    }
    assert!(handle.is_running());
    handle.stop();

    let engine = runner.join().unwrap();
    assert!(!engine.is_running());
    assert_eq!(game.finished.load(Ordering::SeqCst), 1);
}
