//! Demo game for the isometric renderer: a small island of terrain with
//! trees and stacked buildings, drawn from tiles named in `resources.json`.

use log::{info, warn};
use std::sync::OnceLock;

use crate::core::{DisplayConfig, DisplayHandle, GameEngine};
use crate::math::Color;
use crate::resources::{ResourceManager, Tile};

pub const DEMO_TILE_WIDTH: i32 = 64;
pub const DEMO_TILE_HEIGHT: i32 = 32;

pub const WATER_TILE: &str = "water";
pub const GROUND_TILE: &str = "ground";
pub const TREE_TILE: &str = "tree";
pub const BLOCK_TILE: &str = "block";
pub const FLAG_TILE: &str = "flag";
pub const UI_FONT: &str = "ui";

// ============================================================================
// Map layout - pure functions of the cell coordinate
// ============================================================================

/// What occupies a cell, bottom layer first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Water,
    Ground,
    Tree,
    Block,
    /// Block with a flag on top
    Tower,
}

impl Cell {
    /// Number of sprites the cell contributes
    pub fn depth(self) -> usize {
        match self {
            Cell::Water | Cell::Ground => 1,
            Cell::Tree | Cell::Block => 2,
            Cell::Tower => 3,
        }
    }
}

/// Layout of a `width` x `height` island
pub fn cell_at(x: usize, y: usize, width: usize, height: usize) -> Cell {
    let (cx, cy) = (width / 2, height / 2);
    if (x, y) == (cx, cy) {
        return Cell::Tower;
    }

    let dx = x.abs_diff(cx) as f64 / (width.max(2) as f64 / 2.0);
    let dy = y.abs_diff(cy) as f64 / (height.max(2) as f64 / 2.0);
    if dx * dx + dy * dy > 0.8 {
        return Cell::Water;
    }

    match (x * 31 + y * 17) % 13 {
        0 | 5 => Cell::Tree,
        9 => Cell::Block,
        _ => Cell::Ground,
    }
}

// ============================================================================
// Game
// ============================================================================

struct DemoTiles {
    water: Tile,
    ground: Tile,
    tree: Tile,
    block: Tile,
    flag: Tile,
}

impl DemoTiles {
    fn resolve(resources: &ResourceManager) -> Self {
        Self {
            water: resources.get_tile_or_default(WATER_TILE),
            ground: resources.get_tile_or_default(GROUND_TILE),
            tree: resources.get_tile_or_default(TREE_TILE),
            block: resources.get_tile_or_default(BLOCK_TILE),
            flag: resources.get_tile_or_default(FLAG_TILE),
        }
    }

    fn stack(&self, cell: Cell) -> Vec<Tile> {
        match cell {
            Cell::Water => vec![self.water.clone()],
            Cell::Ground => vec![self.ground.clone()],
            Cell::Tree => vec![self.ground.clone(), self.tree.clone()],
            Cell::Block => vec![self.ground.clone(), self.block.clone()],
            Cell::Tower => vec![self.ground.clone(), self.block.clone(), self.flag.clone()],
        }
    }
}

pub struct DemoGame {
    width: usize,
    height: usize,
    tiles: OnceLock<DemoTiles>,
    handle: OnceLock<DisplayHandle>,
}

impl DemoGame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: OnceLock::new(),
            handle: OnceLock::new(),
        }
    }

    pub fn handle(&self) -> Option<&DisplayHandle> {
        self.handle.get()
    }
}

impl GameEngine for DemoGame {
    fn display_config(&self) -> DisplayConfig {
        DisplayConfig::new(self.width, self.height, DEMO_TILE_WIDTH, DEMO_TILE_HEIGHT)
            .with_background(Color::rgb(16, 24, 40))
    }

    fn tile(&self, x: usize, y: usize) -> Vec<Tile> {
        match self.tiles.get() {
            Some(tiles) => tiles.stack(cell_at(x, y, self.width, self.height)),
            None => Vec::new(),
        }
    }

    fn register_display_engine(&self, handle: DisplayHandle) {
        let resources = handle.resource_manager();
        if let Some(font) = resources.get_font(UI_FONT) {
            info!("UI font: {}px, line height {}", font.size(), font.line_height());
        }
        let _ = self.tiles.set(DemoTiles::resolve(&resources));
        if self.handle.set(handle).is_err() {
            warn!("Demo game registered with a second display engine");
        }
    }

    fn game_finished(&self) {
        info!("Demo finished");
    }
}
