//! Back-to-front draw ordering for the isometric grid.
//!
//! Cells are visited by increasing diagonal `x + y`, so cells further from
//! the viewer are painted first. Tall cells are split into passes: pass `p`
//! draws the `p`th sprite of every cell before any cell's next sprite.

use log::trace;

use super::display_config::DisplayConfig;
use super::render_target::RenderTarget;
use super::viewport::Viewport;
use crate::resources::Tile;

/// Iterator over in-bounds grid cells in diagonal order
#[derive(Debug, Clone)]
pub struct DiagonalSweep {
    width: usize,
    height: usize,
    diagonal: usize,
    x: usize,
}

/// Visit every cell of a `width` x `height` grid by non-decreasing `x + y`,
/// then increasing `x`
pub fn diagonal_sweep(width: usize, height: usize) -> DiagonalSweep {
    DiagonalSweep {
        width,
        height,
        diagonal: 0,
        x: 0,
    }
}

impl DiagonalSweep {
    fn diagonal_count(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            0
        } else {
            self.width + self.height - 1
        }
    }

    /// Smallest x on the current diagonal whose y is still inside the grid
    fn first_x(&self) -> usize {
        self.diagonal.saturating_sub(self.height - 1)
    }
}

impl Iterator for DiagonalSweep {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.diagonal < self.diagonal_count() {
            let last_x = self.diagonal.min(self.width - 1);
            if self.x <= last_x {
                let cell = (self.x, self.diagonal - self.x);
                self.x += 1;
                return Some(cell);
            }
            self.diagonal += 1;
            if self.diagonal < self.diagonal_count() {
                self.x = self.first_x();
            }
        }
        None
    }
}

/// One frame's sprite stacks, row-major
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Tile>>,
    depth: usize,
}

impl TileGrid {
    /// Fetch the stack of every cell and record the deepest one
    pub fn collect<F>(config: &DisplayConfig, mut fetch: F) -> Self
    where
        F: FnMut(usize, usize) -> Vec<Tile>,
    {
        let (width, height) = (config.map_w, config.map_h);
        let mut cells = Vec::with_capacity(config.cell_count());
        let mut depth = 0;
        for y in 0..height {
            for x in 0..width {
                let stack = fetch(x, y);
                depth = depth.max(stack.len());
                cells.push(stack);
            }
        }
        Self {
            width,
            height,
            cells,
            depth,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Deepest stack in the grid, i.e. the number of draw passes
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn stack(&self, x: usize, y: usize) -> &[Tile] {
        if x >= self.width || y >= self.height {
            return &[];
        }
        &self.cells[y * self.width + x]
    }
}

/// Work done by one call to [`draw_frame`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub passes: usize,
    pub draws: usize,
}

/// Clear, draw every pass of `grid` and present.
///
/// `viewport` is read once for the first pass and again before each later
/// pass, so camera moves show up between passes of the same frame.
pub fn draw_frame<T, V>(
    config: &DisplayConfig,
    grid: &TileGrid,
    mut viewport: V,
    target: &mut T,
) -> FrameStats
where
    T: RenderTarget + ?Sized,
    V: FnMut() -> Viewport,
{
    let mut stats = FrameStats {
        passes: grid.depth(),
        draws: 0,
    };
    let (width, height) = grid.dimensions();

    let mut view = viewport();
    target.clear(config.background);

    for pass in 0..grid.depth() {
        if pass > 0 {
            view = viewport();
        }
        for (x, y) in diagonal_sweep(width, height) {
            let Some(tile) = grid.stack(x, y).get(pass) else {
                continue;
            };
            let (px, py) = config.cell_anchor(x, y);
            target.draw_tile(tile, px - view.x, py - view.y);
            stats.draws += 1;
        }
    }

    target.present();
    trace!("Frame drawn: {} passes, {} draws", stats.passes, stats.draws);
    stats
}
