use crate::events::model::PaintEvent;
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{PaintlapseError, PaintlapseResult};

/// Live pixel grid for one day's render.
///
/// Each cell holds the color of the last event applied to it, or the background. The grid is
/// owned by a single render pass and only ever moves forward.
#[derive(Clone, Debug)]
pub struct CanvasState {
    size: CanvasSize,
    background: Rgb8,
    cells: Vec<Rgb8>,
}

impl CanvasState {
    /// Create a grid filled with `background`.
    pub fn new(size: CanvasSize, background: Rgb8) -> Self {
        Self {
            size,
            background,
            cells: vec![background; size.cell_count()],
        }
    }

    /// Grid dimensions.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Background color cells start with.
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Paint one event, failing with [`PaintlapseError::OutOfBounds`] for foreign coordinates.
    pub fn apply(&mut self, ev: &PaintEvent) -> PaintlapseResult<()> {
        if !self.size.contains(ev.x, ev.y) {
            return Err(PaintlapseError::OutOfBounds {
                x: ev.x,
                y: ev.y,
                width: self.size.width,
                height: self.size.height,
            });
        }
        self.apply_validated(ev);
        Ok(())
    }

    /// Paint an event whose coordinates were checked at ingestion (see `DayLog::new`).
    pub(crate) fn apply_validated(&mut self, ev: &PaintEvent) {
        debug_assert!(self.size.contains(ev.x, ev.y));
        let i = self.size.index_of(ev.x, ev.y);
        self.cells[i] = ev.color;
    }

    /// Current color at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.size
            .contains(x, y)
            .then(|| self.cells[self.size.index_of(x, y)])
    }

    /// Read-only view of the current grid.
    pub fn snapshot(&self) -> CanvasSnapshot<'_> {
        CanvasSnapshot {
            size: self.size,
            cells: &self.cells,
        }
    }
}

/// Borrowed, immutable view of a [`CanvasState`].
#[derive(Clone, Copy, Debug)]
pub struct CanvasSnapshot<'a> {
    size: CanvasSize,
    cells: &'a [Rgb8],
}

impl<'a> CanvasSnapshot<'a> {
    /// Grid dimensions.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Row `y`, left to right.
    pub fn row(&self, y: u32) -> &'a [Rgb8] {
        let w = self.size.width as usize;
        let start = (y as usize) * w;
        &self.cells[start..start + w]
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Rgb8]> + 'a {
        self.cells.chunks_exact(self.size.width as usize)
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.size
            .contains(x, y)
            .then(|| self.cells[self.size.index_of(x, y)])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/state.rs"]
mod tests;
