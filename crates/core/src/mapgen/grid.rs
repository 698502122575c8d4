//! Fixed-size marker buffer with bounds-checked access and direction stepping.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Direction, Marker, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct GridError {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Row-major: `height` rows of `width` cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Marker>,
}

impl Grid {
    /// # Panics
    ///
    /// If `width * height` cells do not fit in memory. [`DungeonConfig::validate`]
    /// rejects such dimensions before the engine builds a grid.
    ///
    /// [`DungeonConfig::validate`]: crate::config::DungeonConfig::validate
    pub fn new(width: usize, height: usize, empty_marker: Marker) -> Self {
        Self { width, height, cells: vec![empty_marker; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Marker, GridError> {
        self.index(x, y).map(|index| self.cells[index])
    }

    pub fn set(&mut self, x: usize, y: usize, marker: Marker) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = marker;
        Ok(())
    }

    pub fn at(&self, pos: Pos) -> Result<Marker, GridError> {
        self.get(pos.x, pos.y)
    }

    /// Neighbour of `pos` one step towards `direction`, or `None` past the edge.
    pub fn step(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let next = match direction {
            Direction::Left => Pos { y: pos.y, x: pos.x.checked_sub(1)? },
            Direction::Up => Pos { y: pos.y.checked_sub(1)?, x: pos.x },
            Direction::Right => Pos { y: pos.y, x: pos.x + 1 },
            Direction::Down => Pos { y: pos.y + 1, x: pos.x },
        };
        self.in_bounds(next.x, next.y).then_some(next)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Marker]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn cells(&self) -> &[Marker] {
        &self.cells
    }

    pub fn count_not(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|&&cell| cell != marker).count()
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }
}
