//! Board dimensions plus an optional playability mask.
//!
//! `GridGeometry::contains` is the single source of truth for whether a cell
//! is usable. Board storage, rays and every move rule route their bounds
//! checks through it, so a masked hole behaves exactly like the board edge.

use std::iter;

use crate::game_state::chess_errors::GeometryError;
use crate::game_state::coord::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    width: i32,
    height: i32,
    // Row-major, `true` = playable. `None` means every cell is playable.
    mask: Option<Vec<bool>>,
}

impl GridGeometry {
    /// A fully playable `width` x `height` rectangle.
    pub fn new(width: i32, height: i32) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            mask: None,
        })
    }

    /// A rectangle where only cells whose mask entry is `true` are playable.
    ///
    /// The mask is row-major: entry `y * width + x` describes cell `(x, y)`.
    pub fn with_mask(width: i32, height: i32, mask: Vec<bool>) -> Result<Self, GeometryError> {
        let mut geometry = Self::new(width, height)?;
        let expected = (width as usize) * (height as usize);
        if mask.len() != expected {
            return Err(GeometryError::MaskSizeMismatch {
                expected,
                found: mask.len(),
            });
        }
        geometry.mask = Some(mask);
        Ok(geometry)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of slots in the dense backing grid, masked cells included.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    fn in_rectangle(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        if !self.in_rectangle(c) {
            return false;
        }
        match &self.mask {
            Some(mask) => mask[(c.y * self.width + c.x) as usize],
            None => true,
        }
    }

    /// Dense slot index of a playable cell.
    #[inline]
    pub fn index_of(&self, c: Coord) -> Option<usize> {
        self.contains(c).then(|| (c.y * self.width + c.x) as usize)
    }

    /// Every playable cell, row-major (y outer, x inner).
    pub fn all_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
            .filter(move |c| self.contains(*c))
    }

    /// Translate one step, yielding `None` if the result is not playable.
    #[inline]
    pub fn step(&self, from: Coord, delta: Coord) -> Option<Coord> {
        let to = from + delta;
        self.contains(to).then_some(to)
    }

    /// Cells reached by repeatedly adding `dir` to `from` (exclusive), ending at
    /// the first cell that is not playable. A zero direction yields nothing.
    pub fn ray(&self, from: Coord, dir: Coord) -> impl Iterator<Item = Coord> + '_ {
        let first = (dir != Coord::ORIGIN).then(|| from + dir);
        iter::successors(first, move |c| Some(*c + dir)).take_while(move |c| self.contains(*c))
    }
}
