//! Dense slot storage for pieces and the optional cell tag layer.
//!
//! The board owns no rule logic. Every read and write is indexed through the
//! geometry, and writes to cells the geometry does not contain fail with
//! `BoardError::OutOfRange`.

use crate::game_state::chess_errors::BoardError;
use crate::game_state::chess_types::{CellTags, Color};
use crate::game_state::coord::Coord;
use crate::game_state::grid_geometry::GridGeometry;
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    geometry: GridGeometry,
    cells: Vec<Option<Piece>>,
    tags: Option<Vec<CellTags>>,
}

impl BoardState {
    pub fn new(geometry: GridGeometry) -> Self {
        let cells = vec![None; geometry.cell_count()];
        Self {
            geometry,
            cells,
            tags: None,
        }
    }

    /// A board that starts with an (all-clear) cell tag layer.
    pub fn with_tag_layer(geometry: GridGeometry) -> Self {
        let mut board = Self::new(geometry);
        board.tags = Some(vec![CellTags::NONE; board.cells.len()]);
        board
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[inline]
    pub fn get(&self, cell: Coord) -> Option<&Piece> {
        self.geometry
            .index_of(cell)
            .and_then(|index| self.cells[index].as_ref())
    }

    pub fn set(&mut self, cell: Coord, piece: Option<Piece>) -> Result<(), BoardError> {
        let index = self
            .geometry
            .index_of(cell)
            .ok_or(BoardError::OutOfRange(cell))?;
        self.cells[index] = piece;
        Ok(())
    }

    /// Remove and return the occupant of `cell`.
    pub fn take(&mut self, cell: Coord) -> Result<Option<Piece>, BoardError> {
        let index = self
            .geometry
            .index_of(cell)
            .ok_or(BoardError::OutOfRange(cell))?;
        Ok(self.cells[index].take())
    }

    #[inline]
    pub fn is_empty_at(&self, cell: Coord) -> bool {
        self.get(cell).is_none()
    }

    pub fn has_tag_layer(&self) -> bool {
        self.tags.is_some()
    }

    /// Tags of `cell`; `NONE` when there is no tag layer or the cell is off-board.
    pub fn tags_at(&self, cell: Coord) -> CellTags {
        match (&self.tags, self.geometry.index_of(cell)) {
            (Some(tags), Some(index)) => tags[index],
            _ => CellTags::NONE,
        }
    }

    /// Replace the tags of `cell`, creating the tag layer on first use.
    pub fn set_tags(&mut self, cell: Coord, tags: CellTags) -> Result<(), BoardError> {
        let index = self
            .geometry
            .index_of(cell)
            .ok_or(BoardError::OutOfRange(cell))?;
        let count = self.cells.len();
        self.tags.get_or_insert_with(|| vec![CellTags::NONE; count])[index] = tags;
        Ok(())
    }

    /// Occupied playable cells, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        self.geometry
            .all_coords()
            .filter_map(move |cell| self.get(cell).map(|piece| (cell, piece)))
    }

    /// Cells holding pieces owned by `owner`, row-major.
    pub fn pieces_of<'a>(
        &'a self,
        owner: &'a Color,
    ) -> impl Iterator<Item = (Coord, &'a Piece)> + 'a {
        self.occupied().filter(move |(_, piece)| piece.owner() == owner)
    }
}
