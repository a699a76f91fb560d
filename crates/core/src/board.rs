//! Board module - manages the two-layer tile grid
//!
//! The board is a `width x height` grid split into equal-width vertical sections.
//! Every cell holds an optional tile on the front layer and another on the back
//! layer. Each layer is a flat row-major array for cache locality.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height (top to bottom)
//!
//! The board knows nothing about matching or cascades. It is a bounded store with
//! section-aware occupancy queries; every mutator validates before it writes.

use std::ops::Range;

use crate::error::{BoardError, ConfigError};
use crate::types::{Cell, Layer, Pos, TileType};

/// The game board - two flat layers plus the section partitioning
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    section_count: usize,
    /// One flag per section
    disabled: Vec<bool>,
    /// Flat array of cells, row-major order (y * width + x)
    front: Vec<Cell>,
    back: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// `width` must be divisible by `section_count`, and every index in
    /// `disabled_sections` must name an existing section.
    pub fn new(
        width: usize,
        height: usize,
        section_count: usize,
        disabled_sections: &[usize],
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || section_count == 0 {
            return Err(ConfigError::ZeroDimension {
                width,
                height,
                section_count,
            });
        }
        let cells = width
            .checked_mul(height)
            .ok_or(ConfigError::TooLarge { width, height })?;
        if width % section_count != 0 {
            return Err(ConfigError::WidthNotDivisible {
                width,
                section_count,
            });
        }

        let mut disabled = vec![false; section_count];
        for &section in disabled_sections {
            match disabled.get_mut(section) {
                Some(flag) => *flag = true,
                None => {
                    return Err(ConfigError::SectionOutOfRange {
                        section,
                        section_count,
                    })
                }
            }
        }

        Ok(Self {
            width,
            height,
            section_count,
            disabled,
            front: vec![None; cells],
            back: vec![None; cells],
        })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(pos.y * self.width + pos.x)
    }

    /// Flat index of an in-bounds cell in an enabled section
    fn playable_index(&self, pos: Pos) -> Result<usize, BoardError> {
        match self.index(pos) {
            Some(idx) if self.is_section_enabled(self.section_of(pos.x)) => Ok(idx),
            _ => Err(BoardError::InvalidCoordinate(pos)),
        }
    }

    fn layer(&self, layer: Layer) -> &[Cell] {
        match layer {
            Layer::Front => &self.front,
            Layer::Back => &self.back,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut [Cell] {
        match layer {
            Layer::Front => &mut self.front,
            Layer::Back => &mut self.back,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn columns_per_section(&self) -> usize {
        self.width / self.section_count
    }

    /// Section index that column `x` belongs to
    pub fn section_of(&self, x: usize) -> usize {
        x / self.columns_per_section()
    }

    /// Column range covered by a section
    pub fn section_columns(&self, section: usize) -> Range<usize> {
        let cols = self.columns_per_section();
        let start = (section * cols).min(self.width);
        start..(start + cols).min(self.width)
    }

    pub fn is_section_enabled(&self, section: usize) -> bool {
        matches!(self.disabled.get(section), Some(false))
    }

    /// Enabled section indices, ascending
    pub fn enabled_sections(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.section_count).filter(move |&s| self.is_section_enabled(s))
    }

    /// Disabled section indices, ascending
    pub fn disabled_sections(&self) -> Vec<usize> {
        (0..self.section_count)
            .filter(|&s| !self.is_section_enabled(s))
            .collect()
    }

    /// Check if a position is inside the board and in an enabled section
    pub fn is_playable(&self, pos: Pos) -> bool {
        self.playable_index(pos).is_ok()
    }

    /// Get cell at a position. Returns None if out of bounds.
    pub fn get(&self, pos: Pos, layer: Layer) -> Option<Cell> {
        self.index(pos).map(|idx| self.layer(layer)[idx])
    }

    /// Tile type at a position, failing for coordinates outside the board
    pub fn type_at(&self, pos: Pos, layer: Layer) -> Result<Option<TileType>, BoardError> {
        self.get(pos, layer)
            .ok_or(BoardError::InvalidCoordinate(pos))
    }

    /// Check if a cell holds a tile, failing for coordinates outside the board
    pub fn is_occupied(&self, pos: Pos, layer: Layer) -> Result<bool, BoardError> {
        self.type_at(pos, layer).map(|cell| cell.is_some())
    }

    /// Put a tile into an empty cell of an enabled section
    pub fn place(&mut self, pos: Pos, layer: Layer, tile: TileType) -> Result<(), BoardError> {
        let idx = self.playable_index(pos)?;
        let cells = self.layer_mut(layer);
        if cells[idx].is_some() {
            return Err(BoardError::CellOccupied(pos));
        }
        cells[idx] = Some(tile);
        Ok(())
    }

    /// Take the tile out of an occupied cell
    pub fn remove(&mut self, pos: Pos, layer: Layer) -> Result<TileType, BoardError> {
        let idx = self.playable_index(pos)?;
        self.layer_mut(layer)[idx]
            .take()
            .ok_or(BoardError::CellNotOccupied(pos))
    }

    /// Move a front tile into an empty front cell.
    ///
    /// Both cells are validated before either is written, so a rejected move
    /// leaves the board untouched. Returns the moved tile type.
    pub fn move_front_tile(&mut self, from: Pos, to: Pos) -> Result<TileType, BoardError> {
        let src = self.playable_index(from)?;
        let dst = self.playable_index(to)?;

        let Some(tile) = self.front[src] else {
            return Err(BoardError::CellNotOccupied(from));
        };
        if self.front[dst].is_some() {
            return Err(BoardError::CellOccupied(to));
        }

        self.front[src] = None;
        self.front[dst] = Some(tile);
        Ok(tile)
    }

    /// Check if every enabled column of a section-row is empty on a layer.
    ///
    /// Rows or sections outside the board hold nothing, so they report empty.
    pub fn is_row_empty_in_section(&self, section: usize, y: usize, layer: Layer) -> bool {
        if y >= self.height || !self.is_section_enabled(section) {
            return true;
        }
        let start = y * self.width;
        let cells = self.layer(layer);
        self.section_columns(section)
            .all(|x| cells[start + x].is_none())
    }

    /// True iff both layers are empty everywhere
    pub fn is_board_empty(&self) -> bool {
        self.front.iter().chain(self.back.iter()).all(|c| c.is_none())
    }

    /// Number of tiles on a layer
    pub fn tile_count(&self, layer: Layer) -> usize {
        self.layer(layer).iter().filter(|c| c.is_some()).count()
    }

    /// Number of tiles on both layers
    pub fn total_tiles(&self) -> usize {
        self.tile_count(Layer::Front) + self.tile_count(Layer::Back)
    }

    /// Occupied cells of a layer with their tile types, row-major
    pub fn tiles(&self, layer: Layer) -> impl Iterator<Item = (Pos, TileType)> + '_ {
        let width = self.width;
        self.layer(layer)
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.map(|t| (Pos::new(idx % width, idx / width), t)))
    }

    /// Every cell in an enabled section, row-major
    pub fn playable_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.is_section_enabled(self.section_of(x)))
                .map(move |x| Pos::new(x, y))
        })
    }

    /// Get a reference to a whole layer (row-major)
    pub fn cells(&self, layer: Layer) -> &[Cell] {
        self.layer(layer)
    }

    /// Clear the front layer and return its tiles, row-major.
    pub(crate) fn drain_front(&mut self) -> Vec<TileType> {
        self.front.iter_mut().filter_map(|c| c.take()).collect()
    }

    /// Write a cell without occupancy checks.
    ///
    /// Returns false if the position is out of bounds or disabled.
    #[must_use]
    pub(crate) fn set(&mut self, pos: Pos, layer: Layer, cell: Cell) -> bool {
        match self.playable_index(pos) {
            Ok(idx) => {
                self.layer_mut(layer)[idx] = cell;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: u8) -> TileType {
        TileType(id)
    }

    #[test]
    fn test_board_new_validates_dimensions() {
        assert!(matches!(
            Board::new(0, 3, 1, &[]),
            Err(ConfigError::ZeroDimension { .. })
        ));
        assert_eq!(
            Board::new(10, 3, 3, &[]),
            Err(ConfigError::WidthNotDivisible {
                width: 10,
                section_count: 3
            })
        );
        assert_eq!(
            Board::new(9, 3, 3, &[3]),
            Err(ConfigError::SectionOutOfRange {
                section: 3,
                section_count: 3
            })
        );
    }

    #[test]
    fn test_board_new_rejects_overflowing_dimensions() {
        assert_eq!(
            Board::new(usize::MAX, 2, 1, &[]),
            Err(ConfigError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn test_set_reports_unplayable_cells() {
        let mut board = Board::new(6, 1, 2, &[1]).unwrap();
        assert!(board.set(Pos::new(0, 0), Layer::Front, Some(t(1))));
        assert!(!board.set(Pos::new(4, 0), Layer::Front, Some(t(1))));
        assert!(!board.set(Pos::new(0, 3), Layer::Back, Some(t(1))));
        assert_eq!(board.total_tiles(), 1);
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(6, 4, 2, &[]).unwrap();
        assert_eq!(board.index(Pos::new(0, 0)), Some(0));
        assert_eq!(board.index(Pos::new(5, 0)), Some(5));
        assert_eq!(board.index(Pos::new(0, 1)), Some(6));
        assert_eq!(board.index(Pos::new(5, 3)), Some(23));
        assert_eq!(board.index(Pos::new(6, 0)), None);
        assert_eq!(board.index(Pos::new(0, 4)), None);
    }

    #[test]
    fn test_sections() {
        let board = Board::new(9, 2, 3, &[1]).unwrap();
        assert_eq!(board.columns_per_section(), 3);
        assert_eq!(board.section_of(0), 0);
        assert_eq!(board.section_of(3), 1);
        assert_eq!(board.section_of(8), 2);
        assert_eq!(board.section_columns(2), 6..9);
        assert!(!board.is_section_enabled(1));
        assert!(!board.is_section_enabled(7));
        assert_eq!(board.enabled_sections().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(board.disabled_sections(), vec![1]);
        assert_eq!(board.playable_cells().count(), 12);
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new(6, 2, 2, &[1]).unwrap();
        let p = Pos::new(1, 1);

        assert_eq!(board.place(p, Layer::Front, t(2)), Ok(()));
        assert_eq!(board.type_at(p, Layer::Front), Ok(Some(t(2))));
        assert_eq!(board.is_occupied(p, Layer::Back), Ok(false));
        assert_eq!(
            board.place(p, Layer::Front, t(3)),
            Err(BoardError::CellOccupied(p))
        );
        assert_eq!(
            board.place(Pos::new(4, 0), Layer::Front, t(3)),
            Err(BoardError::InvalidCoordinate(Pos::new(4, 0)))
        );

        assert_eq!(board.remove(p, Layer::Front), Ok(t(2)));
        assert_eq!(
            board.remove(p, Layer::Front),
            Err(BoardError::CellNotOccupied(p))
        );
    }

    #[test]
    fn test_queries_out_of_range() {
        let board = Board::new(3, 1, 1, &[]).unwrap();
        let p = Pos::new(3, 0);
        assert_eq!(board.get(p, Layer::Front), None);
        assert_eq!(
            board.type_at(p, Layer::Front),
            Err(BoardError::InvalidCoordinate(p))
        );
        assert_eq!(
            board.is_occupied(Pos::new(0, 1), Layer::Back),
            Err(BoardError::InvalidCoordinate(Pos::new(0, 1)))
        );
    }

    #[test]
    fn test_move_front_tile() {
        let mut board = Board::new(6, 1, 2, &[]).unwrap();
        board.place(Pos::new(0, 0), Layer::Front, t(1)).unwrap();
        board.place(Pos::new(1, 0), Layer::Front, t(2)).unwrap();

        // Across a section boundary is fine
        assert_eq!(board.move_front_tile(Pos::new(0, 0), Pos::new(5, 0)), Ok(t(1)));
        assert_eq!(board.get(Pos::new(0, 0), Layer::Front), Some(None));
        assert_eq!(board.get(Pos::new(5, 0), Layer::Front), Some(Some(t(1))));
    }

    #[test]
    fn test_rejected_moves_leave_board_unchanged() {
        let mut board = Board::new(6, 1, 2, &[1]).unwrap();
        board.place(Pos::new(0, 0), Layer::Front, t(1)).unwrap();
        board.place(Pos::new(1, 0), Layer::Front, t(2)).unwrap();
        board.place(Pos::new(2, 0), Layer::Back, t(3)).unwrap();
        let before = board.clone();

        let cases = [
            (Pos::new(2, 0), Pos::new(0, 0), BoardError::CellNotOccupied(Pos::new(2, 0))),
            (Pos::new(0, 0), Pos::new(1, 0), BoardError::CellOccupied(Pos::new(1, 0))),
            (Pos::new(0, 0), Pos::new(4, 0), BoardError::InvalidCoordinate(Pos::new(4, 0))),
            (Pos::new(0, 0), Pos::new(9, 0), BoardError::InvalidCoordinate(Pos::new(9, 0))),
            (Pos::new(7, 3), Pos::new(2, 0), BoardError::InvalidCoordinate(Pos::new(7, 3))),
        ];
        for (from, to, err) in cases {
            assert_eq!(board.move_front_tile(from, to), Err(err));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_row_empty_in_section() {
        let mut board = Board::new(6, 2, 2, &[]).unwrap();
        board.place(Pos::new(4, 0), Layer::Front, t(0)).unwrap();
        board.place(Pos::new(1, 1), Layer::Back, t(0)).unwrap();

        assert!(board.is_row_empty_in_section(0, 0, Layer::Front));
        assert!(!board.is_row_empty_in_section(1, 0, Layer::Front));
        assert!(board.is_row_empty_in_section(0, 1, Layer::Front));
        assert!(!board.is_row_empty_in_section(0, 1, Layer::Back));
        assert!(board.is_row_empty_in_section(0, 5, Layer::Front));
    }

    #[test]
    fn test_board_empty_and_counts() {
        let mut board = Board::new(3, 2, 1, &[]).unwrap();
        assert!(board.is_board_empty());

        board.place(Pos::new(2, 1), Layer::Back, t(4)).unwrap();
        assert!(!board.is_board_empty());
        assert_eq!(board.tile_count(Layer::Front), 0);
        assert_eq!(board.total_tiles(), 1);
        assert_eq!(
            board.tiles(Layer::Back).collect::<Vec<_>>(),
            vec![(Pos::new(2, 1), t(4))]
        );
    }
}
