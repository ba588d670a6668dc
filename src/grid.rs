//! Grid: fixed-size board of optional tiles.
//!
//! Storage is a flat row-major `Vec` (`y * width + x`). Every coordinate access goes
//! through a bounds check and reports [`GridError::OutOfBounds`] instead of touching
//! storage, and every write stamps the tile with the coordinate it was written to.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::letters::LetterSource;
use crate::tile::{Connection, Letter, Pos, Tile};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("tile at ({x}, {y}) is connected {connection:?} but its partner does not point back")]
    DanglingConnection {
        x: i32,
        y: i32,
        connection: Connection,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a grid from text rows: uppercase = tile, lowercase = greyed tile,
    /// anything else = empty. Intended for tests and demos.
    ///
    /// # Panics
    /// If the rows are empty or ragged.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(!rows.is_empty(), "grid needs at least one row");
        let width = rows[0].chars().count();
        assert!(
            rows.iter().all(|r| r.chars().count() == width),
            "all rows must have the same width"
        );
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = match Letter::new(c) {
                    Some(l) if c.is_ascii_lowercase() => Some(Tile::greyed(l)),
                    Some(l) => Some(Tile::new(l)),
                    None => None,
                };
                let idx = y * width + x;
                grid.cells[idx] = tile.map(|t| t.at(Pos::new(x as i32, y as i32)));
            }
        }
        grid
    }

    /// Inverse of [`Grid::from_rows`]; empty cells render as '.'.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(t) if t.greyed => t.letter.lower(),
                        Some(t) => t.letter.upper(),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index for (x, y), or `None` when out of bounds.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos.x, pos.y).is_some()
    }

    /// Coordinate of a flat index. The index must be below `width * height`.
    #[inline]
    pub fn position_of(&self, index: usize) -> Pos {
        debug_assert!(index < self.cells.len());
        Pos::new((index % self.width) as i32, (index / self.width) as i32)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.index(x, y).ok_or(GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Copy of the cell at (x, y).
    pub fn get(&self, x: i32, y: i32) -> Result<Option<Tile>, GridError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the cell at (x, y). A written tile takes (x, y) as its position.
    pub fn set(&mut self, x: i32, y: i32, tile: Option<Tile>) -> Result<(), GridError> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = tile.map(|t| t.at(Pos::new(x, y)));
        Ok(())
    }

    /// Remove and return the tile at (x, y).
    pub fn take(&mut self, x: i32, y: i32) -> Result<Option<Tile>, GridError> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx].take())
    }

    /// True when (x, y) is in bounds and holds a tile.
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        matches!(self.index(x, y).map(|i| &self.cells[i]), Some(Some(_)))
    }

    /// True when (x, y) is in bounds and empty, i.e. a tile may move there.
    pub fn is_vacant(&self, pos: Pos) -> bool {
        matches!(self.index(pos.x, pos.y).map(|i| &self.cells[i]), Some(None))
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    pub fn iter_filled(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn filled_count(&self) -> usize {
        self.iter_filled().count()
    }

    /// Flat indices of row `y`, left to right.
    pub fn row_indices(&self, y: usize) -> impl Iterator<Item = usize> {
        let start = y * self.width;
        start..start + self.width
    }

    /// Flat indices of column `x`, top to bottom.
    pub fn column_indices(&self, x: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.height).map(move |y| y * self.width + x)
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Tile> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    pub(crate) fn vacate(&mut self, index: usize) -> Option<Tile> {
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Move a tile between two flat indices, restamping its position.
    /// The destination is overwritten.
    pub(crate) fn relocate(&mut self, from: usize, to: usize) {
        let pos = self.position_of(to);
        let tile = self.cells[from].take();
        self.cells[to] = tile.map(|t| t.at(pos));
    }

    /// The partner tile a connected tile at `pos` points to, if it points back.
    pub fn reciprocal_partner(&self, pos: Pos) -> Option<Pos> {
        let tile = self.get(pos.x, pos.y).ok()??;
        let partner_pos = pos.towards(tile.connection);
        if partner_pos == pos {
            return None;
        }
        let partner = self.get(partner_pos.x, partner_pos.y).ok()??;
        (partner.connection == tile.connection.opposite()).then_some(partner_pos)
    }

    /// Verify the connection invariant without repairing anything.
    pub fn check_connections(&self) -> Result<(), GridError> {
        for tile in self.iter_filled() {
            if tile.connection != Connection::None && self.reciprocal_partner(tile.pos).is_none() {
                return Err(GridError::DanglingConnection {
                    x: tile.pos.x,
                    y: tile.pos.y,
                    connection: tile.connection,
                });
            }
        }
        Ok(())
    }

    /// Place up to `count` greyed tiles at random empty cells within the bottom `rows`
    /// rows. Returns how many were placed.
    pub fn scatter_obstacles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rows: usize,
        rng: &mut R,
        letters: &mut dyn LetterSource,
    ) -> usize {
        let first_row = self.height.saturating_sub(rows);
        let mut candidates: Vec<usize> = (first_row * self.width..self.cells.len())
            .filter(|&i| self.cells[i].is_none())
            .collect();
        candidates.shuffle(rng);
        candidates.truncate(count);
        for &idx in &candidates {
            let pos = self.position_of(idx);
            self.cells[idx] = Some(Tile::greyed(letters.next_letter()).at(pos));
        }
        candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::ScriptedLetters;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tile(c: char) -> Tile {
        Tile::new(Letter::new(c).unwrap())
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(8, 10);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(7, 0), Some(7));
        assert_eq!(grid.index(0, 1), Some(8));
        assert_eq!(grid.index(7, 9), Some(79));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(8, 0), None);
        assert_eq!(grid.index(0, 10), None);
    }

    #[test]
    fn test_set_stamps_position() {
        let mut grid = Grid::new(10, 10);
        grid.set(4, 7, Some(tile('A').at(Pos::new(0, 0)))).unwrap();
        let t = grid.get(4, 7).unwrap().unwrap();
        assert_eq!(t.pos, Pos::new(4, 7));
        assert!(grid.is_filled(4, 7));
    }

    #[test]
    fn test_out_of_bounds_access_fails_without_writing() {
        let mut grid = Grid::new(10, 10);
        assert!(matches!(grid.get(10, 0), Err(GridError::OutOfBounds { x: 10, .. })));
        assert!(grid.get(0, -1).is_err());
        assert!(grid.set(-1, 3, Some(tile('B'))).is_err());
        assert!(grid.take(3, 10).is_err());
        assert!(!grid.is_filled(-1, 0));
        assert!(!grid.is_vacant(Pos::new(0, 10)));
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_clear_empties_every_cell_for_all_sizes() {
        for w in 4..=12 {
            for h in 4..=12 {
                let mut grid = Grid::new(w, h);
                for y in 0..h as i32 {
                    for x in 0..w as i32 {
                        grid.set(x, y, Some(tile('E'))).unwrap();
                    }
                }
                grid.clear();
                for y in 0..h as i32 {
                    for x in 0..w as i32 {
                        assert!(!grid.is_filled(x, y));
                        assert_eq!(grid.get(x, y), Ok(None));
                    }
                }
            }
        }
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = ["....", ".AB.", "cD.."];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.get(0, 2).unwrap().unwrap().greyed);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_line_indices() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.row_indices(1).collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert_eq!(grid.column_indices(2).collect::<Vec<_>>(), vec![2, 6, 10]);
    }

    #[test]
    fn test_check_connections_detects_dangling_partner() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 3, Some(tile('A').with_connection(Connection::Right))).unwrap();
        grid.set(2, 3, Some(tile('B').with_connection(Connection::Left))).unwrap();
        assert_eq!(grid.check_connections(), Ok(()));
        assert_eq!(grid.reciprocal_partner(Pos::new(1, 3)), Some(Pos::new(2, 3)));

        grid.take(2, 3).unwrap();
        assert!(matches!(
            grid.check_connections(),
            Err(GridError::DanglingConnection { x: 1, y: 3, .. })
        ));
    }

    #[test]
    fn test_scatter_obstacles_stays_in_bottom_rows() {
        let mut grid = Grid::new(10, 10);
        let mut rng = StdRng::seed_from_u64(7);
        let mut letters = ScriptedLetters::new("XYZ");
        let placed = grid.scatter_obstacles(10, 3, &mut rng, &mut letters);
        assert_eq!(placed, 10);
        assert_eq!(grid.filled_count(), 10);
        for t in grid.iter_filled() {
            assert!(t.greyed);
            assert!(t.pos.y >= 7);
        }
    }

    #[test]
    fn test_scatter_obstacles_caps_at_free_cells() {
        let mut grid = Grid::new(4, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut letters = ScriptedLetters::new("Q");
        assert_eq!(grid.scatter_obstacles(50, 1, &mut rng, &mut letters), 4);
    }
}
