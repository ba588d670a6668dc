//! The falling two-tile piece under player control.
//!
//! A piece never lives in the grid: it is checked against the grid for every move and
//! only written into it by [`Piece::commit`]. Rotation is driven by a single table
//! keyed by the current [`Layout`] and the [`Rotation`] direction; wall and obstacle
//! kicks share one validation routine.

use log::debug;
use thiserror::Error;

use crate::grid::{Grid, GridError};
use crate::tile::{Connection, Letter, Pos, Tile};

/// Relative arrangement of the primary (A) and secondary (B) tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// A left of B.
    PrimaryLeft,
    /// A above B.
    PrimaryAbove,
    /// B left of A.
    PrimaryRight,
    /// B above A.
    PrimaryBelow,
}

impl Layout {
    /// Connections of (primary, secondary) in this layout.
    pub fn connections(self) -> (Connection, Connection) {
        match self {
            Self::PrimaryLeft => (Connection::Right, Connection::Left),
            Self::PrimaryAbove => (Connection::Down, Connection::Up),
            Self::PrimaryRight => (Connection::Left, Connection::Right),
            Self::PrimaryBelow => (Connection::Up, Connection::Down),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::PrimaryLeft | Self::PrimaryRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Cw,
    Ccw,
}

impl Rotation {
    /// Column shift applied when the rotated cells are blocked.
    fn kick(self) -> i32 {
        match self {
            Self::Cw => -1,
            Self::Ccw => 1,
        }
    }
}

/// One rotation rule: deltas for primary and secondary, and the resulting layout.
struct Turn {
    primary: (i32, i32),
    secondary: (i32, i32),
    next: Layout,
}

const fn turn(primary: (i32, i32), secondary: (i32, i32), next: Layout) -> Turn {
    Turn {
        primary,
        secondary,
        next,
    }
}

fn turn_for(layout: Layout, rotation: Rotation) -> Turn {
    use Layout::*;
    match (layout, rotation) {
        (PrimaryLeft, Rotation::Cw) => turn((0, -1), (-1, 0), PrimaryAbove),
        (PrimaryAbove, Rotation::Cw) => turn((1, 1), (0, 0), PrimaryRight),
        (PrimaryRight, Rotation::Cw) => turn((-1, 0), (0, -1), PrimaryBelow),
        (PrimaryBelow, Rotation::Cw) => turn((0, 0), (1, 1), PrimaryLeft),
        (PrimaryLeft, Rotation::Ccw) => turn((1, 0), (0, -1), PrimaryBelow),
        (PrimaryBelow, Rotation::Ccw) => turn((0, 0), (-1, 1), PrimaryRight),
        (PrimaryRight, Rotation::Ccw) => turn((0, -1), (1, 0), PrimaryAbove),
        (PrimaryAbove, Rotation::Ccw) => turn((-1, 1), (0, 0), PrimaryLeft),
    }
}

/// Spawning failed because a spawn cell is occupied. The game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("spawn cell ({}, {}) is occupied", .0.x, .0.y)]
pub struct SpawnBlocked(pub Pos);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    primary: Tile,
    secondary: Tile,
    layout: Layout,
}

impl Piece {
    /// Primary spawn cell; the secondary spawns one column to its right.
    pub fn spawn_position(grid: &Grid) -> Pos {
        Pos::new(grid.width() as i32 / 2 - 1, 0)
    }

    /// Place a new horizontal piece at the top centre of the grid.
    pub fn spawn(first: Letter, second: Letter, grid: &Grid) -> Result<Self, SpawnBlocked> {
        let at = Self::spawn_position(grid);
        for pos in [at, at.offset(1, 0)] {
            if !grid.is_vacant(pos) {
                return Err(SpawnBlocked(pos));
            }
        }
        let layout = Layout::PrimaryLeft;
        let (pc, sc) = layout.connections();
        let piece = Self {
            primary: Tile::new(first).with_connection(pc).at(at),
            secondary: Tile::new(second).with_connection(sc).at(at.offset(1, 0)),
            layout,
        };
        debug!("spawned {}{} at ({}, {})", first, second, at.x, at.y);
        Ok(piece)
    }

    pub fn primary(&self) -> &Tile {
        &self.primary
    }

    pub fn secondary(&self) -> &Tile {
        &self.secondary
    }

    pub fn tiles(&self) -> [Tile; 2] {
        [self.primary, self.secondary]
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn fits(grid: &Grid, cells: [Pos; 2]) -> bool {
        cells.iter().all(|&p| grid.is_vacant(p))
    }

    /// Shift both tiles by (dx, dy) if both destinations are in bounds and empty.
    pub fn try_move(&mut self, dx: i32, dy: i32, grid: &Grid) -> bool {
        let cells = [self.primary.pos.offset(dx, dy), self.secondary.pos.offset(dx, dy)];
        if !Self::fits(grid, cells) {
            return false;
        }
        self.primary.pos = cells[0];
        self.secondary.pos = cells[1];
        true
    }

    /// Whether the piece can fall one more row.
    pub fn can_fall(&self, grid: &Grid) -> bool {
        Self::fits(
            grid,
            [self.primary.pos.offset(0, 1), self.secondary.pos.offset(0, 1)],
        )
    }

    /// Rotate a quarter turn, kicking one column if the target cells are blocked.
    /// On rejection nothing changes.
    pub fn try_rotate(&mut self, rotation: Rotation, grid: &Grid) -> bool {
        let turn = turn_for(self.layout, rotation);
        let mut cells = [
            self.primary.pos.offset(turn.primary.0, turn.primary.1),
            self.secondary.pos.offset(turn.secondary.0, turn.secondary.1),
        ];
        if cells.iter().any(|p| p.y < 0) {
            return false;
        }
        if !Self::fits(grid, cells) {
            let dx = rotation.kick();
            cells = cells.map(|p| p.offset(dx, 0));
            if !Self::fits(grid, cells) {
                return false;
            }
            debug!("rotation {:?} kicked by {}", rotation, dx);
        }
        let (pc, sc) = turn.next.connections();
        self.primary = self.primary.with_connection(pc).at(cells[0]);
        self.secondary = self.secondary.with_connection(sc).at(cells[1]);
        self.layout = turn.next;
        true
    }

    /// Swap the two letters; positions and connections stay.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.primary.letter, &mut self.secondary.letter);
    }

    /// Write both tiles into the grid, consuming the piece.
    pub fn commit(self, grid: &mut Grid) -> Result<(), GridError> {
        for tile in self.tiles() {
            grid.set(tile.pos.x, tile.pos.y, Some(tile))?;
        }
        Ok(())
    }

    /// Set the piece in place as two unconnected obstacles.
    pub fn commit_anchored(self, grid: &mut Grid) -> Result<(), GridError> {
        for tile in self.tiles() {
            let anchored = Tile::greyed(tile.letter);
            grid.set(tile.pos.x, tile.pos.y, Some(anchored))?;
        }
        Ok(())
    }
}
