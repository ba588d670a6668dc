//! Read-only view of a game for renderers.

use crate::game::Phase;
use crate::tile::{Letter, Tile};

/// What occupies one cell, with the falling piece drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Settled(Tile),
    Falling(Tile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major board cells, without the piece.
    pub cells: Vec<Option<Tile>>,
    /// Primary and secondary tiles of the falling piece.
    pub piece: Option<[Tile; 2]>,
    /// Letters of the next piece.
    pub next: [Letter; 2],
    pub phase: Phase,
    pub paused: bool,
}

impl Snapshot {
    pub fn cell(&self, x: usize, y: usize) -> CellView {
        if let Some(tile) = self
            .piece
            .iter()
            .flatten()
            .find(|t| t.pos.x as usize == x && t.pos.y as usize == y)
        {
            return CellView::Falling(*tile);
        }
        if x >= self.width {
            return CellView::Empty;
        }
        match self.cells.get(y * self.width + x).copied().flatten() {
            Some(tile) => CellView::Settled(tile),
            None => CellView::Empty,
        }
    }

    /// Board rows as text: letters for tiles, '.' for empty cells. Greyed tiles are
    /// lowercase.
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| match self.cell(x, y) {
                        CellView::Empty => '.',
                        CellView::Settled(t) if t.greyed => t.letter.lower(),
                        CellView::Settled(t) | CellView::Falling(t) => t.letter.upper(),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
