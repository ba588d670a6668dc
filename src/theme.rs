//! Colours for the board, tiles and overlays.

use ratatui::style::{Color, Style};

use crate::Palette;

/// Foreground/background pair for one kind of tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColors {
    pub fg: Color,
    pub bg: Color,
}

impl TileColors {
    pub fn style(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    /// Board background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    /// Body text.
    pub main_fg: Color,
    /// Titles and labels.
    pub title: Color,
    /// Settled tile.
    pub tile: TileColors,
    /// Obstacle tile.
    pub greyed: TileColors,
    /// Tile that is part of a found word.
    pub marked: TileColors,
    /// Tile of the falling piece.
    pub piece: TileColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark()
    }
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Theme {
    /// One Dark colours.
    pub fn onedark() -> Self {
        Self {
            bg: rgb(0x31353F),
            div_line: rgb(0x3F444F),
            main_fg: rgb(0xABB2BF),
            title: rgb(0xE5C07B),
            tile: TileColors {
                fg: rgb(0x282C34),
                bg: rgb(0x61AFEF),
            },
            greyed: TileColors {
                fg: rgb(0xABB2BF),
                bg: rgb(0x5C6370),
            },
            marked: TileColors {
                fg: rgb(0x282C34),
                bg: rgb(0x98C379),
            },
            piece: TileColors {
                fg: rgb(0x282C34),
                bg: rgb(0xE5C07B),
            },
        }
    }

    pub fn for_palette(palette: Palette) -> Self {
        let mut theme = Self::onedark();
        theme.apply_palette(palette);
        theme
    }

    /// Override tile colours for the chosen palette.
    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => {
                self.bg = Color::Black;
                self.main_fg = Color::White;
                self.tile = TileColors {
                    fg: Color::Black,
                    bg: rgb(0x00FFFF),
                };
                self.greyed = TileColors {
                    fg: Color::White,
                    bg: rgb(0x444444),
                };
                self.marked = TileColors {
                    fg: Color::Black,
                    bg: rgb(0x00FF00),
                };
                self.piece = TileColors {
                    fg: Color::Black,
                    bg: rgb(0xFFFF00),
                };
            }
        }
    }
}
