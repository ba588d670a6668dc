//! Tile model: letters, connection directions, grid positions.

use std::fmt;

/// One of the 26 letters, stored uppercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    pub const ALPHABET: usize = 26;

    /// 'A'..='Z' in order.
    pub const ALL: [Self; Self::ALPHABET] = {
        let mut out = [Self(b'A'); Self::ALPHABET];
        let mut i = 0;
        while i < Self::ALPHABET {
            out[i] = Self(b'A' + i as u8);
            i += 1;
        }
        out
    };

    /// Normalise an ASCII letter of either case. Anything else is rejected.
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self(c.to_ascii_uppercase() as u8))
    }

    /// Letter from its alphabet index (0 = 'A').
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    #[inline]
    pub fn upper(self) -> char {
        self.0 as char
    }

    #[inline]
    pub fn lower(self) -> char {
        self.0.to_ascii_lowercase() as char
    }

    pub fn is_vowel(self) -> bool {
        matches!(self.0, b'A' | b'E' | b'I' | b'O' | b'U')
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upper())
    }
}

impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.upper())
    }
}

/// Which neighbour a tile is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Connection {
    /// The direction the partner must point back with.
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset towards the partner, if any.
    pub fn offset(self) -> Option<(i32, i32)> {
        match self {
            Self::None => None,
            Self::Up => Some((0, -1)),
            Self::Down => Some((0, 1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Grid coordinate. y = 0 is the top row; may be negative for candidate positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbour in the direction of `connection` (self for `None`).
    pub fn towards(self, connection: Connection) -> Self {
        match connection.offset() {
            Some((dx, dy)) => self.offset(dx, dy),
            None => self,
        }
    }
}

/// A lettered cell. Occupancy lives outside the tile: grid cells are `Option<Tile>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub letter: Letter,
    /// Pending removal; set by the word scanner.
    pub marked: bool,
    /// Immovable obstacle: never falls, never part of a controlled piece.
    pub greyed: bool,
    pub connection: Connection,
    /// Authoritative position; the grid rewrites it on every `set`.
    pub pos: Pos,
}

impl Tile {
    pub fn new(letter: Letter) -> Self {
        Self {
            letter,
            marked: false,
            greyed: false,
            connection: Connection::None,
            pos: Pos::default(),
        }
    }

    pub fn greyed(letter: Letter) -> Self {
        Self {
            greyed: true,
            ..Self::new(letter)
        }
    }

    pub fn with_connection(self, connection: Connection) -> Self {
        Self { connection, ..self }
    }

    pub fn at(self, pos: Pos) -> Self {
        Self { pos, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_normalise_to_uppercase() {
        assert_eq!(Letter::new('q'), Letter::new('Q'));
        assert_eq!(Letter::new('q').map(Letter::lower), Some('q'));
        assert_eq!(Letter::new('1'), None);
        assert_eq!(Letter::new('é'), None);
    }

    #[test]
    fn letter_index_round_trip_bounds() {
        assert_eq!(Letter::from_index(0).map(Letter::upper), Some('A'));
        assert_eq!(Letter::from_index(25).map(Letter::upper), Some('Z'));
        assert_eq!(Letter::from_index(26), None);
    }

    #[test]
    fn vowels() {
        let vowels: String = (0..26)
            .filter_map(Letter::from_index)
            .filter(|l| l.is_vowel())
            .map(Letter::upper)
            .collect();
        assert_eq!(vowels, "AEIOU");
    }

    #[test]
    fn connection_opposites_and_offsets_agree() {
        for c in [Connection::Up, Connection::Down, Connection::Left, Connection::Right] {
            let (dx, dy) = c.offset().unwrap();
            let (ox, oy) = c.opposite().offset().unwrap();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(c.opposite().opposite(), c);
        }
        assert_eq!(Connection::None.offset(), None);
        assert_eq!(Pos::new(3, 3).towards(Connection::None), Pos::new(3, 3));
    }
}
