//! Letter sources: where new tiles get their letters from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tile::Letter;

/// Supplies letters for new pieces and obstacles.
pub trait LetterSource {
    fn next_letter(&mut self) -> Letter;
}

/// Relative frequency of each letter, A..=Z.
pub const LETTER_WEIGHTS: [u32; Letter::ALPHABET] = [
    8, 2, 3, 6, 10, 4, 4, 3, 8, 1, 2, 3, 3, 4, 10, 3, 1, 3, 6, 4, 6, 1, 2, 1, 2, 1,
];

/// Weighted random letters drawn from [`LETTER_WEIGHTS`].
#[derive(Debug, Clone)]
pub struct WeightedLetters {
    weights: [u32; Letter::ALPHABET],
    total: u32,
    rng: StdRng,
}

impl WeightedLetters {
    /// Seeded source: the same seed yields the same letter sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            weights: LETTER_WEIGHTS,
            total: LETTER_WEIGHTS.iter().sum(),
            rng,
        }
    }
}

impl LetterSource for WeightedLetters {
    fn next_letter(&mut self) -> Letter {
        let mut roll = self.rng.gen_range(0..self.total);
        let index = self
            .weights
            .iter()
            .position(|&weight| {
                if roll < weight {
                    return true;
                }
                roll -= weight;
                false
            })
            .unwrap_or(Letter::ALPHABET - 1);
        Letter::ALL[index]
    }
}

/// Cycles through a fixed string of letters. Non-letters are skipped.
#[derive(Debug, Clone)]
pub struct ScriptedLetters {
    script: Vec<Letter>,
    next: usize,
}

impl ScriptedLetters {
    /// # Panics
    /// If `script` contains no letters.
    pub fn new(script: &str) -> Self {
        let script: Vec<Letter> = script.chars().filter_map(Letter::new).collect();
        assert!(!script.is_empty(), "letter script must contain at least one letter");
        Self { script, next: 0 }
    }
}

impl LetterSource for ScriptedLetters {
    fn next_letter(&mut self) -> Letter {
        let letter = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        letter
    }
}

impl<S: LetterSource + ?Sized> LetterSource for Box<S> {
    fn next_letter(&mut self) -> Letter {
        (**self).next_letter()
    }
}
