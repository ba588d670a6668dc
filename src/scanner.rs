//! Word search over grid rows and columns.
//!
//! Each line is read as lowercase letters with a blank for every empty or marked
//! cell. Candidate runs are tried longest first and left to right; the first run
//! that passes every gate marks its cells. Rows are scanned before columns, and
//! cells marked by an earlier line in the same pass read as blanks afterwards, so
//! one cell never counts towards two words in a single scan.

use log::debug;

use crate::dictionary::Dictionary;
use crate::grid::Grid;

/// Shortest word the scanner will mark.
pub const MIN_WORD_LEN: usize = 3;

const BLANK: char = ' ';

/// A dictionary word found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Offset of the first letter within the line.
    pub start: usize,
    pub len: usize,
    pub word: String,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// At least one vowel and at least one consonant.
fn is_viable(run: &[char]) -> bool {
    run.iter().any(|&c| is_vowel(c)) && run.iter().any(|&c| c.is_ascii_lowercase() && !is_vowel(c))
}

/// Long enough and made only of letters.
fn is_valid(run: &[char]) -> bool {
    run.len() >= MIN_WORD_LEN && run.iter().all(char::is_ascii_lowercase)
}

/// Longest (then leftmost) dictionary word in `line`, at most `max_len` letters.
/// Blanks in `line` are any non-letter character.
pub fn find_word(line: &str, dict: &Dictionary, max_len: usize) -> Option<Match> {
    let chars: Vec<char> = line.chars().collect();
    let longest = max_len.min(chars.len());
    for len in (MIN_WORD_LEN..=longest).rev() {
        for start in 0..=chars.len() - len {
            let run = &chars[start..start + len];
            if !is_viable(run) || !is_valid(run) {
                continue;
            }
            let word: String = run.iter().collect();
            if dict.contains(&word) {
                return Some(Match { start, len, word });
            }
        }
    }
    None
}

/// Read the cells at `indices` as a scan line.
fn read_line(grid: &Grid, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| match grid.slot(i) {
            Some(t) if !t.marked => t.letter.lower(),
            _ => BLANK,
        })
        .collect()
}

fn scan_line(grid: &mut Grid, dict: &Dictionary, indices: &[usize], max_len: usize) -> bool {
    let line = read_line(grid, indices);
    let Some(found) = find_word(&line, dict, max_len) else {
        return false;
    };
    for &idx in &indices[found.start..found.start + found.len] {
        if let Some(tile) = grid.slot_mut(idx) {
            tile.marked = true;
        }
    }
    debug!("marked {:?} at cells {:?}", found.word, &indices[found.start..found.start + found.len]);
    true
}

/// Mark the first word of every row, then every column. Returns true if anything
/// was marked.
pub fn scan(grid: &mut Grid, dict: &Dictionary) -> bool {
    let max_len = grid.width().min(grid.height());
    let mut found = false;
    for y in 0..grid.height() {
        let indices: Vec<usize> = grid.row_indices(y).collect();
        found |= scan_line(grid, dict, &indices, max_len);
    }
    for x in 0..grid.width() {
        let indices: Vec<usize> = grid.column_indices(x).collect();
        found |= scan_line(grid, dict, &indices, max_len);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Dictionary {
        Dictionary::from_words(words.iter().copied()).unwrap()
    }

    fn marked_rows(grid: &Grid) -> Vec<String> {
        grid.cells()
            .chunks(grid.width())
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Some(t) if t.marked => '#',
                        Some(_) => 'o',
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn longest_word_wins() {
        let d = dict(&["cat", "cats", "at"]);
        let m = find_word("  cats  ", &d, 8).unwrap();
        assert_eq!(m, Match { start: 2, len: 4, word: "cats".into() });
    }

    #[test]
    fn leftmost_wins_among_equal_lengths() {
        let d = dict(&["tea", "eat"]);
        let m = find_word("teat", &d, 4).unwrap();
        assert_eq!((m.start, m.word.as_str()), (0, "tea"));
    }

    #[test]
    fn max_len_caps_candidates() {
        let d = dict(&["cats", "cat"]);
        assert_eq!(find_word("cats", &d, 3).unwrap().word, "cat");
        assert_eq!(find_word("cats", &d, 2), None);
    }

    #[test]
    fn viability_gate_runs_before_lookup() {
        let d = dict(&["xyzqv", "aeiou"]);
        assert_eq!(find_word("xyzqv", &d, 5), None);
        assert_eq!(find_word("aeiou", &d, 5), None);
    }

    #[test]
    fn blanks_split_words() {
        let d = dict(&["cat"]);
        assert_eq!(find_word("c at", &d, 4), None);
        assert_eq!(find_word("ca", &d, 4), None);
    }

    #[test]
    fn scan_marks_longest_run_in_row() {
        let d = dict(&["cat", "cats", "at"]);
        let mut grid = Grid::from_rows(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "..CATS..",
        ]);
        assert!(scan(&mut grid, &d));
        assert_eq!(marked_rows(&grid)[7], "..####..");
    }

    #[test]
    fn scan_finds_columns() {
        let d = dict(&["dog"]);
        let mut grid = Grid::from_rows(&["....", ".D..", ".O..", ".G.."]);
        assert!(scan(&mut grid, &d));
        assert_eq!(marked_rows(&grid), ["....", ".#..", ".#..", ".#.."]);
    }

    #[test]
    fn greyed_tiles_spell_words_too() {
        let d = dict(&["sun"]);
        let mut grid = Grid::from_rows(&["....", "....", "....", "sUn."]);
        assert!(scan(&mut grid, &d));
        assert_eq!(marked_rows(&grid)[3], "###.");
    }

    #[test]
    fn row_marks_are_blanks_for_columns() {
        // "ten" in the bottom row takes the T; the column "net" would need it.
        let d = dict(&["ten", "net"]);
        let mut grid = Grid::from_rows(&["....", "N...", "E...", "TEN."]);
        assert!(scan(&mut grid, &d));
        assert_eq!(marked_rows(&grid), ["....", "o...", "o...", "###."]);
    }

    #[test]
    fn no_word_no_marks() {
        let d = dict(&["zebra"]);
        let mut grid = Grid::from_rows(&["....", "....", "CAT.", "DOG."]);
        let before = grid.clone();
        assert!(!scan(&mut grid, &d));
        assert_eq!(grid, before);
    }

    #[test]
    fn scan_is_deterministic_until_the_grid_changes() {
        let d = dict(&["cat", "cats", "at", "act"]);
        let rows = ["........", "........", "..A.....", ".ACT....", "..CATS.."];
        let mut first = Grid::from_rows(&rows);
        let mut second = Grid::from_rows(&rows);
        assert!(scan(&mut first, &d));
        assert!(scan(&mut second, &d));
        assert_eq!(marked_rows(&first), marked_rows(&second));

        // A repeat scan sees only blanks where the words were.
        let after = marked_rows(&first);
        assert!(!scan(&mut first, &d));
        assert_eq!(marked_rows(&first), after);
    }
}
