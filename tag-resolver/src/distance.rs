use std::mem;

use derive_more::{Display, From};

/// The Levenshtein distance between two tags.
#[derive(Debug, Clone, Copy, Display, From, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance(usize);

impl Distance {
    pub const EXACT: Distance = Distance(0);

    pub fn is_exact(&self) -> bool {
        *self == Self::EXACT
    }
}

/// Calculates the Levenshtein distance between `a` and `b`: the minimum number
/// of single character insertions, deletions, and substitutions needed to turn
/// one into the other.
///
/// Characters are compared exactly, so case and whitespace both count.
pub fn edit_distance(a: &str, b: &str) -> Distance {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Only two rows of the (a + 1) x (b + 1) table are ever live: the one
    // we're filling in, and the one above it.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + if ca == cb { 0 } else { 1 };
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;

            curr[j + 1] = substitution.min(deletion).min(insertion);
        }

        mem::swap(&mut prev, &mut curr);
    }

    Distance(prev[b.len()])
}
