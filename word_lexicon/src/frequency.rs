//! Letter statistics - which starting letters are rare in the corpus?
//!
//! The RARE_ENDING policy wants words whose *last* letter is a letter few
//! words *start* with, so the opponent's next turn is as hard as possible.
//! The table backing that decision is computed at most once per process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::candidate::is_game_word;
use crate::sources::RankedLexicon;

/// Letters assumed rare when the corpus gives us nothing to count.
pub const FALLBACK_RARE_LETTERS: [char; 3] = ['x', 'y', 'z'];

/// Count of ranked-lexicon entries starting with each of the 26 letters.
///
/// Every letter is present, so a letter no word starts with counts as
/// zero rather than being absent. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterFrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl LetterFrequencyTable {
    /// Count first letters across the given words, ignoring entries that
    /// are not purely alphabetic.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: BTreeMap<char, u64> = ('a'..='z').map(|c| (c, 0)).collect();
        for word in words {
            if !is_game_word(word) {
                continue;
            }
            if let Some(first) = word.chars().next() {
                if let Some(count) = counts.get_mut(&first.to_ascii_lowercase()) {
                    *count += 1;
                }
            }
        }
        Self { counts }
    }

    /// Number of counted entries starting with `letter`.
    pub fn count(&self, letter: char) -> u64 {
        self.counts
            .get(&letter.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// True when no entry was counted at all.
    pub fn is_degenerate(&self) -> bool {
        self.counts.values().all(|&count| count == 0)
    }

    /// The set of letters tied for the minimum count, or the fixed
    /// fallback set when the table is degenerate.
    pub fn least_frequent(&self) -> BTreeSet<char> {
        if self.is_degenerate() {
            return FALLBACK_RARE_LETTERS.into_iter().collect();
        }
        let min = self.counts.values().copied().min().unwrap_or(0);
        self.counts
            .iter()
            .filter(|(_, &count)| count == min)
            .map(|(&letter, _)| letter)
            .collect()
    }
}

/// Lazily computed view over the ranked lexicon's letter statistics.
///
/// Both the table and the derived target set are built exactly once,
/// behind `OnceLock`, no matter how many threads ask first.
#[derive(Debug, Default)]
pub struct LetterFrequencyIndex {
    table: OnceLock<LetterFrequencyTable>,
    targets: OnceLock<BTreeSet<char>>,
}

impl LetterFrequencyIndex {
    /// Create an index with nothing computed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The letter-frequency table, computing it on first use.
    pub fn table(&self, lexicon: &RankedLexicon) -> &LetterFrequencyTable {
        self.table.get_or_init(|| {
            let table = LetterFrequencyTable::from_words(lexicon.words());
            tracing::debug!(entries = lexicon.len(), "letter frequency table computed");
            table
        })
    }

    /// The globally least-common starting letters, computing them on
    /// first use.
    pub fn least_frequent_start_letters(&self, lexicon: &RankedLexicon) -> &BTreeSet<char> {
        self.targets
            .get_or_init(|| self.table(lexicon).least_frequent())
    }
}
