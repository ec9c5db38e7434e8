//! The frequency-ranked lexicon, bounded to a top-N window.

use std::collections::HashMap;

use crate::candidate::{is_game_word, Candidate};
use crate::sources::LexiconSource;

/// A word source ordered by descending corpus frequency.
///
/// Only the top `window` entries are visible to selection; words outside
/// the window do not exist as far as this source is concerned, even if
/// they would otherwise satisfy a lookup.
#[derive(Debug, Clone, Default)]
pub struct RankedLexicon {
    /// Entries in descending frequency order, truncated to the window.
    entries: Vec<(String, f64)>,

    /// Index: lowercase word -> frequency, for point lookups.
    by_word: HashMap<String, f64>,
}

impl RankedLexicon {
    /// The top-N window applied when no explicit window is given.
    pub const DEFAULT_WINDOW: usize = 300_000;

    /// Build a lexicon from entries already ordered by descending
    /// frequency, keeping at most `window` of them.
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>, window: usize) -> Self {
        let entries: Vec<(String, f64)> = entries.into_iter().take(window).collect();
        let by_word = entries
            .iter()
            .map(|(word, freq)| (word.to_lowercase(), *freq))
            .collect();
        Self { entries, by_word }
    }

    /// Build a lexicon with [`Self::DEFAULT_WINDOW`].
    pub fn with_default_window(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self::new(entries, Self::DEFAULT_WINDOW)
    }

    /// Corpus frequency of a word (case-insensitive), if it is inside
    /// the window.
    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.by_word.get(&word.to_lowercase()).copied()
    }

    /// All words inside the window, most frequent first.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    /// Number of entries inside the window.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the window contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexiconSource for RankedLexicon {
    fn matching(&self, start_letter: char, min_length: usize) -> Vec<Candidate> {
        let start = start_letter.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|(word, _)| {
                is_game_word(word)
                    && word.len() >= min_length
                    && word
                        .chars()
                        .next()
                        .is_some_and(|c| c.to_ascii_lowercase() == start)
            })
            .map(|(word, freq)| Candidate::ranked(word.clone(), *freq))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> RankedLexicon {
        RankedLexicon::with_default_window(vec![
            ("the".to_string(), 0.05),
            ("zone".to_string(), 0.002),
            ("zebra".to_string(), 0.0005),
            ("don't".to_string(), 0.01),
            ("zip".to_string(), 0.0004),
        ])
    }

    #[test]
    fn test_matching_filters_letter_length_and_alphabetic() {
        let candidates = lexicon().matching('z', 4);
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["zone", "zebra"]);
        assert!(candidates.iter().all(|c| c.frequency.is_some()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(lexicon().matching('Z', 3).len(), 3);
    }

    #[test]
    fn test_window_truncates() {
        let entries = vec![
            ("alpha".to_string(), 0.3),
            ("beta".to_string(), 0.2),
            ("bravo".to_string(), 0.1),
        ];
        let lexicon = RankedLexicon::new(entries, 2);
        assert_eq!(lexicon.len(), 2);
        // "bravo" fell outside the window and is invisible.
        assert!(lexicon.matching('b', 5).is_empty());
        assert_eq!(lexicon.frequency("bravo"), None);
    }

    #[test]
    fn test_frequency_lookup_is_case_insensitive() {
        assert_eq!(lexicon().frequency("ZONE"), Some(0.002));
        assert_eq!(lexicon().frequency("missing"), None);
    }
}
