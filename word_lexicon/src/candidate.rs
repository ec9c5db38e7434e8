//! Candidate values produced by lexicon lookups.

/// A transient candidate produced during a lookup. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The word as it appears in the source lexicon.
    pub text: String,

    /// Corpus frequency, present only for ranked sources.
    pub frequency: Option<f64>,
}

impl Candidate {
    /// Create a candidate carrying a corpus frequency.
    pub fn ranked(text: impl Into<String>, frequency: f64) -> Self {
        Self {
            text: text.into(),
            frequency: Some(frequency),
        }
    }

    /// Create a candidate without a frequency score.
    pub fn unranked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            frequency: None,
        }
    }

    /// The lowercase last letter of the word, if any.
    pub fn last_letter(&self) -> Option<char> {
        self.text.chars().last().map(|c| c.to_ascii_lowercase())
    }
}

/// True when the text is a legal game word: non-empty and purely alphabetic.
pub fn is_game_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic())
}
