//! Parsing of inbound game messages.
//!
//! The game bot sends two message shapes the engine cares about: the
//! turn prompt naming a start letter and minimum length, and the notice
//! that a previously sent word was rejected. Everything else about the
//! transport stays outside this crate.

const PROMPT_PREFIX: &str = "Your word must start with ";
const PROMPT_MIDDLE: &str = " and include at least ";
const PROMPT_SUFFIX: &str = " letters.";
const REJECTION_SUFFIX: &str = " is not in my list of words.";

/// A parsed turn prompt: "Your word must start with z and include at
/// least 4 letters."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePrompt {
    pub start_letter: char,
    pub min_length: usize,
}

/// A parsed rejection notice: "Zebra is not in my list of words."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub word: String,
}

/// Find a turn prompt on any line of the message, if present.
pub fn parse_prompt(text: &str) -> Option<GamePrompt> {
    for line in text.lines() {
        let Some(rest) = line.trim().strip_prefix(PROMPT_PREFIX) else {
            continue;
        };
        let mut chars = rest.chars();
        let start_letter = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => c,
            _ => continue,
        };
        let Some(rest) = chars.as_str().strip_prefix(PROMPT_MIDDLE) else {
            continue;
        };
        let Some(digits) = rest.strip_suffix(PROMPT_SUFFIX) else {
            continue;
        };
        let Ok(min_length) = digits.parse::<usize>() else {
            continue;
        };
        return Some(GamePrompt {
            start_letter,
            min_length,
        });
    }
    None
}

/// Parse a whole-message rejection notice, if the message is one.
pub fn parse_rejection(text: &str) -> Option<Rejection> {
    let word = text.trim().strip_suffix(REJECTION_SUFFIX)?;
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(Rejection {
        word: word.to_string(),
    })
}
