//! # Word Lexicon
//!
//! The "Word Bible" crate - read-only word sources and letter statistics.
//! This crate knows nothing about conversations or game state; it only
//! answers "which words start with this letter?" and "which starting
//! letters are rare?".

pub mod candidate;
pub mod frequency;
pub mod sources;

pub use candidate::*;
pub use frequency::*;
pub use sources::*;
