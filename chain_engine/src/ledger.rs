//! Used-word ledger - per-conversation sets of already-issued words.

use std::collections::{BTreeMap, BTreeSet};

use crate::registry::ChatId;

/// Words already issued (or externally rejected) per conversation.
///
/// Case-insensitive: words are lowercased on both write and read, so
/// every stored member is lowercase. Callers must only add words for
/// chats present in the registry; the engine guards this before writing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsedWordLedger {
    words: BTreeMap<ChatId, BTreeSet<String>>,
}

impl UsedWordLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the word was already issued in this chat.
    pub fn contains(&self, chat: ChatId, word: &str) -> bool {
        self.words
            .get(&chat)
            .is_some_and(|set| set.contains(&word.to_lowercase()))
    }

    /// Record a word as used in this chat.
    pub fn add(&mut self, chat: ChatId, word: &str) {
        self.words
            .entry(chat)
            .or_default()
            .insert(word.to_lowercase());
    }

    /// Forget every used word for this chat, keeping the (empty) entry.
    /// Returns the number of words forgotten.
    pub fn clear(&mut self, chat: ChatId) -> usize {
        let previous = self.words.insert(chat, BTreeSet::new());
        previous.map(|set| set.len()).unwrap_or(0)
    }

    /// Drop the chat's entry entirely, used when a chat is disabled.
    pub fn remove(&mut self, chat: ChatId) -> Option<BTreeSet<String>> {
        self.words.remove(&chat)
    }

    /// Make sure the chat has an entry, used at enable time.
    pub fn ensure_chat(&mut self, chat: ChatId) {
        self.words.entry(chat).or_default();
    }

    /// The used words of one chat.
    pub fn words_for(&self, chat: ChatId) -> Option<&BTreeSet<String>> {
        self.words.get(&chat)
    }

    /// All entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ChatId, &BTreeSet<String>)> {
        self.words.iter().map(|(&chat, set)| (chat, set))
    }
}
