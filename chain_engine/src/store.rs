//! Durable state - one JSON document holding registry and ledger.
//!
//! The document has exactly two top-level keys, `enabled_chats` and
//! `used_words`, keyed by stringified chat ids. Writes go through a temp
//! file in the same directory and a rename, so readers never observe a
//! half-written snapshot.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::EngineResult;
use crate::ledger::UsedWordLedger;
use crate::registry::{ChatConfig, ChatId, ChatRegistry};

/// The single shared mutable state: registry plus ledger, loaded and
/// saved as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    pub registry: ChatRegistry,
    pub ledger: UsedWordLedger,
}

/// On-disk shape of [`EngineState`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    enabled_chats: BTreeMap<String, ChatConfig>,

    #[serde(default)]
    used_words: BTreeMap<String, Vec<String>>,
}

impl StateDocument {
    fn from_state(state: &EngineState) -> Self {
        let enabled_chats = state
            .registry
            .list()
            .map(|(id, config)| (id.to_string(), config.clone()))
            .collect();
        let used_words = state
            .ledger
            .iter()
            .map(|(chat, words)| (chat.to_string(), words.iter().cloned().collect()))
            .collect();
        Self {
            enabled_chats,
            used_words,
        }
    }

    fn into_state(self) -> EngineState {
        let mut state = EngineState::default();

        for (key, config) in self.enabled_chats {
            match key.parse::<i64>() {
                Ok(raw) => state.registry.insert(ChatId(raw), config),
                Err(_) => tracing::warn!(%key, "skipping chat entry with non-integer id"),
            }
        }

        for (key, words) in self.used_words {
            let Ok(raw) = key.parse::<i64>() else {
                tracing::warn!(%key, "skipping used-word entry with non-integer id");
                continue;
            };
            let chat = ChatId(raw);
            // Used words for a chat that is not enabled violate the
            // registry/ledger consistency invariant; drop them.
            if !state.registry.is_enabled(chat) {
                tracing::warn!(%chat, "dropping used words for a chat that is not enabled");
                continue;
            }
            for word in &words {
                state.ledger.add(chat, word);
            }
        }

        // Every enabled chat gets a ledger entry, even an empty one.
        let enabled: Vec<ChatId> = state.registry.list().map(|(id, _)| id).collect();
        for chat in enabled {
            state.ledger.ensure_chat(chat);
        }

        state
    }
}

/// Load/save of the engine state at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file yields an empty state; an
    /// unreadable or corrupt file is an error the caller downgrades.
    pub fn load(&self) -> EngineResult<EngineState> {
        if !self.path.exists() {
            return Ok(EngineState::default());
        }
        let file = File::open(&self.path)?;
        let document: StateDocument = serde_json::from_reader(BufReader::new(file))?;
        Ok(document.into_state())
    }

    /// Write one consistent snapshot atomically.
    pub fn save(&self, state: &EngineState) -> EngineResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        let mut writer = BufWriter::new(&temp);
        serde_json::to_writer(&mut writer, &StateDocument::from_state(state))?;
        writer.flush()?;
        drop(writer);
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
