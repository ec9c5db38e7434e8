//! Engine events - one-way reporting of outcomes, warnings, and failures.

use crate::registry::{ChatId, Policy};

/// Which lexicon a selected word came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The frequency-ranked top-N window.
    Ranked,
    /// The broad unranked dictionary fallback.
    Unranked,
}

/// Everything the engine reports outward. Consumers only observe;
/// nothing flows back in.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A word was selected and recorded as used.
    WordSelected {
        chat: ChatId,
        word: String,
        policy: Policy,
        source: SourceKind,
        frequency: Option<f64>,
    },

    /// Both pools were empty after filtering. A normal outcome.
    NoWordFound {
        chat: ChatId,
        start_letter: char,
        min_length: usize,
    },

    /// An externally-rejected word was recorded into the ledger.
    WordRejected { chat: ChatId, word: String },

    /// A chat was newly enabled.
    ChatEnabled {
        chat: ChatId,
        alias: String,
        policy: Policy,
    },

    /// Enable was requested for a chat that is already enabled.
    ChatAlreadyEnabled {
        chat: ChatId,
        alias: String,
        policy: Policy,
    },

    /// A chat was disabled; its registry and ledger entries are gone.
    ChatDisabled { chat: ChatId, alias: String },

    /// A chat's used words were forgotten.
    UsedCleared { chat: ChatId, forgotten: usize },

    /// An operation named a chat that is not enabled.
    UnknownChat { chat: ChatId },

    /// The state file could not be loaded; an empty state was used.
    StateLoadFailed { reason: String },

    /// The state file could not be written; memory stays authoritative.
    StateSaveFailed { reason: String },
}

/// A one-way observability channel for engine events.
pub trait EventSink: Send + Sync {
    /// Report one event. Must not fail and must not call back into the
    /// engine.
    fn emit(&self, event: &EngineEvent);
}

/// Default sink forwarding events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &EngineEvent) {
        match event {
            EngineEvent::StateLoadFailed { reason } => {
                tracing::warn!(%reason, "state load failed, starting empty");
            }
            EngineEvent::StateSaveFailed { reason } => {
                tracing::warn!(%reason, "state save failed, memory stays authoritative");
            }
            EngineEvent::UnknownChat { chat } => {
                tracing::warn!(%chat, "operation on a chat that is not enabled");
            }
            EngineEvent::NoWordFound {
                chat,
                start_letter,
                min_length,
            } => {
                tracing::info!(%chat, %start_letter, min_length, "no candidate word found");
            }
            other => {
                tracing::debug!(event = ?other, "engine event");
            }
        }
    }
}
