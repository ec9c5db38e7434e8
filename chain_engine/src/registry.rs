//! Conversation registry - which chats play, and how hard.

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Identifier for a conversation, assigned by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selection policy, the "case" of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Always answer with the most common legal word.
    #[serde(rename = "1")]
    RankPreferred,

    /// Reach for rare word-endings so the opponent's next turn is hard;
    /// prefers the least common qualifying word.
    #[serde(rename = "2")]
    RareEnding,
}

impl Policy {
    /// The wire/admin code for this policy.
    pub fn code(&self) -> &'static str {
        match self {
            Policy::RankPreferred => "1",
            Policy::RareEnding => "2",
        }
    }
}

impl FromStr for Policy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Policy::RankPreferred),
            "2" => Ok(Policy::RareEnding),
            other => Err(EngineError::InvalidPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Configuration of one enabled conversation. Fixed at enable time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Display-only 4-digit alias. Not guaranteed unique across chats.
    pub alias: String,

    /// Human-readable chat name.
    pub name: String,

    /// Selection policy, persisted under its wire name "case".
    #[serde(rename = "case")]
    pub policy: Policy,
}

/// Outcome of an enable request.
#[derive(Debug, Clone, PartialEq)]
pub enum EnableOutcome {
    /// The chat was newly enabled with this configuration.
    Enabled(ChatConfig),

    /// The chat was already enabled; the existing configuration is
    /// reported and left untouched.
    AlreadyEnabled(ChatConfig),
}

impl EnableOutcome {
    /// The configuration in effect after the call.
    pub fn config(&self) -> &ChatConfig {
        match self {
            EnableOutcome::Enabled(config) | EnableOutcome::AlreadyEnabled(config) => config,
        }
    }

    /// True when this call created the entry.
    pub fn is_new(&self) -> bool {
        matches!(self, EnableOutcome::Enabled(_))
    }
}

/// The set of enabled conversations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRegistry {
    chats: BTreeMap<ChatId, ChatConfig>,
}

impl ChatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a chat, generating a fresh alias. Enabling an already
    /// enabled chat is a no-op that reports the existing configuration.
    pub fn enable(&mut self, id: ChatId, name: impl Into<String>, policy: Policy) -> EnableOutcome {
        if let Some(existing) = self.chats.get(&id) {
            return EnableOutcome::AlreadyEnabled(existing.clone());
        }
        let config = ChatConfig {
            alias: generate_alias(&mut rand::thread_rng()),
            name: name.into(),
            policy,
        };
        self.chats.insert(id, config.clone());
        EnableOutcome::Enabled(config)
    }

    /// Disable a chat, returning its configuration if it was enabled.
    pub fn disable(&mut self, id: ChatId) -> Option<ChatConfig> {
        self.chats.remove(&id)
    }

    /// Configuration of an enabled chat.
    pub fn get(&self, id: ChatId) -> Option<&ChatConfig> {
        self.chats.get(&id)
    }

    /// True when the chat is enabled.
    pub fn is_enabled(&self, id: ChatId) -> bool {
        self.chats.contains_key(&id)
    }

    /// All enabled chats in id order.
    pub fn list(&self) -> impl Iterator<Item = (ChatId, &ChatConfig)> {
        self.chats.iter().map(|(&id, config)| (id, config))
    }

    /// Number of enabled chats.
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    /// True when no chat is enabled.
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Restore an entry verbatim, used when loading persisted state.
    pub(crate) fn insert(&mut self, id: ChatId, config: ChatConfig) {
        self.chats.insert(id, config);
    }
}

/// A random 4-digit display alias. Collisions across chats are possible
/// and accepted; aliases are display-only.
pub fn generate_alias<R: Rng>(rng: &mut R) -> String {
    rng.gen_range(1000..10000).to_string()
}
