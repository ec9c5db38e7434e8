//! The engine facade - the surface the chat-protocol layer talks to.
//!
//! One `ChainEngine` owns the lexicons, the state store, and the single
//! shared `EngineState` behind a mutex. Every mutating operation runs
//! the full "check registry, mutate, persist, report" sequence under
//! that lock, so concurrent requests for any chats serialize cleanly.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use word_lexicon::{
    Candidate, LetterFrequencyIndex, LexiconSource, RankedLexicon, UnrankedLexicon,
};

use crate::events::{EngineEvent, EventSink, SourceKind, TracingSink};
use crate::registry::{ChatConfig, ChatId, EnableOutcome, Policy};
use crate::selector::{choose, display_form};
use crate::store::{EngineState, StateStore};

/// The word-chain answering engine.
pub struct ChainEngine {
    ranked: RankedLexicon,
    unranked: UnrankedLexicon,
    frequency_index: LetterFrequencyIndex,
    store: StateStore,
    sink: Arc<dyn EventSink>,
    state: Mutex<EngineState>,
}

impl ChainEngine {
    /// Create an engine reporting through `tracing`, loading whatever
    /// state the store holds. A failed load degrades to empty state.
    pub fn new(ranked: RankedLexicon, unranked: UnrankedLexicon, store: StateStore) -> Self {
        Self::with_sink(ranked, unranked, store, Arc::new(TracingSink))
    }

    /// Create an engine reporting through the given sink.
    pub fn with_sink(
        ranked: RankedLexicon,
        unranked: UnrankedLexicon,
        store: StateStore,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let state = match store.load() {
            Ok(state) => state,
            Err(e) => {
                sink.emit(&EngineEvent::StateLoadFailed {
                    reason: e.to_string(),
                });
                EngineState::default()
            }
        };
        Self {
            ranked,
            unranked,
            frequency_index: LetterFrequencyIndex::new(),
            store,
            sink,
            state: Mutex::new(state),
        }
    }

    /// Produce a not-yet-used word starting with `start_letter` and at
    /// least `min_length` long, record it as used, and persist.
    ///
    /// Returns the word capitalized on its first letter only. `None`
    /// means the chat is not enabled or no candidate survived filtering;
    /// both are reported events, not errors.
    pub fn request_word(
        &self,
        chat: ChatId,
        start_letter: char,
        min_length: usize,
    ) -> Option<String> {
        let mut state = self.lock_state();

        let Some(policy) = state.registry.get(chat).map(|config| config.policy) else {
            self.sink.emit(&EngineEvent::UnknownChat { chat });
            return None;
        };

        // Ranked pool first; the unranked dictionary only exists for
        // requests the ranked window cannot answer at all.
        let ranked_pool = self.unused_pool(&self.ranked, &state, chat, start_letter, min_length);
        let (pool, source) = if ranked_pool.is_empty() {
            let unranked_pool =
                self.unused_pool(&self.unranked, &state, chat, start_letter, min_length);
            (unranked_pool, SourceKind::Unranked)
        } else {
            (ranked_pool, SourceKind::Ranked)
        };

        let targets = match policy {
            Policy::RareEnding => self
                .frequency_index
                .least_frequent_start_letters(&self.ranked)
                .clone(),
            Policy::RankPreferred => BTreeSet::new(),
        };

        let Some(chosen) = choose(policy, &pool, &targets).cloned() else {
            self.sink.emit(&EngineEvent::NoWordFound {
                chat,
                start_letter,
                min_length,
            });
            return None;
        };

        state.ledger.add(chat, &chosen.text);
        self.persist(&state);
        self.sink.emit(&EngineEvent::WordSelected {
            chat,
            word: chosen.text.to_lowercase(),
            policy,
            source,
            frequency: chosen.frequency,
        });

        Some(display_form(&chosen.text))
    }

    /// Record an externally-rejected word so selection never repeats it.
    /// Returns false (with a reported event) when the chat is not enabled.
    pub fn mark_rejected(&self, chat: ChatId, word: &str) -> bool {
        let mut state = self.lock_state();
        if !state.registry.is_enabled(chat) {
            self.sink.emit(&EngineEvent::UnknownChat { chat });
            return false;
        }
        state.ledger.add(chat, word);
        self.persist(&state);
        self.sink.emit(&EngineEvent::WordRejected {
            chat,
            word: word.to_lowercase(),
        });
        true
    }

    /// Enable a chat for play. A second enable for the same chat is a
    /// no-op that reports the existing alias and policy.
    pub fn enable_chat(&self, chat: ChatId, name: &str, policy: Policy) -> EnableOutcome {
        let mut state = self.lock_state();
        let outcome = state.registry.enable(chat, name, policy);
        let config = outcome.config().clone();
        if outcome.is_new() {
            state.ledger.ensure_chat(chat);
            self.persist(&state);
            self.sink.emit(&EngineEvent::ChatEnabled {
                chat,
                alias: config.alias,
                policy: config.policy,
            });
        } else {
            self.sink.emit(&EngineEvent::ChatAlreadyEnabled {
                chat,
                alias: config.alias,
                policy: config.policy,
            });
        }
        outcome
    }

    /// Disable a chat, dropping its registry and ledger entries.
    pub fn disable_chat(&self, chat: ChatId) -> Option<ChatConfig> {
        let mut state = self.lock_state();
        let Some(config) = state.registry.disable(chat) else {
            self.sink.emit(&EngineEvent::UnknownChat { chat });
            return None;
        };
        state.ledger.remove(chat);
        self.persist(&state);
        self.sink.emit(&EngineEvent::ChatDisabled {
            chat,
            alias: config.alias.clone(),
        });
        Some(config)
    }

    /// Forget every used word for a chat, so previously issued words
    /// become eligible again.
    pub fn clear_used(&self, chat: ChatId) -> bool {
        let mut state = self.lock_state();
        if !state.registry.is_enabled(chat) {
            self.sink.emit(&EngineEvent::UnknownChat { chat });
            return false;
        }
        let forgotten = state.ledger.clear(chat);
        self.persist(&state);
        self.sink.emit(&EngineEvent::UsedCleared { chat, forgotten });
        true
    }

    /// All enabled chats with their configurations.
    pub fn list_chats(&self) -> Vec<(ChatId, ChatConfig)> {
        let state = self.lock_state();
        state
            .registry
            .list()
            .map(|(id, config)| (id, config.clone()))
            .collect()
    }

    fn unused_pool(
        &self,
        source: &dyn LexiconSource,
        state: &EngineState,
        chat: ChatId,
        start_letter: char,
        min_length: usize,
    ) -> Vec<Candidate> {
        source
            .matching(start_letter, min_length)
            .into_iter()
            .filter(|candidate| !state.ledger.contains(chat, &candidate.text))
            .collect()
    }

    /// Save synchronously; on failure memory stays authoritative and the
    /// failure is reported, with no retry inside this call.
    fn persist(&self, state: &EngineState) {
        if let Err(e) = self.store.save(state) {
            self.sink.emit(&EngineEvent::StateSaveFailed {
                reason: e.to_string(),
            });
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    /// Sink that records every event for assertions.
    #[derive(Default)]
    struct RecordingSink {
        events: StdMutex<Vec<EngineEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<EngineEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &EngineEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    const CHAT: ChatId = ChatId(-1001);

    fn ranked() -> RankedLexicon {
        // Descending frequency, as a real corpus list would be.
        RankedLexicon::with_default_window(vec![
            ("the".to_string(), 0.05),
            ("zone".to_string(), 0.002),
            ("zebra".to_string(), 0.0005),
            ("quay".to_string(), 0.0001),
            ("quiz".to_string(), 0.00005),
        ])
    }

    fn unranked() -> UnrankedLexicon {
        UnrankedLexicon::new(["zymurgy", "zeal", "quahog", "aardvark"])
    }

    fn engine_in(dir: &TempDir) -> (ChainEngine, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let store = StateStore::new(dir.path().join("state.json"));
        let engine = ChainEngine::with_sink(ranked(), unranked(), store, sink.clone());
        (engine, sink)
    }

    #[test]
    fn test_scenario_zone_then_none() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, _) = engine_in(&dir);
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);

        // "zone" is the only length>=4 ranked word on 'z' besides
        // "zebra"; most frequent wins and comes back capitalized.
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zone".to_string()));
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zebra".to_string()));
        // Ranked pool exhausted; unranked fallback answers alphabetically.
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zeal".to_string()));
        assert_eq!(
            engine.request_word(CHAT, 'z', 4),
            Some("Zymurgy".to_string())
        );
        // Both pools exhausted: a normal None, not an error.
        assert_eq!(engine.request_word(CHAT, 'z', 4), None);
    }

    #[test]
    fn test_no_repeats_until_clear() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, _) = engine_in(&dir);
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);

        let mut seen = BTreeSet::new();
        while let Some(word) = engine.request_word(CHAT, 'z', 4) {
            assert!(seen.insert(word.to_lowercase()), "word repeated");
        }

        assert!(engine.clear_used(CHAT));
        // After clearing, the very first word is eligible again.
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zone".to_string()));
    }

    #[test]
    fn test_returned_words_satisfy_constraints() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, _) = engine_in(&dir);
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);

        while let Some(word) = engine.request_word(CHAT, 'Q', 4) {
            assert!(word.chars().all(|c| c.is_ascii_alphabetic()));
            assert!(word.len() >= 4);
            assert!(word.starts_with('Q'));
            let mut chars = word.chars();
            assert!(chars.next().unwrap().is_ascii_uppercase());
            assert!(chars.all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_rare_ending_policy_prefers_target_endings() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, _) = engine_in(&dir);
        engine.enable_chat(CHAT, "Hard Mode", Policy::RareEnding);

        // No corpus word starts with 'y', so 'y' is a target ending
        // letter while 'z' is not ("zone" and "zebra" start with it).
        // "quay" must win despite being more frequent than "quiz".
        assert_eq!(engine.request_word(CHAT, 'q', 4), Some("Quay".to_string()));
        // With no target-ending candidate left, the fallback ranks the
        // unrestricted pool by least frequency.
        assert_eq!(engine.request_word(CHAT, 'q', 4), Some("Quiz".to_string()));
    }

    #[test]
    fn test_mark_rejected_blocks_selection() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, sink) = engine_in(&dir);
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);

        assert!(engine.mark_rejected(CHAT, "Zone"));
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zebra".to_string()));
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, EngineEvent::WordRejected { word, .. } if word == "zone")));
    }

    #[test]
    fn test_unknown_chat_is_a_reported_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, sink) = engine_in(&dir);

        assert_eq!(engine.request_word(CHAT, 'z', 4), None);
        assert!(!engine.mark_rejected(CHAT, "zone"));
        assert!(!engine.clear_used(CHAT));
        assert!(engine.disable_chat(CHAT).is_none());
        assert_eq!(
            sink.events()
                .iter()
                .filter(|e| matches!(e, EngineEvent::UnknownChat { .. }))
                .count(),
            4
        );
    }

    #[test]
    fn test_enable_twice_reports_existing() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, sink) = engine_in(&dir);

        let first = engine.enable_chat(CHAT, "Word Club", Policy::RareEnding);
        let second = engine.enable_chat(CHAT, "Other Name", Policy::RankPreferred);
        assert!(first.is_new());
        assert!(!second.is_new());
        assert_eq!(second.config().policy, Policy::RareEnding);
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, EngineEvent::ChatAlreadyEnabled { .. })));
    }

    #[test]
    fn test_disable_forgets_used_words() {
        let dir = tempfile::tempdir().unwrap();
        let (engine, _) = engine_in(&dir);

        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);
        engine.request_word(CHAT, 'z', 4);
        assert!(engine.disable_chat(CHAT).is_some());

        // Re-enabling starts from a clean ledger.
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zone".to_string()));
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("state.json");

        {
            let store = StateStore::new(&store_path);
            let engine = ChainEngine::new(ranked(), unranked(), store);
            engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);
            assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zone".to_string()));
        }

        // A fresh engine over the same store must not repeat "zone".
        let engine = ChainEngine::new(ranked(), unranked(), StateStore::new(&store_path));
        assert_eq!(engine.list_chats().len(), 1);
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zebra".to_string()));
    }

    #[test]
    fn test_save_failure_keeps_memory_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        // Point the store at a path whose parent is a file, so every
        // save fails while the engine keeps running.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = StateStore::new(blocker.join("state.json"));

        let sink = Arc::new(RecordingSink::default());
        let engine = ChainEngine::with_sink(ranked(), unranked(), store, sink.clone());
        engine.enable_chat(CHAT, "Word Club", Policy::RankPreferred);

        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zone".to_string()));
        assert_eq!(engine.request_word(CHAT, 'z', 4), Some("Zebra".to_string()));
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, EngineEvent::StateSaveFailed { .. })));
    }

    #[test]
    fn test_corrupt_state_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{broken").unwrap();

        let sink = Arc::new(RecordingSink::default());
        let engine =
            ChainEngine::with_sink(ranked(), unranked(), StateStore::new(&path), sink.clone());

        assert!(engine.list_chats().is_empty());
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, EngineEvent::StateLoadFailed { .. })));
    }
}
