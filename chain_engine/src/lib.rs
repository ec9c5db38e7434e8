//! # Chain Engine
//!
//! The word-chain answering engine. Given a start letter and a minimum
//! length it produces a legal word that the conversation has not seen
//! before, ranked according to the conversation's difficulty policy.
//!
//! ## Core Components
//!
//! - **registry**: enabled conversations with their aliases and policies
//! - **ledger**: per-conversation sets of already-issued words
//! - **selector**: the ranked/unranked x two-policy ranking matrix
//! - **store**: durable JSON snapshot of registry + ledger
//! - **engine**: the facade the chat-protocol layer talks to
//! - **prompt**: parsing of inbound game prompts and rejection notices
//!
//! ## Design Philosophy
//!
//! - **One owned state**: registry and ledger live behind a single lock;
//!   select-check-record-persist is atomic per request
//! - **Degrade, never crash**: storage failures and unknown chats are
//!   reported events, not panics or error returns on the selection path

pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod prompt;
pub mod registry;
pub mod selector;
pub mod store;

pub use engine::*;
pub use error::*;
pub use events::*;
pub use ledger::*;
pub use prompt::*;
pub use registry::*;
pub use selector::*;
pub use store::*;
