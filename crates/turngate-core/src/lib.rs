//! Interruption classification core for TurnGate
//!
//! This crate provides the decision logic that sits between a voice-agent
//! framework's STT/VAD events and its playback control: normalize a
//! transcript, classify it as backchannel / command / normal speech, and
//! decide whether the agent should ignore it, interrupt itself, or respond.
//!
//! The core is synchronous and per-session. Async event plumbing lives in
//! `turngate-session`.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod types;
pub mod wordset;

pub use classify::classify;
pub use config::EngineConfig;
pub use engine::{decide, InterruptionDecisionEngine};
pub use error::ConfigError;
pub use normalize::normalize;
pub use types::{
    AgentSpeakingState, Classification, Decision, EngineAction, TranscriptFinality, Utterance,
};
pub use wordset::WordSetConfig;

/// Generates unique utterance IDs
static UTTERANCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique utterance ID
pub fn next_utterance_id() -> u64 {
    UTTERANCE_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}
