//! Core types for interruption classification

use serde::{Deserialize, Serialize};

/// Whether the agent's TTS playback is currently active.
///
/// Mutated exclusively by the surrounding framework's speech-start /
/// speech-end notifications; the decision core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentSpeakingState {
    Speaking,
    Silent,
}

/// STT transcript finality per the provider's own semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptFinality {
    /// Provisional, subject to revision
    Interim,
    /// Settled
    Final,
}

/// One transcript event from the STT provider.
///
/// Immutable after creation. Interim and final transcripts of the same
/// stretch of user speech share an `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: u64,
    pub text: String,
    pub finality: TranscriptFinality,
}

/// Label assigned to a normalized utterance. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Pure acknowledgment ("yeah", "uh-huh") with no intent to take the turn
    Backchannel,
    /// Contains an explicit stop/redirect trigger ("stop", "hold on")
    Command,
    /// Substantive speech, or anything not covered above
    Normal,
}

/// What the framework should do with an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Continue current playback unmodified, drop the utterance
    Ignore,
    /// Stop current playback and start a new turn
    Interrupt,
    /// Forward to the normal turn-taking/dialogue pipeline
    Respond,
}

/// Outbound action emitted by the decision engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineAction {
    /// A decision for one utterance
    Decision {
        decision: Decision,
        utterance: Utterance,
    },
    /// Withdraw a provisional `Ignore` previously emitted for an interim
    /// transcript whose final revision no longer classifies as backchannel.
    ///
    /// Distinct from a fresh `Interrupt`: the framework may need to undo
    /// bookkeeping for audio that was allowed to keep playing during the
    /// interim window.
    RevokeIgnore { utterance_id: u64 },
}
