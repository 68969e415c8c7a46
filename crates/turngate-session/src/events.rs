//! Inbound event surface
//!
//! The framework-adapter boundary: whatever shape the framework's STT and
//! TTS callbacks have (`event.text`, `event.alternatives[0].text`, raw
//! strings), they are flattened to these three variants before the core
//! ever sees them.

use turngate_core::AgentSpeakingState;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Agent TTS playback started or stopped
    SpeakingStateChanged(AgentSpeakingState),
    /// Interim or final STT result
    Transcript { text: String, is_final: bool },
    /// Voice activity detected before any transcript exists
    VadActivity,
}
