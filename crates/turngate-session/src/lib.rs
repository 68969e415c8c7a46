//! Async per-session adapter for the TurnGate decision core
//!
//! The surrounding voice framework delivers speaking-state, transcript, and
//! VAD events over an mpsc channel; one `SessionProcessor` task per session
//! drives the synchronous `InterruptionDecisionEngine`, owns the VAD-timeout
//! timer, and emits `EngineAction`s on an outbound channel. Sessions never
//! share state, so concurrent calls need no locking between them.

pub mod events;
pub mod processor;

pub use events::SessionEvent;
pub use processor::SessionProcessor;
