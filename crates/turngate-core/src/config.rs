use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wordset::WordSetConfig;

/// Engine configuration
///
/// How this gets populated (env vars, files, CLI flags) is the surrounding
/// framework's concern; the core only ever sees the finished struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub word_sets: WordSetConfig,
    /// Whether substantive (`Normal`) speech while the agent is speaking
    /// interrupts playback. When false, it is queued as a `Respond` for
    /// after the agent finishes. Opt-in, never a silent behavior change.
    pub interrupt_on_normal_content: bool,
    /// Bounded wait after a bare VAD signal before treating it as a false
    /// start. The caller owns the timer; the core only specifies the bound.
    pub vad_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            word_sets: WordSetConfig::default(),
            interrupt_on_normal_content: true,
            vad_timeout: Duration::from_millis(1000),
        }
    }
}
