//! Per-session interruption decision engine
//!
//! One engine instance per voice session, fed a single ordered stream of
//! transcript and speaking-state events by the caller. Every method is
//! synchronous and non-blocking; the VAD-timeout timer belongs to the
//! caller (see `turngate-session`), which calls back into `on_vad_timeout`
//! when the bounded wait elapses.

use tracing::{debug, warn};

use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::next_utterance_id;
use crate::normalize::normalize;
use crate::types::{
    AgentSpeakingState, Classification, Decision, EngineAction, TranscriptFinality, Utterance,
};
use crate::wordset::WordSetConfig;

/// Pure decision table: state x classification -> decision.
///
/// Silent always responds (nothing is being protected from interruption).
/// While speaking, commands interrupt, backchannels are ignored, and
/// substantive speech interrupts unless the policy opts into queueing.
pub fn decide(
    classification: Classification,
    state: AgentSpeakingState,
    config: &EngineConfig,
) -> Decision {
    match (state, classification) {
        (AgentSpeakingState::Silent, _) => Decision::Respond,
        (AgentSpeakingState::Speaking, Classification::Command) => Decision::Interrupt,
        (AgentSpeakingState::Speaking, Classification::Backchannel) => Decision::Ignore,
        (AgentSpeakingState::Speaking, Classification::Normal) => {
            if config.interrupt_on_normal_content {
                Decision::Interrupt
            } else {
                Decision::Respond
            }
        }
    }
}

pub struct InterruptionDecisionEngine {
    config: EngineConfig,

    state: AgentSpeakingState,

    /// Open after a bare VAD signal, closed by any transcript or by timeout
    vad_window_open: bool,

    /// Id shared by the interim/final transcripts of the in-flight utterance
    current_utterance_id: Option<u64>,

    /// Utterance id of an interim `Ignore` awaiting confirmation on final
    provisional_ignore: Option<u64>,
}

impl InterruptionDecisionEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.word_sets.validate()?;
        Ok(Self {
            config,
            state: AgentSpeakingState::Silent,
            vad_window_open: false,
            current_utterance_id: None,
            provisional_ignore: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn speaking_state(&self) -> AgentSpeakingState {
        self.state
    }

    pub fn vad_window_open(&self) -> bool {
        self.vad_window_open
    }

    /// Hot-swap the word sets, with the same validation as at construction.
    pub fn update_word_sets(&mut self, word_sets: WordSetConfig) -> Result<(), ConfigError> {
        word_sets.validate()?;
        self.config.word_sets = word_sets;
        Ok(())
    }

    /// Framework notification that TTS playback started or stopped.
    pub fn on_speaking_state_changed(&mut self, state: AgentSpeakingState) {
        debug!(target: "turngate", ?state, "agent speaking state changed");
        self.state = state;
        if state == AgentSpeakingState::Silent {
            // Playback is over, there is nothing left to protect
            self.provisional_ignore = None;
        }
    }

    /// Voice activity detected before any transcript exists.
    ///
    /// Never produces a decision by itself; it only opens the bounded
    /// buffering window. The caller arms its timer when this returns with
    /// the window open.
    pub fn on_vad_activity(&mut self) {
        if self.current_utterance_id.is_none() && !self.vad_window_open {
            debug!(target: "turngate", "vad activity with no transcript, opening wait window");
            self.vad_window_open = true;
        }
    }

    /// Caller's timer expired with no transcript having arrived.
    ///
    /// With the agent speaking this is treated as a false start and
    /// ignored; breaking playback on a phantom signal is the one failure
    /// mode this engine exists to prevent.
    pub fn on_vad_timeout(&mut self) -> Option<EngineAction> {
        if !self.vad_window_open {
            return None;
        }
        self.vad_window_open = false;
        if self.state == AgentSpeakingState::Speaking {
            debug!(target: "turngate", "vad window timed out while speaking, treating as false start");
            Some(EngineAction::Decision {
                decision: Decision::Ignore,
                utterance: Utterance {
                    id: next_utterance_id(),
                    text: String::new(),
                    finality: TranscriptFinality::Interim,
                },
            })
        } else {
            debug!(target: "turngate", "vad window timed out while silent, closing");
            None
        }
    }

    /// Classify a transcript event and emit zero, one, or two actions.
    ///
    /// Two actions occur only when a provisional interim `Ignore` is
    /// superseded: the `RevokeIgnore` precedes the fresh decision.
    pub fn on_transcript(&mut self, text: &str, is_final: bool) -> Vec<EngineAction> {
        // Any transcript resolves a pending VAD window
        self.vad_window_open = false;

        let tokens = normalize(text);
        if tokens.is_empty() {
            // Usually an STT artifact, not meaningful silence. Never a
            // decision: an empty final must not stand in as a false
            // confirmation of backchanneling.
            if is_final {
                warn!(target: "turngate", "empty final transcript, no decision emitted");
                self.end_utterance();
            } else {
                debug!(target: "turngate", "empty interim transcript, no decision emitted");
            }
            return Vec::new();
        }

        let id = self.current_or_new_utterance_id();
        let classification = classify(&tokens, &self.config.word_sets);
        let decision = decide(classification, self.state, &self.config);
        debug!(
            target: "turngate",
            utterance_id = id,
            is_final,
            ?classification,
            ?decision,
            state = ?self.state,
            "transcript classified"
        );

        let utterance = Utterance {
            id,
            text: text.to_string(),
            finality: if is_final {
                TranscriptFinality::Final
            } else {
                TranscriptFinality::Interim
            },
        };

        if is_final {
            self.settle_final(decision, utterance)
        } else {
            self.act_on_interim(classification, decision, utterance)
        }
    }

    /// Finals always settle the utterance. A provisional interim `Ignore`
    /// whose final revision no longer classifies as backchannel (interim
    /// "yeah" finalizing as "yeah actually wait") is explicitly revoked
    /// before the fresh decision.
    fn settle_final(&mut self, decision: Decision, utterance: Utterance) -> Vec<EngineAction> {
        let mut actions = Vec::with_capacity(2);
        if let Some(provisional_id) = self.provisional_ignore.take() {
            if provisional_id == utterance.id && decision != Decision::Ignore {
                debug!(
                    target: "turngate",
                    utterance_id = utterance.id,
                    "final transcript supersedes provisional ignore, revoking"
                );
                actions.push(EngineAction::RevokeIgnore {
                    utterance_id: utterance.id,
                });
            }
        }
        actions.push(EngineAction::Decision {
            decision,
            utterance,
        });
        self.end_utterance();
        actions
    }

    /// Interim transcripts are provisional, so only low-regret actions are
    /// taken on them: a command-derived `Interrupt` fires immediately to
    /// minimize latency, a backchannel `Ignore` is emitted provisionally
    /// (re-confirmed on final), and everything else waits for the final.
    fn act_on_interim(
        &mut self,
        classification: Classification,
        decision: Decision,
        utterance: Utterance,
    ) -> Vec<EngineAction> {
        let mut actions = Vec::with_capacity(2);
        match (self.state, classification) {
            (AgentSpeakingState::Speaking, Classification::Command) => {
                if self.provisional_ignore.take() == Some(utterance.id) {
                    actions.push(EngineAction::RevokeIgnore {
                        utterance_id: utterance.id,
                    });
                }
                actions.push(EngineAction::Decision {
                    decision,
                    utterance,
                });
            }
            (AgentSpeakingState::Speaking, Classification::Backchannel) => {
                self.provisional_ignore = Some(utterance.id);
                actions.push(EngineAction::Decision {
                    decision,
                    utterance,
                });
            }
            _ => {
                debug!(
                    target: "turngate",
                    utterance_id = utterance.id,
                    "interim transcript deferred until final"
                );
            }
        }
        actions
    }

    fn current_or_new_utterance_id(&mut self) -> u64 {
        match self.current_utterance_id {
            Some(id) => id,
            None => {
                let id = next_utterance_id();
                self.current_utterance_id = Some(id);
                id
            }
        }
    }

    fn end_utterance(&mut self) {
        self.current_utterance_id = None;
        self.provisional_ignore = None;
    }
}
