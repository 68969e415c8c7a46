//! Session event loop driving the decision engine
//!
//! Mirrors the shape of an STT processor task: a `select!` loop over the
//! inbound event channel plus the armed VAD timer, with bounded outbound
//! sends so a slow consumer can never stall turn-taking indefinitely.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use turngate_core::{normalize, Decision, EngineAction, InterruptionDecisionEngine};
use turngate_telemetry::DecisionMetrics;

use crate::events::SessionEvent;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SessionProcessor {
    /// Framework event receiver
    event_rx: mpsc::Receiver<SessionEvent>,
    /// Decision/action sender back to the framework
    action_tx: mpsc::Sender<EngineAction>,
    /// Per-session decision engine
    engine: InterruptionDecisionEngine,
    /// Metrics
    metrics: DecisionMetrics,
}

impl SessionProcessor {
    pub fn new(
        engine: InterruptionDecisionEngine,
        event_rx: mpsc::Receiver<SessionEvent>,
        action_tx: mpsc::Sender<EngineAction>,
    ) -> Self {
        Self {
            event_rx,
            action_tx,
            engine,
            metrics: DecisionMetrics::default(),
        }
    }

    /// Get a handle to this session's metrics (shares the counters)
    pub fn metrics(&self) -> DecisionMetrics {
        self.metrics.clone()
    }

    /// Run the session loop until the inbound channel closes.
    pub async fn run(mut self) {
        info!(
            target: "turngate",
            vad_timeout_ms = self.engine.config().vad_timeout.as_millis() as u64,
            interrupt_on_normal = self.engine.config().interrupt_on_normal_content,
            "session processor starting"
        );

        let mut vad_deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event, &mut vad_deadline).await,
                        None => {
                            info!(target: "turngate", "session processor shutting down: event channel closed");
                            break;
                        }
                    }
                }

                _ = wait_until(vad_deadline) => {
                    vad_deadline = None;
                    if let Some(action) = self.engine.on_vad_timeout() {
                        self.metrics.record_vad_false_start();
                        self.send_action(action).await;
                    }
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        info!(
            target: "turngate",
            "session final stats - interims: {}, finals: {}, empty: {}, ignored: {}, interrupts: {}, responds: {}, revokes: {}, vad windows: {}, false starts: {}",
            snapshot.transcripts_interim,
            snapshot.transcripts_final,
            snapshot.transcripts_empty,
            snapshot.decisions_ignore,
            snapshot.decisions_interrupt,
            snapshot.decisions_respond,
            snapshot.revokes,
            snapshot.vad_windows_opened,
            snapshot.vad_false_starts
        );
    }

    async fn handle_event(&mut self, event: SessionEvent, vad_deadline: &mut Option<Instant>) {
        match event {
            SessionEvent::SpeakingStateChanged(state) => {
                self.engine.on_speaking_state_changed(state);
            }
            SessionEvent::Transcript { text, is_final } => {
                self.metrics.record_transcript(is_final);
                if normalize(&text).is_empty() {
                    self.metrics.record_empty_transcript();
                }
                // The transcript resolves any pending VAD window
                *vad_deadline = None;
                for action in self.engine.on_transcript(&text, is_final) {
                    self.record_action(&action);
                    self.send_action(action).await;
                }
            }
            SessionEvent::VadActivity => {
                let was_open = self.engine.vad_window_open();
                self.engine.on_vad_activity();
                if !was_open && self.engine.vad_window_open() {
                    self.metrics.record_vad_window_opened();
                    *vad_deadline = Some(Instant::now() + self.engine.config().vad_timeout);
                    debug!(
                        target: "turngate",
                        timeout_ms = self.engine.config().vad_timeout.as_millis() as u64,
                        "armed vad timeout"
                    );
                }
            }
        }
    }

    fn record_action(&self, action: &EngineAction) {
        match action {
            EngineAction::Decision { decision, .. } => match decision {
                Decision::Ignore => self.metrics.record_ignore(),
                Decision::Interrupt => self.metrics.record_interrupt(),
                Decision::Respond => self.metrics.record_respond(),
            },
            EngineAction::RevokeIgnore { .. } => self.metrics.record_revoke(),
        }
    }

    /// Send with backpressure, bounded so the loop can never hang on a
    /// stalled consumer.
    async fn send_action(&self, action: EngineAction) {
        match tokio::time::timeout(SEND_TIMEOUT, self.action_tx.send(action)).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                debug!(target: "turngate", "action channel closed");
            }
            Err(_) => {
                warn!(target: "turngate", "action channel send timed out - consumer too slow");
                self.metrics.record_action_dropped();
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
