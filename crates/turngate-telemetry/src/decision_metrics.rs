//! Decision pipeline metrics
//!
//! Lock-free counters shared between the session task and whoever inspects
//! the session (status endpoints, shutdown logs, tests). Cloning shares the
//! underlying counters.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics for one decision session
#[derive(Clone, Default)]
pub struct DecisionMetrics {
    // Transcript flow
    pub transcripts_interim: Arc<AtomicU64>,
    pub transcripts_final: Arc<AtomicU64>,
    pub transcripts_empty: Arc<AtomicU64>,

    // Emitted decisions
    pub decisions_ignore: Arc<AtomicU64>,
    pub decisions_interrupt: Arc<AtomicU64>,
    pub decisions_respond: Arc<AtomicU64>,
    pub revokes: Arc<AtomicU64>,

    // VAD race bookkeeping
    pub vad_windows_opened: Arc<AtomicU64>,
    pub vad_false_starts: Arc<AtomicU64>,

    // Delivery failures (slow or closed consumer)
    pub actions_dropped: Arc<AtomicU64>,

    pub last_decision_time: Arc<RwLock<Option<Instant>>>,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionMetricsSnapshot {
    pub transcripts_interim: u64,
    pub transcripts_final: u64,
    pub transcripts_empty: u64,
    pub decisions_ignore: u64,
    pub decisions_interrupt: u64,
    pub decisions_respond: u64,
    pub revokes: u64,
    pub vad_windows_opened: u64,
    pub vad_false_starts: u64,
    pub actions_dropped: u64,
}

impl DecisionMetrics {
    pub fn record_transcript(&self, is_final: bool) {
        if is_final {
            self.transcripts_final.fetch_add(1, Ordering::Relaxed);
        } else {
            self.transcripts_interim.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_empty_transcript(&self) {
        self.transcripts_empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignore(&self) {
        self.decisions_ignore.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_interrupt(&self) {
        self.decisions_interrupt.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_respond(&self) {
        self.decisions_respond.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_revoke(&self) {
        self.revokes.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_vad_window_opened(&self) {
        self.vad_windows_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_vad_false_start(&self) {
        self.vad_false_starts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_action_dropped(&self) {
        self.actions_dropped.fetch_add(1, Ordering::Relaxed);
    }

    fn touch(&self) {
        *self.last_decision_time.write() = Some(Instant::now());
    }

    pub fn snapshot(&self) -> DecisionMetricsSnapshot {
        DecisionMetricsSnapshot {
            transcripts_interim: self.transcripts_interim.load(Ordering::Relaxed),
            transcripts_final: self.transcripts_final.load(Ordering::Relaxed),
            transcripts_empty: self.transcripts_empty.load(Ordering::Relaxed),
            decisions_ignore: self.decisions_ignore.load(Ordering::Relaxed),
            decisions_interrupt: self.decisions_interrupt.load(Ordering::Relaxed),
            decisions_respond: self.decisions_respond.load(Ordering::Relaxed),
            revokes: self.revokes.load(Ordering::Relaxed),
            vad_windows_opened: self.vad_windows_opened.load(Ordering::Relaxed),
            vad_false_starts: self.vad_false_starts.load(Ordering::Relaxed),
            actions_dropped: self.actions_dropped.load(Ordering::Relaxed),
        }
    }
}
