//! Cosmetic loading feedback.
//!
//! The backend reports no incremental progress, so both indicators are
//! simulated from the instant loading started. Neither owns a timer: the event
//! loop calls `tick` every frame and `reset` is all the cancellation needed.

use std::time::{Duration, Instant};

pub const LOADING_STAGES: [&str; 5] = [
    "Fetching video transcript...",
    "Analyzing content...",
    "Generating blog post...",
    "Creating Instagram content...",
    "Finalizing results...",
];

pub const STAGE_INTERVAL: Duration = Duration::from_millis(2000);
pub const PROGRESS_STEP: Duration = Duration::from_millis(100);
pub const PROGRESS_CAP: u16 = 90;

/// Walks through [`LOADING_STAGES`] once, one label per [`STAGE_INTERVAL`],
/// and then stays on the last label.
#[derive(Debug, Clone, Default)]
pub struct StageCycle {
    started_at: Option<Instant>,
    current_stage: usize,
}

impl StageCycle {
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.current_stage = 0;
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let step = (elapsed.as_millis() / STAGE_INTERVAL.as_millis()) as usize;
        self.current_stage = step.min(LOADING_STAGES.len() - 1);
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.current_stage = 0;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn current_stage(&self) -> usize {
        self.current_stage
    }

    pub fn label(&self) -> Option<&'static str> {
        self.started_at.map(|_| LOADING_STAGES[self.current_stage])
    }

    pub fn is_exhausted(&self) -> bool {
        self.is_running() && self.current_stage == LOADING_STAGES.len() - 1
    }
}

/// Percentage that creeps up by one every [`PROGRESS_STEP`] until
/// [`PROGRESS_CAP`]. Only [`ProgressFill::complete`] shows 100.
#[derive(Debug, Clone, Default)]
pub struct ProgressFill {
    started_at: Option<Instant>,
    percent: u16,
}

impl ProgressFill {
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.percent = 0;
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let steps = elapsed.as_millis() / PROGRESS_STEP.as_millis();
        self.percent = steps.min(PROGRESS_CAP as u128) as u16;
        if self.percent >= PROGRESS_CAP {
            self.started_at = None;
        }
    }

    pub fn complete(&mut self) {
        self.started_at = None;
        self.percent = 100;
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.percent = 0;
    }

    pub fn percent(&self) -> u16 {
        self.percent
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
