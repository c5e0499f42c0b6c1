//! Scroll-derived reading progress for the active session.
//!
//! Converts raw scroll geometry into a 0–100 completion percentage and
//! tracks a "scrolling" flag that settles 1000 ms after the last scroll
//! event. The settle timer is an explicit stored deadline, rescheduled on
//! every scroll and cancelled on teardown; `tick` fires it when due.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::types::progress::{ReadingProgress, ScrollMetrics};

/// Quiet period after the last scroll event before the flag clears.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(1000);

/// Gaps longer than this between scroll events do not count as reading time.
const IDLE_GAP: Duration = Duration::from_secs(60);

/// Per-session progress state machine.
pub struct ProgressTracker {
    progress: ReadingProgress,
    is_scrolling: bool,
    settle_deadline: Option<Instant>,
    last_event: Option<Instant>,
    /// Seconds carried over from restored progress.
    base_secs: i64,
    /// Reading time accumulated this session, at full resolution.
    /// Sub-second scroll gaps must add up instead of truncating to zero.
    active_time: Duration,
}

impl ProgressTracker {
    /// Starts tracking a book, optionally resuming persisted progress.
    pub fn new(book_id: &str, restored: Option<ReadingProgress>) -> Self {
        let progress = restored.unwrap_or_else(|| ReadingProgress::new(book_id, Self::wall_now()));
        let base_secs = progress.time_spent_secs;
        Self {
            progress,
            is_scrolling: false,
            settle_deadline: None,
            last_event: None,
            base_secs,
            active_time: Duration::ZERO,
        }
    }

    fn wall_now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Handles one scroll event from the reader surface.
    ///
    /// Recomputes position and percentage, accumulates reading time, marks
    /// the session as scrolling and pushes the settle deadline out to
    /// `at + 1000ms`. Returns the updated progress for the caller to queue
    /// for persistence.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, at: Instant) -> &ReadingProgress {
        self.progress.current_position = metrics.scroll_top.max(0.0);
        self.progress.percentage = metrics.percentage();
        self.progress.last_read_at = Self::wall_now();

        if let Some(last) = self.last_event {
            let gap = at.saturating_duration_since(last);
            if gap < IDLE_GAP {
                self.active_time += gap;
            }
        }
        self.progress.time_spent_secs = self.base_secs + self.active_time.as_secs() as i64;
        self.last_event = Some(at);

        self.is_scrolling = true;
        self.settle_deadline = Some(at + SCROLL_SETTLE);
        &self.progress
    }

    /// Fires the settle timer if its deadline has passed.
    ///
    /// Returns `true` when this call cleared the scrolling flag.
    pub fn tick(&mut self, at: Instant) -> bool {
        match self.settle_deadline {
            Some(deadline) if at >= deadline => {
                self.settle_deadline = None;
                self.is_scrolling = false;
                true
            }
            _ => false,
        }
    }

    /// Cancels the pending settle timer, clearing the scrolling flag.
    pub fn cancel_settle(&mut self) {
        self.settle_deadline = None;
        self.is_scrolling = false;
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn progress(&self) -> &ReadingProgress {
        &self.progress
    }
}
