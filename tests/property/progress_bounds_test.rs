//! Property-based tests for the progress math: percentage always lands in
//! [0, 100] and is never NaN, position never goes negative, and reading
//! time only moves forward.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use readnwin_reader::managers::progress_tracker::ProgressTracker;
use readnwin_reader::types::progress::ScrollMetrics;

fn arb_metrics() -> impl Strategy<Value = ScrollMetrics> {
    (
        -10_000.0f64..1_000_000.0,
        0.0f64..1_000_000.0,
        0.0f64..100_000.0,
    )
        .prop_map(|(scroll_top, scroll_height, client_height)| ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        })
}

proptest! {
    /// Any geometry, including degenerate zero-height cases, yields a
    /// finite percentage in [0, 100].
    #[test]
    fn prop_percentage_always_bounded(metrics in arb_metrics()) {
        let pct = metrics.percentage();
        prop_assert!(pct.is_finite());
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    /// Content no taller than the viewport always reads as complete.
    #[test]
    fn prop_unscrollable_content_is_complete(
        scroll_top in -10_000.0f64..1_000_000.0,
        client_height in 0.0f64..100_000.0,
        deficit in 0.0f64..10_000.0,
    ) {
        let metrics = ScrollMetrics {
            scroll_top,
            scroll_height: client_height - deficit,
            client_height,
        };
        prop_assert_eq!(metrics.percentage(), 100.0);
    }

    /// For fixed scrollable content, percentage never decreases as the
    /// reader scrolls down.
    #[test]
    fn prop_percentage_monotone_in_scroll_top(
        mut tops in proptest::collection::vec(0.0f64..10_000.0, 2..20),
        extra in 1.0f64..10_000.0,
    ) {
        tops.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let client_height = 800.0;
        let scroll_height = client_height + extra;
        let mut last = -1.0f64;
        for top in tops {
            let pct = ScrollMetrics { scroll_top: top, scroll_height, client_height }.percentage();
            prop_assert!(pct >= last);
            last = pct;
        }
    }

    /// Feeding the tracker any event sequence keeps its snapshot sane:
    /// bounded percentage, non-negative position, monotone time.
    #[test]
    fn prop_tracker_snapshot_stays_sane(
        events in proptest::collection::vec((arb_metrics(), 0u64..5_000), 1..30),
    ) {
        let mut tracker = ProgressTracker::new("b-1", None);
        let mut at = Instant::now();
        let mut last_time = 0i64;
        for (metrics, advance_ms) in events {
            at += Duration::from_millis(advance_ms);
            let progress = tracker.on_scroll(metrics, at);
            prop_assert!(progress.percentage.is_finite());
            prop_assert!((0.0..=100.0).contains(&progress.percentage));
            prop_assert!(progress.current_position >= 0.0);
            prop_assert!(progress.time_spent_secs >= last_time);
            last_time = progress.time_spent_secs;
        }
        // A long quiet period always settles the scrolling flag.
        prop_assert!(tracker.tick(at + Duration::from_secs(2)));
        prop_assert!(!tracker.is_scrolling());
    }
}
