//! Property-based invariant tests for the deferred-task scheduler.
//!
//! ## Invariants
//!
//! 1. Firing order: events fire sorted by `(due, scheduling sequence)`.
//! 2. Partition: splitting one advance into many small ones fires the same
//!    events in the same order.
//! 3. Cancellation: a cancelled timer never fires; all others do.
//! 4. Clock: after `advance(d)` the virtual clock moved by exactly `d`.

use std::time::Duration;

use navkit_core::Scheduler;
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_delays(max_n: usize) -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000, 1..max_n)
}

fn expected_order(delays: &[u64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..delays.len()).collect();
    // Stable sort keeps scheduling order for ties.
    order.sort_by_key(|&i| delays[i]);
    order
}

// ── 1. Firing order ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn fires_sorted_by_due_then_sequence(delays in arb_delays(40)) {
        let mut sched = Scheduler::new();
        for (i, d) in delays.iter().enumerate() {
            sched.schedule(Duration::from_millis(*d), i);
        }
        let fired = sched.advance(Duration::from_millis(1_000));
        prop_assert_eq!(fired, expected_order(&delays));
        prop_assert!(sched.is_idle());
    }
}

// ── 2. Partitioned advance ────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn partitioned_advance_matches_single_advance(
        delays in arb_delays(30),
        steps in prop::collection::vec(1u64..97, 1..40),
    ) {
        let mut sched = Scheduler::new();
        for (i, d) in delays.iter().enumerate() {
            sched.schedule(Duration::from_millis(*d), i);
        }
        let mut fired = Vec::new();
        for step in &steps {
            fired.extend(sched.advance(Duration::from_millis(*step)));
        }
        fired.extend(sched.advance(Duration::from_millis(1_000)));
        prop_assert_eq!(fired, expected_order(&delays));
    }
}

// ── 3. Cancellation ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn cancelled_timers_never_fire(
        delays in arb_delays(30),
        mask in prop::collection::vec(any::<bool>(), 30),
    ) {
        let mut sched = Scheduler::new();
        let ids: Vec<_> = delays
            .iter()
            .enumerate()
            .map(|(i, d)| sched.schedule(Duration::from_millis(*d), i))
            .collect();
        for (i, id) in ids.iter().enumerate() {
            if mask[i] {
                prop_assert!(sched.cancel(*id));
            }
        }
        let fired = sched.advance(Duration::from_millis(1_000));
        let expected: Vec<usize> = expected_order(&delays)
            .into_iter()
            .filter(|&i| !mask[i])
            .collect();
        prop_assert_eq!(fired, expected);
    }
}

// ── 4. Clock ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn clock_moves_by_exact_delta(steps in prop::collection::vec(0u64..500, 1..20)) {
        let mut sched: Scheduler<()> = Scheduler::new();
        let mut total = Duration::ZERO;
        for step in steps {
            let delta = Duration::from_millis(step);
            sched.advance(delta);
            total += delta;
            prop_assert_eq!(sched.now(), total);
        }
    }
}
