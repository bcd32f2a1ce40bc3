//! Property tests for the timer queue: cancellation and ordering invariants.

use std::time::Duration;

use dragboard_core::Instant;
use dragboard_core::timer::{TimerQueue, TimerToken};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Schedule(u16),
    Cancel(usize),
    Pop(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..500).prop_map(Op::Schedule),
        (0usize..64).prop_map(Op::Cancel),
        (0u16..500).prop_map(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn cancelled_or_fired_tokens_never_fire_again(ops in prop::collection::vec(op(), 1..120)) {
        let base = Instant::now();
        let mut queue: TimerQueue<usize> = TimerQueue::new();
        let mut issued: Vec<(TimerToken, u16)> = Vec::new();
        let mut dead: Vec<TimerToken> = Vec::new();

        for op in ops {
            match op {
                Op::Schedule(ms) => {
                    let id = issued.len();
                    let token = queue.schedule(base + Duration::from_millis(u64::from(ms)), id);
                    issued.push((token, ms));
                }
                Op::Cancel(i) => {
                    if let Some(&(token, _)) = issued.get(i) {
                        let was_pending = queue.is_pending(token);
                        prop_assert_eq!(queue.cancel(token), was_pending);
                        dead.push(token);
                    }
                }
                Op::Pop(ms) => {
                    let now = base + Duration::from_millis(u64::from(ms));
                    if let Some((token, id)) = queue.pop_due(now) {
                        prop_assert!(!dead.contains(&token));
                        prop_assert_eq!(issued[id].0, token);
                        prop_assert!(issued[id].1 <= ms);
                        dead.push(token);
                    }
                }
            }
            for token in &dead {
                prop_assert!(!queue.is_pending(*token));
            }
        }
    }

    #[test]
    fn draining_yields_nondecreasing_due_times(dues in prop::collection::vec(0u16..1000, 0..50)) {
        let base = Instant::now();
        let mut queue = TimerQueue::new();
        for &ms in &dues {
            queue.schedule(base + Duration::from_millis(u64::from(ms)), ms);
        }
        let end = base + Duration::from_secs(2);
        let drained: Vec<u16> = std::iter::from_fn(|| queue.pop_due(end).map(|(_, ms)| ms)).collect();
        prop_assert_eq!(drained.len(), dues.len());
        prop_assert!(drained.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(queue.is_empty());
    }
}
