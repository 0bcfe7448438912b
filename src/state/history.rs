use im::Vector;

use crate::types::gas::GasPoint;

/// Rolling window size per chain. Oldest entries are evicted first.
pub const HISTORY_CAPACITY: usize = 100;

/// Insert a point into a chain's rolling history.
///
/// A point carrying the same timestamp as the last stored entry merges into
/// it: extremes take the union (`high = max`, `low = min`), while `close`
/// and the fee fields are last-write-wins. The stored `open` is kept, so
/// within one timestamp the first writer defines the open. Anything newer
/// appends, and the window is truncated to the most recent
/// `HISTORY_CAPACITY` entries.
///
/// For input arriving in non-decreasing time order this keeps the history
/// strictly ascending with at most one entry per timestamp.
pub fn push_point(history: &mut Vector<GasPoint>, point: GasPoint) {
    match history.last().copied() {
        Some(last) if last.time == point.time => {
            let merged = GasPoint {
                time: last.time,
                open: last.open,
                high: last.high.max(point.high),
                low: last.low.min(point.low),
                close: point.close,
                base_fee: point.base_fee,
                priority_fee: point.priority_fee,
            };
            history.set(history.len() - 1, merged);
        }
        _ => {
            history.push_back(point);
        }
    }

    while history.len() > HISTORY_CAPACITY {
        history.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(time: u64, open: f64, high: f64, low: f64, close: f64) -> GasPoint {
        GasPoint {
            time,
            open,
            high,
            low,
            close,
            base_fee: open,
            priority_fee: close - open,
        }
    }

    #[test]
    fn appends_in_time_order() {
        let mut history = Vector::new();
        push_point(&mut history, point(10, 1.0, 2.0, 1.0, 2.0));
        push_point(&mut history, point(20, 2.0, 3.0, 2.0, 3.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time, 10);
        assert_eq!(history[1].time, 20);
    }

    #[test]
    fn equal_timestamps_merge_into_one_entry() {
        let mut history = Vector::new();
        push_point(&mut history, point(10, 5.0, 8.0, 5.0, 8.0));
        push_point(&mut history, point(10, 3.0, 6.0, 3.0, 6.0));

        assert_eq!(history.len(), 1);
        let merged = history[0];
        assert_eq!(merged.open, 5.0); // first writer keeps the open
        assert_eq!(merged.high, 8.0);
        assert_eq!(merged.low, 3.0);
        assert_eq!(merged.close, 6.0); // last write wins
        assert_eq!(merged.base_fee, 3.0);
        assert_eq!(merged.priority_fee, 3.0);
    }

    #[test]
    fn merge_takes_union_extremes_regardless_of_order() {
        let mut a = Vector::new();
        push_point(&mut a, point(10, 1.0, 9.0, 1.0, 9.0));
        push_point(&mut a, point(10, 2.0, 4.0, 2.0, 4.0));

        let mut b = Vector::new();
        push_point(&mut b, point(10, 2.0, 4.0, 2.0, 4.0));
        push_point(&mut b, point(10, 1.0, 9.0, 1.0, 9.0));

        // Extremes commute; only close and fees depend on arrival order.
        assert_eq!(a[0].high, b[0].high);
        assert_eq!(a[0].low, b[0].low);
        assert_eq!(a[0].close, 4.0);
        assert_eq!(b[0].close, 9.0);
    }

    #[test]
    fn truncates_to_capacity_dropping_oldest() {
        let mut history = Vector::new();
        for t in 0..150u64 {
            push_point(&mut history, point(t, 1.0, 2.0, 1.0, 2.0));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history[0].time, 50);
        assert_eq!(history[HISTORY_CAPACITY - 1].time, 149);
    }

    proptest! {
        #[test]
        fn bounded_and_strictly_ascending(times in proptest::collection::vec(0u64..10_000, 0..300)) {
            let mut sorted = times;
            sorted.sort_unstable();

            let mut history = Vector::new();
            for (i, t) in sorted.iter().enumerate() {
                let fee = i as f64;
                push_point(&mut history, point(*t, fee, fee + 1.0, fee, fee + 1.0));
            }

            prop_assert!(history.len() <= HISTORY_CAPACITY);
            for pair in history.iter().zip(history.iter().skip(1)) {
                prop_assert!(pair.0.time < pair.1.time);
            }
        }
    }
}
