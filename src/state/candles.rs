use im::Vector;

use crate::types::gas::GasPoint;

/// Default aggregation bucket: 15 minutes.
pub const DEFAULT_CANDLE_INTERVAL_SECS: u64 = 900;

/// Re-bucket raw history points into fixed-interval OHLC candles.
///
/// Pure read-time transform: buckets are keyed by
/// `floor(time / interval) * interval`; within a bucket `open` comes from
/// the first point, `close` and the fee fields from the last, `high`/`low`
/// are the bucket extremes. Output is ascending by bucket start with unique
/// starts. Recomputed from the current history on every call; the window
/// is small enough that caching would buy nothing.
pub fn aggregate_candles(points: &Vector<GasPoint>, interval_secs: u64) -> Vec<GasPoint> {
    if points.is_empty() || interval_secs == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<GasPoint> = points.iter().copied().collect();
    sorted.sort_by_key(|p| p.time);

    let mut candles: Vec<GasPoint> = Vec::new();
    for pt in sorted {
        let bucket = pt.time / interval_secs * interval_secs;
        match candles.last_mut() {
            Some(candle) if candle.time == bucket => {
                candle.high = candle.high.max(pt.high);
                candle.low = candle.low.min(pt.low);
                candle.close = pt.close;
                candle.base_fee = pt.base_fee;
                candle.priority_fee = pt.priority_fee;
            }
            _ => candles.push(GasPoint { time: bucket, ..pt }),
        }
    }
    candles
}

/// Chart-boundary guard for externally supplied point lists: sort ascending
/// and drop any point whose time equals the immediately preceding point's
/// time. `aggregate_candles` output already satisfies both, but the chart
/// accepts arbitrary lists and re-enforces the contract itself.
pub fn normalize_chart_points(mut points: Vec<GasPoint>) -> Vec<GasPoint> {
    points.sort_by_key(|p| p.time);
    points.dedup_by_key(|p| p.time);
    points
}
