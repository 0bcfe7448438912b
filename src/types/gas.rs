use serde::{Deserialize, Serialize};

/// One observed fee reading for a chain. Fees are in gwei, `time` is unix
/// seconds (the block timestamp). Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasSample {
    pub time: u64,
    pub base_fee: f64,
    pub priority_fee: f64,
}

/// OHLC-shaped history point. Derived from a `GasSample` at insertion time:
/// the candle body spans base fee to base + priority fee.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasPoint {
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub base_fee: f64,
    pub priority_fee: f64,
}

impl From<GasSample> for GasPoint {
    fn from(sample: GasSample) -> Self {
        let total = sample.base_fee + sample.priority_fee;
        GasPoint {
            time: sample.time,
            open: sample.base_fee,
            high: total,
            low: sample.base_fee,
            close: total,
            base_fee: sample.base_fee,
            priority_fee: sample.priority_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_from_sample_spans_base_to_total() {
        let point: GasPoint = GasSample {
            time: 1_700_000_000,
            base_fee: 12.5,
            priority_fee: 1.5,
        }
        .into();

        assert_eq!(point.time, 1_700_000_000);
        assert_eq!(point.open, 12.5);
        assert_eq!(point.low, 12.5);
        assert_eq!(point.high, 14.0);
        assert_eq!(point.close, 14.0);
        assert_eq!(point.base_fee, 12.5);
        assert_eq!(point.priority_fee, 1.5);
    }
}
