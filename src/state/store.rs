use std::sync::Mutex;

use tokio::sync::watch;

use crate::state::candles::aggregate_candles;
use crate::state::history::push_point;
use crate::state::{ChainPatch, GlobalState, Mode};
use crate::types::chain::ChainId;
use crate::types::gas::{GasPoint, GasSample};
use crate::utils::helper::{current_timestamp_ms, lock_or_recover};

/// The shared dashboard state store.
///
/// Single-writer semantics: every mutation takes the lock, applies the
/// change, and publishes the resulting snapshot through a watch channel
/// while still holding the lock, so publication order matches mutation
/// order and readers never observe a half-applied update. Readers clone the
/// latest snapshot without blocking writers.
pub struct AppStateStore {
    state: Mutex<GlobalState>,
    tx: watch::Sender<GlobalState>,
}

impl AppStateStore {
    pub fn new() -> Self {
        let initial = GlobalState::new();
        let (tx, _rx) = watch::channel(initial.clone());
        AppStateStore {
            state: Mutex::new(initial),
            tx,
        }
    }

    fn mutate<F>(&self, apply: F)
    where
        F: FnOnce(&mut GlobalState),
    {
        let mut guard = lock_or_recover(&self.state);
        apply(&mut guard);
        self.tx.send_replace(guard.clone());
    }

    pub fn set_mode(&self, mode: Mode) {
        self.mutate(|state| state.mode = mode);
    }

    pub fn set_simulation_value(&self, value: f64) {
        self.mutate(|state| state.simulation_tx_value = value.max(0.0));
    }

    pub fn set_connected(&self, connected: bool) {
        self.mutate(|state| state.connected = connected);
    }

    pub fn update_usd_price(&self, price: f64) {
        self.mutate(|state| state.usd_price = price);
    }

    /// Apply a partial update to one chain's live readings.
    pub fn update_chain_data(&self, chain: ChainId, patch: ChainPatch) {
        self.mutate(|state| {
            if let Some(snapshot) = state.chains.get_mut(&chain) {
                if let Some(base_fee) = patch.base_fee {
                    snapshot.base_fee = base_fee;
                }
                if let Some(priority_fee) = patch.priority_fee {
                    snapshot.priority_fee = priority_fee;
                }
                if let Some(last_update_ms) = patch.last_update_ms {
                    snapshot.last_update_ms = last_update_ms;
                }
            }
        });
    }

    /// Record an observed sample: append-or-merge into the rolling history
    /// and refresh the chain's live readings.
    pub fn add_sample(&self, chain: ChainId, sample: GasSample) {
        let point = GasPoint::from(sample);
        let now_ms = current_timestamp_ms();
        self.mutate(|state| {
            if let Some(snapshot) = state.chains.get_mut(&chain) {
                push_point(&mut snapshot.history, point);
                snapshot.base_fee = sample.base_fee;
                snapshot.priority_fee = sample.priority_fee;
                snapshot.last_update_ms = now_ms;
            }
        });
    }

    /// Current snapshot; never blocks on writers beyond the watch borrow.
    pub fn snapshot(&self) -> GlobalState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GlobalState> {
        self.tx.subscribe()
    }

    /// Candlestick view of one chain's history at the given bucket size.
    pub fn candlestick_history(&self, chain: ChainId, interval_secs: u64) -> Vec<GasPoint> {
        let snapshot = self.snapshot();
        snapshot
            .chains
            .get(&chain)
            .map(|c| aggregate_candles(&c.history, interval_secs))
            .unwrap_or_default()
    }
}

impl Default for AppStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::candles::DEFAULT_CANDLE_INTERVAL_SECS;
    use crate::state::history::HISTORY_CAPACITY;

    fn sample(time: u64, base_fee: f64, priority_fee: f64) -> GasSample {
        GasSample {
            time,
            base_fee,
            priority_fee,
        }
    }

    #[test]
    fn initial_snapshot_is_seeded() {
        let store = AppStateStore::new();
        let snap = store.snapshot();

        assert_eq!(snap.mode, Mode::Live);
        assert!(!snap.connected);
        assert_eq!(snap.usd_price, 0.0);
        assert_eq!(snap.chains.len(), ChainId::ALL.len());
        assert!(snap.chain(ChainId::Polygon).history.is_empty());
    }

    #[test]
    fn add_sample_updates_live_readings_and_history() {
        let store = AppStateStore::new();
        store.add_sample(ChainId::Polygon, sample(100, 30.0, 31.0));

        let snap = store.snapshot().chain(ChainId::Polygon);
        assert_eq!(snap.base_fee, 30.0);
        assert_eq!(snap.priority_fee, 31.0);
        assert!(snap.last_update_ms > 0);
        assert_eq!(snap.history.len(), 1);
        assert_eq!(snap.history[0].high, 61.0);
    }

    #[test]
    fn equal_timestamp_samples_collapse_to_one_entry() {
        let store = AppStateStore::new();
        store.add_sample(ChainId::Arbitrum, sample(50, 0.1, 0.9));
        store.add_sample(ChainId::Arbitrum, sample(50, 0.2, 0.3));

        let history = store.snapshot().chain(ChainId::Arbitrum).history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].high, 1.0); // max of 1.0 and 0.5
        assert_eq!(history[0].low, 0.1); // min of 0.1 and 0.2
        assert_eq!(history[0].close, 0.5); // second sample's close
    }

    #[test]
    fn history_stays_within_capacity() {
        let store = AppStateStore::new();
        for t in 0..(HISTORY_CAPACITY as u64 + 40) {
            store.add_sample(ChainId::Ethereum, sample(t, 1.0, 1.0));
        }

        let history = store.snapshot().chain(ChainId::Ethereum).history;
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history[0].time, 40);
    }

    #[test]
    fn candlestick_history_matches_pure_aggregation() {
        let store = AppStateStore::new();
        for t in [10u64, 100, 950, 1850] {
            store.add_sample(ChainId::Polygon, sample(t, 2.0, 1.0));
        }

        let candles = store.candlestick_history(ChainId::Polygon, DEFAULT_CANDLE_INTERVAL_SECS);
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].time, 0);
        assert_eq!(candles[1].time, 900);
        assert_eq!(candles[2].time, 1800);
    }

    #[test]
    fn mutations_notify_subscribers() {
        let store = AppStateStore::new();
        let mut rx = store.subscribe();

        store.set_mode(Mode::Simulation);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().mode, Mode::Simulation);

        store.set_simulation_value(-4.0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().simulation_tx_value, 0.0);
    }

    #[test]
    fn update_chain_data_applies_partial_fields() {
        let store = AppStateStore::new();
        store.update_chain_data(
            ChainId::Ethereum,
            ChainPatch {
                base_fee: Some(15.0),
                ..Default::default()
            },
        );

        let snap = store.snapshot().chain(ChainId::Ethereum);
        assert_eq!(snap.base_fee, 15.0);
        assert_eq!(snap.priority_fee, 0.0);
    }
}
