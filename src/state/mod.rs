pub mod candles;
pub mod history;
pub mod store;

use im::{OrdMap, Vector};

use crate::types::chain::ChainId;
use crate::types::gas::GasPoint;

/// Dashboard mode selected by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Live,
    Simulation,
}

/// Current state for one chain. Identity metadata (name, symbol, color)
/// comes from `ChainId` statics; this holds only the live readings and the
/// rolling history.
#[derive(Clone, Debug)]
pub struct ChainSnapshot {
    pub base_fee: f64,
    pub priority_fee: f64,
    pub last_update_ms: u64,
    pub history: Vector<GasPoint>,
}

impl ChainSnapshot {
    pub fn new() -> Self {
        ChainSnapshot {
            base_fee: 0.0,
            priority_fee: 0.0,
            last_update_ms: 0,
            history: Vector::new(),
        }
    }
}

impl Default for ChainSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a chain's live readings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainPatch {
    pub base_fee: Option<f64>,
    pub priority_fee: Option<f64>,
    pub last_update_ms: Option<u64>,
}

/// The process-wide dashboard state. Exactly one instance, owned by
/// `store::AppStateStore`; mutated only through the store's operations.
/// Built on `im` structures so a published snapshot is immutable and cheap
/// to clone.
#[derive(Clone, Debug)]
pub struct GlobalState {
    pub mode: Mode,
    pub chains: OrdMap<ChainId, ChainSnapshot>,
    pub usd_price: f64,
    pub simulation_tx_value: f64,
    pub connected: bool,
}

impl GlobalState {
    pub fn new() -> Self {
        let mut chains = OrdMap::new();
        for chain in ChainId::ALL {
            chains.insert(chain, ChainSnapshot::new());
        }
        GlobalState {
            mode: Mode::Live,
            chains,
            usd_price: 0.0,
            simulation_tx_value: 0.1,
            connected: false,
        }
    }

    /// Snapshot for one chain. The map is seeded with every chain at
    /// construction, so a miss only happens for a state built by hand.
    pub fn chain(&self, chain: ChainId) -> ChainSnapshot {
        self.chains.get(&chain).cloned().unwrap_or_default()
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}
