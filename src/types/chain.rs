use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority-fee estimate used when a source gives no suggestion and the
/// chain has no tuned constant, in gwei.
pub const GENERIC_PRIORITY_FEE_FALLBACK: f64 = 2.0;

/// The tracked chains. Per-chain constants live here so special cases are
/// checked exhaustively at compile time instead of through a string map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Ethereum,
    Polygon,
    Arbitrum,
}

impl ChainId {
    pub const ALL: [ChainId; 3] = [ChainId::Ethereum, ChainId::Polygon, ChainId::Arbitrum];

    /// Stable lowercase identifier, used for config keys and metric labels.
    pub fn key(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Polygon => "polygon",
            ChainId::Arbitrum => "arbitrum",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "Ethereum",
            ChainId::Polygon => "Polygon",
            ChainId::Arbitrum => "Arbitrum",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ETH",
            ChainId::Polygon => "MATIC",
            ChainId::Arbitrum => "ETH",
        }
    }

    /// Display accent color for the dashboard.
    pub fn color(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "#627EEA",
            ChainId::Polygon => "#8247E5",
            ChainId::Arbitrum => "#28A0F0",
        }
    }

    /// Tuned per-chain priority-fee estimate in gwei, applied when the
    /// source reports no suggestion.
    pub fn priority_fee_fallback(&self) -> f64 {
        match self {
            ChainId::Ethereum => 2.0,
            ChainId::Polygon => 30.0,
            ChainId::Arbitrum => 0.01,
        }
    }

    /// Push subscriptions on Ethereum's public endpoints drop silently under
    /// load, so that chain always uses the pull transport.
    pub fn forces_polling(&self) -> bool {
        matches!(self, ChainId::Ethereum)
    }

    /// Gas limit for a plain value transfer.
    pub fn transfer_gas_limit(&self) -> u64 {
        match self {
            ChainId::Ethereum => 21_000,
            ChainId::Polygon => 21_000,
            ChainId::Arbitrum => 25_000,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ethereum_forces_polling() {
        assert!(ChainId::Ethereum.forces_polling());
        assert!(!ChainId::Polygon.forces_polling());
        assert!(!ChainId::Arbitrum.forces_polling());
    }

    #[test]
    fn fallback_constants() {
        assert_eq!(ChainId::Ethereum.priority_fee_fallback(), 2.0);
        assert_eq!(ChainId::Polygon.priority_fee_fallback(), 30.0);
        assert_eq!(ChainId::Arbitrum.priority_fee_fallback(), 0.01);
        assert_eq!(GENERIC_PRIORITY_FEE_FALLBACK, 2.0);
    }
}
