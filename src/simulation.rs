use crate::state::GlobalState;
use crate::types::chain::ChainId;

/// Gwei per unit of the chain's native token.
const GWEI_PER_NATIVE: f64 = 1e9;

/// Cost estimate for a plain value transfer on one chain at current fees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    pub chain: ChainId,
    pub gas_limit: u64,
    pub gas_cost_native: f64,
    pub gas_cost_usd: f64,
    pub total_cost_usd: f64,
}

/// What-if transfer costs across every chain for the state's configured
/// transaction value. Pure read: fees and the USD price come from the
/// snapshot passed in.
pub fn simulate_transfer_costs(state: &GlobalState) -> Vec<SimulationResult> {
    ChainId::ALL
        .iter()
        .map(|&chain| {
            let snapshot = state.chain(chain);
            let gas_limit = chain.transfer_gas_limit();
            let total_fee = snapshot.base_fee + snapshot.priority_fee;
            let gas_cost_native = total_fee * gas_limit as f64 / GWEI_PER_NATIVE;
            let gas_cost_usd = gas_cost_native * state.usd_price;
            let total_cost_usd = state.simulation_tx_value * state.usd_price + gas_cost_usd;
            SimulationResult {
                chain,
                gas_limit,
                gas_cost_native,
                gas_cost_usd,
                total_cost_usd,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChainPatch;
    use crate::state::store::AppStateStore;

    #[test]
    fn transfer_costs_use_current_fees_and_price() {
        let store = AppStateStore::new();
        store.update_usd_price(2_000.0);
        store.set_simulation_value(0.5);
        store.update_chain_data(
            ChainId::Ethereum,
            ChainPatch {
                base_fee: Some(40.0),
                priority_fee: Some(2.0),
                ..Default::default()
            },
        );

        let results = simulate_transfer_costs(&store.snapshot());
        assert_eq!(results.len(), ChainId::ALL.len());

        let eth = results
            .iter()
            .find(|r| r.chain == ChainId::Ethereum)
            .unwrap();
        assert_eq!(eth.gas_limit, 21_000);
        // 42 gwei * 21000 gas = 0.000882 native units.
        assert!((eth.gas_cost_native - 0.000882).abs() < 1e-12);
        assert!((eth.gas_cost_usd - 1.764).abs() < 1e-9);
        assert!((eth.total_cost_usd - 1_001.764).abs() < 1e-9);
    }

    #[test]
    fn idle_chain_costs_only_the_transfer_value() {
        let store = AppStateStore::new();
        store.update_usd_price(1_500.0);
        store.set_simulation_value(1.0);

        let results = simulate_transfer_costs(&store.snapshot());
        let arb = results
            .iter()
            .find(|r| r.chain == ChainId::Arbitrum)
            .unwrap();
        assert_eq!(arb.gas_limit, 25_000);
        assert_eq!(arb.gas_cost_usd, 0.0);
        assert_eq!(arb.total_cost_usd, 1_500.0);
    }
}
