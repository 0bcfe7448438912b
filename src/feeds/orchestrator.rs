use std::sync::Arc;
use std::sync::Mutex;

use futures::future::join_all;
use tracing::info;

use crate::error::Result;
use crate::feeds::chain_feed::ChainFeedConnection;
use crate::feeds::price_oracle::PriceOracleFeed;
use crate::interfaces::chain_source::ChainDataSource;
use crate::interfaces::price_source::PriceSource;
use crate::state::store::AppStateStore;
use crate::types::chain::ChainId;
use crate::utils::helper::lock_or_recover;
use crate::utils::task_supervisor::TaskSupervisor;

/// Owns the lifecycle of every chain feed plus the price oracle and wires
/// their output into the shared store.
pub struct FeedOrchestrator {
    store: Arc<AppStateStore>,
    connections: Vec<Arc<ChainFeedConnection>>,
    oracle: Arc<PriceOracleFeed>,
    supervisor: Mutex<TaskSupervisor>,
}

impl FeedOrchestrator {
    pub fn new(
        store: Arc<AppStateStore>,
        chain_sources: Vec<(ChainId, Arc<dyn ChainDataSource>)>,
        price_source: Arc<dyn PriceSource>,
    ) -> Self {
        let connections = chain_sources
            .into_iter()
            .map(|(chain, source)| {
                Arc::new(ChainFeedConnection::new(chain, source, Arc::clone(&store)))
            })
            .collect();
        let oracle = Arc::new(PriceOracleFeed::new(price_source, Arc::clone(&store)));
        Self::with_connections(store, connections, oracle)
    }

    /// Assemble from pre-built parts; used when poll cadences differ from
    /// the defaults.
    pub fn with_connections(
        store: Arc<AppStateStore>,
        connections: Vec<Arc<ChainFeedConnection>>,
        oracle: Arc<PriceOracleFeed>,
    ) -> Self {
        FeedOrchestrator {
            store,
            connections,
            oracle,
            supervisor: Mutex::new(TaskSupervisor::new()),
        }
    }

    /// Start every chain connection concurrently, then the price oracle,
    /// and flip the global connected flag.
    ///
    /// Dispatching the attempts is the bar for the flag: establishment
    /// continues asynchronously, and a chain that later falls back to
    /// polling does not clear it.
    pub async fn initialize_connections(&self) {
        let attempts = self.connections.iter().map(|conn| {
            let conn = Arc::clone(conn);
            async move {
                let name = format!("chain-feed-{}", conn.chain());
                (name, conn.connect().await)
            }
        });
        let workers = join_all(attempts).await;
        let oracle_worker = self.oracle.initialize().await;

        let mut supervisor = lock_or_recover(&self.supervisor);
        for (name, worker) in workers {
            if let Some(handle) = worker {
                supervisor.register(name, handle);
            }
        }
        if let Some(handle) = oracle_worker {
            supervisor.register("price-oracle", handle);
        }
        drop(supervisor);

        self.store.set_connected(true);
        info!("feed connections dispatched");
    }

    /// Tear down every chain feed and the price oracle. Idempotent; safe
    /// even if `initialize_connections` was never called.
    pub fn disconnect_all(&self) {
        for conn in &self.connections {
            conn.disconnect();
        }
        self.oracle.disconnect();
        lock_or_recover(&self.supervisor).shutdown_all();
        info!("all feeds disconnected");
    }

    /// Surface workers that terminated unexpectedly.
    pub fn check_health(&self) -> Result<()> {
        lock_or_recover(&self.supervisor).check_health()
    }

    pub fn active_worker_count(&self) -> usize {
        lock_or_recover(&self.supervisor).active_task_count()
    }

    pub fn connection(&self, chain: ChainId) -> Option<&Arc<ChainFeedConnection>> {
        self.connections.iter().find(|c| c.chain() == chain)
    }

    pub fn store(&self) -> &Arc<AppStateStore> {
        &self.store
    }
}
