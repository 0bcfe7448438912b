use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{Instrument, debug, info, warn};

use crate::feeds::{DEFAULT_POLL_INTERVAL, FeedState};
use crate::interfaces::chain_source::{BlockHeader, BlockStream, ChainDataSource};
use crate::observability::metrics::{
    POLL_ERRORS, POLL_FALLBACKS, PUSH_SUBSCRIPTIONS, SAMPLES_INGESTED,
};
use crate::observability::tracing::trace_chain_ingest;
use crate::state::store::AppStateStore;
use crate::types::chain::{ChainId, GENERIC_PRIORITY_FEE_FALLBACK};
use crate::types::gas::GasSample;
use crate::utils::helper::lock_or_recover;

/// Connection manager for one chain's fee feed.
///
/// `connect` attempts a push subscription to new block headers and falls
/// back to fixed-interval polling when the subscription cannot be
/// established (exactly once, at establishment) or when the chain is
/// flagged poll-only. One worker task runs per connection; `disconnect`
/// aborts it and any late in-flight result is discarded rather than applied.
pub struct ChainFeedConnection {
    chain: ChainId,
    source: Arc<dyn ChainDataSource>,
    store: Arc<AppStateStore>,
    poll_interval: Duration,
    state: Arc<Mutex<FeedState>>,
    disconnected: Arc<AtomicBool>,
    abort: Mutex<Option<AbortHandle>>,
}

impl ChainFeedConnection {
    pub fn new(chain: ChainId, source: Arc<dyn ChainDataSource>, store: Arc<AppStateStore>) -> Self {
        Self::with_poll_interval(chain, source, store, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(
        chain: ChainId,
        source: Arc<dyn ChainDataSource>,
        store: Arc<AppStateStore>,
        poll_interval: Duration,
    ) -> Self {
        ChainFeedConnection {
            chain,
            source,
            store,
            poll_interval,
            state: Arc::new(Mutex::new(FeedState::Disconnected)),
            disconnected: Arc::new(AtomicBool::new(false)),
            abort: Mutex::new(None),
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn state(&self) -> FeedState {
        *lock_or_recover(&self.state)
    }

    fn set_state(&self, state: FeedState) {
        *lock_or_recover(&self.state) = state;
    }

    /// Attempt push subscription, falling back to polling. Spawns exactly
    /// one worker and returns its handle; a connection whose worker is
    /// still running is left untouched and `None` is returned.
    pub async fn connect(&self) -> Option<JoinHandle<()>> {
        {
            let abort = lock_or_recover(&self.abort);
            if abort.is_some() && self.state() != FeedState::Disconnected {
                return None;
            }
        }

        self.disconnected.store(false, Ordering::SeqCst);
        self.set_state(FeedState::Connecting);

        let worker = Worker {
            chain: self.chain,
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            poll_interval: self.poll_interval,
            state: Arc::clone(&self.state),
            disconnected: Arc::clone(&self.disconnected),
        };

        if self.chain.forces_polling() {
            warn!(chain = %self.chain, "push transport disabled for this chain, polling instead");
            self.set_state(FeedState::PollingPull);
            return Some(self.install_worker(tokio::spawn(worker.poll_loop())));
        }

        match self.source.subscribe_blocks().await {
            Ok(blocks) => {
                info!(chain = %self.chain, "block subscription established");
                PUSH_SUBSCRIPTIONS.with_label_values(&[self.chain.key()]).inc();
                self.set_state(FeedState::SubscribedPush);
                Some(self.install_worker(tokio::spawn(worker.push_loop(blocks))))
            }
            Err(e) => {
                warn!(chain = %self.chain, error = %e, "subscription failed, falling back to polling");
                POLL_FALLBACKS.with_label_values(&[self.chain.key()]).inc();
                self.set_state(FeedState::PollingPull);
                Some(self.install_worker(tokio::spawn(worker.poll_loop())))
            }
        }
    }

    fn install_worker(&self, handle: JoinHandle<()>) -> JoinHandle<()> {
        *lock_or_recover(&self.abort) = Some(handle.abort_handle());
        handle
    }

    /// Stop the worker and mark the feed disconnected. Safe to call
    /// repeatedly or without an active connection.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
        if let Some(handle) = lock_or_recover(&self.abort).take() {
            handle.abort();
            info!(chain = %self.chain, "chain feed disconnected");
        }
        self.set_state(FeedState::Disconnected);
    }
}

struct Worker {
    chain: ChainId,
    source: Arc<dyn ChainDataSource>,
    store: Arc<AppStateStore>,
    poll_interval: Duration,
    state: Arc<Mutex<FeedState>>,
    disconnected: Arc<AtomicBool>,
}

impl Worker {
    fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    async fn push_loop(self, mut blocks: BlockStream) {
        while let Some(header) = blocks.next().await {
            if self.is_disconnected() {
                return;
            }
            self.ingest(header)
                .instrument(trace_chain_ingest(self.chain))
                .await;
        }
        if !self.is_disconnected() {
            warn!(chain = %self.chain, "block subscription closed");
            *lock_or_recover(&self.state) = FeedState::Disconnected;
        }
    }

    async fn poll_loop(self) {
        loop {
            if self.is_disconnected() {
                return;
            }
            match self.source.latest_block().await {
                Ok(header) => {
                    self.ingest(header)
                        .instrument(trace_chain_ingest(self.chain))
                        .await;
                }
                Err(e) => {
                    warn!(chain = %self.chain, error = %e, "poll tick failed, retrying next interval");
                    POLL_ERRORS.with_label_values(&[self.chain.key()]).inc();
                }
            }
            // Rearm from this tick's completion: a slow call delays the next
            // tick, it never overlaps it.
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn ingest(&self, header: BlockHeader) {
        let base_fee = header.base_fee_per_gas.unwrap_or(0.0);
        let priority_fee = estimate_priority_fee(self.chain, self.source.as_ref()).await;
        if self.is_disconnected() {
            // Late result after teardown, drop it.
            return;
        }
        self.store.add_sample(
            self.chain,
            GasSample {
                time: header.timestamp,
                base_fee,
                priority_fee,
            },
        );
        SAMPLES_INGESTED.with_label_values(&[self.chain.key()]).inc();
        debug!(chain = %self.chain, base_fee, priority_fee, "sample recorded");
    }
}

/// Suggested priority fee with layered fallbacks. Never fails: a source
/// without a suggestion yields the chain's tuned constant, a failing source
/// the generic one.
pub(crate) async fn estimate_priority_fee(chain: ChainId, source: &dyn ChainDataSource) -> f64 {
    match source.fee_suggestion().await {
        Ok(Some(fee)) => fee,
        Ok(None) => chain.priority_fee_fallback(),
        Err(e) => {
            warn!(chain = %chain, error = %e, "fee suggestion failed, using generic fallback");
            GENERIC_PRIORITY_FEE_FALLBACK
        }
    }
}
