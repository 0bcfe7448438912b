use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{Instrument, debug, info, warn};

use crate::error::{Error, Result};
use crate::feeds::DEFAULT_POLL_INTERVAL;
use crate::interfaces::price_source::PriceSource;
use crate::observability::metrics::{PRICE_FETCH_ERRORS, PRICE_UPDATES, USD_PRICE};
use crate::observability::tracing::trace_price_refresh;
use crate::state::store::AppStateStore;
use crate::utils::helper::lock_or_recover;

/// Decimal adjustment between the pool's two token legs.
pub const PRICE_DECIMAL_ADJUSTMENT: u32 = 12;

/// Decode a packed Q96 square-root pool price into a USD price:
/// `price = sqrtPriceX96^2 * 10^12 / 2^192`.
///
/// The multiply-then-divide runs entirely in arbitrary-precision integers
/// (the input is a 160-bit word and its square does not fit any primitive)
/// and converts to a float only at the very end. The final division
/// truncates, matching the pool's published numeric contract.
pub fn decode_sqrt_price_x96(sqrt_price_x96: &BigUint) -> Result<f64> {
    let scaled = sqrt_price_x96 * sqrt_price_x96 * BigUint::from(10u64.pow(PRICE_DECIMAL_ADJUSTMENT));
    let price = scaled >> 192usize;
    let value = price.to_f64().unwrap_or(f64::INFINITY);
    if !value.is_finite() {
        return Err(Error::DecodeError(
            "decoded price exceeds f64 range".to_string(),
        ));
    }
    Ok(value)
}

/// Single external price feed: one immediate fetch on startup, then a fixed
/// poll loop. Fetch or decode failures leave the previous price in place.
pub struct PriceOracleFeed {
    source: Arc<dyn PriceSource>,
    store: Arc<AppStateStore>,
    poll_interval: Duration,
    disconnected: Arc<AtomicBool>,
    abort: Mutex<Option<AbortHandle>>,
}

impl PriceOracleFeed {
    pub fn new(source: Arc<dyn PriceSource>, store: Arc<AppStateStore>) -> Self {
        Self::with_poll_interval(source, store, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(
        source: Arc<dyn PriceSource>,
        store: Arc<AppStateStore>,
        poll_interval: Duration,
    ) -> Self {
        PriceOracleFeed {
            source,
            store,
            poll_interval,
            disconnected: Arc::new(AtomicBool::new(false)),
            abort: Mutex::new(None),
        }
    }

    /// Fetch the price once immediately, then start the poll loop whether
    /// or not that first fetch succeeded. Returns the worker handle; `None`
    /// if the feed is already running.
    pub async fn initialize(&self) -> Option<JoinHandle<()>> {
        if lock_or_recover(&self.abort).is_some() {
            return None;
        }
        self.disconnected.store(false, Ordering::SeqCst);

        if let Err(e) = refresh_price(self.source.as_ref(), &self.store, &self.disconnected)
            .instrument(trace_price_refresh())
            .await
        {
            warn!(error = %e, "initial price fetch failed");
            PRICE_FETCH_ERRORS.inc();
        }

        let worker = OracleWorker {
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            poll_interval: self.poll_interval,
            disconnected: Arc::clone(&self.disconnected),
        };
        let handle = tokio::spawn(worker.poll_loop());
        *lock_or_recover(&self.abort) = Some(handle.abort_handle());
        info!("price oracle feed started");
        Some(handle)
    }

    /// Release the worker. Safe to call repeatedly or before `initialize`.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
        if let Some(handle) = lock_or_recover(&self.abort).take() {
            handle.abort();
            info!("price oracle feed disconnected");
        }
    }
}

struct OracleWorker {
    source: Arc<dyn PriceSource>,
    store: Arc<AppStateStore>,
    poll_interval: Duration,
    disconnected: Arc<AtomicBool>,
}

impl OracleWorker {
    async fn poll_loop(self) {
        loop {
            tokio::time::sleep(self.poll_interval).await;
            if self.disconnected.load(Ordering::SeqCst) {
                return;
            }
            if let Err(e) = refresh_price(self.source.as_ref(), &self.store, &self.disconnected)
                .instrument(trace_price_refresh())
                .await
            {
                warn!(error = %e, "price refresh failed, previous price retained");
                PRICE_FETCH_ERRORS.inc();
            }
        }
    }
}

async fn refresh_price(
    source: &dyn PriceSource,
    store: &AppStateStore,
    disconnected: &AtomicBool,
) -> Result<()> {
    let sqrt_price = source.read_sqrt_price_x96().await?;
    let price = decode_sqrt_price_x96(&sqrt_price)?;
    if disconnected.load(Ordering::SeqCst) {
        // Late result after teardown, drop it.
        return Ok(());
    }
    store.update_usd_price(price);
    PRICE_UPDATES.inc();
    USD_PRICE.set(price);
    debug!(price, "pool price applied");
    Ok(())
}
