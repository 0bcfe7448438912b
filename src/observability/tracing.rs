use tracing::Span;
use tracing_subscriber::EnvFilter;

use crate::types::chain::ChainId;

/// Install the global subscriber. Filter via `RUST_LOG`, defaulting to info.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn trace_chain_ingest(chain: ChainId) -> Span {
    tracing::info_span!(
        "chain_ingest",
        chain = %chain,
    )
}

pub fn trace_price_refresh() -> Span {
    tracing::info_span!("price_refresh")
}
