pub mod chain_feed;
pub mod orchestrator;
pub mod price_oracle;

use std::time::Duration;

/// Cadence shared by the pull transports (chain polling and the price
/// oracle).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Lifecycle of a single feed connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedState {
    Disconnected,
    Connecting,
    SubscribedPush,
    PollingPull,
}
