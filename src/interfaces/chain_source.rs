use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

/// The block header fields the fee pipeline consumes. `timestamp` is unix
/// seconds; `base_fee_per_gas` is gwei, absent on pre-1559 style responses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHeader {
    pub timestamp: u64,
    pub base_fee_per_gas: Option<f64>,
}

pub type BlockStream = BoxStream<'static, BlockHeader>;

/// Abstract per-chain data source. The RPC plumbing behind it lives outside
/// this crate; the feed layer only relies on these three calls.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Establish a push subscription to new block headers.
    async fn subscribe_blocks(&self) -> Result<BlockStream>;

    /// Fetch the most recent block header.
    async fn latest_block(&self) -> Result<BlockHeader>;

    /// Suggested priority fee in gwei, if the source exposes one.
    async fn fee_suggestion(&self) -> Result<Option<f64>>;
}
