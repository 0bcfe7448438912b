use async_trait::async_trait;
use num_bigint::BigUint;

use crate::error::Result;

/// Abstract price source backed by an AMM pool. Returns the packed
/// `sqrtPriceX96` word from the pool's slot0: a 160-bit unsigned integer
/// holding the square-rooted Q96 fixed-point price ratio.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn read_sqrt_price_x96(&self) -> Result<BigUint>;
}
