pub mod chain_source;
pub mod price_source;
