use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Transport Errors
    #[error("Subscription setup failed: {0}")]
    ConnectionError(String),

    #[error("RPC call failed: {0}")]
    RpcError(String),

    #[error("Feed not connected")]
    NotConnected,

    #[error("Connection closed")]
    ConnectionClosed,

    // Price Oracle Errors
    #[error("Price payload malformed: {0}")]
    DecodeError(String),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Feed worker terminated unexpectedly: {0}")]
    TaskFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
