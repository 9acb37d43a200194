//! Transport shims: decode bytes into requests, encode responses back.

use thiserror::Error;

pub mod http;
pub mod stdio;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("transport i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("response serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}
