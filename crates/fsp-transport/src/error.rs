use std::io;

use thiserror::Error;

/// Errors surfaced by an [`crate::client::FspClient`] operation.
///
/// Per the error-handling design: the transport layer is strict. A
/// malformed or undersized response, a socket timeout, or a server-side
/// error command all fail the operation outright rather than being
/// papered over — callers (the retrieval orchestrator) decide whether a
/// given failure is fatal or skippable.
#[derive(Debug, Error)]
pub enum FspError {
    #[error("FSP transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("FSP protocol error: {0}")]
    Protocol(#[from] fsp_protocol::ProtocolError),

    #[error("FSP server returned an error: {0}")]
    Remote(String),
}
