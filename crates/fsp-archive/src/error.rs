use std::io;

use thiserror::Error;

/// Errors surfaced by the retrieval orchestrator and its storage sink.
///
/// Per the error-handling design, disposition differs by variant: a
/// [`ArchiveError::Config`] is fatal and aborts the run; everything else is
/// reported and the run continues with the next file or directory.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("FSP operation failed: {0}")]
    Fsp(#[from] fsp_transport::FspError),

    #[error("storage write failed: {0}")]
    Storage(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
