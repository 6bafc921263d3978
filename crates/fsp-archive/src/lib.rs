//! Retrieval orchestrator and local storage sink for FSP electronic-journal
//! archives: validates `medium.dat`, walks the printer's `DOC/` subtree, and
//! saves every document file it finds to local storage with a metadata
//! sidecar.

mod cancel;
mod config;
mod error;
mod listing;
mod medium;
mod orchestrator;
mod stats;
mod storage;
mod stream;
mod subtree;
mod walk;

pub use cancel::CancellationToken;
pub use config::{RetrievalConfig, DEFAULT_ARCHIVE_ROOT, DEFAULT_PORT};
pub use error::ArchiveError;
pub use listing::list_directory_full;
pub use medium::{device_model, parse_medium_dat, MediumInfo};
pub use orchestrator::retrieve;
pub use stats::RetrievalStats;
pub use storage::{save_file, SavedFileMeta};
pub use stream::{read_file_full, DEFAULT_SEGMENT_SIZE};
pub use subtree::{classify_subtree, numeric_stem, SubtreePath};
pub use walk::{retrieve_jump_by_100, retrieve_recursive};
