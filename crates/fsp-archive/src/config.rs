use std::path::PathBuf;

use crate::stream::DEFAULT_SEGMENT_SIZE;
use fsp_transport::DEFAULT_PAGE_SIZE;

/// Default archive subtree root on the printer (spec §4.3).
pub const DEFAULT_ARCHIVE_ROOT: &str = "EJ0";

/// Default FSP service port.
pub const DEFAULT_PORT: u16 = 2121;

/// Everything a retrieval run needs besides the live [`fsp_transport::FspClient`]
/// connection: where on the printer to look, where to cut off, and where to
/// write results locally.
#[derive(Clone, Debug)]
pub struct RetrievalConfig {
    /// Identifier for this printer, used as a subdirectory under `storage_root`
    /// so multiple devices can be archived to the same local root.
    pub location_id: String,
    /// Archive subtree root on the printer, e.g. `"EJ0"`.
    pub archive_root: String,
    /// Smallest document index to retrieve; documents below this are skipped.
    pub start_index: Option<u32>,
    /// Preferred page size passed to `list_directory` requests.
    pub page_size: u16,
    /// Segment size used for positional file reads.
    pub segment_size: u32,
    /// Local directory under which retrieved files and their metadata sidecars
    /// are written.
    pub storage_root: PathBuf,
}

impl RetrievalConfig {
    #[must_use]
    pub fn new(location_id: impl Into<String>, storage_root: impl Into<PathBuf>) -> Self {
        Self {
            location_id: location_id.into(),
            archive_root: DEFAULT_ARCHIVE_ROOT.to_string(),
            start_index: None,
            page_size: DEFAULT_PAGE_SIZE,
            segment_size: DEFAULT_SEGMENT_SIZE,
            storage_root: storage_root.into(),
        }
    }

    #[must_use]
    pub fn with_archive_root(mut self, archive_root: impl Into<String>) -> Self {
        self.archive_root = archive_root.into();
        self
    }

    #[must_use]
    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u16) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_segment_size(mut self, segment_size: u32) -> Self {
        self.segment_size = segment_size;
        self
    }

    pub(crate) fn medium_dat_path(&self) -> String {
        format!("{}/medium.dat", self.archive_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = RetrievalConfig::new("loc-1", "/tmp/archive");
        assert_eq!(config.archive_root, "EJ0");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.segment_size, DEFAULT_SEGMENT_SIZE);
        assert_eq!(config.start_index, None);
        assert_eq!(config.medium_dat_path(), "EJ0/medium.dat");
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = RetrievalConfig::new("loc-1", "/tmp/archive")
            .with_archive_root("EJ1")
            .with_start_index(42)
            .with_page_size(1024)
            .with_segment_size(256);
        assert_eq!(config.archive_root, "EJ1");
        assert_eq!(config.start_index, Some(42));
        assert_eq!(config.page_size, 1024);
        assert_eq!(config.segment_size, 256);
        assert_eq!(config.medium_dat_path(), "EJ1/medium.dat");
    }
}
