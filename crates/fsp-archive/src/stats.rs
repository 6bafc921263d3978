/// Running counters for a retrieval run (spec §4.3: `{found, skipped, saved}`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RetrievalStats {
    /// Candidate `.BIN`/`.SIG` files encountered (before any start-index cutoff).
    pub found: u64,
    /// Files dropped because their numeric stem was below the start-index.
    pub skipped: u64,
    /// Files successfully written to local storage.
    pub saved: u64,
}

impl RetrievalStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
