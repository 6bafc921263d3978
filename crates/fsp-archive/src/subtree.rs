/// The three-level directory triple (`A/BB/CC`) a document index resolves
/// to under `DOC/` (spec §4.3).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubtreePath {
    pub a: u32,
    pub bb: u32,
    pub cc: u32,
}

impl SubtreePath {
    /// Computes the subtree a document index falls under:
    /// `A = N / 1_000_000`, `BB = (N / 10_000) % 100`, `CC = (N / 100) % 100`.
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        Self {
            a: index / 1_000_000,
            bb: (index / 10_000) % 100,
            cc: (index / 100) % 100,
        }
    }

    /// Formats as `A/BB/CC` with `BB`/`CC` zero-padded to two digits,
    /// matching the archive's on-disk directory names.
    #[must_use]
    pub fn to_path(self) -> String {
        format!("{}/{:02}/{:02}", self.a, self.bb, self.cc)
    }
}

/// Compares one path component, parsed as a number, against the
/// corresponding start-triple component.
///
/// A component that fails to parse as a number is treated as `-1` — always
/// "before" any real start component — mirroring the reference parser's
/// catch-all fallback for non-numeric directory names.
fn compare_component(candidate: &str, start: u32) -> std::cmp::Ordering {
    let value: i64 = candidate.parse().unwrap_or(-1);
    value.cmp(&i64::from(start))
}

/// Decides whether traversal should skip the subtree at `candidate_parts`
/// (a path's components below the `DOC/` root), given the lexicographic
/// start triple.
///
/// Returns `(skip, started)`: `skip` is true for a subtree strictly before
/// the start; `started` becomes true the first time a subtree strictly
/// after the start is reached, after which the caller should stop applying
/// this filter for the rest of that traversal (spec §4.3).
///
/// `candidate_parts` may be shorter than the 3-component start triple — the
/// walk calls this at every depth, including ancestors like `A` or `A/BB`
/// that haven't yet resolved down to a `CC` leaf. Running out of components
/// while every present one compared `Equal` means this ancestor is on the
/// path to the equal subtree, so it must be descended into, not skipped.
#[must_use]
pub fn classify_subtree(candidate_parts: &[&str], start: SubtreePath) -> (bool, bool) {
    let start_components = [start.a, start.bb, start.cc];
    for (index, &start_value) in start_components.iter().enumerate() {
        let Some(candidate) = candidate_parts.get(index) else {
            return (false, false);
        };
        match compare_component(candidate, start_value) {
            std::cmp::Ordering::Less => return (true, false),
            std::cmp::Ordering::Greater => return (false, true),
            std::cmp::Ordering::Equal => {}
        }
    }
    (false, false)
}

/// Extracts the leading numeric stem of a filename (e.g. `"00000042"` from
/// `"00000042.BIN"`), used to apply the per-file start-index cutoff.
#[must_use]
pub fn numeric_stem(file_name: &str) -> Option<u32> {
    file_name.split('.').next()?.parse().ok()
}
