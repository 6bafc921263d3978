use fsp_protocol::EntryKind;
use fsp_transport::FspClient;
use tracing::warn;

use crate::cancel::CancellationToken;
use crate::config::RetrievalConfig;
use crate::error::ArchiveError;
use crate::listing::list_directory_full;
use crate::stats::RetrievalStats;
use crate::storage::save_file;
use crate::stream::read_file_full;
use crate::subtree::{classify_subtree, numeric_stem, SubtreePath};

/// Depth-first walk of `path`, recursing into directories and downloading
/// any `DDDDDDDD.BIN` or `*.SIG` file it finds (spec §4.3).
///
/// `rel_parts` are this directory's path components below the archive's
/// `DOC/` root; they are compared against `start` to decide whether a
/// subtree should be skipped. `started` flips to `true` the first time a
/// subtree strictly after the start index is reached, after which the
/// filter stops being applied for the remainder of this call tree — callers
/// doing a single walk should pass a fresh `false`; the jump-by-100 walker
/// passes `start: None` instead, since it only ever visits leaf directories
/// it already knows are in range.
///
/// Resilient per spec §7: a listing failure aborts only this subtree (logged
/// and swallowed, traversal continues with the caller's next sibling), and a
/// file-read failure skips only that file. Only a storage/config failure at
/// the call site is allowed to reach the top — transport and protocol errors
/// never propagate out of here.
#[allow(clippy::too_many_arguments)]
fn gather_and_save(
    client: &mut FspClient,
    path: &str,
    rel_parts: &[String],
    start: Option<SubtreePath>,
    start_index: Option<u32>,
    started: &mut bool,
    stats: &mut RetrievalStats,
    cancel: &CancellationToken,
    config: &RetrievalConfig,
    device_prefix: &str,
) -> Result<(), ArchiveError> {
    if cancel.is_cancelled() {
        return Ok(());
    }

    let entries = match list_directory_full(client, path, config.page_size) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path, error = %err, "failed to list directory, skipping subtree");
            return Ok(());
        }
    };

    for entry in entries {
        if cancel.is_cancelled() {
            return Ok(());
        }

        match entry.kind {
            EntryKind::Directory => {
                if let Some(start_triple) = start {
                    if !*started {
                        let mut prospective: Vec<&str> =
                            rel_parts.iter().map(String::as_str).collect();
                        prospective.push(&entry.name);
                        let (skip, now_started) = classify_subtree(&prospective, start_triple);
                        if now_started {
                            *started = true;
                        }
                        if skip {
                            continue;
                        }
                    }
                }

                let mut child_parts = rel_parts.to_vec();
                child_parts.push(entry.name.clone());
                let child_path = format!("{path}/{}", entry.name);
                gather_and_save(
                    client,
                    &child_path,
                    &child_parts,
                    start,
                    start_index,
                    started,
                    stats,
                    cancel,
                    config,
                    device_prefix,
                )?;
            }
            EntryKind::File => {
                if !is_document_file(&entry.name) {
                    continue;
                }

                if let Some(start_idx) = start_index {
                    if let Some(stem) = numeric_stem(&entry.name) {
                        if stem < start_idx {
                            stats.skipped += 1;
                            continue;
                        }
                    }
                }

                stats.found += 1;
                let file_path = format!("{path}/{}", entry.name);
                let bytes = match read_file_full(client, &file_path, config.segment_size) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        warn!(path = %file_path, error = %err, "failed to read file, skipping");
                        continue;
                    }
                };
                let saved_at = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
                match save_file(
                    &config.storage_root,
                    &config.location_id,
                    device_prefix,
                    &file_path,
                    &bytes,
                    &saved_at,
                ) {
                    Ok(_) => stats.saved += 1,
                    Err(err) => warn!(path = %file_path, error = %err, "failed to save file"),
                }
            }
        }
    }

    Ok(())
}

fn is_document_file(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    if upper.ends_with(".SIG") {
        return true;
    }
    let Some(stem) = upper.strip_suffix(".BIN") else {
        return false;
    };
    stem.len() == 8 && stem.bytes().all(|b| b.is_ascii_digit())
}

/// Walks the whole `DOC/` subtree once, applying the lexicographic
/// start-index subtree filter as it descends (spec §4.3, primary mode).
pub fn retrieve_recursive(
    client: &mut FspClient,
    config: &RetrievalConfig,
    cancel: &CancellationToken,
    device_prefix: &str,
) -> Result<RetrievalStats, ArchiveError> {
    let mut stats = RetrievalStats::new();
    let doc_root = format!("{}/DOC", config.archive_root);
    let start = config.start_index.map(SubtreePath::from_index);
    let mut started = start.is_none();

    gather_and_save(
        client,
        &doc_root,
        &[],
        start,
        config.start_index,
        &mut started,
        &mut stats,
        cancel,
        config,
        device_prefix,
    )?;

    Ok(stats)
}

/// Walks only the `CC` leaf directories in jumps of 100 indices starting
/// from `config.start_index`, stopping as soon as a directory contributes no
/// new files (spec §4.3, optional optimization that avoids listing every
/// ancestor directory).
///
/// Requires `config.start_index` to be set; returns a [`ArchiveError::Config`]
/// otherwise.
pub fn retrieve_jump_by_100(
    client: &mut FspClient,
    config: &RetrievalConfig,
    cancel: &CancellationToken,
    device_prefix: &str,
) -> Result<RetrievalStats, ArchiveError> {
    let Some(start_index) = config.start_index else {
        return Err(ArchiveError::Config(
            "retrieve_jump_by_100 requires a start index".to_string(),
        ));
    };

    let mut stats = RetrievalStats::new();
    let doc_root = format!("{}/DOC", config.archive_root);
    let mut current_index = start_index;

    loop {
        if cancel.is_cancelled() {
            break;
        }
        let target = format!("{doc_root}/{}", SubtreePath::from_index(current_index).to_path());
        let previously_found = stats.found;
        let mut started = true;

        gather_and_save(
            client,
            &target,
            &[],
            None,
            Some(current_index),
            &mut started,
            &mut stats,
            cancel,
            config,
            device_prefix,
        )?;

        if stats.found == previously_found {
            break;
        }
        current_index += 100;
    }

    Ok(stats)
}
