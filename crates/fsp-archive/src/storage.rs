use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Sidecar metadata written alongside every saved file (spec §3/§6).
#[derive(Clone, Debug, Serialize)]
pub struct SavedFileMeta {
    pub original_path: String,
    pub saved_path: PathBuf,
    pub size: usize,
    pub sha256: String,
    pub saved_at: String,
}

/// Writes `bytes` under `<storage_root>/<location_id>/<device_prefix>/<remote_path>`.
///
/// The write is atomic: bytes land at `<file>.tmp` and are renamed into
/// place, and a second run overwriting the same file simply replaces it
/// (spec §3/§5). A `<file>.meta.json` sidecar carries the original remote
/// path, the saved path, the byte count, a SHA-256 hex digest, and an
/// ISO-8601 save timestamp.
pub fn save_file(
    storage_root: &Path,
    location_id: &str,
    device_prefix: &str,
    remote_path: &str,
    bytes: &[u8],
    saved_at: &str,
) -> std::io::Result<SavedFileMeta> {
    let relative = remote_path.trim_matches('/');
    let target_path = storage_root
        .join(location_id)
        .join(device_prefix)
        .join(relative);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = with_appended_extension(&target_path, "tmp");
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, &target_path)?;

    let sha256 = hex_digest(bytes);
    let meta = SavedFileMeta {
        original_path: remote_path.to_string(),
        saved_path: target_path.clone(),
        size: bytes.len(),
        sha256,
        saved_at: saved_at.to_string(),
    };

    let meta_path = with_appended_extension(&target_path, "meta.json");
    let meta_json = serde_json::to_vec_pretty(&meta)?;
    fs::write(meta_path, meta_json)?;

    Ok(meta)
}

fn with_appended_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
