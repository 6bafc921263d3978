//! Minimal example binary wiring `fsp-archive`, `fsp-transport`, and
//! `fsp-logging` together for a single printer. Configuration comes entirely
//! from environment variables; there is no argument parser.
//!
//! Required:
//! - `FSP_ARCHIVE_ADDR` — printer host, e.g. `"192.168.1.50"` or `"printer:2121"`
//! - `FSP_ARCHIVE_LOCATION_ID` — identifier for this printer, used as a
//!   storage subdirectory
//! - `FSP_ARCHIVE_STORAGE_ROOT` — local directory to write retrieved files into
//!
//! Optional:
//! - `FSP_ARCHIVE_PORT` — default 2121, ignored if `FSP_ARCHIVE_ADDR` already
//!   names a port
//! - `FSP_ARCHIVE_ROOT` — archive subtree root, default `"EJ0"`
//! - `FSP_ARCHIVE_START_INDEX` — smallest document index to retrieve
//! - `FSP_ARCHIVE_PAGE_SIZE` — preferred directory-listing page size
//! - `FSP_ARCHIVE_DECODE_SAMPLE` — path to a local `.BIN` file (typically one
//!   just retrieved) to decode and summarize after the run, demonstrating
//!   the offline record-parsing step against retrieved bytes

use std::env;
use std::net::ToSocketAddrs;
use std::process::ExitCode;
use std::time::Duration;

use fsp_archive::{CancellationToken, RetrievalConfig};
use fsp_transport::FspClient;

fn main() -> ExitCode {
    fsp_logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let addr_var = require_env("FSP_ARCHIVE_ADDR")?;
    let location_id = require_env("FSP_ARCHIVE_LOCATION_ID")?;
    let storage_root = require_env("FSP_ARCHIVE_STORAGE_ROOT")?;

    let addr = resolve_addr(&addr_var)?;

    let mut config = RetrievalConfig::new(location_id, storage_root);
    if let Some(root) = env::var("FSP_ARCHIVE_ROOT").ok().filter(|s| !s.is_empty()) {
        config = config.with_archive_root(root);
    }
    if let Some(start_index) = parse_optional_env::<u32>("FSP_ARCHIVE_START_INDEX")? {
        config = config.with_start_index(start_index);
    }
    if let Some(page_size) = parse_optional_env::<u16>("FSP_ARCHIVE_PAGE_SIZE")? {
        config = config.with_page_size(page_size);
    }

    let mut client = FspClient::connect(addr, Duration::from_secs(5))
        .map_err(|err| format!("failed to connect to {addr}: {err}"))?;
    let cancel = CancellationToken::new();

    let (medium, stats) = fsp_archive::retrieve(&mut client, &config, &cancel)
        .map_err(|err| format!("retrieval failed: {err}"))?;

    tracing::info!(
        model = fsp_archive::device_model(medium.device_id),
        prefix = %medium.device_prefix,
        found = stats.found,
        skipped = stats.skipped,
        saved = stats.saved,
        "retrieval finished"
    );

    if let Ok(sample_path) = env::var("FSP_ARCHIVE_DECODE_SAMPLE") {
        decode_sample(&sample_path)?;
    }

    Ok(())
}

fn decode_sample(path: &str) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|err| format!("failed to read {path}: {err}"))?;
    let document = fsp_document::assemble_document(&bytes);
    tracing::info!(
        path,
        kind = ?document.kind(),
        lines = document.lines.len(),
        items = document.items.len(),
        has_header = document.header.is_some(),
        has_footer = document.footer.is_some(),
        unknown_records = document.unknowns.len(),
        "decoded sample document"
    );
    Ok(())
}

fn require_env(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("missing required environment variable {name}"))
}

fn parse_optional_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, String> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| format!("{name} is not a valid number: {value}")),
        Err(_) => Ok(None),
    }
}

fn resolve_addr(addr_var: &str) -> Result<std::net::SocketAddr, String> {
    let candidate = if addr_var.contains(':') {
        addr_var.to_string()
    } else {
        let port = parse_optional_env::<u16>("FSP_ARCHIVE_PORT")?.unwrap_or(fsp_archive::DEFAULT_PORT);
        format!("{addr_var}:{port}")
    };

    candidate
        .to_socket_addrs()
        .map_err(|err| format!("could not resolve {candidate}: {err}"))?
        .next()
        .ok_or_else(|| format!("{candidate} resolved to no addresses"))
}
