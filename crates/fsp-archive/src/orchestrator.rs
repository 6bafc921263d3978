use fsp_transport::FspClient;
use tracing::info;

use crate::cancel::CancellationToken;
use crate::config::RetrievalConfig;
use crate::error::ArchiveError;
use crate::medium::{self, MediumInfo};
use crate::stats::RetrievalStats;
use crate::stream::read_file_full;
use crate::walk;

/// Runs one full retrieval: reads and validates `medium.dat`, then walks the
/// archive's `DOC/` subtree saving every document file it finds (spec §6).
///
/// A missing, truncated, or unfiscalized `medium.dat` (empty device prefix)
/// is fatal and returned as [`ArchiveError::Config`] before anything is
/// listed or downloaded. Everything else — a failed single-file read, a
/// failed save — is logged and does not abort the run; only a transport or
/// protocol failure on the directory/file calls themselves propagates.
pub fn retrieve(
    client: &mut FspClient,
    config: &RetrievalConfig,
    cancel: &CancellationToken,
) -> Result<(MediumInfo, RetrievalStats), ArchiveError> {
    let medium_info = read_medium_info(client, config)?;
    info!(
        device_id = medium_info.device_id,
        model = medium::device_model(medium_info.device_id),
        prefix = %medium_info.device_prefix,
        "validated medium.dat"
    );

    let stats = walk::retrieve_recursive(client, config, cancel, &medium_info.device_prefix)?;

    info!(
        found = stats.found,
        skipped = stats.skipped,
        saved = stats.saved,
        "retrieval run complete"
    );

    Ok((medium_info, stats))
}

fn read_medium_info(
    client: &mut FspClient,
    config: &RetrievalConfig,
) -> Result<MediumInfo, ArchiveError> {
    let bytes = read_file_full(client, &config.medium_dat_path(), config.segment_size)?;
    let info = medium::parse_medium_dat(&bytes).ok_or_else(|| {
        ArchiveError::Config(format!(
            "{} is missing or too short to be a valid medium.dat",
            config.medium_dat_path()
        ))
    })?;

    if info.device_prefix.is_empty() {
        return Err(ArchiveError::Config(
            "medium.dat has no device prefix; device is not fiscalized".to_string(),
        ));
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsp_protocol::{decode_response, encode_request, CMD_HANDSHAKE};
    use std::net::UdpSocket;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_medium_dat(prefix: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&0x0000_006Au32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        let mut padded_prefix = prefix.to_vec();
        padded_prefix.resize(14, 0);
        data.extend_from_slice(&padded_prefix);
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&[0u8; 14]);
        data.extend_from_slice(&[0u8; 10]);
        data.extend_from_slice(&0u16.to_be_bytes());
        data
    }

    #[test]
    fn empty_device_prefix_aborts_before_any_listing() {
        let medium_dat = sample_medium_dat(b"");
        let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
        let addr = server.local_addr().expect("addr");
        let handle = thread::spawn(move || {
            let mut buf = [0u8; 65535];
            for _ in 0..2 {
                let Ok((len, peer)) = server.recv_from(&mut buf) else {
                    return;
                };
                let decoded = decode_response(&buf[..len]).unwrap();
                if decoded.header.command == CMD_HANDSHAKE {
                    let reply =
                        encode_request(CMD_HANDSHAKE, 1, decoded.header.sequence, 0, &[]);
                    let _ = server.send_to(&reply, peer);
                    continue;
                }
                let reply =
                    encode_request(0x42, 1, decoded.header.sequence, decoded.header.position, &medium_dat);
                let _ = server.send_to(&reply, peer);
            }
        });

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        let storage_root = tempdir().expect("tempdir");
        let config = RetrievalConfig::new("loc-1", storage_root.path());
        let cancel = CancellationToken::new();

        let err = retrieve(&mut client, &config, &cancel).expect_err("must abort");
        assert!(matches!(err, ArchiveError::Config(_)));

        handle.join().unwrap();
    }
}
