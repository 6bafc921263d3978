use fsp_protocol::DirEntry;
use fsp_transport::FspClient;

use crate::error::ArchiveError;

/// Accumulates every entry in `path` across as many `list_directory` pages
/// as it takes to reach the end-marker (spec §4.3).
///
/// Stops when a page reports the end-marker, or when a page returns zero
/// entries (a defensive stop against a server that never sets the flag).
pub fn list_directory_full(
    client: &mut FspClient,
    path: &str,
    preferred_size: u16,
) -> Result<Vec<DirEntry>, ArchiveError> {
    let mut all_entries = Vec::new();
    let mut position: u32 = 0;

    loop {
        let (entries, end_reached) = client.list_directory(path, position, preferred_size)?;
        if entries.is_empty() {
            break;
        }
        position += entries.len() as u32;
        all_entries.extend(entries);
        if end_reached {
            break;
        }
    }

    Ok(all_entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsp_protocol::{decode_response, encode_request, CMD_HANDSHAKE};
    use std::net::UdpSocket;
    use std::thread;
    use std::time::Duration;

    fn encode_entries(count: u32, end_marker: bool) -> Vec<u8> {
        let mut payload = Vec::new();
        for i in 0..count {
            payload.extend_from_slice(&0u32.to_be_bytes()); // timestamp
            payload.extend_from_slice(&0u32.to_be_bytes()); // size
            payload.push(0x01); // type: file
            let name = format!("{i:08}.BIN\0");
            payload.extend_from_slice(name.as_bytes());
            while payload.len() % 4 != 0 {
                payload.push(0);
            }
        }
        if end_marker {
            payload.extend_from_slice(&0u32.to_be_bytes());
            payload.extend_from_slice(&0u32.to_be_bytes());
            payload.push(0x00);
            payload.extend_from_slice(&[0, 0, 0]);
        }
        payload
    }

    #[test]
    fn scenario_5_pagination_accumulates_across_exactly_two_calls() {
        let server = UdpSocket::bind("127.0.0.1:0").expect("bind");
        let addr = server.local_addr().expect("addr");
        let handle = thread::spawn(move || {
            let mut buf = [0u8; 65535];
            let mut calls = 0;
            for _ in 0..3 {
                let Ok((len, peer)) = server.recv_from(&mut buf) else {
                    return calls;
                };
                let decoded = decode_response(&buf[..len]).unwrap();
                if decoded.header.command == CMD_HANDSHAKE {
                    let reply = encode_request(CMD_HANDSHAKE, 1, decoded.header.sequence, 0, &[]);
                    let _ = server.send_to(&reply, peer);
                    continue;
                }
                calls += 1;
                let payload = if decoded.header.position == 0 {
                    encode_entries(100, false)
                } else {
                    encode_entries(17, true)
                };
                let reply = encode_request(0x41, 1, decoded.header.sequence, 0, &payload);
                let _ = server.send_to(&reply, peer);
            }
            calls
        });

        let mut client = fsp_transport::FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        let entries = list_directory_full(&mut client, "EJ0/DOC", 4096).unwrap();

        assert_eq!(entries.len(), 117);
        assert_eq!(handle.join().unwrap(), 2);
    }
}
