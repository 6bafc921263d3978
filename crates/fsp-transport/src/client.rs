use std::net::{ToSocketAddrs, UdpSocket};
use std::time::Duration;

use fsp_protocol::{
    decode_response, encode_request, parse_directory_listing, parse_stat, DirEntry, StatInfo,
    CMD_ERROR, CMD_FAREWELL, CMD_GET_FILE, CMD_HANDSHAKE, CMD_LIST_DIR, CMD_STAT,
};
use tracing::{debug, info, warn};

use crate::error::FspError;
use crate::session::SessionState;

/// Maximum UDP datagram size a response can occupy (spec §6).
const MAX_DATAGRAM_LEN: usize = 65535;

/// Default receive timeout used by [`FspClient::connect`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default preferred directory-page size hint (spec §6: configuration surface).
pub const DEFAULT_PAGE_SIZE: u16 = 4096;

/// A single-threaded, stateful FSP client: one UDP socket, one session key,
/// one sequence counter.
///
/// No two operations may be in flight at once — every method takes `&mut
/// self` and completes its request/response round trip before returning,
/// matching the cooperative, strictly-serialized concurrency model (spec
/// §5). Driving multiple printers in parallel means owning one
/// [`FspClient`] per printer; there is no shared state between instances.
pub struct FspClient {
    socket: UdpSocket,
    session: SessionState,
}

impl FspClient {
    /// Connects to `addr` with the given receive timeout.
    ///
    /// This only sets up the local UDP socket; the session handshake is
    /// deferred to the first real operation (spec §4.2: "lazily triggers
    /// handshake").
    pub fn connect(addr: impl ToSocketAddrs, timeout: Duration) -> Result<Self, FspError> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(addr)?;
        socket.set_read_timeout(Some(timeout))?;
        Ok(Self {
            socket,
            session: SessionState::new(),
        })
    }

    /// Sends command `0x10` with an empty payload and marks the session
    /// initialized on any well-formed response.
    pub fn handshake(&mut self) -> Result<(), FspError> {
        self.request(CMD_HANDSHAKE, 0, &[])?;
        self.session.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&mut self) -> Result<(), FspError> {
        if !self.session.initialized {
            self.handshake()?;
        }
        Ok(())
    }

    /// Lists one page of `path` starting at entry `position`.
    ///
    /// Returns the parsed entries plus whether the listing's end-marker was
    /// reached (spec §4.1/§4.3); callers that need the whole directory
    /// repeat this with an advancing `position` until the flag is set or a
    /// page returns no entries.
    pub fn list_directory(
        &mut self,
        path: &str,
        position: u32,
        preferred_size: u16,
    ) -> Result<(Vec<DirEntry>, bool), FspError> {
        self.ensure_initialized()?;
        let mut payload = Vec::with_capacity(path.len() + 3);
        payload.extend_from_slice(path.as_bytes());
        payload.push(0);
        payload.extend_from_slice(&preferred_size.to_be_bytes());

        let response = self.request(CMD_LIST_DIR, position, &payload)?;
        Ok(parse_directory_listing(&response))
    }

    /// Reads up to one datagram's worth of `path` starting at byte `position`.
    ///
    /// A returned payload shorter than the caller's chosen segment size, or
    /// empty, signals EOF — the orchestrator, not this client, interprets
    /// that (spec §4.3).
    pub fn get_file(&mut self, path: &str, position: u32) -> Result<Vec<u8>, FspError> {
        self.ensure_initialized()?;
        let mut payload = Vec::with_capacity(path.len() + 1);
        payload.extend_from_slice(path.as_bytes());
        payload.push(0);

        self.request(CMD_GET_FILE, position, &payload)
    }

    /// Stats `path`, returning `None` if the server's reply is too short to
    /// contain a stat result (spec §4.1).
    pub fn stat(&mut self, path: &str) -> Result<Option<StatInfo>, FspError> {
        self.ensure_initialized()?;
        let mut payload = Vec::with_capacity(path.len() + 1);
        payload.extend_from_slice(path.as_bytes());
        payload.push(0);

        let response = self.request(CMD_STAT, 0, &payload)?;
        Ok(parse_stat(&response))
    }

    /// The server-issued session key currently in use, or `0` before the
    /// first response has been received.
    #[must_use]
    pub fn session_key(&self) -> u16 {
        self.session.key
    }

    /// The next sequence number this client will send.
    #[must_use]
    pub fn sequence(&self) -> u16 {
        self.session.sequence
    }

    /// Sends a fire-and-forget farewell (`0x4A`). Errors are logged and
    /// swallowed — tearing down a session is always best-effort.
    pub fn farewell(&mut self) {
        if let Err(err) = self.request(CMD_FAREWELL, 0, &[]) {
            debug!(error = %err, "farewell request failed, ignoring");
        }
    }

    /// Builds, sends, and decodes one request/response round trip.
    ///
    /// The sequence counter advances immediately after the packet is built,
    /// before the send is attempted, so a failed request still consumes a
    /// sequence number (spec §4.2).
    fn request(&mut self, command: u8, position: u32, payload: &[u8]) -> Result<Vec<u8>, FspError> {
        let sequence = self.session.take_sequence();
        let packet = encode_request(command, self.session.key, sequence, position, payload);

        self.socket.send(&packet)?;

        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        let received = self.socket.recv(&mut buf)?;
        let decoded = decode_response(&buf[..received])?;

        self.session.adopt_key(decoded.header.key);

        if decoded.header.command == CMD_ERROR {
            let message = String::from_utf8_lossy(decoded.payload)
                .trim_end_matches('\u{0}')
                .to_string();
            warn!(command, %message, "FSP server returned an error");
            return Err(FspError::Remote(message));
        }

        info!(
            command,
            sequence,
            key = self.session.key,
            bytes = decoded.payload.len(),
            "FSP request completed"
        );
        Ok(decoded.payload.to_vec())
    }
}

impl Drop for FspClient {
    fn drop(&mut self) {
        self.farewell();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Binds an ephemeral loopback server that runs `handler` once per
    /// request it receives, replying with whatever bytes `handler` returns.
    fn spawn_server(
        mut handler: impl FnMut(&[u8]) -> Vec<u8> + Send + 'static,
        requests: usize,
    ) -> (std::net::SocketAddr, thread::JoinHandle<()>) {
        let server = UdpSocket::bind("127.0.0.1:0").expect("bind server socket");
        let addr = server.local_addr().expect("local_addr");
        let handle = thread::spawn(move || {
            let mut buf = [0u8; MAX_DATAGRAM_LEN];
            for _ in 0..requests {
                let Ok((len, peer)) = server.recv_from(&mut buf) else {
                    return;
                };
                let response = handler(&buf[..len]);
                let _ = server.send_to(&response, peer);
            }
        });
        (addr, handle)
    }

    fn ok_response(key: u16, sequence: u16, payload: &[u8]) -> Vec<u8> {
        encode_request(0x10, key, sequence, 0, payload)
    }

    #[test]
    fn handshake_initializes_session_and_adopts_server_key() {
        let (addr, server) = spawn_server(
            move |request| {
                let decoded = decode_response(request).unwrap();
                ok_response(0xBEEF, decoded.header.sequence, &[])
            },
            1,
        );

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        client.handshake().unwrap();

        assert!(client.session.initialized);
        assert_eq!(client.session.key, 0xBEEF);
        assert_eq!(client.session.sequence, 1);
        server.join().unwrap();
    }

    #[test]
    fn list_directory_parses_entries_and_end_flag() {
        let (addr, server) = spawn_server(
            move |request| {
                let decoded = decode_response(request).unwrap();
                if decoded.header.command == CMD_HANDSHAKE {
                    return ok_response(0x0001, decoded.header.sequence, &[]);
                }
                let mut payload = Vec::new();
                payload.extend_from_slice(&0u32.to_be_bytes());
                payload.extend_from_slice(&0u32.to_be_bytes());
                payload.push(0x00); // end marker
                encode_request(CMD_LIST_DIR, 0x0001, decoded.header.sequence, 0, &payload)
            },
            2,
        );

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        let (entries, end_reached) = client.list_directory("EJ0/DOC", 0, DEFAULT_PAGE_SIZE).unwrap();
        assert!(entries.is_empty());
        assert!(end_reached);
        server.join().unwrap();
    }

    #[test]
    fn remote_error_command_surfaces_message() {
        let (addr, server) = spawn_server(
            move |request| {
                let decoded = decode_response(request).unwrap();
                if decoded.header.command == CMD_HANDSHAKE {
                    return ok_response(0x0001, decoded.header.sequence, &[]);
                }
                encode_request(CMD_ERROR, 0x0001, decoded.header.sequence, 0, b"no such file\0")
            },
            2,
        );

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        let err = client.get_file("EJ0/DOC/0/00/00/00000001.BIN", 0).unwrap_err();
        assert!(matches!(err, FspError::Remote(ref msg) if msg == "no such file"));
        server.join().unwrap();
    }

    #[test]
    fn stat_parses_the_response_payload() {
        let (addr, server) = spawn_server(
            move |request| {
                let decoded = decode_response(request).unwrap();
                if decoded.header.command == CMD_HANDSHAKE {
                    return ok_response(0x0001, decoded.header.sequence, &[]);
                }
                let mut payload = Vec::new();
                payload.extend_from_slice(&1_700_000_000u32.to_be_bytes());
                payload.extend_from_slice(&4096u32.to_be_bytes());
                payload.push(0x01); // file
                encode_request(0x4D, 0x0001, decoded.header.sequence, 0, &payload)
            },
            2,
        );

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        let stat = client
            .stat("EJ0/DOC/0/00/00/00000001.BIN")
            .unwrap()
            .expect("stat payload long enough to parse");
        assert_eq!(stat.timestamp, 1_700_000_000);
        assert_eq!(stat.size, 4096);
        server.join().unwrap();
    }

    #[test]
    fn session_accessors_reflect_handshake_state() {
        let (addr, server) = spawn_server(
            move |request| {
                let decoded = decode_response(request).unwrap();
                ok_response(0xBEEF, decoded.header.sequence, &[])
            },
            1,
        );

        let mut client = FspClient::connect(addr, Duration::from_millis(500)).unwrap();
        assert_eq!(client.session_key(), 0);
        assert_eq!(client.sequence(), 0);

        client.handshake().unwrap();

        assert_eq!(client.session_key(), 0xBEEF);
        assert_eq!(client.sequence(), 1);
        server.join().unwrap();
    }

    #[test]
    fn sequence_advances_even_on_timeout() {
        let client_socket = UdpSocket::bind("127.0.0.1:0").expect("bind");
        let addr = client_socket.local_addr().expect("local_addr");
        drop(client_socket);

        // Nothing is listening on `addr`, so the handshake request will be
        // sent but no response will ever arrive; recv() times out.
        let mut client = FspClient::connect(addr, Duration::from_millis(50)).unwrap();
        let err = client.handshake();
        assert!(err.is_err());
        assert_eq!(client.session.sequence, 1);
        assert!(!client.session.initialized);
    }
}
