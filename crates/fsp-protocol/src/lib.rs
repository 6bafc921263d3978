//! Packet codec for the FSP file-service protocol (spec §4.1).
//!
//! Pure functions only: encoding a request, decoding a response, and parsing
//! the two payload shapes (directory listings, stat replies) that ride on
//! top of the generic 12-byte header. No sockets, no session state — that
//! lives in `fsp-transport`.

pub mod command;
pub mod directory;
pub mod error;
pub mod header;
pub mod stat;

pub use command::{CMD_ERROR, CMD_FAREWELL, CMD_GET_FILE, CMD_HANDSHAKE, CMD_LIST_DIR, CMD_STAT};
pub use directory::{parse_directory_listing, DirEntry, EntryKind};
pub use error::ProtocolError;
pub use header::{compute_checksum, decode_response, encode_request, verify_checksum, DecodedPacket, PacketHeader, HEADER_LEN};
pub use stat::{parse_stat, StatInfo};
