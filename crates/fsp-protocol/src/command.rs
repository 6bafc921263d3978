/// Session handshake / version exchange.
pub const CMD_HANDSHAKE: u8 = 0x10;
/// Server-only: the request failed, payload carries a NUL-terminated ASCII message.
pub const CMD_ERROR: u8 = 0x40;
/// Paginated directory listing.
pub const CMD_LIST_DIR: u8 = 0x41;
/// Positional file read.
pub const CMD_GET_FILE: u8 = 0x42;
/// Session teardown, fire-and-forget.
pub const CMD_FAREWELL: u8 = 0x4A;
/// Single-entry stat.
pub const CMD_STAT: u8 = 0x4D;
