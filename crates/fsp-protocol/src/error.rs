use thiserror::Error;

/// Errors surfaced by the FSP packet codec.
///
/// The codec is the strict layer of the system (spec §7): a response that is
/// too short to hold a header, or that declares more payload than the
/// datagram actually carries, fails outright rather than returning a partial
/// result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ProtocolError {
    /// The packet is shorter than the 12-byte FSP header.
    #[error("FSP packet too short: expected at least {expected} bytes, got {actual}")]
    Undersized {
        /// Minimum number of bytes a well-formed packet must contain.
        expected: usize,
        /// Number of bytes actually present.
        actual: usize,
    },
    /// The header's `data_length` field claims more bytes than are present
    /// after the header.
    #[error(
        "FSP packet declares data_length {data_length} but only {available} bytes follow the header"
    )]
    PayloadOverrun {
        /// `data_length` as declared in the header.
        data_length: u16,
        /// Bytes actually available after the header.
        available: usize,
    },
}
