use crate::error::ProtocolError;

/// Size of the fixed FSP header in bytes.
pub const HEADER_LEN: usize = 12;

/// Fields of a decoded FSP packet header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacketHeader {
    pub command: u8,
    pub checksum: u8,
    pub key: u16,
    pub sequence: u16,
    pub data_length: u16,
    pub position: u32,
}

/// A decoded packet: the header plus the two byte ranges that follow it.
///
/// `payload` is exactly `data_length` bytes; `extra` is whatever the
/// datagram carried beyond that, preserved opaquely (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedPacket<'a> {
    pub header: PacketHeader,
    pub payload: &'a [u8],
    pub extra: &'a [u8],
}

/// Computes the FSP additive checksum over `packet`.
///
/// Per spec §3: the initial accumulator is the total packet length, every
/// byte is summed in, the checksum byte itself (index 1) is treated as zero
/// regardless of what it actually holds, and the high byte of the sum is
/// folded back into the low byte once.
#[must_use]
pub fn compute_checksum(packet: &[u8]) -> u8 {
    let mut sum: u32 = packet.len() as u32;
    for (index, &byte) in packet.iter().enumerate() {
        if index != 1 {
            sum += u32::from(byte);
        }
    }
    ((sum + (sum >> 8)) & 0xFF) as u8
}

/// Reports whether `packet`'s stored checksum byte matches [`compute_checksum`].
///
/// The transport does not call this on responses — servers have been
/// observed to use a variant formula (spec §4.1) — but it is exposed for
/// callers that want an optional, non-rejecting diagnostic.
#[must_use]
pub fn verify_checksum(packet: &[u8]) -> bool {
    packet.len() >= HEADER_LEN && packet[1] == compute_checksum(packet)
}

/// Encodes an FSP request packet: header plus `payload`, checksum filled in.
#[must_use]
pub fn encode_request(command: u8, key: u16, sequence: u16, position: u32, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_LEN + payload.len());
    packet.push(command);
    packet.push(0); // checksum placeholder, filled in below
    packet.extend_from_slice(&key.to_be_bytes());
    packet.extend_from_slice(&sequence.to_be_bytes());
    #[allow(clippy::cast_possible_truncation)]
    let data_length = payload.len() as u16;
    packet.extend_from_slice(&data_length.to_be_bytes());
    packet.extend_from_slice(&position.to_be_bytes());
    packet.extend_from_slice(payload);

    let checksum = compute_checksum(&packet);
    packet[1] = checksum;
    packet
}

/// Decodes an FSP response packet.
///
/// Does not verify the checksum (see [`verify_checksum`]) and does not
/// reject on checksum mismatch — only undersized or overrunning packets are
/// rejected, per spec §4.1.
pub fn decode_response(packet: &[u8]) -> Result<DecodedPacket<'_>, ProtocolError> {
    if packet.len() < HEADER_LEN {
        return Err(ProtocolError::Undersized {
            expected: HEADER_LEN,
            actual: packet.len(),
        });
    }

    let command = packet[0];
    let checksum = packet[1];
    let key = u16::from_be_bytes([packet[2], packet[3]]);
    let sequence = u16::from_be_bytes([packet[4], packet[5]]);
    let data_length = u16::from_be_bytes([packet[6], packet[7]]);
    let position = u32::from_be_bytes([packet[8], packet[9], packet[10], packet[11]]);

    let available = packet.len() - HEADER_LEN;
    let data_length_usize = data_length as usize;
    if data_length_usize > available {
        return Err(ProtocolError::PayloadOverrun {
            data_length,
            available,
        });
    }

    let payload = &packet[HEADER_LEN..HEADER_LEN + data_length_usize];
    let extra = &packet[HEADER_LEN + data_length_usize..];

    Ok(DecodedPacket {
        header: PacketHeader {
            command,
            checksum,
            key,
            sequence,
            data_length,
            position,
        },
        payload,
        extra,
    })
}
