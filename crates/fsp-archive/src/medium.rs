/// Decoded contents of `EJ0/medium.dat`, the precondition check for a
/// retrieval run (spec §6).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MediumInfo {
    pub file_version: u16,
    pub device_id: u32,
    pub medium_number: u32,
    /// The device prefix; its absence (empty string) means the device was
    /// never fiscalized and retrieval must abort.
    pub device_prefix: String,
    pub first_document_number: u32,
    pub registration_number: String,
    pub tax_id: String,
    pub operating_mode: u16,
}

const MEDIUM_DAT_LEN: usize = 2 + 4 + 4 + 14 + 4 + 14 + 10 + 2;

/// Decodes the big-endian `medium.dat` struct (spec §6).
///
/// Returns `None` if `data` is shorter than the fixed struct length; the
/// caller (the orchestrator) turns that into a fatal [`crate::ArchiveError::Config`].
#[must_use]
pub fn parse_medium_dat(data: &[u8]) -> Option<MediumInfo> {
    if data.len() < MEDIUM_DAT_LEN {
        return None;
    }

    let mut offset = 0;
    let mut take = |len: usize| {
        let slice = &data[offset..offset + len];
        offset += len;
        slice
    };

    let file_version = u16::from_be_bytes(take(2).try_into().unwrap());
    let device_id = u32::from_be_bytes(take(4).try_into().unwrap());
    let medium_number = u32::from_be_bytes(take(4).try_into().unwrap());
    let device_prefix = ascii_trim_nul(take(14));
    let first_document_number = u32::from_be_bytes(take(4).try_into().unwrap());
    let registration_number = ascii_trim_nul(take(14));
    let tax_id = ascii_trim_nul(take(10));
    let operating_mode = u16::from_be_bytes(take(2).try_into().unwrap());

    Some(MediumInfo {
        file_version,
        device_id,
        medium_number,
        device_prefix,
        first_document_number,
        registration_number,
        tax_id,
        operating_mode,
    })
}

fn ascii_trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Looks up the printer model label for a `medium.dat` device id.
#[must_use]
pub fn device_model(device_id: u32) -> &'static str {
    match device_id {
        0x0000_0066 => "Thermal HD Online 2.01",
        0x0000_0067 => "Thermal XL2 Online 2.01",
        0x0000_0069 => "Trio Online 1.02",
        0x0000_006A => "Pospay Online 1.01",
        0x0000_006B => "Vero 2.01",
        0x0000_006C => "Thermal HX Online 1.01",
        0x0000_006D => "Thermal XL2 S Online 2.01",
        0x0000_006E => "Thermal HX S Online 1.01",
        0x0000_006F => "Evo 1.01",
        0x0000_0070 => "Thermal XL2 B 1.01",
        0x0000_0071 => "Thermal XL2 W 1.01",
        0x0000_0072 => "Fawag Box 1.01",
        0x0000_0073 => "Temo Online 2.01",
        0x0000_0074 => "Trio Online 2.01",
        0x0000_0075 => "Pospay Online 2.01",
        _ => "unknown model",
    }
}
