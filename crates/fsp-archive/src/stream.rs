use fsp_transport::FspClient;

use crate::error::ArchiveError;

/// Segment size used for positional file reads (spec §4.3 default).
pub const DEFAULT_SEGMENT_SIZE: u32 = 128;

/// Downloads `path` in full via repeated positional `get_file` reads.
///
/// EOF is detected when a read returns fewer bytes than `segment_size`, or
/// an empty payload — whichever comes first — at which point the
/// concatenated bytes are returned without issuing a further read.
pub fn read_file_full(
    client: &mut FspClient,
    path: &str,
    segment_size: u32,
) -> Result<Vec<u8>, ArchiveError> {
    let mut result = Vec::new();
    let mut position: u32 = 0;

    loop {
        let segment = client.get_file(path, position)?;
        if segment.is_empty() {
            break;
        }
        let segment_len = segment.len();
        result.extend_from_slice(&segment);
        if (segment_len as u32) < segment_size {
            break;
        }
        position += segment_len as u32;
    }

    Ok(result)
}
