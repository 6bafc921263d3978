/// Decodes `bytes` as CP-1250 (Windows-1250), the encoding used by
/// printer-origin text fields (spec §3/§4.4, §9 "Polyglot text handling").
///
/// CP-1250 is a total single-byte encoding — every byte value maps to some
/// character — so this never fails; the UTF-8-replacement fallback the spec
/// mentions only matters for callers that skip straight to
/// [`extract_printable_strings`] on a body whose encoding is unknown.
#[must_use]
pub fn decode_cp1250(bytes: &[u8]) -> String {
    encoding_rs::WINDOWS_1250.decode(bytes).0.into_owned()
}

/// Decodes `bytes` as CP-1250, truncating at the first NUL byte.
///
/// Used for fixed-width text fields (names, descriptions) that are
/// NUL-padded rather than length-prefixed.
#[must_use]
pub fn decode_cp1250_trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    decode_cp1250(&bytes[..end])
}

/// Extracts runs of printable text of at least `min_len` characters from an
/// otherwise-uninterpreted body (spec §4.4 unknown-record fallback).
///
/// The body is decoded best-effort — CP-1250 first, and since that never
/// fails, the UTF-8-with-replacement path only triggers if a caller already
/// converted the bytes to UTF-8 upstream — then split into runs of word
/// characters, common punctuation, and Latin-1-and-above characters.
#[must_use]
pub fn extract_printable_strings(bytes: &[u8], min_len: usize) -> Vec<String> {
    let text = decode_cp1250(bytes);
    let mut runs = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if is_run_char(ch) {
            current.push(ch);
        } else if !current.is_empty() {
            push_run(&mut runs, &mut current, min_len);
        }
    }
    push_run(&mut runs, &mut current, min_len);

    runs
}

fn is_run_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || matches!(ch, '-' | '.' | '/' | ':' | ',' | '\\' | '(' | ')' | ' ' | '_')
        || (ch as u32) >= 0x80
}

fn push_run(runs: &mut Vec<String>, current: &mut String, min_len: usize) {
    let trimmed = current.trim_matches('\u{0}').trim();
    if trimmed.chars().count() >= min_len {
        runs.push(trimmed.to_string());
    }
    current.clear();
}
