use crate::bcd::bcd_to_decimal;
use crate::cp1250::{decode_cp1250_trim_nul, extract_printable_strings};
use crate::cursor::Cursor;
use crate::epoch::ts_from_fiscal_epoch;
use rust_decimal::Decimal;

const MIN_STRING_LEN: usize = 4;
const HEX_PREFIX_LEN: usize = 48;
const SIG_HEX_PREFIX_LEN: usize = 16;

/// A fiscal-epoch timestamp paired with its rendered ISO-8601 form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Timestamp {
    pub seconds: u32,
    pub iso: String,
}

impl Timestamp {
    fn from_seconds(seconds: u32) -> Self {
        Self {
            iso: ts_from_fiscal_epoch(seconds),
            seconds,
        }
    }
}

fn ascii_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '\u{FFFD}' })
        .collect()
}

/// Record `0x0A`: a single line of printer output text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextLine {
    pub text: String,
}

fn parse_text_line(body: &[u8]) -> TextLine {
    let Some(&len) = body.first() else {
        return TextLine::default();
    };
    let end = usize::from(len).min(body.len().saturating_sub(1)) + 1;
    TextLine {
        text: decode_cp1250_trim_nul(&body[1..end]),
    }
}

/// Record `0x44`: the document header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DocumentHeader {
    pub doc_type: Option<u8>,
    pub timestamp: Option<Timestamp>,
    pub doc_number: Option<u32>,
    pub mode: Option<u8>,
    pub seller_tax_id: Option<String>,
    pub prefix: Option<String>,
    pub rest: Vec<u8>,
}

fn parse_header(body: &[u8]) -> DocumentHeader {
    let mut out = DocumentHeader::default();
    let mut cursor = Cursor::new(body);
    out.doc_type = cursor.take_u8();
    out.timestamp = cursor.take_u32().map(Timestamp::from_seconds);
    out.doc_number = cursor.take_u32();
    out.mode = cursor.take_u8();
    out.seller_tax_id = cursor.take(10).map(decode_cp1250_trim_nul);
    out.prefix = cursor.take(1).map(decode_cp1250_trim_nul);
    out.rest = cursor.remainder().to_vec();
    out
}

/// Record `0x41`: the document footer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DocumentFooter {
    pub doc_type: Option<u8>,
    pub mode: Option<u8>,
    pub status: Option<u8>,
    pub doc_number: Option<u32>,
    pub timestamp: Option<Timestamp>,
    pub unique_number: Option<String>,
    pub cashier_id: Option<String>,
    pub cashier_name: Option<String>,
    pub buyer_tax_id: Option<String>,
    pub rest: Vec<u8>,
}

fn parse_footer(body: &[u8]) -> DocumentFooter {
    let mut out = DocumentFooter::default();
    let mut cursor = Cursor::new(body);
    out.doc_type = cursor.take_u8();
    out.mode = cursor.take_u8();
    out.status = cursor.take_u8();
    out.doc_number = cursor.take_u32();
    out.timestamp = cursor.take_u32().map(Timestamp::from_seconds);
    out.unique_number = cursor.take(14).map(decode_cp1250_trim_nul);
    out.cashier_id = cursor.take(8).map(decode_cp1250_trim_nul);
    out.cashier_name = cursor.take(32).map(decode_cp1250_trim_nul);
    out.buyer_tax_id = cursor.take(30).map(decode_cp1250_trim_nul);
    out.rest = cursor.remainder().to_vec();
    out
}

/// Record `0x54`: a NUL-terminated header text, tagged by a 4-byte id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderText {
    pub id: Option<u32>,
    pub text: Option<String>,
}

fn parse_header_text(body: &[u8]) -> HeaderText {
    let mut cursor = Cursor::new(body);
    let id = cursor.take_u32();
    let text = (id.is_some() && cursor.remaining_len() > 0)
        .then(|| decode_cp1250_trim_nul(cursor.remainder()));
    HeaderText { id, text }
}

/// Record `0x61`: a sold item line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SaleLine {
    pub name: Option<String>,
    pub vat_symbol: Option<String>,
    pub price: Option<Decimal>,
    pub total: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub precision: Option<u8>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

fn parse_sale_line(body: &[u8]) -> SaleLine {
    let mut out = SaleLine::default();
    let mut cursor = Cursor::new(body);
    out.name = cursor.take(80).map(decode_cp1250_trim_nul);
    out.vat_symbol = cursor.take_u8().map(|b| {
        if (0x20..0x7F).contains(&b) {
            (b as char).to_string()
        } else {
            format!("{b:02X}")
        }
    });
    out.price = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.total = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.quantity = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.precision = cursor.take_u8();
    out.unit = cursor.take(4).map(decode_cp1250_trim_nul);
    out.description = cursor.take(50).map(decode_cp1250_trim_nul).or_else(|| {
        let rest = cursor.remainder();
        (!rest.is_empty()).then(|| decode_cp1250_trim_nul(rest))
    });
    out
}

/// Record `0x63`: a packaging (deposit) entry nested under an item.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Packaging {
    pub name: Option<String>,
    pub value: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub precision: Option<u8>,
    pub total: Option<Decimal>,
    pub sign: Option<u8>,
    pub kind: Option<u8>,
}

fn parse_packaging(body: &[u8]) -> Packaging {
    let mut out = Packaging::default();
    let mut cursor = Cursor::new(body);
    out.name = cursor.take(40).map(decode_cp1250_trim_nul);
    out.value = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    let qty_bytes = cursor.take(6);
    out.precision = cursor.take_u8();
    out.quantity = qty_bytes.map(|b| bcd_to_decimal(b, u32::from(out.precision.unwrap_or(2))));
    out.total = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.sign = cursor.take_u8();
    out.kind = cursor.take_u8();
    out
}

/// Record `0x64`: a labelled amount (tax, discount, rounding, ...).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AmountSection {
    pub section_type: Option<u8>,
    pub value: Option<Decimal>,
    pub currency: Option<String>,
    pub vat_id: Option<u8>,
}

fn parse_amount_section(body: &[u8]) -> AmountSection {
    let mut out = AmountSection::default();
    let mut cursor = Cursor::new(body);
    out.section_type = cursor.take_u8();
    out.value = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.currency = cursor.take(3).map(|b| ascii_text(b));
    out.vat_id = cursor.take_u8();
    out
}

/// Record `0x6A`: a payment (cash, card, voucher, ...).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payment {
    pub cash_flag: Option<u8>,
    pub payment_type: Option<u8>,
    pub amount: Option<Decimal>,
    pub name: Option<String>,
    pub currency: Option<String>,
}

fn parse_payment(body: &[u8]) -> Payment {
    let mut out = Payment::default();
    let mut cursor = Cursor::new(body);
    out.cash_flag = cursor.take_u8();
    out.payment_type = cursor.take_u8();
    out.amount = cursor.take(6).map(|b| bcd_to_decimal(b, 2));
    out.name = cursor.take(25).map(decode_cp1250_trim_nul);
    out.currency = cursor.take(3).map(|b| ascii_text(b));
    out
}

/// Record `0x6D`: the whole-document SHA digest.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShaDigest {
    pub hex: String,
}

fn parse_sha_digest(body: &[u8]) -> ShaDigest {
    let len = body.len().min(32);
    ShaDigest {
        hex: hex_string(&body[..len]),
    }
}

/// Record `0x73`: the per-currency running totals.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CurrencyTotals {
    pub values: Vec<Decimal>,
    pub currency: Option<String>,
    pub rest: Vec<u8>,
}

fn parse_currency_totals(body: &[u8]) -> CurrencyTotals {
    let mut out = CurrencyTotals::default();
    let mut cursor = Cursor::new(body);
    while cursor.remaining_len() >= 6 {
        out.values.push(bcd_to_decimal(cursor.take(6).unwrap(), 2));
    }
    out.currency = cursor.take(3).map(|b| ascii_text(b));
    out.rest = cursor.remainder().to_vec();
    out
}

/// Record `0x76`: the VAT-rate summary.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VatSummary {
    pub rates: Vec<u16>,
    pub numbers: Vec<Decimal>,
    pub currency: Option<String>,
}

fn parse_vat_summary(body: &[u8]) -> VatSummary {
    let mut out = VatSummary::default();
    let mut cursor = Cursor::new(body);
    if cursor.remaining_len() >= 14 * 2 {
        out.rates = (0..14).filter_map(|_| cursor.take_u16()).collect();
    }
    while cursor.remaining_len() >= 6 {
        out.numbers.push(bcd_to_decimal(cursor.take(6).unwrap(), 2));
    }
    out.currency = cursor.take(3).map(|b| ascii_text(b));
    out
}

/// Records `0x20` and `0x74`: a raw cryptographic signature, surfaced
/// without verification.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Signature {
    pub len: usize,
    pub hex_prefix: String,
}

fn parse_signature(body: &[u8]) -> Signature {
    let prefix_len = body.len().min(SIG_HEX_PREFIX_LEN);
    Signature {
        len: body.len(),
        hex_prefix: hex_string(&body[..prefix_len]),
    }
}

/// Fallback for any record type with no dedicated decoder.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnknownRecord {
    pub hex_prefix: String,
    pub strings: Vec<String>,
}

fn parse_unknown(body: &[u8]) -> UnknownRecord {
    let prefix_len = body.len().min(HEX_PREFIX_LEN);
    UnknownRecord {
        hex_prefix: hex_string(&body[..prefix_len]),
        strings: extract_printable_strings(body, MIN_STRING_LEN),
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// The result of interpreting one record body according to its type.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedRecord {
    TextLine(TextLine),
    Header(DocumentHeader),
    Footer(DocumentFooter),
    HeaderText(HeaderText),
    SaleLine(SaleLine),
    Packaging(Packaging),
    AmountSection(AmountSection),
    Payment(Payment),
    ShaDigest(ShaDigest),
    CurrencyTotals(CurrencyTotals),
    VatSummary(VatSummary),
    Signature(Signature),
    Unknown(UnknownRecord),
}

/// Dispatches a record's type byte to its decoder.
///
/// Every branch tolerates a short or empty `body`; there is no error path
/// here by design (spec'd as best-effort document decoding, unlike the
/// strict wire layer in `fsp-protocol`).
#[must_use]
pub fn parse_record(record_type: u16, body: &[u8]) -> ParsedRecord {
    match record_type {
        0x0A => ParsedRecord::TextLine(parse_text_line(body)),
        0x44 => ParsedRecord::Header(parse_header(body)),
        0x41 => ParsedRecord::Footer(parse_footer(body)),
        0x54 => ParsedRecord::HeaderText(parse_header_text(body)),
        0x61 => ParsedRecord::SaleLine(parse_sale_line(body)),
        0x63 => ParsedRecord::Packaging(parse_packaging(body)),
        0x64 => ParsedRecord::AmountSection(parse_amount_section(body)),
        0x6A => ParsedRecord::Payment(parse_payment(body)),
        0x6D => ParsedRecord::ShaDigest(parse_sha_digest(body)),
        0x73 => ParsedRecord::CurrencyTotals(parse_currency_totals(body)),
        0x76 => ParsedRecord::VatSummary(parse_vat_summary(body)),
        0x20 | 0x74 => ParsedRecord::Signature(parse_signature(body)),
        _ => ParsedRecord::Unknown(parse_unknown(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1_header_decode() {
        let mut body = Vec::new();
        body.push(0x01); // doc_type
        body.extend_from_slice(&3600u32.to_be_bytes()); // timestamp
        body.extend_from_slice(&42u32.to_be_bytes()); // doc_number
        body.push(0x00); // mode
        body.extend_from_slice(b"5260000000"); // seller_tax_id
        body.push(b'A'); // prefix

        let ParsedRecord::Header(header) = parse_record(0x44, &body) else {
            panic!("expected header");
        };
        assert_eq!(header.doc_type, Some(1));
        let ts = header.timestamp.unwrap();
        assert_eq!(ts.seconds, 3600);
        assert_eq!(ts.iso, "2000-01-01T01:00:00");
        assert_eq!(header.doc_number, Some(42));
        assert_eq!(header.mode, Some(0));
        assert_eq!(header.seller_tax_id.as_deref(), Some("5260000000"));
        assert_eq!(header.prefix.as_deref(), Some("A"));
    }

    #[test]
    fn scenario_2_line_record() {
        let body = [0x05u8, b'A', b'B', b'C', b'D', b'E'];
        let ParsedRecord::TextLine(line) = parse_record(0x0A, &body) else {
            panic!("expected text line");
        };
        assert_eq!(line.text, "ABCDE");
    }

    #[test]
    fn short_header_body_yields_partial_fields() {
        let body = [0x02u8];
        let ParsedRecord::Header(header) = parse_record(0x44, &body) else {
            panic!("expected header");
        };
        assert_eq!(header.doc_type, Some(2));
        assert!(header.timestamp.is_none());
        assert!(header.doc_number.is_none());
    }

    #[test]
    fn unknown_type_produces_hex_and_strings() {
        let mut body = vec![0x01, 0x02, 0x03];
        body.extend_from_slice(b"HELLO");
        let ParsedRecord::Unknown(unknown) = parse_record(0x7A, &body) else {
            panic!("expected unknown fallback");
        };
        assert_eq!(unknown.hex_prefix, hex_string(&body));
        assert_eq!(unknown.strings, vec!["HELLO".to_string()]);
    }

    #[test]
    fn signature_surfaces_length_and_prefix() {
        let body = vec![0xAAu8; 64];
        let ParsedRecord::Signature(sig) = parse_record(0x20, &body) else {
            panic!("expected signature");
        };
        assert_eq!(sig.len, 64);
        assert_eq!(sig.hex_prefix.len(), 32);
    }

    #[test]
    fn currency_totals_reads_until_short_remainder() {
        let mut body = Vec::new();
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x23, 0x45]);
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x50, 0x00]);
        body.extend_from_slice(b"PLN");
        let ParsedRecord::CurrencyTotals(totals) = parse_record(0x73, &body) else {
            panic!("expected currency totals");
        };
        assert_eq!(totals.values.len(), 2);
        assert_eq!(totals.values[0], Decimal::new(12345, 2));
        assert_eq!(totals.currency.as_deref(), Some("PLN"));
    }
}
