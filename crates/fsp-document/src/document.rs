use crate::record::RecordIter;
use crate::types::{
    AmountSection, CurrencyTotals, DocumentFooter, DocumentHeader, Packaging, ParsedRecord,
    Payment, SaleLine, Signature, VatSummary, parse_record,
};

/// The `doc_type` byte carried in a `0x44` header record, as catalogued by
/// the printer firmware's document classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind {
    Plain,
    Receipt,
    Invoice,
    DailyReport,
    FiscalReport,
    Other(u8),
}

impl DocumentKind {
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Plain,
            0x01 => Self::Receipt,
            0x02 => Self::Invoice,
            0x03 => Self::DailyReport,
            0x04 => Self::FiscalReport,
            other => Self::Other(other),
        }
    }
}

/// A sale line together with the packaging and value entries nested under
/// it, in the order they were encountered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    pub sale: SaleLine,
    pub packaging: Vec<Packaging>,
    pub values: Vec<AmountSection>,
}

/// A record the assembly rules don't assign a dedicated document slot to:
/// either a genuinely unrecognized type, or a recognized-but-unplaced one
/// (header text, `0x54`, has a dedicated decoder in [`crate::types`] but no
/// slot in [`Document`] per spec, so it lands here too rather than being
/// dropped). Kept for completeness alongside [`Document::raw_records`].
#[derive(Clone, Debug, PartialEq)]
pub struct Unknown {
    pub record_type: u16,
    pub parsed: ParsedRecord,
}

/// The `(type, size)` of every record encountered, in stream order, for
/// auditing a decode against the original byte stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawRecordSummary {
    pub record_type: u16,
    pub size: u16,
}

/// The fully assembled document tree produced by [`assemble_document`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub header: Option<DocumentHeader>,
    pub lines: Vec<String>,
    pub items: Vec<Item>,
    /// Packaging entries encountered before any item.
    pub packaging: Vec<Packaging>,
    /// Value entries encountered before any item.
    pub values: Vec<AmountSection>,
    pub payments: Vec<Payment>,
    pub vat_summary: Option<VatSummary>,
    pub totals: Option<CurrencyTotals>,
    pub footer: Option<DocumentFooter>,
    pub sha: Option<String>,
    pub signatures: Vec<Signature>,
    pub unknowns: Vec<Unknown>,
    pub raw_records: Vec<RawRecordSummary>,
}

impl Document {
    /// The `doc_type` carried by this document's header record, if any,
    /// classified through [`DocumentKind::from_byte`].
    #[must_use]
    pub fn kind(&self) -> Option<DocumentKind> {
        self.header
            .as_ref()
            .and_then(|header| header.doc_type)
            .map(DocumentKind::from_byte)
    }
}

/// Walks `data` once, assembling every record into a [`Document`] tree.
///
/// Mirrors the per-record assembly rules: a `0x61` opens a new [`Item`] and
/// becomes the target for subsequent `0x63`/`0x64` records until the next
/// `0x61` (or the stream ends); before the first item, those records
/// accumulate at the document level instead. `0x76`/`0x73`/`0x44`/`0x41` each
/// overwrite the prior value of their slot (last one wins) rather than
/// accumulating.
#[must_use]
pub fn assemble_document(data: &[u8]) -> Document {
    let mut doc = Document::default();
    let mut current_item: Option<Item> = None;

    for raw in RecordIter::new(data) {
        doc.raw_records.push(RawRecordSummary {
            record_type: raw.record_type,
            size: raw.size,
        });

        match parse_record(raw.record_type, raw.body) {
            ParsedRecord::Header(header) => doc.header = Some(header),
            ParsedRecord::TextLine(line) => doc.lines.push(line.text),
            ParsedRecord::SaleLine(sale) => {
                if let Some(item) = current_item.take() {
                    doc.items.push(item);
                }
                current_item = Some(Item {
                    sale,
                    ..Item::default()
                });
            }
            ParsedRecord::Packaging(packaging) => match &mut current_item {
                Some(item) => item.packaging.push(packaging),
                None => doc.packaging.push(packaging),
            },
            ParsedRecord::AmountSection(amount) => match &mut current_item {
                Some(item) => item.values.push(amount),
                None => doc.values.push(amount),
            },
            ParsedRecord::Payment(payment) => doc.payments.push(payment),
            ParsedRecord::VatSummary(vat) => doc.vat_summary = Some(vat),
            ParsedRecord::CurrencyTotals(totals) => doc.totals = Some(totals),
            ParsedRecord::Footer(footer) => doc.footer = Some(footer),
            ParsedRecord::ShaDigest(sha) => doc.sha = Some(sha.hex),
            ParsedRecord::Signature(signature) => doc.signatures.push(signature),
            unplaced @ (ParsedRecord::HeaderText(_) | ParsedRecord::Unknown(_)) => {
                doc.unknowns.push(Unknown {
                    record_type: raw.record_type,
                    parsed: unplaced,
                });
            }
        }
    }

    if let Some(item) = current_item.take() {
        doc.items.push(item);
    }

    doc
}
