//! Decodes fiscal-printer electronic-journal archives: a tagged-record
//! binary container is walked record by record and assembled into a
//! structured [`document::Document`] tree.
//!
//! The decoder is deliberately permissive. A short or truncated record body
//! yields a partial struct rather than an error — see [`types::parse_record`]
//! — so a caller inspecting an old or unusual firmware dump still gets
//! whatever fields the bytes actually support.

mod bcd;
mod cp1250;
mod cursor;
mod document;
mod epoch;
mod names;
mod record;
mod types;

pub use bcd::{bcd_to_decimal, bcd_to_int};
pub use cp1250::{decode_cp1250, decode_cp1250_trim_nul, extract_printable_strings};
pub use document::{assemble_document, Document, DocumentKind, Item, RawRecordSummary, Unknown};
pub use epoch::ts_from_fiscal_epoch;
pub use names::record_type_name;
pub use record::{RawRecord, RecordIter};
pub use types::{
    AmountSection, CurrencyTotals, DocumentFooter, DocumentHeader, HeaderText, Packaging,
    ParsedRecord, Payment, SaleLine, ShaDigest, Signature, Timestamp, UnknownRecord, parse_record,
};
