/// Looks up a human-readable English name for a document record type.
///
/// Covers the full set of record types known to occur in electronic-journal
/// archives, not just the ones with a dedicated decoder in [`crate::types`] —
/// this is purely descriptive (for logs and diagnostics) and has no bearing
/// on how a record's body is parsed.
#[must_use]
pub fn record_type_name(record_type: u16) -> Option<&'static str> {
    let name = match record_type {
        0x0A => "Text line",
        0x20 => "Signature (RSA-512)",
        0x41 => "Footer",
        0x42 => "Daily report (ticketing)",
        0x44 => "Document header",
        0x46 => "Invoice information lines",
        0x47 => "Invoice taxpayer identifier",
        0x48 => "Print header",
        0x49 => "Graphics data",
        0x4A => "Invoice sale",
        0x4C => "Ticket sale",
        0x4D => "Ticket start",
        0x4E => "Ticket end",
        0x4F => "Receipt discount/surcharge",
        0x50 => "Promotion",
        0x51 => "Invoice advance payment",
        0x52 => "Invoice discount/surcharge",
        0x53 => "Text separator",
        0x54 => "Header text",
        0x55 => "Ticket relief",
        0x56 => "Advance payment",
        0x58 => "Additional footer lines",
        0x59 => "System number",
        0x5A => "Bitmap graphics",
        0x61 => "Sale line",
        0x62 => "Barcode",
        0x63 => "Packaging",
        0x64 => "Amount section",
        0x65 => "Section",
        0x69 => "Graphics reference",
        0x6A => "Payment",
        0x6B => "Change given",
        0x6C => "Footer information text",
        0x6D => "SHA digest",
        0x6E => "Discount/surcharge summary",
        0x70 => "Daily report",
        0x72 => "Currency conversion",
        0x73 => "Currency totals",
        0x74 => "Signature (RSA-2048)",
        0x75 => "Item discount/surcharge",
        0x76 => "VAT summary",
        0x78 => "Payment in foreign currency",
        0x79 => "Change in foreign currency",
        0x7A => "Unknown (device-reserved)",
        0x80 => "Event type",
        0x81 => "VAT rate change",
        0x82 => "Date/time change",
        0x83 => "Currency change",
        0x84 => "Server configuration change",
        0x85 => "Firmware change",
        0x86 => "Service mode",
        0x87 => "Protected memory marker",
        0x88 => "Service technician id",
        0x89 => "Update source",
        0x8A => "Public key",
        0x8B => "Point of sale",
        0x8C => "Schedule change",
        0x8D => "QR code change",
        0x8E => "Till public key",
        0x8F => "Certificate submission",
        0xA1 => "Cash method",
        0xA2 => "Self-billing",
        0xA3 => "Reverse charge",
        0xA4 => "Tax exemption",
        0xA5 => "Enforcement/collection",
        0xA6 => "Representative",
        0xA7 => "Transport",
        0xA8 => "Triangular transaction",
        0xA9 => "Tourism services",
        0xAA => "Other goods",
        0xB1 => "Buyer information",
        0xB2 => "Invoice summary",
        0xB3 => "Invoice number",
        0xB4 => "Invoice name",
        0xB5 => "Pre-goods section",
        0xB7 => "Previous document checksum",
        0xB8 => "Previous document JPK id",
        0xC0 => "JWS data",
        0xC1 => "Receipt verification code",
        0xC2 => "JPK data",
        0xC3 => "Receipt lottery data",
        0xD0 => "Graphics slot number",
        0xD1 => "Fiscalization report",
        0xE0 => "Ticket description",
        0xE1 => "Ticket route",
        0xE2 => "Ticket rate",
        0xE3 => "Passenger name",
        0xE4 => "Destination stop",
        0xE5 => "Transfer stop",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_resolve() {
        assert_eq!(record_type_name(0x44), Some("Document header"));
        assert_eq!(record_type_name(0x6D), Some("SHA digest"));
    }

    #[test]
    fn unknown_type_is_none() {
        assert_eq!(record_type_name(0xFFFF), None);
    }
}
