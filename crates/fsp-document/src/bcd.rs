use rust_decimal::Decimal;

/// Decodes packed-BCD bytes (high nibble = tens, low nibble = units per
/// byte) into an unsigned integer, per spec §3.
///
/// A `w`-byte field yields an integer of up to `2w` digits. Nibbles above
/// `9` (not valid decimal digits) are treated as `9` rather than panicking,
/// since the document decoder never raises on malformed bodies.
#[must_use]
pub fn bcd_to_int(bytes: &[u8]) -> u128 {
    let mut value: u128 = 0;
    for &byte in bytes {
        let hi = u128::from((byte >> 4).min(9));
        let lo = u128::from((byte & 0x0F).min(9));
        value = value.saturating_mul(100).saturating_add(hi * 10 + lo);
    }
    value
}

/// Decodes packed-BCD bytes into a [`Decimal`] with the given fractional
/// `precision` (number of digits after the decimal point).
///
/// Per spec §8: `bcd_to_decimal(b, p) * 10^p == bcd_to_int(b)` exactly when
/// the value fits, which [`Decimal::from_i128_with_scale`] guarantees since
/// it stores the integer mantissa and scale without any floating-point
/// rounding.
#[must_use]
pub fn bcd_to_decimal(bytes: &[u8], precision: u32) -> Decimal {
    let int_value = bcd_to_int(bytes);
    Decimal::from_i128_with_scale(int_value as i128, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scenario_3_bcd_price() {
        let decimal = bcd_to_decimal(&[0x00, 0x00, 0x00, 0x01, 0x23, 0x45], 2);
        assert_eq!(decimal, Decimal::new(12345, 2));
        assert_eq!(decimal.to_string(), "123.45");
    }

    #[test]
    fn max_six_byte_bcd_value() {
        let bytes = [0x99, 0x99, 0x99, 0x99, 0x99, 0x99];
        assert_eq!(bcd_to_int(&bytes), 999_999_999_999);
        assert_eq!(
            bcd_to_decimal(&bytes, 2),
            Decimal::new(999_999_999_999, 2)
        );
    }

    #[test]
    fn all_zero_bytes_yield_zero() {
        assert_eq!(bcd_to_int(&[0x00, 0x00]), 0);
    }

    proptest! {
        #[test]
        fn decimal_times_scale_matches_int(bytes in proptest::collection::vec(0u8..=99, 0..6), precision in 0u32..6) {
            // keep each byte a valid BCD pair (two digits 0-9 per nibble)
            let bytes: Vec<u8> = bytes
                .into_iter()
                .map(|b| ((b / 10) << 4) | (b % 10))
                .collect();
            let int_value = bcd_to_int(&bytes);
            let decimal = bcd_to_decimal(&bytes, precision);
            let scale = Decimal::from(10u64.pow(precision));
            prop_assert_eq!(decimal * scale, Decimal::from(int_value as u64));
        }
    }
}
