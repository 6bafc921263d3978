use chrono::{Duration, NaiveDate};

/// Renders a fiscal-epoch timestamp (seconds since 2000-01-01T00:00:00) as
/// an ISO-8601-style local-naive string, per spec §3.
///
/// This is distinct from the Unix-epoch timestamps used by directory
/// listings (spec §2 FSP-transport) and stat results — the two must never
/// be fed through the same conversion.
#[must_use]
pub fn ts_from_fiscal_epoch(seconds: u32) -> String {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("2000-01-01 is a valid calendar date")
        .and_hms_opt(0, 0, 0)
        .expect("00:00:00 is a valid time of day");
    let instant = base + Duration::seconds(i64::from(seconds));
    instant.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_epoch_zero_is_base_date() {
        assert_eq!(ts_from_fiscal_epoch(0), "2000-01-01T00:00:00");
    }

    #[test]
    fn scenario_one_day_advances_the_date() {
        assert_eq!(ts_from_fiscal_epoch(86400), "2000-01-02T00:00:00");
    }

    #[test]
    fn mid_day_offset_renders_time_of_day() {
        assert_eq!(ts_from_fiscal_epoch(3661), "2000-01-01T01:01:01");
    }

    #[test]
    fn large_offset_crosses_years() {
        // 2000 is a leap year, so day 366 (seconds = 365 * 86400) is
        // 2000-12-31, and one more day rolls into 2001.
        assert_eq!(ts_from_fiscal_epoch(365 * 86400), "2000-12-31T00:00:00");
        assert_eq!(ts_from_fiscal_epoch(366 * 86400), "2001-01-01T00:00:00");
    }
}
