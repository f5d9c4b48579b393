//! Calendar helpers without a timezone dependency.

use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: u64 = 86_400;

/// Current UTC year, for the footer copyright line.
pub fn current_year() -> i64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    year_from_days((secs / SECS_PER_DAY) as i64)
}

/// Gregorian year containing `days` since 1970-01-01.
///
/// Uses the era-based civil-from-days conversion (400-year cycles of 146097 days).
fn year_from_days(days: i64) -> i64 {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400;
    if month <= 2 { year + 1 } else { year }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_days() {
        assert_eq!(year_from_days(0), 1970);
        assert_eq!(year_from_days(364), 1970);
        assert_eq!(year_from_days(365), 1971);
        // 2000-02-29
        assert_eq!(year_from_days(11_016), 2000);
        // 2024-12-31 and 2025-01-01
        assert_eq!(year_from_days(20_088), 2024);
        assert_eq!(year_from_days(20_089), 2025);
        assert_eq!(year_from_days(-1), 1969);
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
