//! Follower count abbreviation: `220430` -> `"220k"`, `1500000` -> `"1.5M"`.
//!
//! Below 100 units a single decimal is shown (dropped when the value is a
//! whole number of units); from 100 units up the value is rounded to a
//! whole number. Rounding is half-up on the exact integer value.

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;

/// Abbreviate `count` in units of `unit` with `suffix`.
fn abbreviate(count: u64, unit: u64, suffix: char) -> String {
    let (count, unit) = (u128::from(count), u128::from(unit));
    // Tenths of a unit, rounded half-up.
    let tenths = (count * 10 + unit / 2) / unit;
    if tenths >= 1000 {
        let whole = (count + unit / 2) / unit;
        format!("{whole}{suffix}")
    } else if count % unit == 0 {
        format!("{}{suffix}", count / unit)
    } else {
        format!("{}.{}{suffix}", tenths / 10, tenths % 10)
    }
}

/// Abbreviated form of a follower count.
pub fn format_count(count: u64) -> String {
    if count < THOUSAND {
        count.to_string()
    } else if count < MILLION {
        abbreviate(count, THOUSAND, 'k')
    } else {
        abbreviate(count, MILLION, 'M')
    }
}

/// Like [`format_count`], with an absent count formatting as `""`.
pub fn format_follower_count(count: Option<u64>) -> String {
    count.map(format_count).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_are_literal() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_count(1000), "1k");
        assert_eq!(format_count(1500), "1.5k");
        assert_eq!(format_count(1250), "1.3k");
        assert_eq!(format_count(12_340), "12.3k");
        assert_eq!(format_count(100_000), "100k");
        assert_eq!(format_count(220_430), "220k");
        assert_eq!(format_count(999_499), "999k");
    }

    #[test]
    fn values_rounding_up_to_a_hundred_drop_decimals() {
        assert_eq!(format_count(99_950), "100k");
        assert_eq!(format_count(99_940), "99.9k");
    }

    #[test]
    fn non_integral_values_keep_trailing_zero() {
        assert_eq!(format_count(1999), "2.0k");
    }

    #[test]
    fn millions() {
        assert_eq!(format_count(1_000_000), "1M");
        assert_eq!(format_count(1_500_000), "1.5M");
        assert_eq!(format_count(250_000_000), "250M");
    }

    #[test]
    fn absent_count_is_empty() {
        assert_eq!(format_follower_count(None), "");
        assert_eq!(format_follower_count(Some(42)), "42");
    }
}
