//! Default value computation.
//!
//! Formerly environment-driven defaults, expressed as pure functions of
//! their inputs. They are computed fresh on every call and never persisted
//! as configuration.

use chrono::{Months, NaiveDate};

/// Display name derived from the name parts: `"{first} {last}"`.
#[must_use]
pub fn display_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

/// Home directory derived from the identity name: `"/home/{identity}"`.
#[must_use]
pub fn home_directory(identity: &str) -> String {
    format!("/home/{identity}")
}

/// Account expiry one year from the given day.
///
/// Month arithmetic clamps to the last day of the target month, so an
/// expiry computed on a leap day lands on February 28th.
#[must_use]
pub fn account_expiry(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("John", "Smith"), "John Smith");
    }

    #[test]
    fn test_home_directory() {
        assert_eq!(home_directory("jsmith"), "/home/jsmith");
    }

    #[test]
    fn test_account_expiry() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            account_expiry(today),
            NaiveDate::from_ymd_opt(2027, 3, 14).unwrap()
        );
    }

    #[test]
    fn test_account_expiry_clamps_leap_day() {
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            account_expiry(leap_day),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }
}
