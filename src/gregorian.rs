//! Gregorian absolute-date codec: (year, month, day) <-> absolute day number.
//!
//! Absolute day 1 = 1 January year 1. Leap rule: divisible by 4, except
//! centuries not divisible by 400.

use crate::primitives::{CalendarError, Field, Result};
use serde::{Deserialize, Serialize};

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A validated proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl GregorianDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        let date = GregorianDate { year, month, day };
        date.validate()?;
        Ok(date)
    }

    pub fn validate(self) -> Result<()> {
        if self.year < 1 {
            return Err(CalendarError::InvalidField {
                field: Field::GregorianYear,
                value: self.year,
            });
        }
        if !(1..=12).contains(&self.month) {
            return Err(CalendarError::InvalidField {
                field: Field::GregorianMonth,
                value: self.month as i32,
            });
        }
        let last = Self::days_in_month(self.year, self.month);
        if self.day < 1 || self.day > last {
            return Err(CalendarError::InvalidField {
                field: Field::GregorianDay,
                value: self.day as i32,
            });
        }
        Ok(())
    }

    pub fn is_leap_year(year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    pub fn days_in_month(year: i32, month: u8) -> u8 {
        if month == 2 && Self::is_leap_year(year) {
            29
        } else {
            DAYS_IN_MONTH[(month - 1) as usize]
        }
    }

    pub fn days_in_year(year: i32) -> u32 {
        if Self::is_leap_year(year) {
            366
        } else {
            365
        }
    }

    /// Days in complete years `1..year` (exclusive of `year` itself).
    fn days_before_year(year: i32) -> i64 {
        let y = (year - 1) as i64;
        365 * y + y / 4 - y / 100 + y / 400
    }

    /// Days in complete months `1..month` (exclusive) within `year`.
    fn days_before_month(year: i32, month: u8) -> i64 {
        (1..month).map(|m| Self::days_in_month(year, m) as i64).sum()
    }

    /// Absolute day number of 1 January of `year`.
    fn first_of_year(year: i32) -> i64 {
        Self::days_before_year(year) + 1
    }

    pub fn to_abs_day(self) -> i64 {
        Self::days_before_year(self.year) + Self::days_before_month(self.year, self.month) + self.day as i64
    }

    /// Approximate the year, then advance while the day falls past the
    /// following year's start; likewise for the month. Chosen over a closed
    /// form per spec: it stays correct across the whole proleptic range and
    /// matches the Hebrew codec's own approximate-then-correct structure.
    pub fn from_abs_day(abs_day: i64) -> Self {
        let mut year = (abs_day / 366).max(1) as i32;
        while abs_day >= Self::first_of_year(year + 1) {
            year += 1;
        }
        let mut month: u8 = 1;
        while abs_day > Self::first_of_year(year) - 1 + Self::days_before_month(year, month + 1) {
            month += 1;
            if month == 12 {
                break;
            }
        }
        let day = (abs_day - (Self::first_of_year(year) - 1 + Self::days_before_month(year, month))) as u8;
        GregorianDate { year, month, day }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_day_1_is_jan_1_year_1() {
        let d = GregorianDate::new(1, 1, 1).unwrap();
        assert_eq!(d.to_abs_day(), 1);
        assert_eq!(GregorianDate::from_abs_day(1), d);
    }

    #[test]
    fn leap_year_rule() {
        assert!(GregorianDate::is_leap_year(2000));
        assert!(!GregorianDate::is_leap_year(2100));
        assert!(GregorianDate::is_leap_year(2012));
        assert!(!GregorianDate::is_leap_year(2011));
    }

    #[test]
    fn days_in_gregorian_year() {
        assert_eq!(GregorianDate::days_in_year(2012), 366);
        assert_eq!(GregorianDate::days_in_year(2100), 365);
        assert_eq!(GregorianDate::days_in_year(2000), 366);
    }

    #[test]
    fn invalid_month_rejected() {
        assert!(GregorianDate::new(2024, 13, 1).is_err());
    }

    #[test]
    fn invalid_day_rejected() {
        assert!(GregorianDate::new(2023, 2, 29).is_err());
        assert!(GregorianDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn round_trip_sample_dates() {
        for (y, m, d) in [(1, 1, 1), (4, 2, 29), (100, 3, 1), (2024, 12, 31), (9999, 6, 15)] {
            let date = GregorianDate::new(y, m, d).unwrap();
            let abs = date.to_abs_day();
            assert_eq!(GregorianDate::from_abs_day(abs), date, "y={y} m={m} d={d}");
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn g_round_trip(year in 1i32..10000, month in 1u8..=12) {
            let day = GregorianDate::days_in_month(year, month);
            for d in [1u8, day] {
                let date = GregorianDate::new(year, month, d).unwrap();
                prop_assert_eq!(GregorianDate::from_abs_day(date.to_abs_day()), date);
            }
        }
    }
}
