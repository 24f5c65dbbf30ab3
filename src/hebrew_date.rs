//! Hebrew date codec: (year, month, day) <-> absolute day number, and
//! forward/backward arithmetic in days, months, and years.

use crate::hebrew_year::{
    days_in_year as year_days, elapsed_days, is_heshvan_long, is_kislev_short, is_leap_year, last_month,
    HebrewMonth,
};
use crate::primitives::{CalendarError, Field, Result};
use serde::{Deserialize, Serialize};

/// Additive constant in `hebrewToAbs`, chosen so that
/// `HebrewDate::new(3761, Tevet, 18).to_abs_day() == 1` (1/1/1 Gregorian).
pub(crate) const EPOCH_OFFSET: i64 = -1373429;

/// A validated Hebrew (year, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HebrewDate {
    pub year: i32,
    pub month: HebrewMonth,
    pub day: u8,
}

/// Days in Hebrew month `m` of year `y`.
pub fn days_in_month(month: HebrewMonth, year: i32) -> u8 {
    use HebrewMonth::*;
    match month {
        Iyar | Tammuz | Elul | Tevet | AdarII => 29,
        Cheshvan if !is_heshvan_long(year) => 29,
        Kislev if is_kislev_short(year) => 29,
        Adar if !is_leap_year(year) => 29,
        _ => 30,
    }
}

/// Chronological month order within a single labeled Hebrew year: Tishrei
/// opens the year; Nisan..Elul fall near its end.
fn month_order(leap: bool) -> Vec<HebrewMonth> {
    use HebrewMonth::*;
    let mut months = vec![Tishrei, Cheshvan, Kislev, Tevet, Shevat, Adar];
    if leap {
        months.push(AdarII);
    }
    months.extend([Nisan, Iyar, Sivan, Tammuz, Av, Elul]);
    months
}

fn next_month_chrono(year: i32, month: HebrewMonth) -> (i32, HebrewMonth) {
    use HebrewMonth::*;
    match month {
        Elul => (year + 1, Tishrei),
        Adar if !is_leap_year(year) => (year, Nisan),
        AdarII => (year, Nisan),
        m => (year, HebrewMonth::from_number(m.number() + 1).unwrap()),
    }
}

fn prev_month_chrono(year: i32, month: HebrewMonth) -> (i32, HebrewMonth) {
    use HebrewMonth::*;
    match month {
        Tishrei => (year - 1, Elul),
        Nisan => (year, last_month(year)),
        m => (year, HebrewMonth::from_number(m.number() - 1).unwrap()),
    }
}

/// Days from 1 Tishrei of `year` through (year, month, day) inclusive.
pub fn days_since_start_of_year(year: i32, month: HebrewMonth, day: u8) -> i64 {
    let leap = is_leap_year(year);
    let order = month_order(leap);
    let idx = order.iter().position(|&m| m == month).expect("month belongs to this year's order");
    let prior: i64 = order[..idx].iter().map(|&m| days_in_month(m, year) as i64).sum();
    prior + day as i64
}

impl HebrewDate {
    pub fn new(year: i32, month: HebrewMonth, day: u8) -> Result<Self> {
        let date = HebrewDate { year, month, day };
        date.validate()?;
        Ok(date)
    }

    pub fn validate(self) -> Result<()> {
        if self.month == HebrewMonth::AdarII && !is_leap_year(self.year) {
            return Err(CalendarError::InvalidField {
                field: Field::HebrewMonth,
                value: self.month.number() as i32,
            });
        }
        let last = days_in_month(self.month, self.year);
        if self.day < 1 || self.day > last {
            return Err(CalendarError::InvalidField {
                field: Field::HebrewDay,
                value: self.day as i32,
            });
        }
        if self.to_abs_day() < 1 {
            return Err(CalendarError::DateOutOfRange {
                year: self.year,
                month: self.month.number(),
                day: self.day,
            });
        }
        Ok(())
    }

    pub fn to_abs_day(self) -> i64 {
        days_since_start_of_year(self.year, self.month, self.day) + elapsed_days(self.year) + EPOCH_OFFSET
    }

    fn abs_day_of(year: i32, month: HebrewMonth, day: u8) -> i64 {
        days_since_start_of_year(year, month, day) + elapsed_days(year) + EPOCH_OFFSET
    }

    /// Approximate the year, then the month, each by advancing while the
    /// absolute day falls past the next candidate's start — the same
    /// approximate-then-correct structure as the Gregorian codec.
    pub fn from_abs_day(abs_day: i64) -> Self {
        let mut year = ((abs_day - EPOCH_OFFSET) / 366).max(1) as i32;
        while abs_day >= Self::abs_day_of(year + 1, HebrewMonth::Tishrei, 1) {
            year += 1;
        }
        while abs_day < Self::abs_day_of(year, HebrewMonth::Tishrei, 1) {
            year -= 1;
        }

        let mut month = if abs_day < Self::abs_day_of(year, HebrewMonth::Nisan, 1) {
            HebrewMonth::Tishrei
        } else {
            HebrewMonth::Nisan
        };

        loop {
            let last_day = days_in_month(month, year);
            if abs_day > Self::abs_day_of(year, month, last_day) {
                let (y, m) = next_month_chrono(year, month);
                year = y;
                month = m;
            } else {
                break;
            }
        }

        let day = (abs_day - Self::abs_day_of(year, month, 1) + 1) as u8;
        HebrewDate { year, month, day }
    }

    /// Advance by `n >= 1` days.
    pub fn forward_days(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        let (mut year, mut month, mut day) = (self.year, self.month, self.day);
        for _ in 0..n {
            if day < days_in_month(month, year) {
                day += 1;
            } else {
                day = 1;
                let (y, m) = next_month_chrono(year, month);
                year = y;
                month = m;
            }
        }
        Ok(HebrewDate { year, month, day })
    }

    /// Go back by `n >= 1` days.
    pub fn back_days(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        let (mut year, mut month, mut day) = (self.year, self.month, self.day);
        for _ in 0..n {
            if day > 1 {
                day -= 1;
            } else {
                let (y, m) = prev_month_chrono(year, month);
                year = y;
                month = m;
                day = days_in_month(month, year);
            }
        }
        Ok(HebrewDate { year, month, day })
    }

    /// Advance by `n >= 1` months, clamping the day if the target month is
    /// shorter than the current day.
    pub fn forward_months(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        let (mut year, mut month) = (self.year, self.month);
        for _ in 0..n {
            let (y, m) = next_month_chrono(year, month);
            year = y;
            month = m;
        }
        let day = self.day.min(days_in_month(month, year));
        Ok(HebrewDate { year, month, day })
    }

    pub fn back_months(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        let (mut year, mut month) = (self.year, self.month);
        for _ in 0..n {
            let (y, m) = prev_month_chrono(year, month);
            year = y;
            month = m;
        }
        let day = self.day.min(days_in_month(month, year));
        Ok(HebrewDate { year, month, day })
    }

    /// Advance by `n >= 1` years, clamping the day and mapping `AdarII`
    /// onto `Adar` if the target year is not leap.
    pub fn forward_years(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        self.shift_years(n as i64)
    }

    pub fn back_years(self, n: i32) -> Result<Self> {
        if n < 1 {
            return Err(CalendarError::InvalidAmount(n));
        }
        self.shift_years(-(n as i64))
    }

    fn shift_years(self, delta: i64) -> Result<Self> {
        let year = (self.year as i64 + delta) as i32;
        let month = if self.month == HebrewMonth::AdarII && !is_leap_year(year) {
            HebrewMonth::Adar
        } else {
            self.month
        };
        let day = self.day.min(days_in_month(month, year));
        Ok(HebrewDate { year, month, day })
    }

    pub fn days_in_year(self) -> i64 {
        year_days(self.year)
    }

    pub fn days_in_month(self) -> u8 {
        days_in_month(self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HebrewMonth::*;

    #[test]
    fn epoch_round_trips_to_abs_1() {
        let d = HebrewDate::new(3761, Tevet, 18).unwrap();
        assert_eq!(d.to_abs_day(), 1);
        assert_eq!(HebrewDate::from_abs_day(1), d);
    }

    #[test]
    fn scenario_2_heshvan_8_6_5778() {
        let d = HebrewDate::new(5778, Cheshvan, 6).unwrap();
        let g = crate::gregorian::GregorianDate::from_abs_day(d.to_abs_day());
        assert_eq!(g, crate::gregorian::GregorianDate::new(2017, 10, 26).unwrap());
    }

    #[test]
    fn scenario_3_old_date() {
        let d = HebrewDate::new(5311, Tishrei, 11).unwrap();
        let g = crate::gregorian::GregorianDate::from_abs_day(d.to_abs_day());
        assert_eq!(g, crate::gregorian::GregorianDate::new(1550, 10, 1).unwrap());
    }

    #[test]
    fn scenario_7_adar_ii_forward_five_days() {
        let d = HebrewDate::new(5779, AdarII, 29).unwrap();
        let out = d.forward_days(5).unwrap();
        assert_eq!(out, HebrewDate::new(5779, Nisan, 5).unwrap());
    }

    #[test]
    fn scenario_8_elul_forward_505_days() {
        let d = HebrewDate::new(5778, Elul, 28).unwrap();
        let out = d.forward_days(505).unwrap();
        assert_eq!(out, HebrewDate::new(5780, Tevet, 29).unwrap());
    }

    #[test]
    fn forward_then_back_is_identity() {
        let d = HebrewDate::new(5784, Nisan, 10).unwrap();
        let out = d.forward_days(40).unwrap().back_days(40).unwrap();
        assert_eq!(out, d);
    }

    #[test]
    fn adar_ii_rejected_in_non_leap_year() {
        assert!(HebrewDate::new(5778, AdarII, 1).is_err());
    }

    #[test]
    fn before_epoch_rejected() {
        assert!(HebrewDate::new(3761, Tevet, 17).is_err());
    }

    #[test]
    fn invalid_amount_rejected() {
        let d = HebrewDate::new(5784, Nisan, 1).unwrap();
        assert!(d.forward_days(0).is_err());
        assert!(d.back_days(-1).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use HebrewMonth::*;

    fn valid_months(year: i32) -> Vec<HebrewMonth> {
        if is_leap_year(year) {
            vec![
                Nisan, Iyar, Sivan, Tammuz, Av, Elul, Tishrei, Cheshvan, Kislev, Tevet, Shevat, Adar, AdarII,
            ]
        } else {
            vec![
                Nisan, Iyar, Sivan, Tammuz, Av, Elul, Tishrei, Cheshvan, Kislev, Tevet, Shevat, Adar,
            ]
        }
    }

    proptest! {
        #[test]
        fn h_round_trip(year in 3761i32..10000, month_idx in 0usize..13) {
            let months = valid_months(year);
            let month = months[month_idx % months.len()];
            for day in [1u8, days_in_month(month, year)] {
                let date = HebrewDate::new(year, month, day).unwrap();
                prop_assert_eq!(HebrewDate::from_abs_day(date.to_abs_day()), date);
            }
        }

        #[test]
        fn cross_round_trip(abs in 1i64..3_000_000) {
            let date = HebrewDate::from_abs_day(abs);
            prop_assert_eq!(date.to_abs_day(), abs);
        }

        #[test]
        fn forward_back_inverse(year in 3761i32..9000, n in 1i32..400) {
            let date = HebrewDate::new(year, Tishrei, 1).unwrap();
            let out = date.forward_days(n).unwrap().back_days(n).unwrap();
            prop_assert_eq!(out, date);
        }
    }
}
