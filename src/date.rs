//! Date facade: a value bundling the Gregorian triple, Hebrew triple,
//! absolute day, weekday, and molad-time, kept mutually consistent.
//!
//! Per the immutable-value resolution recorded in SPEC_FULL.md, this is a
//! plain value type: "setters" are functional updates that return a new
//! `JewishDate` rather than mutating in place.

use crate::gregorian::GregorianDate;
use crate::hebrew_date::{HebrewDate, EPOCH_OFFSET};
use crate::hebrew_year::chalakim_since_molad_tohu;
use crate::primitives::{MoladTime, Result, Weekday, CHALAKIM_PER_DAY};
use serde::{Deserialize, Serialize};

/// A fully-derived date: Gregorian triple, Hebrew triple, weekday, and a
/// molad-time that is either zero or the residue from a molad-chalakim
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JewishDate {
    abs_day: i64,
    gregorian: GregorianDate,
    hebrew: HebrewDate,
    weekday: Weekday,
    molad_time: MoladTime,
}

impl JewishDate {
    fn from_abs_day_with_molad(abs_day: i64, molad_time: MoladTime) -> Self {
        JewishDate {
            abs_day,
            gregorian: GregorianDate::from_abs_day(abs_day),
            hebrew: HebrewDate::from_abs_day(abs_day),
            weekday: Weekday::from_abs_day(abs_day),
            molad_time,
        }
    }

    /// Today, by the system wall clock and local time zone.
    pub fn now() -> Self {
        let today = chrono::Local::now().date_naive();
        use chrono::Datelike;
        let abs_day = GregorianDate {
            year: today.year(),
            month: today.month() as u8,
            day: today.day() as u8,
        }
        .to_abs_day();
        Self::from_abs_day_with_molad(abs_day, MoladTime::ZERO)
    }

    pub fn from_gregorian(gregorian: GregorianDate) -> Result<Self> {
        gregorian.validate()?;
        Ok(Self::from_abs_day_with_molad(gregorian.to_abs_day(), MoladTime::ZERO))
    }

    pub fn from_hebrew(hebrew: HebrewDate) -> Result<Self> {
        hebrew.validate()?;
        Ok(Self::from_abs_day_with_molad(hebrew.to_abs_day(), MoladTime::ZERO))
    }

    /// Same as [`Self::from_hebrew`] but keeps an explicit molad-time rather
    /// than resetting it to zero (the two-arg variant spec.md §4.E allows).
    pub fn from_hebrew_with_molad_time(hebrew: HebrewDate, molad_time: MoladTime) -> Result<Self> {
        hebrew.validate()?;
        molad_time.validate()?;
        Ok(Self::from_abs_day_with_molad(hebrew.to_abs_day(), molad_time))
    }

    /// Build from a wide chalakim-since-Molad-Tohu count.
    pub fn from_molad_chalakim(chalakim: i64) -> Self {
        let day_since_epoch = chalakim.div_euclid(CHALAKIM_PER_DAY);
        let within_day = chalakim - day_since_epoch * CHALAKIM_PER_DAY;
        let (molad_time, advance_day) = MoladTime::from_chalakim_in_day(within_day);
        let mut abs_day = day_since_epoch + EPOCH_OFFSET;
        if advance_day {
            abs_day += 1;
        }
        Self::from_abs_day_with_molad(abs_day, molad_time)
    }

    pub fn with_gregorian(self, gregorian: GregorianDate) -> Result<Self> {
        Self::from_gregorian(gregorian)
    }

    pub fn with_hebrew(self, hebrew: HebrewDate) -> Result<Self> {
        Self::from_hebrew(hebrew)
    }

    pub fn with_molad_time(self, molad_time: MoladTime) -> Result<Self> {
        molad_time.validate()?;
        Ok(JewishDate { molad_time, ..self })
    }

    /// The molad of the current (Hebrew year, Hebrew month), as a new date
    /// anchored at that molad instant.
    pub fn molad(self) -> Self {
        let chalakim = chalakim_since_molad_tohu(self.hebrew.year, self.hebrew.month);
        Self::from_molad_chalakim(chalakim)
    }

    pub fn abs_day(self) -> i64 {
        self.abs_day
    }

    pub fn gregorian(self) -> GregorianDate {
        self.gregorian
    }

    pub fn hebrew(self) -> HebrewDate {
        self.hebrew
    }

    pub fn weekday(self) -> Weekday {
        self.weekday
    }

    pub fn molad_time(self) -> MoladTime {
        self.molad_time
    }

    pub fn forward_days(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.forward_days(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn back_days(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.back_days(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn forward_months(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.forward_months(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn back_months(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.back_months(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn forward_years(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.forward_years(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn back_years(self, n: i32) -> Result<Self> {
        Ok(Self::from_abs_day_with_molad(
            self.hebrew.back_years(n)?.to_abs_day(),
            MoladTime::ZERO,
        ))
    }

    pub fn compare_to(self, other: Self) -> std::cmp::Ordering {
        self.abs_day.cmp(&other.abs_day)
    }
}

impl PartialOrd for JewishDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JewishDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.abs_day.cmp(&other.abs_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hebrew_year::HebrewMonth;

    #[test]
    fn scenario_1_jan_31_2011() {
        let g = GregorianDate::new(2011, 1, 31).unwrap();
        let date = JewishDate::from_gregorian(g).unwrap();
        assert_eq!(date.hebrew(), HebrewDate::new(5771, HebrewMonth::Shevat, 26).unwrap());
        assert_eq!(date.weekday(), Weekday::Monday);
    }

    #[test]
    fn scenario_4_molad_chalakim_av_5778() {
        let date = JewishDate::from_molad_chalakim(54700170003);
        assert_eq!(date.hebrew(), HebrewDate::new(5778, HebrewMonth::Av, 30).unwrap());
        assert_eq!(date.gregorian(), GregorianDate::new(2018, 8, 11).unwrap());
        let t = date.molad_time();
        assert_eq!((t.hours, t.minutes, t.chalakim), (19, 33, 9));
    }

    #[test]
    fn scenario_5_molad_chalakim_tishrei_5778() {
        let date = JewishDate::from_molad_chalakim(54692515673);
        assert_eq!(date.hebrew(), HebrewDate::new(5778, HebrewMonth::Tishrei, 30).unwrap());
        assert_eq!(date.gregorian(), GregorianDate::new(2017, 10, 20).unwrap());
        let t = date.molad_time();
        assert_eq!((t.hours, t.minutes, t.chalakim), (12, 12, 17));
    }

    #[test]
    fn setting_gregorian_resets_molad_time() {
        let date = JewishDate::from_molad_chalakim(54700170003);
        assert_ne!(date.molad_time(), MoladTime::ZERO);
        let updated = date.with_gregorian(GregorianDate::new(2020, 1, 1).unwrap()).unwrap();
        assert_eq!(updated.molad_time(), MoladTime::ZERO);
    }

    #[test]
    fn failed_setter_leaves_original_value_unchanged() {
        let date = JewishDate::from_gregorian(GregorianDate::new(2024, 1, 1).unwrap()).unwrap();
        let result = date.with_gregorian(GregorianDate {
            year: 2024,
            month: 2,
            day: 30,
        });
        assert!(result.is_err());
        // `date` itself is untouched: value semantics make partial mutation
        // impossible, so the original binding is still valid.
        assert_eq!(date.gregorian(), GregorianDate::new(2024, 1, 1).unwrap());
    }

    #[test]
    fn compare_to_orders_by_absolute_day() {
        let a = JewishDate::from_gregorian(GregorianDate::new(2024, 1, 1).unwrap()).unwrap();
        let b = JewishDate::from_gregorian(GregorianDate::new(2024, 6, 1).unwrap()).unwrap();
        assert!(a < b);
        assert_eq!(a.compare_to(a), std::cmp::Ordering::Equal);
    }

    #[test]
    fn molad_of_current_month_is_self_consistent() {
        let date = JewishDate::from_hebrew(HebrewDate::new(5778, HebrewMonth::Av, 1).unwrap()).unwrap();
        let molad = date.molad();
        let t = molad.molad_time();
        assert_eq!((t.hours, t.minutes, t.chalakim), (6, 49, 8));
    }
}
