//! Time primitives: field validation, weekday numbering, and molad units.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which field failed validation, for [`CalendarError::InvalidField`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    #[error("gregorian year")]
    GregorianYear,
    #[error("gregorian month")]
    GregorianMonth,
    #[error("gregorian day")]
    GregorianDay,
    #[error("hebrew year")]
    HebrewYear,
    #[error("hebrew month")]
    HebrewMonth,
    #[error("hebrew day")]
    HebrewDay,
    #[error("molad hour")]
    MoladHour,
    #[error("molad minute")]
    MoladMinute,
    #[error("molad chalakim")]
    MoladChalakim,
}

/// All failures are programmer errors: a field out of range, a Hebrew date
/// earlier than the epoch, or a non-positive arithmetic amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid {field}: {value}")]
    InvalidField { field: Field, value: i32 },
    #[error("date out of range: year {year} month {month} day {day} (before 18 Tevet 3761)")]
    DateOutOfRange { year: i32, month: u8, day: u8 },
    #[error("invalid arithmetic amount: {0} (must be >= 1)")]
    InvalidAmount(i32),
}

pub type Result<T> = std::result::Result<T, CalendarError>;

/// Sunday = 1 .. Saturday = 7, per the contract that `dayOfWeek` always
/// uses this numbering regardless of the platform's own convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    /// Derive from an absolute day number: `(absDay mod 7) + 1`, such that
    /// absolute day 1 (1 Jan year 1 Gregorian) is a Monday.
    pub fn from_abs_day(abs_day: i64) -> Self {
        match abs_day.rem_euclid(7) + 1 {
            1 => Weekday::Sunday,
            2 => Weekday::Monday,
            3 => Weekday::Tuesday,
            4 => Weekday::Wednesday,
            5 => Weekday::Thursday,
            6 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// A molad time-of-day triple: hours (0-23), minutes (0-59), chalakim (0-17).
/// 1 chalak = 1/1080 hour = 3⅓ seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoladTime {
    pub hours: u8,
    pub minutes: u8,
    pub chalakim: u8,
}

impl MoladTime {
    pub const ZERO: MoladTime = MoladTime {
        hours: 0,
        minutes: 0,
        chalakim: 0,
    };

    pub fn validate(self) -> Result<()> {
        if self.hours > 23 {
            return Err(CalendarError::InvalidField {
                field: Field::MoladHour,
                value: self.hours as i32,
            });
        }
        if self.minutes > 59 {
            return Err(CalendarError::InvalidField {
                field: Field::MoladMinute,
                value: self.minutes as i32,
            });
        }
        if self.chalakim > 17 {
            return Err(CalendarError::InvalidField {
                field: Field::MoladChalakim,
                value: self.chalakim as i32,
            });
        }
        Ok(())
    }

    /// Build from a chalakim-within-day residue `ch ∈ [0, 25920)`, per
    /// `setMoladFromChalakim`. Returns the time plus whether the whole date
    /// must be advanced by one day (molad hours start at 18:00 civil).
    pub fn from_chalakim_in_day(ch: i64) -> (MoladTime, bool) {
        let h = ch / CHALAKIM_PER_HOUR;
        let advance_day = h >= 6;
        let hours = ((h + 18) % 24) as u8;
        let remainder = ch - CHALAKIM_PER_HOUR * h;
        let minutes = (remainder / CHALAKIM_PER_MINUTE) as u8;
        let chalakim = (remainder - CHALAKIM_PER_MINUTE * minutes as i64) as u8;
        (
            MoladTime {
                hours,
                minutes,
                chalakim,
            },
            advance_day,
        )
    }
}

pub const CHALAKIM_PER_MINUTE: i64 = 18;
pub const CHALAKIM_PER_HOUR: i64 = 1080;
pub const CHALAKIM_PER_DAY: i64 = 25920;
pub const CHALAKIM_PER_LUNAR_MONTH: i64 = 765433;
pub const CHALAKIM_MOLAD_TOHU: i64 = 31524;
