//! Hebrew year arithmetic: leap-year rule, molad-of-Tishrei elapsed days
//! (with the four dechiyot), year length, and Heshvan/Kislev classification.

use crate::primitives::{CHALAKIM_MOLAD_TOHU, CHALAKIM_PER_DAY, CHALAKIM_PER_LUNAR_MONTH};
use serde::{Deserialize, Serialize};

/// Hebrew month, numbered 1..13 starting at Nisan. `AdarII` exists only in
/// leap years; in non-leap years month 12 is "Adar" and 13 is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HebrewMonth {
    Nisan = 1,
    Iyar = 2,
    Sivan = 3,
    Tammuz = 4,
    Av = 5,
    Elul = 6,
    Tishrei = 7,
    Cheshvan = 8,
    Kislev = 9,
    Tevet = 10,
    Shevat = 11,
    Adar = 12,
    AdarII = 13,
}

impl HebrewMonth {
    pub fn from_number(n: u8) -> Option<Self> {
        use HebrewMonth::*;
        Some(match n {
            1 => Nisan,
            2 => Iyar,
            3 => Sivan,
            4 => Tammuz,
            5 => Av,
            6 => Elul,
            7 => Tishrei,
            8 => Cheshvan,
            9 => Kislev,
            10 => Tevet,
            11 => Shevat,
            12 => Adar,
            13 => AdarII,
            _ => return None,
        })
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Classification of a Hebrew year by Heshvan/Kislev length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kviah {
    /// Both Heshvan and Kislev are 29 days.
    Chaserim,
    /// Heshvan 29, Kislev 30.
    Kesidran,
    /// Both 30 days.
    Shelaimim,
}

/// `y` is leap iff `(7y + 1) mod 19 < 7` — positions 3,6,8,11,14,17,19 of
/// the 19-year Metonic cycle.
pub fn is_leap_year(year: i32) -> bool {
    (7i64 * year as i64 + 1).rem_euclid(19) < 7
}

pub fn last_month(year: i32) -> HebrewMonth {
    if is_leap_year(year) {
        HebrewMonth::AdarII
    } else {
        HebrewMonth::Adar
    }
}

/// Chalakim elapsed since Molad Tohu at the molad of (year, month).
pub fn chalakim_since_molad_tohu(year: i32, month: HebrewMonth) -> i64 {
    let (offset, cycle): (i64, i64) = if is_leap_year(year) { (6, 13) } else { (5, 12) };
    let month_of_year = (month.number() as i64 + offset).rem_euclid(cycle) + 1;
    let y = year as i64 - 1;
    let months_elapsed =
        235 * y.div_euclid(19) + 12 * y.rem_euclid(19) + (7 * y.rem_euclid(19) + 1).div_euclid(19) + (month_of_year - 1);
    CHALAKIM_MOLAD_TOHU + CHALAKIM_PER_LUNAR_MONTH * months_elapsed
}

/// Absolute day (from the Sunday before the epoch) of 1 Tishrei of `year`,
/// after applying the four dechiyot to the molad of Tishrei.
pub fn elapsed_days(year: i32) -> i64 {
    let chal = chalakim_since_molad_tohu(year, HebrewMonth::Tishrei);
    let molad_day = chal.div_euclid(CHALAKIM_PER_DAY);
    let molad_parts = chal - molad_day * CHALAKIM_PER_DAY;

    let mut rosh_hashana_day = molad_day;

    // Dechiya 1: Molad Zaken / Gatarad / Betutkafot.
    let is_leap = is_leap_year(year);
    let prev_is_leap = is_leap_year(year - 1);
    if molad_parts >= 19440
        || (molad_day.rem_euclid(7) == 2 && molad_parts >= 9924 && !is_leap)
        || (molad_day.rem_euclid(7) == 1 && molad_parts >= 16789 && prev_is_leap)
    {
        rosh_hashana_day += 1;
    }

    // Dechiya 2: Lo ADU Rosh — Rosh Hashana never on Sunday, Wednesday, Friday.
    if matches!(rosh_hashana_day.rem_euclid(7), 0 | 3 | 5) {
        rosh_hashana_day += 1;
    }

    rosh_hashana_day
}

pub fn days_in_year(year: i32) -> i64 {
    elapsed_days(year + 1) - elapsed_days(year)
}

pub fn is_heshvan_long(year: i32) -> bool {
    days_in_year(year).rem_euclid(10) == 5
}

pub fn is_kislev_short(year: i32) -> bool {
    days_in_year(year).rem_euclid(10) == 3
}

pub fn kviah(year: i32) -> Kviah {
    match days_in_year(year).rem_euclid(10) {
        3 => Kviah::Chaserim,
        5 => Kviah::Shelaimim,
        _ => Kviah::Kesidran,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_rule_positions() {
        for y in 1..=19 {
            let expect = matches!(y, 3 | 6 | 8 | 11 | 14 | 17 | 19);
            assert_eq!(is_leap_year(y), expect, "year {y}");
        }
    }

    #[test]
    fn known_leap_years() {
        assert!(is_leap_year(5771));
        assert!(!is_leap_year(5778));
    }

    #[test]
    fn molad_monotonic_within_year() {
        let a = chalakim_since_molad_tohu(5778, HebrewMonth::Av);
        let b = chalakim_since_molad_tohu(5778, HebrewMonth::Elul);
        assert_eq!(b - a, CHALAKIM_PER_LUNAR_MONTH);
    }

    #[test]
    fn rosh_hashana_never_on_sun_wed_fri() {
        for y in 5700..5900 {
            let day = elapsed_days(y).rem_euclid(7);
            assert!(!matches!(day, 0 | 3 | 5), "year {y} landed on forbidden day");
        }
    }

    #[test]
    fn year_length_is_one_of_six_values() {
        for y in 5700..5900 {
            let len = days_in_year(y);
            assert!(
                matches!(len, 353 | 354 | 355 | 383 | 384 | 385),
                "year {y} length {len}"
            );
        }
    }

    #[test]
    fn chalakim_at_molad_av_5778() {
        // Scenario 10: chalakimSinceMoladTohu(5778, Av) round-tripped gives
        // molad-time (6, 49, 8).
        let chal = chalakim_since_molad_tohu(5778, HebrewMonth::Av);
        let within_day = chal.rem_euclid(CHALAKIM_PER_DAY);
        let (t, _) = crate::primitives::MoladTime::from_chalakim_in_day(within_day);
        assert_eq!((t.hours, t.minutes, t.chalakim), (6, 49, 8));
    }
}
