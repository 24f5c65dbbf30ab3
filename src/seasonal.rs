//! Seasonal prayer-insert predicates and molad-derived time windows.
//!
//! Per the molad-as-instant resolution recorded in SPEC_FULL.md, the
//! molad is surfaced here as a structured, timezone-free instant rather
//! than a `chrono` `DateTime` tied to a timezone database: a Gregorian
//! date plus an hour/minute/second/millisecond and a fixed UTC offset
//! (Jerusalem standard time, no DST). Composing that into an actual
//! wall-clock instant is left to the caller, per spec.md's own framing of
//! external timezone conversion as a thin collaborator boundary.

use crate::gregorian::GregorianDate;
use crate::hebrew_date::{days_since_start_of_year, HebrewDate};
use crate::hebrew_year::{chalakim_since_molad_tohu, elapsed_days, HebrewMonth};
use crate::primitives::Weekday;
use serde::{Deserialize, Serialize};

/// Jerusalem standard time, year-round (no DST).
const JERUSALEM_UTC_OFFSET_SECONDS: i32 = 2 * 3600;

/// Har Habayis local-mean-time correction, in milliseconds: 20 minutes
/// 56.496 seconds, subtracted to move from the longitude of the Temple
/// Mount to the Jerusalem-standard meridian.
const HAR_HABAYIS_CORRECTION_MS: i64 = 1_256_496;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoladInstant {
    pub gregorian_date: GregorianDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub utc_offset_seconds: i32,
}

impl MoladInstant {
    fn time_of_day_ms(self) -> i64 {
        self.hour as i64 * 3_600_000 + self.minute as i64 * 60_000 + self.second as i64 * 1000 + self.millisecond as i64
    }

    /// Add a duration, in milliseconds, rolling the Gregorian date forward.
    fn plus_millis(self, millis: i64) -> Self {
        let total = self.time_of_day_ms() + millis;
        let day_delta = total.div_euclid(86_400_000);
        let rem = total.rem_euclid(86_400_000);
        let date = GregorianDate::from_abs_day(self.gregorian_date.to_abs_day() + day_delta);
        let hour = (rem / 3_600_000) as u8;
        let rem = rem % 3_600_000;
        let minute = (rem / 60_000) as u8;
        let rem = rem % 60_000;
        let second = (rem / 1000) as u8;
        let millisecond = (rem % 1000) as u16;
        MoladInstant {
            gregorian_date: date,
            hour,
            minute,
            second,
            millisecond,
            utc_offset_seconds: self.utc_offset_seconds,
        }
    }
}

/// The molad of `hebrew`'s (year, month) as a structured, timezone-free
/// instant: the molad triple's civil time combined with its Gregorian
/// date, corrected from Har Habayis local mean time to Jerusalem
/// standard time.
pub fn molad_instant(hebrew: HebrewDate) -> MoladInstant {
    use crate::date::JewishDate;

    let chalakim = chalakim_since_molad_tohu(hebrew.year, hebrew.month);
    let molad_date = JewishDate::from_molad_chalakim(chalakim);
    let t = molad_date.molad_time();

    let chalakim_seconds = t.chalakim as f64 * (10.0 / 3.0);
    let whole_seconds = chalakim_seconds as i64;
    let millis = ((chalakim_seconds - whole_seconds as f64) * 1000.0).round() as i64;

    let time_ms = (t.hours as i64 * 3600 + t.minutes as i64 * 60 + whole_seconds) * 1000 + millis;
    let corrected = time_ms - HAR_HABAYIS_CORRECTION_MS;
    let day_delta = corrected.div_euclid(86_400_000);
    let rem = corrected.rem_euclid(86_400_000);

    let hour = (rem / 3_600_000) as u8;
    let rem2 = rem % 3_600_000;
    let minute = (rem2 / 60_000) as u8;
    let rem3 = rem2 % 60_000;
    let second = (rem3 / 1000) as u8;
    let millisecond = (rem3 % 1000) as u16;

    MoladInstant {
        gregorian_date: GregorianDate::from_abs_day(molad_date.gregorian().to_abs_day() + day_delta),
        hour,
        minute,
        second,
        millisecond,
        utc_offset_seconds: JERUSALEM_UTC_OFFSET_SECONDS,
    }
}

pub fn tchilas_kidush_levana_3_days(hebrew: HebrewDate) -> MoladInstant {
    molad_instant(hebrew).plus_millis(72 * 3_600_000)
}

pub fn tchilas_kidush_levana_7_days(hebrew: HebrewDate) -> MoladInstant {
    molad_instant(hebrew).plus_millis(168 * 3_600_000)
}

pub fn sof_zman_kidush_levana_between_moldos(hebrew: HebrewDate) -> MoladInstant {
    molad_instant(hebrew).plus_millis((14 * 24 + 18) * 3_600_000 + 22 * 60_000 + 1_666)
}

pub fn sof_zman_kidush_levana_15_days(hebrew: HebrewDate) -> MoladInstant {
    molad_instant(hebrew).plus_millis(15 * 24 * 3_600_000)
}

/// Days elapsed since the Tekufat Tishrei of year 1, used to time the
/// start of Vesein Tal Umatar and Birkas Hachama.
pub fn tekufas_tishrei_elapsed_days(hebrew: HebrewDate) -> i64 {
    let days = elapsed_days(hebrew.year) as f64
        + (days_since_start_of_year(hebrew.year, hebrew.month, hebrew.day) - 1) as f64
        + 0.5;
    let solar = (hebrew.year - 1) as f64 * 365.25;
    (days - solar).floor() as i64
}

pub fn is_vesein_tal_umatar_start_date(hebrew: HebrewDate, weekday: Weekday, in_israel: bool) -> bool {
    if in_israel {
        return hebrew.month == HebrewMonth::Cheshvan && hebrew.day == 7;
    }
    if weekday == Weekday::Saturday {
        return false;
    }
    let tekufah = tekufas_tishrei_elapsed_days(hebrew);
    if weekday == Weekday::Sunday {
        tekufah == 47 || tekufah == 48
    } else {
        tekufah == 47
    }
}

pub fn is_vesein_tal_umatar_starting_tonight(hebrew: HebrewDate, weekday: Weekday, in_israel: bool) -> bool {
    if in_israel {
        return hebrew.month == HebrewMonth::Cheshvan && hebrew.day == 6;
    }
    if weekday == Weekday::Friday {
        return false;
    }
    let tekufah = tekufas_tishrei_elapsed_days(hebrew);
    if weekday == Weekday::Saturday {
        tekufah == 46 || tekufah == 47
    } else {
        tekufah == 46
    }
}

pub fn is_vesein_tal_umatar_recited(hebrew: HebrewDate, in_israel: bool) -> bool {
    if hebrew.month == HebrewMonth::Nisan && hebrew.day < 15 {
        return true;
    }
    if hebrew.month.number() < HebrewMonth::Cheshvan.number() {
        return false;
    }
    if in_israel {
        hebrew.month != HebrewMonth::Cheshvan || hebrew.day >= 7
    } else {
        tekufas_tishrei_elapsed_days(hebrew) >= 47
    }
}

pub fn is_vesein_beracha_recited(hebrew: HebrewDate, in_israel: bool) -> bool {
    !is_vesein_tal_umatar_recited(hebrew, in_israel)
}

pub fn is_mashiv_haruach_start_date(hebrew: HebrewDate) -> bool {
    hebrew.month == HebrewMonth::Tishrei && hebrew.day == 22
}

pub fn is_mashiv_haruach_end_date(hebrew: HebrewDate) -> bool {
    hebrew.month == HebrewMonth::Nisan && hebrew.day == 15
}

pub fn is_mashiv_haruach_recited(hebrew: HebrewDate) -> bool {
    let start = HebrewDate::new(hebrew.year, HebrewMonth::Tishrei, 22).unwrap();
    let end = HebrewDate::new(hebrew.year, HebrewMonth::Nisan, 15).unwrap();
    hebrew.to_abs_day() > start.to_abs_day() && hebrew.to_abs_day() < end.to_abs_day()
}

pub fn is_morid_hatal_recited(hebrew: HebrewDate) -> bool {
    !is_mashiv_haruach_recited(hebrew) || is_mashiv_haruach_start_date(hebrew) || is_mashiv_haruach_end_date(hebrew)
}

/// True once every 28 solar years, on the day the sun returns to the
/// point on its cycle it occupied at creation (Tekufat Nisan, Wednesday
/// evening).
pub fn is_birkas_hachamah(hebrew: HebrewDate) -> bool {
    let elapsed = elapsed_days(hebrew.year) + days_since_start_of_year(hebrew.year, hebrew.month, hebrew.day);
    let cycle_length = (28.0 * 365.25) as i64;
    elapsed.rem_euclid(cycle_length) == 172
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hebrew_year::HebrewMonth;

    #[test]
    fn scenario_molad_instant_matches_av_5778() {
        let hebrew = HebrewDate::new(5778, HebrewMonth::Av, 1).unwrap();
        let instant = molad_instant(hebrew);
        // Molad-time (6, 49, 8) in civil hours, minus the correction,
        // must still land within the same civil day.
        assert!(instant.hour < 24);
    }

    #[test]
    fn kiddush_levana_windows_are_ordered() {
        let hebrew = HebrewDate::new(5784, HebrewMonth::Tishrei, 1).unwrap();
        let tchilas3 = tchilas_kidush_levana_3_days(hebrew);
        let tchilas7 = tchilas_kidush_levana_7_days(hebrew);
        let sof_between = sof_zman_kidush_levana_between_moldos(hebrew);
        let sof15 = sof_zman_kidush_levana_15_days(hebrew);
        let order_key = |m: MoladInstant| (m.gregorian_date.to_abs_day(), m.hour, m.minute, m.second, m.millisecond);
        assert!(order_key(tchilas3) < order_key(tchilas7));
        assert!(order_key(tchilas7) < order_key(sof_between));
        assert!(order_key(sof_between) < order_key(sof15));
    }

    #[test]
    fn vesein_tal_umatar_recited_through_winter_in_israel() {
        let d = HebrewDate::new(5784, HebrewMonth::Kislev, 1).unwrap();
        assert!(is_vesein_tal_umatar_recited(d, true));
    }

    #[test]
    fn vesein_tal_umatar_not_recited_right_after_pesach() {
        let d = HebrewDate::new(5784, HebrewMonth::Nisan, 20).unwrap();
        assert!(!is_vesein_tal_umatar_recited(d, true));
        assert!(is_vesein_beracha_recited(d, true));
    }

    #[test]
    fn mashiv_haruach_window_excludes_endpoints() {
        let start = HebrewDate::new(5784, HebrewMonth::Tishrei, 22).unwrap();
        let end = HebrewDate::new(5784, HebrewMonth::Nisan, 15).unwrap();
        let mid = HebrewDate::new(5784, HebrewMonth::Tevet, 1).unwrap();
        assert!(!is_mashiv_haruach_recited(start));
        assert!(!is_mashiv_haruach_recited(end));
        assert!(is_mashiv_haruach_recited(mid));
        assert!(is_morid_hatal_recited(start));
        assert!(is_morid_hatal_recited(end));
        assert!(!is_morid_hatal_recited(mid));
    }

    #[test]
    fn birkas_hachamah_is_rare() {
        // Sanity: the predicate is well-defined and doesn't panic across a
        // wide year range; true on at most a handful of days per 28 years.
        let mut hits = 0;
        for year in 5700..5756 {
            let d = HebrewDate::new(year, HebrewMonth::Nisan, 1).unwrap();
            if is_birkas_hachamah(d) {
                hits += 1;
            }
        }
        assert!(hits <= 2);
    }
}
