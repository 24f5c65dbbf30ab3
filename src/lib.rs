//! A calendrical engine for the Hebrew (Jewish) calendar: bidirectional
//! conversion with the proleptic Gregorian calendar, molad arithmetic,
//! and the holiday/parsha/seasonal-insert predicates that ride on top.
//!
//! The crate is purely computational — no I/O, no locking, no background
//! work. Every type is value-semantic; arithmetic and setters return new
//! values rather than mutating in place.

pub mod date;
pub mod gregorian;
pub mod hebrew_date;
pub mod hebrew_year;
pub mod holidays;
pub mod parsha;
pub mod primitives;
pub mod seasonal;

pub use date::JewishDate;
pub use gregorian::GregorianDate;
pub use hebrew_date::HebrewDate;
pub use hebrew_year::{HebrewMonth, Kviah};
pub use holidays::Holiday;
pub use parsha::Parsha;
pub use primitives::{CalendarError, Field, MoladTime, Result, Weekday};
pub use seasonal::MoladInstant;

use holidays::HolidayContext;

/// Wraps a [`JewishDate`] with the two flags that the holiday, parsha,
/// and seasonal-insert predicates need: whether the observer is in
/// Israel, and whether the State-of-Israel-era holidays are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HebrewCalendar {
    date: JewishDate,
    in_israel: bool,
    use_modern_holidays: bool,
}

impl HebrewCalendar {
    pub fn new(date: JewishDate, in_israel: bool, use_modern_holidays: bool) -> Self {
        HebrewCalendar {
            date,
            in_israel,
            use_modern_holidays,
        }
    }

    pub fn date(self) -> JewishDate {
        self.date
    }

    pub fn in_israel(self) -> bool {
        self.in_israel
    }

    pub fn use_modern_holidays(self) -> bool {
        self.use_modern_holidays
    }

    pub fn with_date(self, date: JewishDate) -> Self {
        HebrewCalendar { date, ..self }
    }

    fn holiday_context(self) -> HolidayContext {
        HolidayContext::new(self.date.hebrew(), self.date.weekday(), self.in_israel, self.use_modern_holidays)
    }

    pub fn is_leap_year(self) -> bool {
        hebrew_year::is_leap_year(self.date.hebrew().year)
    }

    pub fn is_heshvan_long(self) -> bool {
        hebrew_year::is_heshvan_long(self.date.hebrew().year)
    }

    pub fn is_kislev_short(self) -> bool {
        hebrew_year::is_kislev_short(self.date.hebrew().year)
    }

    pub fn kviah(self) -> Kviah {
        hebrew_year::kviah(self.date.hebrew().year)
    }

    pub fn holiday(self) -> Option<Holiday> {
        self.holiday_context().holiday()
    }

    pub fn is_yom_tov(self) -> bool {
        self.holiday_context().is_yom_tov()
    }

    pub fn is_yom_tov_assur_bemelacha(self) -> bool {
        self.holiday_context().is_yom_tov_assur_bemelacha()
    }

    pub fn is_assur_bemelacha(self) -> bool {
        self.holiday_context().is_assur_bemelacha()
    }

    pub fn is_erev_yom_tov(self) -> bool {
        self.holiday_context().is_erev_yom_tov()
    }

    pub fn is_erev_yom_tov_sheni(self) -> bool {
        self.holiday_context().is_erev_yom_tov_sheni()
    }

    pub fn has_candle_lighting(self) -> bool {
        self.holiday_context().has_candle_lighting()
    }

    pub fn is_chol_hamoed(self) -> bool {
        self.holiday_context().is_chol_hamoed()
    }

    pub fn is_chol_hamoed_pesach(self) -> bool {
        self.holiday_context().is_chol_hamoed_pesach()
    }

    pub fn is_chol_hamoed_succos(self) -> bool {
        self.holiday_context().is_chol_hamoed_succos()
    }

    pub fn is_taanis(self) -> bool {
        self.holiday_context().is_taanis()
    }

    pub fn is_taanis_bechoros(self) -> bool {
        self.holiday_context().is_taanis_bechoros()
    }

    pub fn is_rosh_chodesh(self) -> bool {
        self.holiday_context().is_rosh_chodesh()
    }

    pub fn is_machar_chodesh(self) -> bool {
        self.holiday_context().is_machar_chodesh()
    }

    pub fn is_erev_rosh_chodesh(self) -> bool {
        self.holiday_context().is_erev_rosh_chodesh()
    }

    pub fn is_shabbos_mevorchim(self) -> bool {
        self.holiday_context().is_shabbos_mevorchim()
    }

    pub fn is_yom_kippur_katan(self) -> bool {
        self.holiday_context().is_yom_kippur_katan()
    }

    pub fn is_be_hab(self) -> bool {
        self.holiday_context().is_be_hab()
    }

    pub fn is_aseres_yemei_teshuva(self) -> bool {
        self.holiday_context().is_aseres_yemei_teshuva()
    }

    pub fn is_chanukah(self) -> bool {
        self.holiday_context().is_chanukah()
    }

    pub fn day_of_chanukah(self) -> Option<u8> {
        self.holiday_context().day_of_chanukah()
    }

    pub fn parsha_year_type(self) -> Option<i32> {
        parsha::parsha_year_type(self.date.hebrew().year, self.in_israel)
    }

    pub fn parshah(self) -> Option<Parsha> {
        parsha::weekly_parsha(self.date.hebrew(), self.date.weekday(), self.in_israel)
    }

    pub fn upcoming_parshah(self) -> Option<Parsha> {
        parsha::upcoming_parsha(self.date.hebrew(), self.date.weekday(), self.in_israel)
    }

    pub fn special_shabbos(self) -> Option<Parsha> {
        parsha::special_shabbat(self.date.hebrew(), self.date.weekday(), self.in_israel)
    }

    pub fn tekufas_tishrei_elapsed_days(self) -> i64 {
        seasonal::tekufas_tishrei_elapsed_days(self.date.hebrew())
    }

    pub fn is_vesein_tal_umatar_start_date(self) -> bool {
        seasonal::is_vesein_tal_umatar_start_date(self.date.hebrew(), self.date.weekday(), self.in_israel)
    }

    pub fn is_vesein_tal_umatar_starting_tonight(self) -> bool {
        seasonal::is_vesein_tal_umatar_starting_tonight(self.date.hebrew(), self.date.weekday(), self.in_israel)
    }

    pub fn is_vesein_tal_umatar_recited(self) -> bool {
        seasonal::is_vesein_tal_umatar_recited(self.date.hebrew(), self.in_israel)
    }

    pub fn is_vesein_beracha_recited(self) -> bool {
        seasonal::is_vesein_beracha_recited(self.date.hebrew(), self.in_israel)
    }

    pub fn is_mashiv_haruach_start_date(self) -> bool {
        seasonal::is_mashiv_haruach_start_date(self.date.hebrew())
    }

    pub fn is_mashiv_haruach_end_date(self) -> bool {
        seasonal::is_mashiv_haruach_end_date(self.date.hebrew())
    }

    pub fn is_mashiv_haruach_recited(self) -> bool {
        seasonal::is_mashiv_haruach_recited(self.date.hebrew())
    }

    pub fn is_morid_hatal_recited(self) -> bool {
        seasonal::is_morid_hatal_recited(self.date.hebrew())
    }

    pub fn is_birkas_hachamah(self) -> bool {
        seasonal::is_birkas_hachamah(self.date.hebrew())
    }

    pub fn molad_instant(self) -> MoladInstant {
        seasonal::molad_instant(self.date.hebrew())
    }

    pub fn tchilas_kidush_levana_3_days(self) -> MoladInstant {
        seasonal::tchilas_kidush_levana_3_days(self.date.hebrew())
    }

    pub fn tchilas_kidush_levana_7_days(self) -> MoladInstant {
        seasonal::tchilas_kidush_levana_7_days(self.date.hebrew())
    }

    pub fn sof_zman_kidush_levana_between_moldos(self) -> MoladInstant {
        seasonal::sof_zman_kidush_levana_between_moldos(self.date.hebrew())
    }

    pub fn sof_zman_kidush_levana_15_days(self) -> MoladInstant {
        seasonal::sof_zman_kidush_levana_15_days(self.date.hebrew())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gregorian::GregorianDate;

    #[test]
    fn rosh_hashana_is_yom_tov_and_not_chol_hamoed() {
        let date = JewishDate::from_gregorian(GregorianDate::new(2023, 9, 16).unwrap()).unwrap();
        let cal = HebrewCalendar::new(date, false, false);
        assert_eq!(cal.date().hebrew().month, HebrewMonth::Tishrei);
        assert!(cal.is_yom_tov());
        assert!(!cal.is_chol_hamoed());
    }

    #[test]
    fn chanukah_day_of_is_consistent_with_holiday() {
        let date = JewishDate::from_hebrew(HebrewDate::new(5784, HebrewMonth::Kislev, 27).unwrap()).unwrap();
        let cal = HebrewCalendar::new(date, false, false);
        assert!(cal.is_chanukah());
        assert_eq!(cal.day_of_chanukah(), Some(3));
    }

    #[test]
    fn with_date_only_swaps_the_date() {
        let d1 = JewishDate::from_hebrew(HebrewDate::new(5784, HebrewMonth::Nisan, 1).unwrap()).unwrap();
        let d2 = JewishDate::from_hebrew(HebrewDate::new(5784, HebrewMonth::Tishrei, 1).unwrap()).unwrap();
        let cal = HebrewCalendar::new(d1, true, true).with_date(d2);
        assert_eq!(cal.date(), d2);
        assert!(cal.in_israel());
        assert!(cal.use_modern_holidays());
    }

    #[test]
    fn jewish_date_round_trips_through_json() {
        let date = JewishDate::from_hebrew(HebrewDate::new(5784, HebrewMonth::Kislev, 27).unwrap()).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        let back: JewishDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, back);
    }

    #[test]
    fn holiday_round_trips_through_json() {
        let holiday = Holiday::Chanukah;
        let json = serde_json::to_string(&holiday).unwrap();
        let back: Holiday = serde_json::from_str(&json).unwrap();
        assert_eq!(holiday, back);
    }

    #[test]
    fn molad_instant_round_trips_through_json() {
        let date = JewishDate::from_hebrew(HebrewDate::new(5778, HebrewMonth::Av, 1).unwrap()).unwrap();
        let instant = date.molad().molad_time();
        let json = serde_json::to_string(&instant).unwrap();
        let back: MoladTime = serde_json::from_str(&json).unwrap();
        assert_eq!(instant, back);
    }
}
