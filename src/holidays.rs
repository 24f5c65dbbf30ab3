//! Holiday dispatch: maps (Hebrew month, day, weekday, leap flag, Israel
//! flag, modern-holidays flag, Kislev-short flag) to a holiday, plus the
//! derived boolean predicates religious practice asks of a date.

use crate::hebrew_date::HebrewDate;
use crate::hebrew_year::{is_kislev_short, is_leap_year, HebrewMonth};
use crate::primitives::Weekday;
use serde::{Deserialize, Serialize};

/// A closed set of holidays. Ordering is not contractual; identity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Holiday {
    ErevPesach,
    Pesach,
    CholHamoedPesach,
    IsruChag,
    YomHashoah,
    YomHazikaron,
    YomHaatzmaut,
    PesachSheni,
    LagBaomer,
    YomYerushalayim,
    ErevShavuos,
    Shavuos,
    SeventeenthOfTammuz,
    TishaBeAv,
    TuBeAv,
    ErevRoshHashana,
    RoshHashana,
    FastOfGedalyah,
    ErevYomKippur,
    YomKippur,
    ErevSuccos,
    Succos,
    CholHamoedSuccos,
    HoshanaRabba,
    SheminiAtzeres,
    SimchasTorah,
    Chanukah,
    TenthOfTeves,
    TuBeshvat,
    FastOfEsther,
    Purim,
    ShushanPurim,
    PurimKatan,
    ShushanPurimKatan,
}

/// Pure dispatch by (month, day, weekday, Israel/modern-holiday flags).
/// `in_israel` and `use_modern_holidays` are seen only here and by the
/// derived predicates below; no component upstream of this one uses them.
pub fn dispatch(hebrew: HebrewDate, weekday: Weekday, in_israel: bool, use_modern_holidays: bool) -> Option<Holiday> {
    use Holiday::*;
    use HebrewMonth::*;
    use Weekday::*;

    let day = hebrew.day;
    let leap = is_leap_year(hebrew.year);
    let kislev_short = is_kislev_short(hebrew.year);

    match hebrew.month {
        Nisan => {
            if day == 14 {
                return Some(ErevPesach);
            }
            if day == 15 || day == 21 || (!in_israel && (day == 16 || day == 22)) {
                return Some(Pesach);
            }
            if (day == 16 && in_israel) || (17..=20).contains(&day) {
                return Some(CholHamoedPesach);
            }
            if (day == 22 && in_israel) || (day == 23 && !in_israel) {
                return Some(IsruChag);
            }
            if use_modern_holidays
                && ((day == 26 && weekday == Thursday)
                    || (day == 28 && weekday == Monday)
                    || (day == 27 && weekday != Sunday && weekday != Friday))
            {
                return Some(YomHashoah);
            }
            None
        }
        Iyar => {
            if use_modern_holidays {
                if (day == 4 && weekday == Tuesday)
                    || ((day == 3 || day == 2) && weekday == Wednesday)
                    || (day == 5 && weekday == Monday)
                {
                    return Some(YomHazikaron);
                }
                if (day == 5 && weekday == Wednesday)
                    || ((day == 4 || day == 3) && weekday == Thursday)
                    || (day == 6 && weekday == Tuesday)
                {
                    return Some(YomHaatzmaut);
                }
            }
            if day == 14 {
                return Some(PesachSheni);
            }
            if day == 18 {
                return Some(LagBaomer);
            }
            if use_modern_holidays && day == 28 {
                return Some(YomYerushalayim);
            }
            None
        }
        Sivan => {
            if day == 5 {
                return Some(ErevShavuos);
            }
            if day == 6 || (day == 7 && !in_israel) {
                return Some(Shavuos);
            }
            if (day == 7 && in_israel) || (day == 8 && !in_israel) {
                return Some(IsruChag);
            }
            None
        }
        Tammuz => {
            if (day == 17 && weekday != Saturday) || (day == 18 && weekday == Sunday) {
                return Some(SeventeenthOfTammuz);
            }
            None
        }
        Av => {
            if (weekday == Sunday && day == 10) || (weekday != Saturday && day == 9) {
                return Some(TishaBeAv);
            }
            if day == 15 {
                return Some(TuBeAv);
            }
            None
        }
        Elul => {
            if day == 29 {
                return Some(ErevRoshHashana);
            }
            None
        }
        Tishrei => {
            if day == 1 || day == 2 {
                return Some(RoshHashana);
            }
            if (day == 3 && weekday != Saturday) || (day == 4 && weekday == Sunday) {
                return Some(FastOfGedalyah);
            }
            if day == 9 {
                return Some(ErevYomKippur);
            }
            if day == 10 {
                return Some(YomKippur);
            }
            if day == 14 {
                return Some(ErevSuccos);
            }
            if day == 15 || (day == 16 && !in_israel) {
                return Some(Succos);
            }
            if (day == 16 && in_israel) || (17..=20).contains(&day) {
                return Some(CholHamoedSuccos);
            }
            if day == 21 {
                return Some(HoshanaRabba);
            }
            if day == 22 {
                return Some(SheminiAtzeres);
            }
            if day == 23 && !in_israel {
                return Some(SimchasTorah);
            }
            if (day == 23 && in_israel) || (day == 24 && !in_israel) {
                return Some(IsruChag);
            }
            None
        }
        Kislev => {
            if day >= 25 {
                return Some(Chanukah);
            }
            None
        }
        Tevet => {
            if day == 1 || day == 2 || (day == 3 && kislev_short) {
                return Some(Chanukah);
            }
            if day == 10 {
                return Some(TenthOfTeves);
            }
            None
        }
        Shevat => {
            if day == 15 {
                return Some(TuBeshvat);
            }
            None
        }
        Adar => {
            if !leap {
                if ((day == 11 || day == 12) && weekday == Thursday)
                    || (day == 13 && weekday != Friday && weekday != Saturday)
                {
                    return Some(FastOfEsther);
                }
                if day == 14 {
                    return Some(Purim);
                }
                if day == 15 {
                    return Some(ShushanPurim);
                }
            } else {
                if day == 14 {
                    return Some(PurimKatan);
                }
                if day == 15 {
                    return Some(ShushanPurimKatan);
                }
            }
            None
        }
        AdarII => {
            if ((day == 11 || day == 12) && weekday == Thursday) || (day == 13 && weekday != Friday && weekday != Saturday)
            {
                return Some(FastOfEsther);
            }
            if day == 14 {
                return Some(Purim);
            }
            if day == 15 {
                return Some(ShushanPurim);
            }
            None
        }
    }
}

/// Bundles the inputs `dispatch` and the derived predicates need, so
/// callers compute a Hebrew date's holiday facts once.
#[derive(Debug, Clone, Copy)]
pub struct HolidayContext {
    pub hebrew: HebrewDate,
    pub weekday: Weekday,
    pub in_israel: bool,
    pub use_modern_holidays: bool,
}

impl HolidayContext {
    pub fn new(hebrew: HebrewDate, weekday: Weekday, in_israel: bool, use_modern_holidays: bool) -> Self {
        HolidayContext {
            hebrew,
            weekday,
            in_israel,
            use_modern_holidays,
        }
    }

    pub fn holiday(&self) -> Option<Holiday> {
        dispatch(self.hebrew, self.weekday, self.in_israel, self.use_modern_holidays)
    }

    /// `isYomTov` per the canonical algorithm this spec condenses: Erev
    /// holidays and fasts are excluded (Chol Hamoed Pesach and Hoshana
    /// Rabba are the documented exceptions among Erev-flagged days), and
    /// Isru Chag is never itself a Yom Tov.
    pub fn is_yom_tov(&self) -> bool {
        use Holiday::*;
        let holiday = self.holiday();
        if self.is_erev_yom_tov() && !matches!(holiday, Some(HoshanaRabba) | Some(CholHamoedPesach)) {
            return false;
        }
        if self.is_taanis() && holiday != Some(YomKippur) {
            return false;
        }
        if holiday == Some(IsruChag) {
            return false;
        }
        holiday.is_some()
    }

    pub fn is_yom_tov_assur_bemelacha(&self) -> bool {
        use Holiday::*;
        matches!(
            self.holiday(),
            Some(Pesach) | Some(Shavuos) | Some(Succos) | Some(SheminiAtzeres) | Some(SimchasTorah) | Some(RoshHashana) | Some(YomKippur)
        )
    }

    pub fn is_assur_bemelacha(&self) -> bool {
        self.weekday == Weekday::Saturday || self.is_yom_tov_assur_bemelacha()
    }

    pub fn is_erev_yom_tov(&self) -> bool {
        use Holiday::*;
        matches!(
            self.holiday(),
            Some(ErevPesach) | Some(ErevShavuos) | Some(ErevRoshHashana) | Some(ErevYomKippur) | Some(ErevSuccos) | Some(HoshanaRabba)
        ) || (self.holiday() == Some(CholHamoedPesach) && self.hebrew.day == 20)
    }

    pub fn is_chol_hamoed_pesach(&self) -> bool {
        self.holiday() == Some(Holiday::CholHamoedPesach)
    }

    pub fn is_chol_hamoed_succos(&self) -> bool {
        matches!(self.holiday(), Some(Holiday::CholHamoedSuccos) | Some(Holiday::HoshanaRabba))
    }

    pub fn is_chol_hamoed(&self) -> bool {
        self.is_chol_hamoed_pesach() || self.is_chol_hamoed_succos()
    }

    pub fn is_taanis(&self) -> bool {
        use Holiday::*;
        matches!(
            self.holiday(),
            Some(SeventeenthOfTammuz) | Some(TishaBeAv) | Some(YomKippur) | Some(FastOfGedalyah) | Some(TenthOfTeves) | Some(FastOfEsther)
        )
    }

    pub fn is_taanis_bechoros(&self) -> bool {
        self.hebrew.month == HebrewMonth::Nisan
            && ((self.hebrew.day == 14 && self.weekday != Weekday::Saturday) || (self.hebrew.day == 12 && self.weekday == Weekday::Thursday))
    }

    pub fn is_rosh_chodesh(&self) -> bool {
        (self.hebrew.day == 1 && self.hebrew.month != HebrewMonth::Tishrei) || self.hebrew.day == 30
    }

    pub fn is_machar_chodesh(&self) -> bool {
        self.weekday == Weekday::Saturday && (self.hebrew.day == 29 || self.hebrew.day == 30)
    }

    pub fn is_erev_rosh_chodesh(&self) -> bool {
        self.hebrew.day == 29 && self.hebrew.month != HebrewMonth::Elul
    }

    pub fn is_shabbos_mevorchim(&self) -> bool {
        self.weekday == Weekday::Saturday
            && (23..=29).contains(&self.hebrew.day)
            && self.hebrew.month != HebrewMonth::Elul
    }

    pub fn is_yom_kippur_katan(&self) -> bool {
        use HebrewMonth::*;
        if matches!(self.hebrew.month, Elul | Tishrei | Kislev | Nisan) {
            return false;
        }
        let day = self.hebrew.day;
        (day == 29 && self.weekday != Weekday::Friday && self.weekday != Weekday::Saturday)
            || ((day == 27 || day == 28) && self.weekday == Weekday::Thursday)
    }

    pub fn is_be_hab(&self) -> bool {
        use HebrewMonth::*;
        if !matches!(self.hebrew.month, Cheshvan | Iyar) {
            return false;
        }
        let day = self.hebrew.day;
        (self.weekday == Weekday::Monday && day > 4 && day < 18) || (self.weekday == Weekday::Thursday && day > 7 && day < 14)
    }

    pub fn is_erev_yom_tov_sheni(&self) -> bool {
        use HebrewMonth::*;
        let day = self.hebrew.day;
        if self.hebrew.month == Tishrei && day == 1 {
            return true;
        }
        if !self.in_israel {
            if self.hebrew.month == Nisan && (day == 15 || day == 21) {
                return true;
            }
            if self.hebrew.month == Tishrei && (day == 15 || day == 22) {
                return true;
            }
            if self.hebrew.month == Sivan && day == 6 {
                return true;
            }
        }
        false
    }

    pub fn is_tomorrow_shabbos_or_yom_tov(&self) -> bool {
        self.weekday == Weekday::Friday || self.is_erev_yom_tov() || self.is_erev_yom_tov_sheni()
    }

    pub fn has_candle_lighting(&self) -> bool {
        self.is_tomorrow_shabbos_or_yom_tov()
    }

    pub fn is_aseres_yemei_teshuva(&self) -> bool {
        self.hebrew.month == HebrewMonth::Tishrei && self.hebrew.day <= 10
    }

    pub fn is_chanukah(&self) -> bool {
        self.holiday() == Some(Holiday::Chanukah)
    }

    pub fn day_of_chanukah(&self) -> Option<u8> {
        if !self.is_chanukah() {
            return None;
        }
        if self.hebrew.month == HebrewMonth::Kislev {
            Some(self.hebrew.day - 24)
        } else if is_kislev_short(self.hebrew.year) {
            Some(self.hebrew.day + 5)
        } else {
            Some(self.hebrew.day + 6)
        }
    }
}
