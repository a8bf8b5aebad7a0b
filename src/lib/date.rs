//! Day-precise calendar dates, as written in the catalog (`YYYY-MM-DD`)
//!
//! Parsing is strict and reports why a date is wrong, but callers in the
//! pipeline never propagate these errors: an unparseable departure is simply
//! left out of date computations.
//!
//! Display names are French, the only locale the catalog is shown in.

use chrono::{Datelike, Local, NaiveDate};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Twelve months in the year, identified by their 3-letter abbreviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, PartialOrd, Ord)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Parse the two-digit form used by the month control (`"01"` ... `"12"`)
    pub fn from_two_digit(s: &str) -> Option<Self> {
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let n = s.parse::<usize>().ok()?;
        Self::from_number(n)
    }

    /// Month from its 1-based number
    pub fn from_number(n: usize) -> Option<Self> {
        if n == 0 {
            None
        } else {
            Self::from_usize(n - 1)
        }
    }

    /// 1-based number of the month
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// `"01"` ... `"12"`, as found at offset 5 of an ISO date
    pub fn two_digit(self) -> String {
        format!("{:02}", self.number())
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => if is_leap(year) { 29 } else { 28 },
        }
    }

    pub fn fr_name(self) -> &'static str {
        use Month::*;
        match self {
            Jan => "janvier",
            Feb => "février",
            Mar => "mars",
            Apr => "avril",
            May => "mai",
            Jun => "juin",
            Jul => "juillet",
            Aug => "août",
            Sep => "septembre",
            Oct => "octobre",
            Nov => "novembre",
            Dec => "décembre",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Weekday with Monday-first week convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum Weekday {
    Mon = 0,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn fr_name(self) -> &'static str {
        use Weekday::*;
        match self {
            Mon => "lundi",
            Tue => "mardi",
            Wed => "mercredi",
            Thu => "jeudi",
            Fri => "vendredi",
            Sat => "samedi",
            Sun => "dimanche",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ways in which a date string can be wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    /// not of the shape `YYYY-MM-DD`
    Malformed(String),
    /// year is outside of 1000..=9999
    UnsupportedYear(usize),
    /// month outside of 1..=12
    InvalidMonth(usize),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            NaiveDate::from_ymd_opt(year as i32, month.number() as u32, day as u32)
                .map(Self)
                .ok_or(DateError::InvalidDay(day))
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// Parse a strict `YYYY-MM-DD` date
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let malformed = || DateError::Malformed(s.to_string());
        let bytes = s.as_bytes();
        if !s.is_ascii() || bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let number = |range: std::ops::Range<usize>| {
            let part = &s[range];
            if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<usize>().map_err(|_| malformed())
            } else {
                Err(malformed())
            }
        };
        let year = number(0..4)?;
        let month = number(5..7)?;
        let day = number(8..10)?;
        let month = Month::from_number(month).ok_or(DateError::InvalidMonth(month))?;
        Self::from(year, month, day)
    }

    /// Current calendar day in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    pub fn month(&self) -> Month {
        // chrono months are always in 1..=12
        Month::from_number(self.0.month() as usize).unwrap_or(Month::Jan)
    }

    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from_u32(self.0.weekday().num_days_from_monday()).unwrap_or(Weekday::Mon)
    }

    /// `04 octobre`
    pub fn short_fr(self) -> String {
        format!("{:02} {}", self.day(), self.month().fr_name())
    }

    /// `samedi 04 octobre 2025`
    pub fn long_fr(self) -> String {
        format!(
            "{} {:02} {} {}",
            self.weekday().fr_name(),
            self.day(),
            self.month().fr_name(),
            self.year()
        )
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            Malformed(s) => write!(f, "'{}' is not a YYYY-MM-DD date", s),
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            InvalidMonth(m) => write!(f, "{} is not a valid month", m),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => write!(
                f,
                "{} is a short month, it does not have a {}th day",
                m, d,
            ),
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(&self) -> String {
        use DateError::*;
        match self {
            Malformed(_) => "write dates as \"2025-05-24\"".to_string(),
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            InvalidMonth(_) => "months are numbered 01 to 12".to_string(),
            NotBissextile(y) => format!("did you mean {y}-02-28 or {y}-03-01 ?", y = y),
            MonthTooShort(m, d) => format!("{} is only {} days long", m,
                if *m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{
        *,
        Month::*,
        Weekday::*,
    };

    #[test]
    fn bissextile_check() {
        macro_rules! yes {
            ( $y:expr ) => { assert!(is_leap($y)); }
        }
        macro_rules! no {
            ( $y:expr ) => { assert!(!is_leap($y)); }
        }
        yes!(2004);
        no!(2100);
        yes!(2000);
        no!(2001);
        yes!(2024);
    }

    macro_rules! ok {
        ( $s:expr => $y:tt - $m:tt - $d:tt ) => {{
            let d = Date::parse($s).unwrap();
            assert_eq!((d.year(), d.month(), d.day()), ($y, $m, $d));
        }}
    }
    macro_rules! err {
        ( $s:expr => $e:expr ) => {
            assert_eq!(Date::parse($s), Err($e));
        }
    }

    #[test]
    fn parse_valid() {
        ok!("2025-04-12" => 2025-Apr-12);
        ok!("2025-12-31" => 2025-Dec-31);
        ok!("2024-02-29" => 2024-Feb-29);
    }

    #[test]
    fn parse_malformed() {
        err!("" => DateError::Malformed(String::new()));
        err!("2025-4-12" => DateError::Malformed("2025-4-12".to_string()));
        err!("12/04/2025" => DateError::Malformed("12/04/2025".to_string()));
        err!("2025-0a-12" => DateError::Malformed("2025-0a-12".to_string()));
        err!("prochainement" => DateError::Malformed("prochainement".to_string()));
    }

    #[test]
    fn parse_invalid_components() {
        err!("2025-13-01" => DateError::InvalidMonth(13));
        err!("2025-00-01" => DateError::InvalidMonth(0));
        err!("2025-04-31" => DateError::MonthTooShort(Apr, 31));
        err!("2025-02-29" => DateError::NotBissextile(2025));
        err!("2025-01-32" => DateError::InvalidDay(32));
        err!("0999-01-01" => DateError::UnsupportedYear(999));
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Date::parse("2025-03-29").unwrap();
        let b = Date::parse("2025-05-17").unwrap();
        let c = Date::parse("2026-01-02").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn month_control_values() {
        assert_eq!(Month::from_two_digit("05"), Some(May));
        assert_eq!(Month::from_two_digit("12"), Some(Dec));
        assert_eq!(Month::from_two_digit("5"), None);
        assert_eq!(Month::from_two_digit("13"), None);
        assert_eq!(Month::from_two_digit("00"), None);
        assert_eq!(Oct.two_digit(), "10");
        assert_eq!(Mar.two_digit(), "03");
    }

    #[test]
    fn weekday_references() {
        macro_rules! day {
            ( $s:expr => $w:expr ) => {
                assert_eq!(Date::parse($s).unwrap().weekday(), $w)
            }
        }
        day!("2000-01-01" => Sat);
        day!("2000-01-03" => Mon);
        day!("2025-05-24" => Sat);
        day!("2025-10-10" => Fri);
        day!("2025-06-14" => Sat);
    }

    #[test]
    fn french_labels() {
        let d = Date::parse("2025-10-04").unwrap();
        assert_eq!(d.short_fr(), "04 octobre");
        assert_eq!(d.long_fr(), "samedi 04 octobre 2025");
        let d = Date::parse("2025-08-15").unwrap();
        assert_eq!(d.long_fr(), "vendredi 15 août 2025");
        assert_eq!(d.to_string(), "2025-08-15");
    }
}
