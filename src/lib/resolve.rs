//! Picking the date to show for an offering
//!
//! All functions here fail soft: a string that is not a valid date is
//! ignored, and the absence of any valid date is reported as `None`
//! (displayed as "dates to be announced").

use crate::lib::date::Date;

/// Valid departures, in authoring order
pub fn parse_dates<S>(raw: &[S]) -> Vec<Date>
where
    S: AsRef<str>,
{
    raw.iter()
        .filter_map(|s| Date::parse(s.as_ref()).ok())
        .collect()
}

/// Valid departures in chronological order
pub fn chronological<S>(raw: &[S]) -> Vec<Date>
where
    S: AsRef<str>,
{
    let mut dates = parse_dates(raw);
    dates.sort();
    dates
}

/// Soonest departure on or after `today`
///
/// When every departure is in the past, the earliest known one is returned
/// instead so that the offering still shows a date.
pub fn next_relevant<S>(raw: &[S], today: Date) -> Option<Date>
where
    S: AsRef<str>,
{
    let dates = parse_dates(raw);
    dates
        .iter()
        .copied()
        .filter(|d| *d >= today)
        .min()
        .or_else(|| dates.iter().copied().min())
}
