//! Orderings selectable from the sort control
//!
//! All orderings are stable: offerings with equal keys keep the order in
//! which they were given.

use crate::lib::{date::Date, offering::Offering, resolve};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// soonest departure first, undated offerings last
    #[default]
    NextDate,
    /// cheapest first
    Price,
    /// shortest first
    Duration,
}

impl SortMode {
    /// Values of the sort control; anything unknown sorts by date
    pub fn from_control(value: &str) -> Self {
        match value.trim() {
            "prix" | "price" => SortMode::Price,
            "duree" | "durée" | "duration" => SortMode::Duration,
            _ => SortMode::NextDate,
        }
    }

    pub fn control_value(self) -> &'static str {
        match self {
            SortMode::NextDate => "date",
            SortMode::Price => "prix",
            SortMode::Duration => "duree",
        }
    }
}

/// A sorted copy of `offerings`
pub fn sort<'c>(offerings: &[&'c Offering], mode: SortMode, today: Date) -> Vec<&'c Offering> {
    let mut sorted = offerings.to_vec();
    match mode {
        SortMode::Price => sorted.sort_by_key(|o| o.price),
        SortMode::Duration => sorted.sort_by_key(|o| o.days),
        SortMode::NextDate => {
            // resolve once per offering rather than once per comparison
            let mut keyed = sorted
                .into_iter()
                .map(|o| (date_key(resolve::next_relevant(&o.dates, today)), o))
                .collect::<Vec<_>>();
            keyed.sort_by_key(|(key, _)| *key);
            sorted = keyed.into_iter().map(|(_, o)| o).collect();
        }
    }
    sorted
}

// `(true, None)` compares after every `(false, Some(_))`
fn date_key(date: Option<Date>) -> (bool, Option<Date>) {
    (date.is_none(), date)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::offering::fixture::offering;
    use pretty_assertions::assert_eq;

    fn today() -> Date {
        Date::parse("2025-01-01").unwrap()
    }

    fn ids<'a>(list: &[&'a Offering]) -> Vec<&'a str> {
        list.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn control_values() {
        assert_eq!(SortMode::from_control("prix"), SortMode::Price);
        assert_eq!(SortMode::from_control("duree"), SortMode::Duration);
        assert_eq!(SortMode::from_control("date"), SortMode::NextDate);
        assert_eq!(SortMode::from_control("popularité"), SortMode::NextDate);
        assert_eq!(SortMode::default(), SortMode::NextDate);
    }

    #[test]
    fn by_price() {
        let a = offering!("cotignac", 180, 2, []);
        let b = offering!("sainte-baume", 160, 2, []);
        let c = offering!("laus", 260, 3, []);
        let input = vec![&a, &b, &c];
        let sorted = sort(&input, SortMode::from_control("prix"), today());
        assert_eq!(ids(&sorted), vec!["sainte-baume", "cotignac", "laus"]);
        // input untouched
        assert_eq!(ids(&input), vec!["cotignac", "sainte-baume", "laus"]);
    }

    #[test]
    fn by_duration_is_stable() {
        let a = offering!("laus", 260, 3, []);
        let b = offering!("cotignac", 180, 2, []);
        let c = offering!("ligurie", 320, 3, []);
        let d = offering!("sainte-baume", 160, 2, []);
        let sorted = sort(&[&a, &b, &c, &d], SortMode::Duration, today());
        assert_eq!(ids(&sorted), vec!["cotignac", "sainte-baume", "laus", "ligurie"]);
    }

    #[test]
    fn by_price_ties_keep_order() {
        let a = offering!("a", 200, 2, []);
        let b = offering!("b", 100, 2, []);
        let c = offering!("c", 200, 3, []);
        let sorted = sort(&[&a, &b, &c], SortMode::Price, today());
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn by_next_date() {
        let a = offering!("cotignac", 180, 2, ["2025-04-12", "2025-05-24"]);
        let b = offering!("sainte-baume", 160, 2, ["2025-03-29", "2025-09-20"]);
        let c = offering!("laus", 260, 3, ["2025-06-14"]);
        let sorted = sort(&[&a, &b, &c], SortMode::NextDate, today());
        assert_eq!(ids(&sorted), vec!["sainte-baume", "cotignac", "laus"]);
        // later in the year, past departures no longer count
        let sorted = sort(&[&a, &b, &c], SortMode::NextDate, Date::parse("2025-04-15").unwrap());
        assert_eq!(ids(&sorted), vec!["cotignac", "laus", "sainte-baume"]);
    }

    #[test]
    fn stale_fallback_sorts_by_its_value() {
        let a = offering!("cotignac", 180, 2, ["2025-05-24"]);
        let b = offering!("sainte-baume", 160, 2, ["2025-03-29"]);
        let today = Date::parse("2025-04-15").unwrap();
        let sorted = sort(&[&a, &b], SortMode::NextDate, today);
        assert_eq!(ids(&sorted), vec!["sainte-baume", "cotignac"]);
    }

    #[test]
    fn undated_sort_last_in_input_order() {
        let a = offering!("tba-1", 100, 2, []);
        let b = offering!("laus", 260, 3, ["2025-06-14"]);
        let c = offering!("tba-2", 100, 2, ["à préciser"]);
        let d = offering!("cotignac", 180, 2, ["2025-04-12"]);
        let sorted = sort(&[&a, &b, &c, &d], SortMode::NextDate, today());
        assert_eq!(ids(&sorted), vec!["cotignac", "laus", "tba-1", "tba-2"]);
    }

    #[test]
    fn permutation_of_input() {
        let a = offering!("a", 300, 5, ["2025-02-01"]);
        let b = offering!("b", 100, 1, []);
        let c = offering!("c", 200, 3, ["2025-01-15"]);
        let input = [&a, &b, &c];
        for mode in [SortMode::NextDate, SortMode::Price, SortMode::Duration] {
            let mut sorted = ids(&sort(&input, mode, today()));
            assert_eq!(sorted.len(), input.len());
            sorted.sort();
            assert_eq!(sorted, vec!["a", "b", "c"]);
        }
    }
}
