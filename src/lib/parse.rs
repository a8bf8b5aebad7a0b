//! Convert catalog source text into validated offerings

#![allow(clippy::upper_case_acronyms)]

use std::collections::{BTreeSet, HashMap};

use pest::Parser;
use pest_derive::*;
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::{
    date::Date,
    error::{Error, Loc, Record},
    money::{Amount, Currency},
    offering::{Catalog, Offering},
};

#[derive(Parser)]
#[grammar = "catalog.pest"]
struct CatalogParser;

/// Read the offerings of `contents` (the text of file `path`)
///
/// Offerings that validated are returned even when others failed, so an empty
/// or partial result says nothing about success: check `errs.is_fatal()`.
pub fn extract<'i>(path: &'i str, errs: &mut Record, contents: &'i str) -> Vec<Offering> {
    let contents = match CatalogParser::parse(Rule::program, contents) {
        Ok(contents) => contents,
        Err(e) => {
            Error::new("Parsing failure")
                .with_error(e.with_path(path))
                .register(errs);
            return Vec::new();
        }
    };
    validate(path, errs, contents)
}

/// Parse and validate into a catalog, `None` on any fatal error
pub fn catalog(path: &str, errs: &mut Record, contents: &str) -> Option<Catalog> {
    let offerings = extract(path, errs, contents);
    if errs.is_fatal() {
        return None;
    }
    match Catalog::new(offerings) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            // duplicates and empty durations are normally caught by `validate`
            Error::new("Invalid catalog")
                .with_text(e)
                .register(errs);
            None
        }
    }
}

// extract contents of wrapper rule
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        if items.next().is_some() {
            panic!("Several subrules");
        }
        fst
    }};
}

// extract two-element inner
macro_rules! pair {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No 1st"));
        let snd = items.next().unwrap_or_else(|| panic!("No 2nd"));
        assert!(items.next().is_none());
        (fst, snd)
    }};
}

// set-once value
macro_rules! set_or_fail {
    ( $errs:expr, $var:expr, $val:expr, $name:expr, $loc:expr) => {{
        if $var.is_some() {
            Error::new("Duplicate field definition")
                .with_span(&$loc, format!("attempt to override {}", $name))
                .with_text("Each field may only be defined once")
                .with_hint("remove one of the field definitions")
                .register($errs);
            return None;
        }
        $var = Some($val);
    }};
}

// non-optional value
macro_rules! unwrap_or_fail {
    ( $errs:expr, $val:expr, $name:expr, $loc:expr ) => {{
        match $val {
            Some(v) => v,
            None => {
                let name = $name;
                let hint_value = match name {
                    "title" => "\"Notre-Dame du Laus\"",
                    "country" => "\"France\"",
                    "summary" => "\"Sanctuaire alpin\"",
                    "image" => "\"./assets/voyages/laus.jpg\"",
                    "duration" => "\"3j\" 3",
                    "price" => "260 EUR",
                    _ => unreachable!(),
                };
                Error::new("Missing field definition")
                    .with_span(&$loc, format!("'{}' may not be omitted", name))
                    .with_text("Each mandatory field must be defined once")
                    .with_hint(format!(
                        "add definition for the missing field: '{} {}'",
                        name, hint_value
                    ))
                    .register($errs);
                return None;
            }
        }
    }};
}

fn validate<'i>(path: &'i str, errs: &mut Record, pairs: Pairs<'i>) -> Vec<Offering> {
    let mut offerings = Vec::new();
    let mut ids: HashMap<String, Loc<'i>> = HashMap::new();
    'pairs: for pair in pairs {
        let loc = (path, pair.as_span());
        match pair.as_rule() {
            Rule::offering => {
                let offering = match validate_offering(path, errs, pair) {
                    Some(x) => x,
                    None => continue 'pairs,
                };
                if let Some(first) = ids.get(&offering.id) {
                    Error::new("Duplicate offering")
                        .with_span(&loc, format!("'{}' is defined again here", offering.id))
                        .with_span(first, "first defined here")
                        .with_hint("offering identifiers must be unique")
                        .register(errs);
                    continue 'pairs;
                }
                ids.insert(offering.id.clone(), loc);
                offerings.push(offering);
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    offerings
}

fn validate_offering(path: &str, errs: &mut Record, pair: Pair) -> Option<Offering> {
    let loc = (path, pair.as_span());
    let mut items = pair.into_inner();
    let id = match items.next() {
        Some(id) => read_text(id),
        None => unreachable!(),
    };
    let mut title: Option<String> = None;
    let mut country: Option<String> = None;
    let mut summary: Option<String> = None;
    let mut image: Option<String> = None;
    let mut themes: Option<BTreeSet<String>> = None;
    let mut duration: Option<(String, u32)> = None;
    let mut price: Option<(Amount, Currency)> = None;
    let mut dates: Option<Vec<String>> = None;
    let mut tags: Option<Vec<String>> = None;
    for item in items {
        let item_loc = (path, item.as_span());
        match item.as_rule() {
            Rule::field_title => {
                set_or_fail!(errs, title, read_text(subrule!(item)), "title", item_loc);
            }
            Rule::field_country => {
                set_or_fail!(errs, country, read_text(subrule!(item)), "country", item_loc);
            }
            Rule::field_summary => {
                set_or_fail!(errs, summary, read_text(subrule!(item)), "summary", item_loc);
            }
            Rule::field_image => {
                set_or_fail!(errs, image, read_text(subrule!(item)), "image", item_loc);
            }
            Rule::field_themes => {
                let val = item.into_inner().map(|t| t.as_str().to_string()).collect();
                set_or_fail!(errs, themes, val, "themes", item_loc);
            }
            Rule::field_duration => {
                let val = read_duration(errs, &item_loc, item)?;
                set_or_fail!(errs, duration, val, "duration", item_loc);
            }
            Rule::field_price => {
                let val = read_price(errs, &item_loc, item)?;
                set_or_fail!(errs, price, val, "price", item_loc);
            }
            Rule::field_dates => {
                let val = read_dates(path, errs, item);
                set_or_fail!(errs, dates, val, "dates", item_loc);
            }
            Rule::field_tags => {
                let val = item.into_inner().map(read_text).collect();
                set_or_fail!(errs, tags, val, "tags", item_loc);
            }
            _ => unreachable!(),
        }
    }
    let title = unwrap_or_fail!(errs, title, "title", loc);
    let country = unwrap_or_fail!(errs, country, "country", loc);
    let summary = unwrap_or_fail!(errs, summary, "summary", loc);
    let image = unwrap_or_fail!(errs, image, "image", loc);
    let (duration_label, days) = unwrap_or_fail!(errs, duration, "duration", loc);
    let (price, currency) = unwrap_or_fail!(errs, price, "price", loc);
    Some(Offering {
        id,
        title,
        country,
        summary,
        image,
        themes: themes.unwrap_or_default(),
        duration_label,
        days,
        price,
        currency,
        tags: tags.unwrap_or_default(),
        dates: dates.unwrap_or_default(),
    })
}

// contents of a quoted `text`
fn read_text(pair: Pair) -> String {
    assert_eq!(pair.as_rule(), Rule::text);
    subrule!(pair).as_str().to_string()
}

fn read_duration(errs: &mut Record, loc: &Loc, pair: Pair) -> Option<(String, u32)> {
    let (label, days) = pair!(pair);
    let label = read_text(label);
    let days = match days.as_str().parse::<u32>() {
        Ok(0) => {
            Error::new("Empty duration")
                .with_span(loc, "offering lasts 0 days")
                .with_hint("an offering lasts at least one day")
                .register(errs);
            return None;
        }
        Ok(days) => days,
        Err(e) => {
            Error::new("Invalid duration")
                .with_span(loc, "day count is out of range")
                .with_text(e)
                .register(errs);
            return None;
        }
    };
    Some((label, days))
}

fn read_price(errs: &mut Record, loc: &Loc, pair: Pair) -> Option<(Amount, Currency)> {
    let (amount, code) = pair!(pair);
    let amount = match Amount::parse(amount.as_str()) {
        Some(amount) => amount,
        None => {
            Error::new("Invalid price")
                .with_span(loc, "amount is out of range")
                .register(errs);
            return None;
        }
    };
    Some((amount, Currency(code.as_str().to_string())))
}

// unparseable dates are kept but reported
fn read_dates(path: &str, errs: &mut Record, pair: Pair) -> Vec<String> {
    let mut dates = Vec::new();
    for item in pair.into_inner() {
        let loc = (path, item.as_span());
        let raw = read_text(item);
        if let Err(e) = Date::parse(&raw) {
            Error::new("Invalid date")
                .nonfatal()
                .with_span(&loc, "defined here")
                .with_text(&e)
                .with_text("this departure will not be shown")
                .with_hint(e.fix_hint())
                .register(errs);
        }
        dates.push(raw);
    }
    dates
}
