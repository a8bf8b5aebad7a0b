//! User-selected criteria and the inclusion test
//!
//! Every criterion is optional: an unset one lets every offering through,
//! and the set ones must all hold for an offering to be shown.

use tracing::warn;

use crate::lib::{
    date::Month,
    money::Amount,
    offering::Offering,
    sort::SortMode,
};

/// Control value of the open-ended duration bucket
pub const FOUR_PLUS: &str = "4j";

/// Coarse duration classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationBucket {
    /// same `duration_label` as the offering
    Exact(String),
    /// 4 days or more, whatever the label
    FourPlus,
}

impl DurationBucket {
    /// `""` is no constraint, [`FOUR_PLUS`] is the open-ended bucket
    pub fn from_control(value: &str) -> Option<Self> {
        match value.trim() {
            "" => None,
            FOUR_PLUS => Some(DurationBucket::FourPlus),
            label => Some(DurationBucket::Exact(label.to_string())),
        }
    }
}

/// Raw values of the filter controls, as read on "apply"
///
/// An empty string means the control is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub theme: String,
    pub duration: String,
    pub budget: String,
    pub month: String,
}

/// Current criteria of the widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub theme: Option<String>,
    pub duration: Option<DurationBucket>,
    /// inclusive upper bound on the price
    pub budget: Option<Amount>,
    pub month: Option<Month>,
    pub sort: SortMode,
}

impl FilterState {
    /// Replace the four filters with the control values
    ///
    /// The sort mode has its own control and is left untouched.
    /// A budget or month that cannot be read leaves its criterion unset.
    pub fn apply(&mut self, input: &FilterInput) {
        let theme = input.theme.trim();
        self.theme = if theme.is_empty() { None } else { Some(theme.to_string()) };
        self.duration = DurationBucket::from_control(&input.duration);
        self.budget = match input.budget.trim() {
            "" => None,
            value => {
                let budget = Amount::parse(value);
                if budget.is_none() {
                    warn!(value, "ignoring unreadable budget");
                }
                budget
            }
        };
        self.month = match input.month.trim() {
            "" => None,
            value => {
                let month = Month::from_two_digit(value);
                if month.is_none() {
                    warn!(value, "ignoring unreadable month");
                }
                month
            }
        };
    }

    /// Clear the four filters, keep the sort mode
    pub fn reset(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default()
        };
    }

    pub fn is_unconstrained(&self) -> bool {
        self.theme.is_none() && self.duration.is_none() && self.budget.is_none() && self.month.is_none()
    }
}

/// Whether `offering` passes every criterion set in `state`
pub fn matches(offering: &Offering, state: &FilterState) -> bool {
    if let Some(theme) = &state.theme {
        if !offering.has_theme(theme) {
            return false;
        }
    }
    if let Some(bucket) = &state.duration {
        if !fits_bucket(offering, bucket) {
            return false;
        }
    }
    if let Some(budget) = state.budget {
        if offering.price > budget {
            return false;
        }
    }
    if let Some(month) = state.month {
        if !departs_in(offering, month) {
            return false;
        }
    }
    true
}

fn fits_bucket(offering: &Offering, bucket: &DurationBucket) -> bool {
    match bucket {
        DurationBucket::FourPlus => offering.days >= 4,
        DurationBucket::Exact(label) => offering.duration_label == *label,
    }
}

// Compares the month digits of the raw strings, any year
fn departs_in(offering: &Offering, month: Month) -> bool {
    let digits = month.two_digit();
    offering
        .dates
        .iter()
        .any(|d| d.get(5..7) == Some(digits.as_str()))
}
