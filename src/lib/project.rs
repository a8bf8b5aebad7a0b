//! The filter then sort pipeline
//!
//! Pure: the same catalog, criteria and day always give the same result.
//! Showing the result is left to the widget controller.

use crate::lib::{
    date::Date,
    filter::{self, FilterState},
    offering::{Catalog, Offering},
    sort,
};

/// Offerings to show, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult<'c> {
    pub offerings: Vec<&'c Offering>,
    pub count: usize,
}

impl RenderResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `0 résultat`, `1 résultat`, `3 résultats`
    pub fn count_label(&self) -> String {
        format!("{} résultat{}", self.count, if self.count > 1 { "s" } else { "" })
    }
}

pub fn project<'c>(catalog: &'c Catalog, state: &FilterState, today: Date) -> RenderResult<'c> {
    let filtered = catalog
        .iter()
        .filter(|o| filter::matches(o, state))
        .collect::<Vec<_>>();
    let offerings = sort::sort(&filtered, state.sort, today);
    let count = offerings.len();
    RenderResult { offerings, count }
}
