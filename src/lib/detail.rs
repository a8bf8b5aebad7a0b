//! Expanded, read-only view of a single offering

use crate::lib::{
    money::display_price,
    offering::Offering,
    resolve,
};

/// Shown in place of the departure list when none is known
pub const SCHEDULE_TBA: &str = "À venir";

/// Departures of an offering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// full French dates, in chronological order
    Announced(Vec<String>),
    ToBeAnnounced,
}

impl Schedule {
    /// One line per departure, or the placeholder
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Schedule::Announced(dates) => dates.iter().map(String::as_str).collect(),
            Schedule::ToBeAnnounced => vec![SCHEDULE_TBA],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub image: String,
    /// `France • 2 jours • Dès 180,00 €`
    pub facts: String,
    pub schedule: Schedule,
}

impl DetailView {
    pub fn of(offering: &Offering) -> Self {
        let dates = resolve::chronological(&offering.dates);
        let schedule = if dates.is_empty() {
            Schedule::ToBeAnnounced
        } else {
            Schedule::Announced(dates.into_iter().map(|d| d.long_fr()).collect())
        };
        Self {
            id: offering.id.clone(),
            title: offering.title.clone(),
            summary: offering.summary.clone(),
            image: offering.image.clone(),
            facts: format!(
                "{} • {} • Dès {}",
                offering.country,
                offering.days_label(),
                display_price(offering.price, &offering.currency)
            ),
            schedule,
        }
    }
}
