//! What the collaborators receive: one card per shown offering, and the
//! schema.org listing of the same offerings for search engines

use serde::Serialize;

use crate::lib::{
    date::Date,
    money::display_price,
    offering::Offering,
    resolve,
};

/// Shown instead of a date when no departure is known
pub const DATES_TBA: &str = "Dates à venir";

/// Display card of a single offering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub country: String,
    pub days: u32,
    pub days_label: String,
    pub summary: String,
    pub image: String,
    pub tags: Vec<String>,
    pub next_date: Option<Date>,
    pub next_date_label: String,
    pub formatted_price: String,
}

impl CardView {
    pub fn of(offering: &Offering, today: Date) -> Self {
        let next_date = resolve::next_relevant(&offering.dates, today);
        Self {
            id: offering.id.clone(),
            title: offering.title.clone(),
            country: offering.country.clone(),
            days: offering.days,
            days_label: offering.days_label(),
            summary: offering.summary.clone(),
            image: offering.image.clone(),
            tags: offering.tags.clone(),
            next_date,
            next_date_label: next_date.map_or_else(|| DATES_TBA.to_string(), Date::short_fr),
            formatted_price: display_price(offering.price, &offering.currency),
        }
    }
}

pub fn cards(offerings: &[&Offering], today: Date) -> Vec<CardView> {
    offerings.iter().map(|o| CardView::of(o, today)).collect()
}

/// schema.org `ItemList` of the shown offerings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDocument {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(rename = "itemListElement")]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    /// 1-based
    pub position: usize,
    pub item: Trip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub image: String,
    pub description: String,
    pub offers: Offer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub price: String,
    #[serde(rename = "priceCurrency")]
    pub currency: String,
}

impl ListingDocument {
    pub const NAME: &'static str = "Voyages Iterdei";

    pub fn of(offerings: &[&Offering]) -> Self {
        Self {
            context: "https://schema.org",
            kind: "ItemList",
            name: Self::NAME.to_string(),
            items: offerings
                .iter()
                .enumerate()
                .map(|(i, o)| ListItem {
                    kind: "ListItem",
                    position: i + 1,
                    item: Trip {
                        kind: "Trip",
                        name: o.title.clone(),
                        image: o.image.clone(),
                        description: o.summary.clone(),
                        offers: Offer {
                            kind: "Offer",
                            price: o.price.to_string(),
                            currency: o.currency.code().to_string(),
                        },
                    },
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
