//! Catalog records and the immutable catalog that holds them

use std::collections::BTreeSet;
use std::fmt;

use crate::lib::money::{Amount, Currency};

/// One travel product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offering {
    pub id: String,
    pub title: String,
    pub country: String,
    pub summary: String,
    pub image: String,
    pub themes: BTreeSet<String>,
    /// coarse bucket shown in the duration control (`2j`, `3j`)
    pub duration_label: String,
    /// exact number of days, at least 1
    pub days: u32,
    pub price: Amount,
    pub currency: Currency,
    /// display only
    pub tags: Vec<String>,
    /// departures as authored, `YYYY-MM-DD`
    ///
    /// Entries that do not parse are kept here but never take part in
    /// date computations.
    pub dates: Vec<String>,
}

impl Offering {
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.contains(theme)
    }

    /// `1 jour`, `3 jours`
    pub fn days_label(&self) -> String {
        format!("{} jour{}", self.days, if self.days > 1 { "s" } else { "" })
    }
}

/// Reasons a list of offerings does not make a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
    NoDays(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "offering '{}' is defined more than once", id),
            CatalogError::NoDays(id) => write!(f, "offering '{}' lasts 0 days", id),
        }
    }
}

/// The fixed collection of offerings, in authoring order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Offering>,
}

impl Catalog {
    /// Validate once, so that no use site has to
    pub fn new(items: Vec<Offering>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if item.days == 0 {
                return Err(CatalogError::NoDays(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn get(&self, id: &str) -> Option<&Offering> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Offering> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'c> IntoIterator for &'c Catalog {
    type Item = &'c Offering;
    type IntoIter = std::slice::Iter<'c, Offering>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
