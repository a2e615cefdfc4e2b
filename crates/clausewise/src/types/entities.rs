//! Entity bag: categorized, deduplicated, capped entity strings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum entities kept per category
pub const MAX_ENTITIES_PER_CATEGORY: usize = 10;

/// Entity categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Dates,
    Monetary,
    Organizations,
    Persons,
    Locations,
    LegalTerms,
    ContactInfo,
    Obligations,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 8] = [
        Self::Dates,
        Self::Monetary,
        Self::Organizations,
        Self::Persons,
        Self::Locations,
        Self::LegalTerms,
        Self::ContactInfo,
        Self::Obligations,
    ];
}

/// Mapping from category to extracted strings.
///
/// Every category is always present. Values are unique within a category and
/// a category never holds more than [`MAX_ENTITIES_PER_CATEGORY`] values; the
/// first ones seen are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityBag {
    entries: BTreeMap<EntityCategory, Vec<String>>,
}

impl EntityBag {
    /// Create a bag with every category empty
    pub fn new() -> Self {
        Self {
            entries: EntityCategory::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
        }
    }

    /// Add a value. Returns false when it was a duplicate or the category is full.
    pub fn insert(&mut self, category: EntityCategory, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.entries.entry(category).or_default();
        if values.len() >= MAX_ENTITIES_PER_CATEGORY || values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Add several values
    pub fn extend<I, S>(&mut self, category: EntityCategory, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(category, value);
        }
    }

    /// Values for a category
    pub fn get(&self, category: EntityCategory) -> &[String] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate categories and their values
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[String])> {
        self.entries.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Total number of entities across categories
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for EntityBag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedups_and_caps() {
        let mut bag = EntityBag::new();
        assert!(bag.insert(EntityCategory::Dates, "12/31/2024"));
        assert!(!bag.insert(EntityCategory::Dates, "12/31/2024"));

        for i in 0..25 {
            bag.insert(EntityCategory::Monetary, format!("${}", i));
        }
        assert_eq!(bag.get(EntityCategory::Monetary).len(), MAX_ENTITIES_PER_CATEGORY);
        assert_eq!(bag.get(EntityCategory::Monetary)[0], "$0");
        assert_eq!(bag.get(EntityCategory::Dates).len(), 1);
    }

    #[test]
    fn test_serializes_every_category() {
        let bag = EntityBag::new();
        let json = serde_json::to_value(&bag).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert!(obj.contains_key("legal_terms"));
        assert!(obj.contains_key("contact_info"));
    }
}
