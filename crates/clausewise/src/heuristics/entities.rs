//! Regex entity extraction for legal documents.
//!
//! Each category is a fixed list of patterns applied in order; the first ten
//! distinct matches per category are kept.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{EntityBag, EntityCategory};

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").expect("date pattern should compile"),
        Regex::new(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b").expect("date pattern should compile"),
        Regex::new(&format!(r"(?i)\b(?:{MONTHS})\s+\d{{1,2}},?\s+\d{{4}}\b"))
            .expect("date pattern should compile"),
        Regex::new(&format!(
            r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\s+\d{{4}}\b"
        ))
        .expect("date pattern should compile"),
    ]
});

static MONEY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\$[\d,]+\.?\d*").expect("money pattern should compile"),
        Regex::new(r"(?i)\b\d+\s*(?:dollars?|USD|cents?|EUR|GBP)\b")
            .expect("money pattern should compile"),
        Regex::new(r"(?i)\b(?:USD|EUR|GBP)\s*[\d,]+\.?\d*\b").expect("money pattern should compile"),
    ]
});

static ORGANIZATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b\w+(?:\s+\w+)*\s+(?:Inc\.?|LLC|Corp\.?|Company|Corporation|Ltd\.?|LLP|LP)\b")
            .expect("organization pattern should compile"),
        Regex::new(r"(?i)\b(?:The\s+)?\w+(?:\s+\w+)*\s+(?:Bank|Insurance|Group|Holdings|Enterprises)\b")
            .expect("organization pattern should compile"),
    ]
});

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // City, ST
        Regex::new(r"\b\w+,\s*[A-Z]{2}\b").expect("location pattern should compile"),
        Regex::new(
            r"(?i)\b\d+\s+\w+(?:\s+\w+)*\s+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln)\b",
        )
        .expect("location pattern should compile"),
    ]
});

static CONTACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
            .expect("email pattern should compile"),
        Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone pattern should compile"),
        Regex::new(r"\(\d{3}\)\s*\d{3}[-.]?\d{4}\b").expect("phone pattern should compile"),
    ]
});

static OBLIGATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:shall|must|required to|obligated to|responsible for)\s+[^.]{10,100}")
            .expect("obligation pattern should compile"),
        Regex::new(r"(?i)(?:agrees to|undertakes to|commits to)\s+[^.]{10,100}")
            .expect("obligation pattern should compile"),
    ]
});

static PERSON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\b")
        .expect("person pattern should compile")
});

/// Legal terms reported (title-cased) when present anywhere in the text
const LEGAL_TERMS: [&str; 12] = [
    "whereas",
    "hereby",
    "covenant",
    "indemnify",
    "liability",
    "breach",
    "termination",
    "confidential",
    "proprietary",
    "intellectual property",
    "force majeure",
    "arbitration",
];

/// Capitalized phrases that look like names but are not people
const NOT_PERSONS: [&str; 8] = [
    "Legal Notice",
    "Terms Conditions",
    "Privacy Policy",
    "User Agreement",
    "United States",
    "New York",
    "Los Angeles",
    "San Francisco",
];

/// Extract categorized entities from document text
pub fn extract_entities(text: &str) -> EntityBag {
    let mut bag = EntityBag::new();

    collect(&mut bag, EntityCategory::Dates, &DATE_PATTERNS, text);
    collect(&mut bag, EntityCategory::Monetary, &MONEY_PATTERNS, text);
    collect(&mut bag, EntityCategory::Organizations, &ORGANIZATION_PATTERNS, text);
    collect(&mut bag, EntityCategory::Locations, &LOCATION_PATTERNS, text);

    let lower = text.to_lowercase();
    bag.extend(
        EntityCategory::LegalTerms,
        LEGAL_TERMS
            .iter()
            .filter(|term| lower.contains(*term))
            .map(|term| title_case(term)),
    );

    collect(&mut bag, EntityCategory::ContactInfo, &CONTACT_PATTERNS, text);

    for pattern in OBLIGATION_PATTERNS.iter() {
        bag.extend(
            EntityCategory::Obligations,
            pattern.find_iter(text).map(|m| m.as_str().trim().to_string()),
        );
    }

    bag.extend(
        EntityCategory::Persons,
        PERSON_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|name| !NOT_PERSONS.contains(name)),
    );

    bag
}

fn collect(bag: &mut EntityBag, category: EntityCategory, patterns: &[Regex], text: &str) {
    for pattern in patterns {
        bag.extend(category, pattern.find_iter(text).map(|m| m.as_str()));
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entities::MAX_ENTITIES_PER_CATEGORY;

    const SAMPLE: &str = "This is a sample legal contract between Acme Corp and John Smith. \
        Payment of $50,000 is due by December 31, 2024. \
        The Tenant shall maintain the premises in good condition at all times. \
        Notices go to legal@acme.com or 555-123-4567 at 100 Main Street, Springfield, IL.";

    #[test]
    fn test_sample_finds_money_and_date() {
        let bag = extract_entities(SAMPLE);
        assert!(bag.get(EntityCategory::Monetary).contains(&"$50,000".to_string()));
        assert!(bag
            .get(EntityCategory::Dates)
            .contains(&"December 31, 2024".to_string()));
    }

    #[test]
    fn test_sample_other_categories() {
        let bag = extract_entities(SAMPLE);
        assert!(bag.get(EntityCategory::Persons).contains(&"John Smith".to_string()));
        assert!(bag
            .get(EntityCategory::ContactInfo)
            .contains(&"legal@acme.com".to_string()));
        assert!(bag
            .get(EntityCategory::ContactInfo)
            .contains(&"555-123-4567".to_string()));
        assert!(bag
            .get(EntityCategory::Locations)
            .contains(&"Springfield, IL".to_string()));
        assert!(bag
            .get(EntityCategory::Obligations)
            .iter()
            .any(|o| o.starts_with("shall maintain the premises")));
        assert!(!bag.get(EntityCategory::Organizations).is_empty());
    }

    #[test]
    fn test_legal_terms_are_title_cased() {
        let bag = extract_entities("WHEREAS the parties agree to binding arbitration and force majeure applies.");
        let terms = bag.get(EntityCategory::LegalTerms);
        assert!(terms.contains(&"Whereas".to_string()));
        assert!(terms.contains(&"Arbitration".to_string()));
        assert!(terms.contains(&"Force Majeure".to_string()));
    }

    #[test]
    fn test_excluded_phrases_are_not_persons() {
        let bag = extract_entities("Filed in New York under the Legal Notice rules by Jane Doe.");
        let persons = bag.get(EntityCategory::Persons);
        assert!(persons.contains(&"Jane Doe".to_string()));
        assert!(!persons.contains(&"New York".to_string()));
        assert!(!persons.contains(&"Legal Notice".to_string()));
    }

    #[test]
    fn test_categories_are_capped_and_unique() {
        let text: String = (1..=30)
            .map(|i| format!("Invoice {i} totals ${i},000 due 1/{i}/2024 and again ${i},000. "))
            .collect();
        let bag = extract_entities(&text);

        for (category, values) in bag.iter() {
            assert!(values.len() <= MAX_ENTITIES_PER_CATEGORY, "{category:?} over cap");
            let mut deduped = values.to_vec();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), values.len(), "{category:?} has duplicates");
        }
        assert_eq!(bag.get(EntityCategory::Monetary).len(), MAX_ENTITIES_PER_CATEGORY);
    }

    #[test]
    fn test_empty_text_has_all_categories() {
        let bag = extract_entities("");
        assert!(bag.is_empty());
        assert_eq!(bag.iter().count(), EntityCategory::ALL.len());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("party of the first part"), "Party Of The First Part");
        assert_eq!(title_case("pursuant to"), "Pursuant To");
    }
}
