//! Regex patterns shared by the local heuristics

use std::sync::LazyLock;

use regex::Regex;

/// `12/31/2024`, `1-5-24`, `2024-12-31`
pub static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b")
        .expect("numeric date pattern should compile")
});

/// `$1,200.50`, `300 dollars`, `75 USD`, `99 cents`
pub static MONEY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$[\d,]+\.?\d*|\b\d+\s*(?:dollars?|USD|cents?)\b")
        .expect("money amount pattern should compile")
});

/// Dollar amounts only: `$1,200.50`, `300 dollars`
pub static DOLLAR_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$[\d,]+\.?\d*|\b\d+\s*dollars?\b").expect("dollar pattern should compile")
});

/// Company names ending in a corporate suffix
pub static COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w+(?:\s+\w+)*\s+(?:Inc\.?|LLC|Corp\.?|Company|Corporation|Ltd\.?)\b")
        .expect("company pattern should compile")
});

/// Words that mark an obligation
pub const OBLIGATION_WORDS: [&str; 6] = [
    "shall",
    "must",
    "required",
    "obligation",
    "duty",
    "responsible",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dates() {
        let found: Vec<_> = NUMERIC_DATE
            .find_iter("Signed 12/31/2024, effective 2025-01-15, ref 123/45")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["12/31/2024", "2025-01-15"]);
    }

    #[test]
    fn test_money_amounts() {
        let found: Vec<_> = MONEY_AMOUNT
            .find_iter("A fee of $1,200.50 plus 300 Dollars and 75 USD")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["$1,200.50", "300 Dollars", "75 USD"]);
    }
}
