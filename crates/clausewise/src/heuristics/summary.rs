//! Extractive and structured summaries

use super::patterns::{MONEY_AMOUNT, NUMERIC_DATE};
use super::head_chars;

/// Words that mark a sentence worth sending to the summarization model
const SUMMARY_KEYWORDS: [&str; 8] = [
    "contract",
    "agreement",
    "party",
    "whereas",
    "hereby",
    "shall",
    "obligations",
    "terms",
];

/// Characters used when no key sentence is found
const SUMMARY_SOURCE_CHARS: usize = 1500;

/// First five `". "` segments of the text
fn leading_segments(text: &str) -> String {
    let segments: Vec<&str> = text.split(". ").take(5).collect();
    format!("{}.", segments.join(". "))
}

/// Extractive fallback summary
pub fn summarize(text: &str) -> String {
    format!("Document Overview: {}", leading_segments(text))
}

/// Extractive summary of an arbitrary prompt, used when a summarization call fails
pub(crate) fn summarize_prompt(prompt: &str) -> String {
    format!("Document Summary: {}", leading_segments(prompt))
}

/// Legal sentences from the start of the document, or its first 1500 characters
pub fn key_sentences(text: &str) -> String {
    let key: Vec<&str> = text
        .split('.')
        .take(20)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            SUMMARY_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::trim)
        .take(5)
        .collect();

    if key.is_empty() {
        head_chars(text, SUMMARY_SOURCE_CHARS).to_string()
    } else {
        key.join(". ")
    }
}

/// Structured overview: size, key points, dates and amounts
pub fn detailed_summary(text: &str) -> String {
    let word_count = text.split_whitespace().count();
    let sentence_count = text.split('.').count();

    let key_points: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > 50)
        .take(3)
        .filter_map(|paragraph| {
            let first = paragraph.split('.').next().unwrap_or("").trim();
            (first.chars().count() > 20).then_some(first)
        })
        .take(5)
        .collect();

    let dates: Vec<&str> = NUMERIC_DATE.find_iter(text).map(|m| m.as_str()).take(5).collect();
    let amounts: Vec<&str> = MONEY_AMOUNT.find_iter(text).map(|m| m.as_str()).take(5).collect();

    let mut out = vec![
        "**Document Overview:**".to_string(),
        format!(
            "• Document contains {} words, {} sentences",
            word_count, sentence_count
        ),
        String::new(),
        "**Key Points:**".to_string(),
    ];
    out.extend(key_points.iter().map(|p| format!("• {}", p)));

    out.push(String::new());
    out.push("**Important Dates:**".to_string());
    if dates.is_empty() {
        out.push("• No specific dates found".to_string());
    } else {
        out.extend(dates.iter().map(|d| format!("• {}", d)));
    }

    out.push(String::new());
    out.push("**Financial Information:**".to_string());
    if amounts.is_empty() {
        out.push("• No monetary values found".to_string());
    } else {
        out.extend(amounts.iter().map(|a| format!("• {}", a)));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_takes_five_segments() {
        let text = "One. Two. Three. Four. Five. Six. Seven";
        assert_eq!(summarize(text), "Document Overview: One. Two. Three. Four. Five.");
        assert_eq!(summarize("Short text"), "Document Overview: Short text.");
    }

    #[test]
    fn test_key_sentences_prefers_legal_language() {
        let text = "Welcome. The parties enter this Agreement. It is sunny. The tenant shall pay rent.";
        assert_eq!(
            key_sentences(text),
            "The parties enter this Agreement. The tenant shall pay rent"
        );
    }

    #[test]
    fn test_key_sentences_falls_back_to_head() {
        let text = "a".repeat(2000);
        assert_eq!(key_sentences(&text).len(), 1500);
    }

    #[test]
    fn test_detailed_summary_sections() {
        let text = "This Services Agreement is entered into by Acme Corp and Beta LLC on 01/15/2024.\n\
                    The client will pay $12,500 for the deliverables described below in Schedule A.\n\
                    short line";
        let summary = detailed_summary(text);

        assert!(summary.starts_with("**Document Overview:**"));
        assert!(summary.contains("• This Services Agreement is entered into by Acme Corp and Beta LLC on 01/15/2024"));
        assert!(summary.contains("**Important Dates:**\n• 01/15/2024"));
        assert!(summary.contains("**Financial Information:**\n• $12,500"));
    }

    #[test]
    fn test_detailed_summary_without_dates_or_money() {
        let summary = detailed_summary("Nothing to see here");
        assert!(summary.contains("• Document contains 4 words, 1 sentences"));
        assert!(summary.contains("• No specific dates found"));
        assert!(summary.contains("• No monetary values found"));
    }
}
