//! Keyword-routed question answering over document text

use crate::providers::InferenceTask;

use super::classify::classify;
use super::patterns::{COMPANY, DOLLAR_AMOUNT, NUMERIC_DATE, OBLIGATION_WORDS};
use super::summary::summarize_prompt;

/// What a question is about, from its keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Overview,
    Dates,
    Money,
    Parties,
    Obligations,
    Terms,
    Other,
}

const ROUTES: [(Topic, &[&str]); 6] = [
    (Topic::Overview, &["summary", "summarize", "what is", "about", "overview"]),
    (Topic::Dates, &["date", "when", "time", "deadline", "expir"]),
    (
        Topic::Money,
        &["money", "cost", "price", "fee", "payment", "amount", "dollar"],
    ),
    (
        Topic::Parties,
        &["who", "party", "parties", "person", "company", "organization"],
    ),
    (
        Topic::Obligations,
        &["obligation", "duty", "responsibility", "must", "shall", "require"],
    ),
    (Topic::Terms, &["term", "condition", "clause", "provision"]),
];

fn topic(question_lower: &str) -> Topic {
    ROUTES
        .iter()
        .find(|(_, words)| words.iter().any(|w| question_lower.contains(w)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Other)
}

fn first_sentence_with<'a>(context: &'a str, words: &[&str]) -> Option<&'a str> {
    context
        .split('.')
        .find(|sentence| {
            let lower = sentence.to_lowercase();
            words.iter().any(|w| lower.contains(w))
        })
        .map(str::trim)
}

fn first_matches<'a>(pattern: &regex::Regex, context: &'a str) -> Vec<&'a str> {
    pattern.find_iter(context).map(|m| m.as_str()).take(3).collect()
}

/// Answer a question from the document text without a model
pub fn answer_question(question: &str, context: &str) -> String {
    let question_lower = question.to_lowercase();

    match topic(&question_lower) {
        Topic::Overview => {
            let lead: Vec<&str> = context.split('.').take(3).collect();
            format!(
                "This appears to be a {}. Key points: {}.",
                classify(context),
                lead.join(". ")
            )
        }
        Topic::Dates => {
            let dates = first_matches(&NUMERIC_DATE, context);
            if dates.is_empty() {
                "I couldn't find specific dates in the document. The document may use relative \
                 time references."
                    .to_string()
            } else {
                format!(
                    "I found these important dates in the document: {}. Please review the context \
                     around these dates for specific meanings.",
                    dates.join(", ")
                )
            }
        }
        Topic::Money => {
            let amounts = first_matches(&DOLLAR_AMOUNT, context);
            if amounts.is_empty() {
                "I couldn't find specific monetary amounts. The document may contain financial \
                 terms that need legal interpretation."
                    .to_string()
            } else {
                format!(
                    "Financial information found: {}. Please review the document for payment \
                     terms and conditions.",
                    amounts.join(", ")
                )
            }
        }
        Topic::Parties => {
            let companies = first_matches(&COMPANY, context);
            if companies.is_empty() {
                "The document appears to involve multiple parties. Please look for proper names \
                 and organizational references."
                    .to_string()
            } else {
                format!(
                    "Organizations mentioned: {}. The document involves these entities as parties \
                     to the agreement.",
                    companies.join(", ")
                )
            }
        }
        Topic::Obligations => match first_sentence_with(context, &OBLIGATION_WORDS) {
            Some(sentence) => format!(
                "Key obligations found: {}. Please review all obligation clauses carefully.",
                sentence
            ),
            None => "No specific obligations clearly identified. Please review the document for \
                     terms like 'shall', 'must', or 'required'."
                .to_string(),
        },
        Topic::Terms => match first_sentence_with(
            context,
            &["term", "condition", "provision", "clause", "agreement"],
        ) {
            Some(sentence) => format!(
                "Relevant terms found: {}. Please review the complete terms and conditions section.",
                sentence
            ),
            None => "Please refer to the terms and conditions section of the document for \
                     specific provisions."
                .to_string(),
        },
        Topic::Other => {
            let words: Vec<&str> = question_lower
                .split_whitespace()
                .filter(|w| w.chars().count() > 3)
                .collect();

            let relevant = context.split('.').find(|sentence| {
                let lower = sentence.to_lowercase();
                words.iter().filter(|w| lower.contains(*w)).count() >= 2
            });

            match relevant {
                Some(sentence) => format!(
                    "Based on your question, I found: {}. Please review this section for \
                     complete context.",
                    sentence.trim()
                ),
                None => format!(
                    "I understand you're asking about '{}'. Please try asking about specific \
                     terms, dates, amounts, parties, or obligations in the document.",
                    question
                ),
            }
        }
    }
}

/// Local result for a task whose remote call produced nothing
pub fn task_fallback(task: InferenceTask, prompt: &str) -> String {
    match task {
        InferenceTask::Summarization => summarize_prompt(prompt),
        InferenceTask::QuestionAnswering => {
            let lower = prompt.to_lowercase();
            let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

            if has(&["value", "amount", "cost", "price"]) {
                "Please refer to the financial terms section of the document for specific \
                 amounts and values."
            } else if has(&["party", "parties", "who", "company"]) {
                "Please check the document header and signature sections for information about \
                 the contracting parties."
            } else if has(&["date", "when", "deadline", "term"]) {
                "Please review the document for specific dates, deadlines, and term information."
            } else {
                "I can help you analyze this legal document. Please ask specific questions about \
                 parties, dates, amounts, or terms."
            }
            .to_string()
        }
        InferenceTask::DetailedAnalysis => format!(
            "Local processing completed for {}. Please review the document manually for \
             detailed analysis.",
            task
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEASE: &str = "This Lease Agreement is made on 01/01/2024 between Oak Properties LLC and \
        the Tenant. The Tenant shall pay $1,500 per month. The lease term is twelve months. \
        Pets are allowed with written approval from management";

    #[test]
    fn test_overview_question() {
        let answer = answer_question("What is this document about?", LEASE);
        assert!(answer.starts_with("This appears to be a Lease Agreement (Confidence:"));
        assert!(answer.contains("Key points: This Lease Agreement is made on 01/01/2024"));
    }

    #[test]
    fn test_date_question() {
        assert_eq!(
            answer_question("When does it start?", LEASE),
            "I found these important dates in the document: 01/01/2024. Please review the \
             context around these dates for specific meanings."
        );
        assert!(answer_question("Any deadline?", "No dates here")
            .starts_with("I couldn't find specific dates"));
    }

    #[test]
    fn test_money_question() {
        assert!(answer_question("How much is the payment?", LEASE)
            .starts_with("Financial information found: $1,500."));
    }

    #[test]
    fn test_party_question() {
        let answer = answer_question("Who are the parties?", LEASE);
        assert!(answer.starts_with("Organizations mentioned: "));
        assert!(answer.contains("Oak Properties LLC"));
    }

    #[test]
    fn test_obligation_question() {
        assert_eq!(
            answer_question("What duty does the renter have?", "Rent is due. The Tenant shall keep it clean."),
            "Key obligations found: The Tenant shall keep it clean. Please review all obligation \
             clauses carefully."
        );
    }

    #[test]
    fn test_keyword_overlap_search() {
        let answer = answer_question("Are pets allowed here?", LEASE);
        assert_eq!(
            answer,
            "Based on your question, I found: Pets are allowed with written approval from \
             management. Please review this section for complete context."
        );

        let answer = answer_question("Any zebras?", LEASE);
        assert!(answer.starts_with("I understand you're asking about 'Any zebras?'"));
    }

    #[test]
    fn test_task_fallbacks() {
        assert_eq!(
            task_fallback(InferenceTask::Summarization, "First. Second"),
            "Document Summary: First. Second."
        );
        assert!(task_fallback(InferenceTask::QuestionAnswering, "What is the price?")
            .starts_with("Please refer to the financial terms"));
        assert!(task_fallback(InferenceTask::DetailedAnalysis, "anything")
            .starts_with("Local processing completed for detailed_analysis."));
    }
}
