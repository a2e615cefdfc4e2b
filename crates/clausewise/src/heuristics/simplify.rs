//! Plain-language rewriting and key clause extraction

use super::entities::title_case;

/// Legal phrases and their plain replacements, applied in this order
pub const LEGAL_TERM_REPLACEMENTS: [(&str, &str); 14] = [
    ("whereas", "while"),
    ("hereby", "by this document"),
    ("shall", "must"),
    ("covenant", "promise"),
    ("indemnify", "protect from loss"),
    ("notwithstanding", "despite"),
    ("pursuant to", "according to"),
    ("heretofore", "before this"),
    ("hereafter", "after this"),
    ("aforementioned", "mentioned above"),
    ("party of the first part", "first party"),
    ("party of the second part", "second party"),
    ("in consideration of", "in exchange for"),
    ("force majeure", "uncontrollable circumstances"),
];

const SIMPLIFIED_MAX_CHARS: usize = 800;
const LONG_SENTENCE_CHARS: usize = 100;

const CLAUSE_KEYWORDS: [&str; 19] = [
    "shall",
    "must",
    "required",
    "obligation",
    "responsible",
    "agree",
    "covenant",
    "warrant",
    "represent",
    "undertake",
    "payment",
    "fee",
    "compensation",
    "penalty",
    "damages",
    "termination",
    "breach",
    "default",
    "violation",
];

/// Replace legal phrases in lowercase, Title Case and UPPERCASE forms
pub fn replace_legal_terms(text: &str) -> String {
    let mut out = text.to_string();
    for (legal, plain) in LEGAL_TERM_REPLACEMENTS {
        out = out.replace(legal, plain);
        out = out.replace(&title_case(legal), &title_case(plain));
        out = out.replace(&legal.to_uppercase(), &plain.to_uppercase());
    }
    out
}

/// Plain-language version of the first ten sentences
pub fn simplify_clauses(text: &str) -> String {
    let replaced = replace_legal_terms(text);

    let sentences: Vec<String> = replaced
        .split('.')
        .take(10)
        .map(|sentence| {
            let sentence = sentence.trim();
            if sentence.chars().count() > LONG_SENTENCE_CHARS {
                sentence.replace(", and ", ". ").replace(", or ", ". ")
            } else {
                sentence.to_string()
            }
        })
        .collect();

    let joined = sentences.join(". ");
    let truncated = super::head_chars(&joined, SIMPLIFIED_MAX_CHARS);
    let ellipsis = if truncated.len() < joined.len() { "..." } else { "" };

    format!("Simplified Legal Text: {}{}", truncated, ellipsis)
}

/// Sentences carrying obligations, payments or breach terms
pub fn key_clauses(text: &str) -> String {
    let clauses: Vec<&str> = text
        .split('.')
        .take(20)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 20)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            CLAUSE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .take(5)
        .collect();

    if clauses.is_empty() {
        "Document contains standard legal language with obligations, agreements, and terms \
         requiring review by legal counsel."
            .to_string()
    } else {
        format!("Key clauses identified: {}", clauses.join(" | "))
    }
}
