//! Local heuristic engine
//!
//! Keyword and regex based analysis used when the hosted model is disabled,
//! unreachable, or returns low-confidence text. Everything here is pure and
//! synchronous.

mod answer;
mod classify;
mod entities;
mod highlight;
mod patterns;
mod simplify;
mod summary;

pub use answer::{answer_question, task_fallback};
pub use classify::classify;
pub use entities::extract_entities;
pub use highlight::highlight_entities;
pub use simplify::{key_clauses, replace_legal_terms, simplify_clauses, LEGAL_TERM_REPLACEMENTS};
pub use summary::{detailed_summary, key_sentences, summarize};

/// The first `chars` characters of `text`
pub(crate) fn head_chars(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_chars_respects_char_boundaries() {
        assert_eq!(head_chars("§§§§", 2), "§§");
        assert_eq!(head_chars("abc", 10), "abc");
        assert_eq!(head_chars("", 3), "");
    }
}
