//! HTML highlighting of dates, amounts and obligation words

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::patterns::{DOLLAR_AMOUNT, NUMERIC_DATE, OBLIGATION_WORDS};

const DATE_COLOR: &str = "#90EE90";
const MONEY_COLOR: &str = "#FFB6C1";
const OBLIGATION_COLOR: &str = "#FFFF99";

static OBLIGATION_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", OBLIGATION_WORDS.join("|")))
        .expect("obligation word pattern should compile")
});

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn wrap(pattern: &Regex, text: &str, color: &str) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            format!(
                r#"<span style="background-color: {};">{}</span>"#,
                color, &caps[0]
            )
        })
        .into_owned()
}

/// Escape the text and wrap dates, dollar amounts and obligation words in colored spans
pub fn highlight_entities(text: &str) -> String {
    let escaped = escape_html(text);
    let dated = wrap(&NUMERIC_DATE, &escaped, DATE_COLOR);
    let priced = wrap(&DOLLAR_AMOUNT, &dated, MONEY_COLOR);
    wrap(&OBLIGATION_WORD, &priced, OBLIGATION_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_each_kind() {
        let html = highlight_entities("Tenant shall pay $900 by 03/01/2025.");
        assert_eq!(
            html,
            "Tenant <span style=\"background-color: #FFFF99;\">shall</span> pay \
             <span style=\"background-color: #FFB6C1;\">$900</span> by \
             <span style=\"background-color: #90EE90;\">03/01/2025</span>."
        );
    }

    #[test]
    fn test_input_markup_is_escaped() {
        let html = highlight_entities("<script>alert('x')</script> & more");
        assert!(!html.contains("<script>"));
        assert!(html.starts_with("&lt;script&gt;alert(&#39;x&#39;)"));
        assert!(html.ends_with("&amp; more"));
    }

    #[test]
    fn test_case_insensitive_obligations() {
        let html = highlight_entities("MUST comply");
        assert!(html.contains(">MUST</span>"));
    }
}
