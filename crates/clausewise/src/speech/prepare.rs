//! Text preparation for roughly one minute of speech

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SpeechConfig;

/// Texts shorter than this get explanatory sentences added
const EXPLAIN_BELOW_WORDS: usize = 100;

/// Characters of the cleaned text repeated in the "key points" sentence
const KEY_POINTS_CHARS: usize = 200;

const COUNSEL_SENTENCE: &str =
    " Please consider all legal implications and consult with legal counsel if needed.";

static UNSPEAKABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s.,!?-]").expect("unspeakable character pattern should compile")
});

/// Text ready for the speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSpeech {
    pub text: String,
    pub word_count: usize,
    /// Words per minute
    pub rate: u32,
}

/// Strip markdown and symbols the engine would read aloud, collapse whitespace
pub fn clean_text(text: &str) -> String {
    let stripped = text
        .replace("**", "")
        .replace('•', "")
        .replace('*', "")
        .replace(['\n', '\r'], " ");
    let spoken = UNSPEAKABLE.replace_all(&stripped, "");
    spoken.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pad short texts and cut long ones so speech lasts about a minute
fn fit_duration(clean: &str, config: &SpeechConfig) -> String {
    let words: Vec<&str> = clean.split_whitespace().collect();

    if words.len() >= config.max_words {
        return words[..config.max_words].join(" ");
    }

    let mut extended = clean.to_string();
    if words.len() < EXPLAIN_BELOW_WORDS {
        extended.push_str(&format!(
            " This document analysis provides important insights. {clean} \
             Please review all sections carefully for complete understanding. \
             Legal documents require thorough examination of all terms and conditions. \
             Key points from this analysis: {} ",
            crate::heuristics::head_chars(clean, KEY_POINTS_CHARS)
        ));
    }

    while extended.split_whitespace().count() < config.target_words {
        extended.push_str(COUNSEL_SENTENCE);
    }

    extended.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words per minute for a text of `word_count` words
pub fn speech_rate(word_count: usize, config: &SpeechConfig) -> u32 {
    let words = u32::try_from(word_count).unwrap_or(u32::MAX);
    words.max(config.min_rate).min(config.max_rate)
}

/// Clean and size a text for speech. `None` when nothing speakable remains.
pub fn prepare_speech_text(text: &str, config: &SpeechConfig) -> Option<PreparedSpeech> {
    let clean = clean_text(text);
    if clean.is_empty() {
        return None;
    }

    let text = fit_duration(&clean, config);
    let word_count = text.split_whitespace().count();

    Some(PreparedSpeech {
        rate: speech_rate(word_count, config),
        word_count,
        text,
    })
}
