//! Text normalization and stopword filtering

use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::HashSet;

/// NLTK's English stopword list
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "don't", "should", "should've", "now", "d",
    "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
    "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    separator_regex: Regex,
    clitic_regex: Regex,
}

impl TextProcessor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            // Commas and colons stay attached when a digit follows ("1,000", "10:30")
            separator_regex: Regex::new(r#"[;@#$%&?!()\[\]{}<>"“”]|\.\.\.|--|[:,]\d?"#)?,
            clitic_regex: Regex::new(r"(?i)^(.+?)(?:n['’]t|['’](?:s|m|d|ll|re|ve))$")?,
        })
    }

    /// Lowercase alphabetic words with stopwords removed, in text order.
    ///
    /// Words are whitespace separated after splitting off sentence punctuation.
    /// Hyphens, slashes and periods inside a word keep it whole, so `e-commerce`
    /// or `iOS/Android` are dropped as non-alphabetic rather than split, and
    /// contractions lose their clitic (`Bachelor's` gives `bachelor`).
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let separated = self.separator_regex.replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            if matched.ends_with(|c: char| c.is_ascii_digit()) {
                matched.to_string()
            } else {
                " ".to_string()
            }
        });

        separated
            .split_whitespace()
            .map(|chunk| self.word_stem(chunk).to_lowercase())
            .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
            .filter(|word| !self.stop_words.contains(word.as_str()))
            .collect()
    }

    /// The filtered token stream rejoined into a single document
    pub fn filtered_document(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    /// Strip surrounding punctuation and a trailing clitic from one chunk
    fn word_stem<'a>(&self, chunk: &'a str) -> &'a str {
        let word = chunk
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim_end_matches(|c: char| !c.is_alphanumeric() && !is_apostrophe(c));

        let stem = self
            .clitic_regex
            .captures(word)
            .and_then(|caps| caps.get(1))
            .map_or(word, |m| m.as_str());

        stem.trim_end_matches(|c: char| !c.is_alphanumeric())
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '’'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new().unwrap();
        let tokens = processor.tokenize("Rust programming language is awesome!");

        assert_eq!(tokens, vec!["rust", "programming", "language", "awesome"]);
    }

    #[test]
    fn test_non_alphabetic_tokens_dropped() {
        let processor = TextProcessor::new().unwrap();
        let tokens = processor.tokenize("5 years of Python3 and SQL, 2019-2024; don't stop");

        assert_eq!(tokens, vec!["years", "sql", "stop"]);
    }

    #[test]
    fn test_all_stopwords_yields_empty_document() {
        let processor = TextProcessor::new().unwrap();

        assert!(processor.filtered_document("It is what it is, and we were there.").is_empty());
    }

    #[test]
    fn test_compounds_kept_whole_and_dropped() {
        let processor = TextProcessor::new().unwrap();
        let tokens = processor.tokenize("Bachelor's degree in e-commerce and iOS/Android apps.");

        assert_eq!(tokens, vec!["bachelor", "degree", "apps"]);
    }

    #[test]
    fn test_clitics_and_punctuation() {
        let processor = TextProcessor::new().unwrap();
        let tokens = processor.tokenize("\"Leading\" teams' work (Kotlin), can't stop; we’re shipping...");

        assert_eq!(tokens, vec!["leading", "teams", "work", "kotlin", "ca", "stop", "shipping"]);
    }
}
