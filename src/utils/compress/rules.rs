//! Rewrite rule tables
//!
//! Every pattern is compiled once. Phrases are matched case-insensitively
//! and literally, so internal whitespace must appear exactly as written.

use lazy_static::lazy_static;
use regex::Regex;

/// A find-and-replace applied to every non-overlapping match
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    /// Phrase wrapped in word boundaries
    pub fn word(phrase: &str, replacement: &'static str) -> Self {
        Self::compile(&format!(r"\b(?:{})\b", regex::escape(phrase)), replacement)
    }

    /// Phrase matched anywhere, including inside longer words
    pub fn literal(phrase: &str, replacement: &'static str) -> Self {
        Self::compile(&regex::escape(phrase), replacement)
    }

    /// Any of `phrases` as whole words, deleted
    pub fn remove_words(phrases: &[&str]) -> Self {
        let alternation = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        Self::compile(&format!(r"\b(?:{alternation})\b"), "")
    }

    fn compile(pattern: &str, replacement: &'static str) -> Self {
        let pattern = Regex::new(&format!("(?i){pattern}")).unwrap();
        Self {
            pattern,
            replacement,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &'static str {
        self.replacement
    }

    pub fn is_removal(&self) -> bool {
        self.replacement.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn apply(&self, text: &str) -> String {
        // NoExpand: replacements such as "note:" are plain text, not templates
        self.pattern
            .replace_all(text, regex::NoExpand(self.replacement))
            .into_owned()
    }
}

pub const FILLER_WORDS: &[&str] = &[
    "basically",
    "actually",
    "literally",
    "very",
    "really",
    "just",
    "that is",
    "you know",
    "like",
];

pub const PLEASANTRIES: &[&str] = &["hello", "hi there", "thanks in advance", "thank you"];

pub const AI_DISCLAIMERS: &[&str] = &["As an AI language model", "As an AI assistant"];

lazy_static! {
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Conversational tier
    pub static ref POLITE_REQUESTS: Vec<RewriteRule> = vec![
        RewriteRule::literal("I would like you to", "Please"),
        RewriteRule::literal("Could you please", "Please"),
    ];
    pub static ref DIRECTIVES: Vec<RewriteRule> = vec![
        RewriteRule::literal("I want an explanation of", "Explain"),
        RewriteRule::literal("Can you explain", "Explain"),
        RewriteRule::literal("I need you to provide", "Provide"),
    ];
    pub static ref FILLERS: RewriteRule = RewriteRule::remove_words(FILLER_WORDS);
    pub static ref PLEASANTRY_REMOVAL: RewriteRule = RewriteRule::remove_words(PLEASANTRIES);

    // Phrase tier
    pub static ref OPENERS: Vec<RewriteRule> = vec![
        RewriteRule::literal("I'm writing to you to ask about", "Regarding"),
        RewriteRule::literal("I was wondering if you could", "Please"),
    ];
    pub static ref MILD_PHRASES: Vec<RewriteRule> = vec![
        RewriteRule::word("in order to", "to"),
        RewriteRule::word("due to the fact that", "because"),
    ];
    pub static ref MODERATE_PHRASES: Vec<RewriteRule> = vec![
        RewriteRule::word("at this point in time", "now"),
        RewriteRule::word("in the event that", "if"),
        RewriteRule::word("on a regular basis", "regularly"),
        // Passive to active, simplified
        RewriteRule::word("is being done by", "does"),
        RewriteRule::word("was conducted by", "conducted"),
    ];
    pub static ref AGGRESSIVE_PHRASES: Vec<RewriteRule> = vec![
        RewriteRule::word("in the near future", "soon"),
        RewriteRule::word("it is important to note that", "note:"),
        RewriteRule::word("for the purpose of", "for"),
        RewriteRule::word("Can you tell me how to", "How to"),
        RewriteRule::word("I'd like to know more about", "Explain"),
    ];
    pub static ref DISCLAIMER_REMOVAL: RewriteRule = RewriteRule::remove_words(AI_DISCLAIMERS);
}
