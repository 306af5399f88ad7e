//! Prompt rewriting
//!
//! `rules` holds the compiled rewrite tables, `compression` applies them in
//! tier order.

pub mod compression;
pub mod rules;

// Re-export commonly used items
pub use compression::{
    normalize_whitespace, optimize, optimize_conversational, optimize_phrases, phrase_rules,
    truncate_words,
};
pub use rules::RewriteRule;
