use anyhow::Result;
use serde::{Deserialize, Serialize};
use tiktoken_rs::cl100k_base;

/// Fast token estimation: ~4 characters per token, rounded up
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Accurate token count using tiktoken (slower but precise)
pub fn count_tokens(text: &str) -> Result<usize> {
    let bpe = cl100k_base()?;
    let tokens = bpe.encode_with_special_tokens(text);
    Ok(tokens.len())
}

/// Whitespace-delimited word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The "tokens saved" preview shown after an optimization.
///
/// Measured in words rather than estimated tokens, so the percentage
/// reads the same way users count their own prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub original_words: usize,
    pub optimized_words: usize,
    /// Negative when the rewrite added words
    pub words_saved: i64,
    pub percent_reduction: i64,
}

impl SavingsReport {
    pub fn compute(original: &str, optimized: &str) -> Self {
        let original_words = count_words(original);
        let optimized_words = count_words(optimized);
        let words_saved = original_words as i64 - optimized_words as i64;
        let percent_reduction = if original_words == 0 {
            0
        } else {
            (words_saved as f64 / original_words as f64 * 100.0).round() as i64
        };

        Self {
            original_words,
            optimized_words,
            words_saved,
            percent_reduction,
        }
    }
}
