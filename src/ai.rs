//! External optimizer seam
//!
//! The ai-powered method goes through [`ExternalOptimizer`] so that an
//! API-backed implementation can replace [`SimulatedOptimizer`] without the
//! request handler noticing.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::OptimizationLevel;
use crate::error::Result;
use crate::utils::compress::{normalize_whitespace, optimize_conversational, truncate_words};

/// Delay the simulated optimizer waits before answering
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(300);

#[async_trait]
pub trait ExternalOptimizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// `level` is `None` when the request named no recognised tier.
    async fn optimize(&self, text: &str, level: Option<OptimizationLevel>) -> Result<String>;
}

/// Stands in for a remote model: waits, runs the conversational rules, then
/// drops trailing words according to the level. Without a level it only
/// normalizes whitespace.
#[derive(Debug, Clone)]
pub struct SimulatedOptimizer {
    latency: Duration,
}

impl SimulatedOptimizer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedOptimizer {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

#[async_trait]
impl ExternalOptimizer for SimulatedOptimizer {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn optimize(&self, text: &str, level: Option<OptimizationLevel>) -> Result<String> {
        tokio::time::sleep(self.latency).await;

        let Some(level) = level else {
            return Ok(normalize_whitespace(text));
        };
        let optimized = optimize_conversational(text, level);
        let truncated = truncate_words(&optimized, level.keep_ratio());
        debug!(
            %level,
            words_in = optimized.split_whitespace().count(),
            words_out = truncated.split_whitespace().count(),
            "Simulated optimization done"
        );
        Ok(truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    #[tokio::test]
    async fn test_moderate_keeps_85_percent() {
        let optimizer = SimulatedOptimizer::new(Duration::from_millis(1));
        let out = optimizer
            .optimize(TEN_WORDS, Some(OptimizationLevel::Moderate))
            .await
            .unwrap();
        assert_eq!(out, "one two three four five six seven eight nine");
    }

    #[tokio::test]
    async fn test_aggressive_keeps_70_percent() {
        let optimizer = SimulatedOptimizer::new(Duration::from_millis(1));
        let out = optimizer
            .optimize(TEN_WORDS, Some(OptimizationLevel::Aggressive))
            .await
            .unwrap();
        assert_eq!(out.split(' ').count(), 7);
    }

    #[tokio::test]
    async fn test_mild_keeps_everything() {
        let optimizer = SimulatedOptimizer::new(Duration::ZERO);
        let out = optimizer
            .optimize("  one   two in order to three ", Some(OptimizationLevel::Mild))
            .await
            .unwrap();
        assert_eq!(out, "one two in order to three");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_latency() {
        let optimizer = SimulatedOptimizer::default();
        let start = tokio::time::Instant::now();
        optimizer
            .optimize(TEN_WORDS, Some(OptimizationLevel::Mild))
            .await
            .unwrap();
        assert!(start.elapsed() >= SIMULATED_LATENCY);
    }

    #[tokio::test]
    async fn test_disclaimers_are_left_to_the_phrase_tier() {
        let optimizer = SimulatedOptimizer::new(Duration::ZERO);
        let out = optimizer
            .optimize("As an AI assistant you help", Some(OptimizationLevel::Aggressive))
            .await
            .unwrap();
        // six words, ceil(6 * 0.7) kept
        assert_eq!(out, "As an AI assistant you");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_level_waits_then_normalizes() {
        let optimizer = SimulatedOptimizer::default();
        let start = tokio::time::Instant::now();
        let out = optimizer
            .optimize("  just   in order to  ", None)
            .await
            .unwrap();
        assert!(start.elapsed() >= SIMULATED_LATENCY);
        assert_eq!(out, "just in order to");
    }

    #[tokio::test]
    async fn test_fillers_removed_before_truncation() {
        let optimizer = SimulatedOptimizer::new(Duration::ZERO);
        let out = optimizer
            .optimize("just really one two", Some(OptimizationLevel::Moderate))
            .await
            .unwrap();
        assert_eq!(out, "one two");
    }
}
