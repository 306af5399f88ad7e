use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::ai::ExternalOptimizer;
use crate::config::{OptimizationLevel, OptimizationMethod, TrimConfig};
use crate::core::{OptimizeRequest, OptimizeResponse, TransformationResult};
use crate::error::{OptimizeError, Result};
use crate::utils::compress::{normalize_whitespace, optimize};

/// Main entry point for the integration layer.
///
/// Never fails: every error becomes a `success: false` response and the
/// caller keeps its original text.
pub async fn handle_request(
    request: &OptimizeRequest,
    external: &dyn ExternalOptimizer,
) -> OptimizeResponse {
    match run_request(request, external).await {
        Ok(optimized) => OptimizeResponse::ok(optimized),
        Err(e) => {
            warn!(error = %e, "Optimization failed");
            OptimizeResponse::failure(e)
        }
    }
}

/// Like [`handle_request`], but honours the `enabled` switch first.
pub async fn handle_with_config(
    text: &str,
    config: &TrimConfig,
    external: &dyn ExternalOptimizer,
) -> OptimizeResponse {
    if !config.enabled {
        debug!("Optimizer disabled, passing text through");
        return OptimizeResponse::ok(text.to_string());
    }
    handle_request(&OptimizeRequest::from_config(text, config), external).await
}

/// Runs the request and attaches token estimates to the result.
pub async fn transform(
    request: &OptimizeRequest,
    external: &dyn ExternalOptimizer,
) -> Result<TransformationResult> {
    let optimized = run_request(request, external).await?;
    let result = TransformationResult::new(&request.text, optimized);
    info!(
        original_tokens = result.original_token_estimate,
        optimized_tokens = result.optimized_token_estimate,
        saved = result.tokens_saved(),
        "Prompt optimized"
    );
    Ok(result)
}

/// Rule-based optimization of many independent prompts in parallel.
pub fn optimize_batch(texts: &[String], level: OptimizationLevel) -> Vec<String> {
    texts.par_iter().map(|text| optimize(text, level)).collect()
}

async fn run_request(request: &OptimizeRequest, external: &dyn ExternalOptimizer) -> Result<String> {
    match request.method {
        Some(OptimizationMethod::RuleBased) => {
            debug!(level = ?request.level, "Rule-based optimization");
            Ok(rule_based(&request.text, request.level))
        }
        Some(OptimizationMethod::AiPowered) if request.has_credential() => {
            debug!(optimizer = external.name(), level = ?request.level, "External optimization");
            external.optimize(&request.text, request.level).await
        }
        _ => Err(OptimizeError::InvalidConfiguration),
    }
}

fn rule_based(text: &str, level: Option<OptimizationLevel>) -> String {
    match level {
        Some(level) => optimize(text, level),
        None => normalize_whitespace(text),
    }
}
