//! Core types shared across tokentrim modules

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{OptimizationLevel, OptimizationMethod, TrimConfig};
use crate::utils::tokens::estimate_tokens;

/// An optimization request as sent by the integration layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub text: String,
    /// `None` when the sender named a level nobody recognises
    #[serde(default = "default_level", deserialize_with = "lenient")]
    pub level: Option<OptimizationLevel>,
    /// `None` when the sender named a method nobody recognises
    #[serde(default = "default_method", deserialize_with = "lenient")]
    pub method: Option<OptimizationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

fn default_level() -> Option<OptimizationLevel> {
    Some(OptimizationLevel::default())
}

fn default_method() -> Option<OptimizationMethod> {
    Some(OptimizationMethod::default())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

impl OptimizeRequest {
    pub fn new(text: impl Into<String>, level: OptimizationLevel, method: OptimizationMethod) -> Self {
        Self {
            text: text.into(),
            level: Some(level),
            method: Some(method),
            credential: None,
        }
    }

    /// Builds a request carrying the user's current preferences
    pub fn from_config(text: impl Into<String>, config: &TrimConfig) -> Self {
        Self {
            text: text.into(),
            level: Some(config.level),
            method: Some(config.method),
            credential: Some(config.credential.clone()),
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.credential.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Reply to an [`OptimizeRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizeResponse {
    pub fn ok(optimized_text: String) -> Self {
        Self {
            success: true,
            optimized_text: Some(optimized_text),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            optimized_text: None,
            error: Some(error.to_string()),
        }
    }
}

/// Optimized text together with before/after token estimates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationResult {
    pub optimized_text: String,
    pub original_token_estimate: usize,
    pub optimized_token_estimate: usize,
}

impl TransformationResult {
    pub fn new(original: &str, optimized_text: String) -> Self {
        Self {
            original_token_estimate: estimate_tokens(original),
            optimized_token_estimate: estimate_tokens(&optimized_text),
            optimized_text,
        }
    }

    /// Negative when the rewrite grew the text
    pub fn tokens_saved(&self) -> i64 {
        self.original_token_estimate as i64 - self.optimized_token_estimate as i64
    }
}
