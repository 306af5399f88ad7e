use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::OptimizeError;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "tokentrim.toml";

/// How hard the rewrite rules cut. Tiers are cumulative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    Mild,
    #[default]
    Moderate,
    Aggressive,
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 3] = [Self::Mild, Self::Moderate, Self::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    /// True when this tier includes every rule of `other`
    pub fn includes(&self, other: OptimizationLevel) -> bool {
        *self >= other
    }

    /// Share of words the simulated optimizer keeps
    pub fn keep_ratio(&self) -> f64 {
        match self {
            Self::Mild => 1.0,
            Self::Moderate => 0.85,
            Self::Aggressive => 0.7,
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "mild" => Ok(Self::Mild),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => anyhow::bail!("Unknown optimization level: {other}"),
        }
    }
}

/// Which pipeline handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationMethod {
    #[default]
    RuleBased,
    AiPowered,
}

impl OptimizationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::AiPowered => "ai-powered",
        }
    }
}

impl fmt::Display for OptimizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "rule-based" => Ok(Self::RuleBased),
            "ai-powered" => Ok(Self::AiPowered),
            other => anyhow::bail!("Unknown optimization method: {other}"),
        }
    }
}

/// User preferences consumed by the optimizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// When false, requests pass through untouched
    pub enabled: bool,
    pub level: OptimizationLevel,
    pub method: OptimizationMethod,
    /// API credential for the ai-powered method
    pub credential: String,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: OptimizationLevel::Moderate,
            method: OptimizationMethod::RuleBased,
            credential: String::new(),
        }
    }
}

impl TrimConfig {
    /// Checks that the selected method can actually run.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.method == OptimizationMethod::AiPowered && self.credential.is_empty() {
            return Err(OptimizeError::InvalidConfiguration);
        }
        Ok(())
    }

    /// Reads a config from an explicit TOML file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Per-user location, e.g. `~/.config/tokentrim/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tokentrim").join("config.toml"))
    }

    /// Attempts `tokentrim.toml` in the current directory, then the per-user file.
    pub fn load_from_file() -> Option<Self> {
        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
            .chain(Self::user_config_path());

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded config");
                    return Some(config);
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config"),
            }
        }
        None
    }
}
