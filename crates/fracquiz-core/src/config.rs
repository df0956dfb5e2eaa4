//! Quiz configuration: question pools, thresholds, grading and policy.
//!
//! Loaded from TOML; every field has a default so an empty file is a valid
//! configuration equal to [`QuizConfig::default`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Level;
use crate::rational::Rational;

/// What happens to the current question after a wrong answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// Only a correct answer moves on; a wrong one retries the same question.
    #[default]
    OnCorrect,
    /// A wrong answer also runs the level-up check and draws a new question.
    /// The score still only moves on correct answers.
    Always,
}

impl std::str::FromStr for AdvancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on_correct" | "on-correct" => Ok(AdvancePolicy::OnCorrect),
            "always" => Ok(AdvancePolicy::Always),
            other => Err(format!("unknown advance policy: {other}")),
        }
    }
}

/// The decimals and fractions a level asks about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPool {
    /// Decimals shown in "to Fraction" questions.
    #[serde(default)]
    pub decimals: Vec<f64>,
    /// Fractions shown in "to Decimal" questions.
    #[serde(default)]
    pub fractions: Vec<Rational>,
}

impl LevelPool {
    pub fn is_empty(&self) -> bool {
        self.decimals.is_empty() && self.fractions.is_empty()
    }
}

/// Pools for all three levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pools {
    #[serde(default = "default_level1")]
    pub level1: LevelPool,
    #[serde(default = "default_level2")]
    pub level2: LevelPool,
    #[serde(default = "default_level3")]
    pub level3: LevelPool,
}

impl Pools {
    pub fn get(&self, level: Level) -> &LevelPool {
        match level {
            Level::One => &self.level1,
            Level::Two => &self.level2,
            Level::Three => &self.level3,
        }
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self {
            level1: default_level1(),
            level2: default_level2(),
            level3: default_level3(),
        }
    }
}

fn fractions(pairs: &[(i64, i64)]) -> Vec<Rational> {
    pairs
        .iter()
        .filter_map(|&(n, d)| Rational::new(n, d).ok())
        .collect()
}

fn default_level1() -> LevelPool {
    LevelPool {
        decimals: vec![0.1, 0.2, 0.25, 0.5, 0.75],
        fractions: fractions(&[(1, 10), (3, 10), (1, 4), (1, 2), (3, 4)]),
    }
}

fn default_level2() -> LevelPool {
    LevelPool {
        decimals: Vec::new(),
        fractions: fractions(&[(2, 5), (3, 8), (4, 5), (7, 10), (11, 20)]),
    }
}

fn default_level3() -> LevelPool {
    LevelPool {
        decimals: vec![0.375, 0.625, 0.875],
        fractions: Vec::new(),
    }
}

/// Cumulative scores at which the level goes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Score that moves level 1 to level 2.
    #[serde(default = "default_level_two_at")]
    pub level_two_at: u32,
    /// Score that moves level 2 to level 3.
    #[serde(default = "default_level_three_at")]
    pub level_three_at: u32,
}

fn default_level_two_at() -> u32 {
    5
}
fn default_level_three_at() -> u32 {
    12
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level_two_at: default_level_two_at(),
            level_three_at: default_level_three_at(),
        }
    }
}

/// How answers are compared and how decimals are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grading {
    /// Largest absolute difference (exclusive) still graded correct.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Decimal places kept when a fraction becomes a decimal answer.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Denominator bound for decimal-to-fraction conversion.
    #[serde(default = "default_max_denominator")]
    pub max_denominator: u32,
    /// Accept a decimal where a fraction is expected and the reverse.
    #[serde(default)]
    pub accept_cross_format: bool,
}

fn default_tolerance() -> f64 {
    0.01
}
fn default_decimal_places() -> u32 {
    3
}
fn default_max_denominator() -> u32 {
    1_000_000
}

impl Default for Grading {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            decimal_places: default_decimal_places(),
            max_denominator: default_max_denominator(),
            accept_cross_format: false,
        }
    }
}

/// Top-level fracquiz configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// What a wrong answer does to the current question.
    #[serde(default)]
    pub advance: AdvancePolicy,
    #[serde(default)]
    pub progression: Progression,
    #[serde(default)]
    pub grading: Grading,
    #[serde(default)]
    pub pools: Pools,
}

/// Parse a TOML string into a `QuizConfig`.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<QuizConfig> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `fracquiz.toml` in the current directory
/// 2. `~/.config/fracquiz/config.toml`
///
/// Environment variable overrides: `FRACQUIZ_ADVANCE_POLICY`,
/// `FRACQUIZ_CROSS_FORMAT`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fracquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content, &path)?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizConfig) {
    if let Ok(value) = std::env::var("FRACQUIZ_ADVANCE_POLICY") {
        match value.parse() {
            Ok(policy) => config.advance = policy,
            Err(e) => tracing::warn!("ignoring FRACQUIZ_ADVANCE_POLICY: {e}"),
        }
    }

    if let Ok(value) = std::env::var("FRACQUIZ_CROSS_FORMAT") {
        match value.trim().parse::<bool>() {
            Ok(flag) => config.grading.accept_cross_format = flag,
            Err(_) => tracing::warn!("ignoring FRACQUIZ_CROSS_FORMAT: expected true or false"),
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fracquiz"))
}

/// A warning from config validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The level the warning is about (if applicable).
    pub level: Option<Level>,
    /// Warning message.
    pub message: String,
}

/// Validate a config for common issues.
///
/// Warnings do not stop the engine, except an empty level, which
/// [`crate::engine::QuizEngine::new`] refuses outright.
pub fn validate_config(config: &QuizConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let grading = &config.grading;

    for level in Level::ALL {
        let pool = config.pools.get(level);
        let warn = |message: String| ValidationWarning {
            level: Some(level),
            message,
        };

        if pool.is_empty() {
            warnings.push(warn("pool is empty".into()));
            continue;
        }

        let mut seen_decimals = HashSet::new();
        for &decimal in &pool.decimals {
            if !seen_decimals.insert(decimal.to_bits()) {
                warnings.push(warn(format!("duplicate decimal: {decimal}")));
            }
            match Rational::from_f64(decimal, grading.max_denominator) {
                Ok(fraction) => {
                    let back = fraction.round_to(grading.decimal_places);
                    if (back - decimal).abs() > 0.001 {
                        warnings.push(warn(format!(
                            "decimal {decimal} becomes {fraction} which rounds back to {back}"
                        )));
                    }
                }
                Err(e) => warnings.push(warn(format!("decimal {decimal}: {e}"))),
            }
        }

        let mut seen_fractions = HashSet::new();
        for fraction in &pool.fractions {
            if !seen_fractions.insert(*fraction) {
                warnings.push(warn(format!("duplicate fraction: {fraction}")));
            }
            let rounded = fraction.round_to(grading.decimal_places);
            if (rounded - fraction.to_f64()).abs() >= grading.tolerance {
                warnings.push(warn(format!(
                    "fraction {fraction} rounds to {rounded} at {} places, beyond the tolerance",
                    grading.decimal_places
                )));
            }
        }
    }

    let progression = &config.progression;
    if progression.level_three_at <= progression.level_two_at {
        warnings.push(ValidationWarning {
            level: None,
            message: format!(
                "level_three_at ({}) should be greater than level_two_at ({})",
                progression.level_three_at, progression.level_two_at
            ),
        });
    }

    if !(grading.tolerance.is_finite() && grading.tolerance > 0.0) {
        warnings.push(ValidationWarning {
            level: None,
            message: format!("tolerance must be positive, got {}", grading.tolerance),
        });
    }

    if grading.max_denominator == 0 {
        warnings.push(ValidationWarning {
            level: None,
            message: "max_denominator must be at least 1".into(),
        });
    }

    warnings
}
