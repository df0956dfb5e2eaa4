//! The `fracquiz validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use fracquiz_core::config::{load_config_from, validate_config};
use fracquiz_core::QuizEngine;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let warnings = validate_config(&config);
    for w in &warnings {
        let prefix = w
            .level
            .map(|level| format!("  [level {level}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    QuizEngine::new(config).context("config cannot be used")?;

    if warnings.is_empty() {
        println!("Config valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
