//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fracquiz_core::config::load_config_from;
use fracquiz_core::QuizEngine;

pub mod ask;
pub mod init;
pub mod play;
pub mod pools;
pub mod serve;
pub mod validate;

/// Load the config (explicit path or the default search) and build an engine.
pub(crate) fn build_engine(config_path: Option<&Path>) -> Result<QuizEngine> {
    let config = load_config_from(config_path)?;
    tracing::debug!(advance = ?config.advance, "building quiz engine");
    QuizEngine::new(config).context("invalid quiz configuration")
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::debug!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}
