//! The `fracquiz ask` command.

use std::path::PathBuf;

use anyhow::Result;

use fracquiz_core::Level;

pub fn execute(
    level: Level,
    seed: Option<u64>,
    count: usize,
    show_answer: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let engine = super::build_engine(config_path.as_deref())?;
    let mut rng = super::seeded_rng(seed);

    for _ in 0..count {
        let question = engine.generate_question(level, &mut rng);
        println!("{}", question.prompt());
        if show_answer {
            println!("  answer: {}", question.answer());
        }
    }

    Ok(())
}
