//! The `fracquiz pools` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use fracquiz_core::Level;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let engine = super::build_engine(config_path.as_deref())?;
    let config = engine.config();

    let mut table = Table::new();
    table.set_header(vec!["Level", "Decimals", "Fractions", "Questions"]);

    for level in Level::ALL {
        let pool = config.pools.get(level);
        let decimals: Vec<String> = pool.decimals.iter().map(|d| d.to_string()).collect();
        let fractions: Vec<String> = pool.fractions.iter().map(|f| f.to_string()).collect();
        table.add_row(vec![
            Cell::new(level),
            Cell::new(decimals.join(", ")),
            Cell::new(fractions.join(", ")),
            Cell::new(engine.bank().questions(level).len()),
        ]);
    }

    println!("{table}");
    println!(
        "Level 2 at score {}, level 3 at score {}.",
        config.progression.level_two_at, config.progression.level_three_at
    );

    Ok(())
}
