//! The `fracquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("fracquiz.toml");
    if path.exists() {
        println!("fracquiz.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG).context("failed to write fracquiz.toml")?;
        println!("Created fracquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit the pools in fracquiz.toml");
    println!("  2. Run: fracquiz validate");
    println!("  3. Run: fracquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fracquiz configuration

# What a wrong answer does: "on_correct" keeps the same question,
# "always" draws a new one (the score still only counts correct answers).
advance = "on_correct"

[progression]
level_two_at = 5
level_three_at = 12

[grading]
# Decimal answers within this distance of the exact value are correct.
tolerance = 0.01
# Places kept when a fraction becomes a decimal answer.
decimal_places = 3
max_denominator = 1000000
# Accept 0.5 where 1/2 is expected, and the reverse.
accept_cross_format = false

# Decimals are asked "to Fraction", fractions "to Decimal".
[pools.level1]
decimals = [0.1, 0.2, 0.25, 0.5, 0.75]
fractions = ["1/10", "3/10", "1/4", "1/2", "3/4"]

[pools.level2]
fractions = ["2/5", "3/8", "4/5", "7/10", "11/20"]

[pools.level3]
decimals = [0.375, 0.625, 0.875]
"#;
