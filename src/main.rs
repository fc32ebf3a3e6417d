//! Level preview runner (default binary).
//!
//! Loads a level description, stages its boards in a hidden container and
//! prints the rows in reveal order. Configuration comes from the environment
//! (see `bubble_shooter::core::config`).

use anyhow::{Context, Result};

use bubble_shooter::core::{LevelProperties, Properties};
use bubble_shooter::preview::{parse_preview_args, preview_level, preview_registry};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_preview_args(&args)?;

    let props = Properties::from_env().context("failed to load configuration")?;
    let registry = preview_registry(&props);

    let mut level = LevelProperties::load_file(&config.level)
        .with_context(|| format!("failed to load level {}", config.level.display()))?;

    let seed = level.seed();
    let lines = preview_level(&mut level, &registry, config.rows);

    println!(
        "{} | seed {} | {} board(s) | {} columns",
        config.level.display(),
        if seed == 0 { "random".to_string() } else { seed.to_string() },
        level.board_count(),
        level.column_style().column_count()
    );
    for line in &lines {
        println!("{line}");
    }
    if lines.is_empty() {
        println!("(no hidden rows)");
    }
    Ok(())
}
