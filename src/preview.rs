//! Headless level preview
//!
//! Reveals the hidden content of a level row by row and formats each row as
//! color names, one cell per column (`.` for empty cells).

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::{
    BubbleGenerator, BubbleModelRegistry, HiddenBubbleContainer, LevelProperties, NoTextures,
    Properties, RevealedRow, DEFAULT_BUBBLE_MODEL_KEY,
};

/// Model name used when the configuration names none
pub const FALLBACK_MODEL: &str = "plain";

/// Rows shown when `--rows` is not given
pub const DEFAULT_PREVIEW_ROWS: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    pub level: PathBuf,
    pub rows: usize,
}

pub fn parse_preview_args(args: &[String]) -> Result<PreviewConfig> {
    let mut level: Option<PathBuf> = None;
    let mut rows = DEFAULT_PREVIEW_ROWS;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("level-preview: missing value for --rows"))?;
                rows = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("level-preview: invalid --rows value: {}", v))?;
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("level-preview: unknown argument: {}", other));
            }
            path => {
                if level.is_some() {
                    return Err(anyhow!("level-preview: more than one level file given"));
                }
                level = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let level = level.ok_or_else(|| anyhow!("usage: level-preview <level.json> [--rows N]"))?;
    Ok(PreviewConfig { level, rows })
}

/// Registry with one plain model under the configured default name
pub fn preview_registry(props: &Properties) -> BubbleModelRegistry {
    let name = props.get_string(DEFAULT_BUBBLE_MODEL_KEY, FALLBACK_MODEL);
    let name = if name.is_empty() {
        FALLBACK_MODEL.to_string()
    } else {
        name
    };
    let mut registry = BubbleModelRegistry::new(Some(name.clone()));
    let _ = registry.create_model(&name);
    registry
}

/// Reveal up to `rows` rows of `level`
pub fn preview_level(
    level: &mut LevelProperties,
    registry: &BubbleModelRegistry,
    rows: usize,
) -> Vec<String> {
    let mut generator = BubbleGenerator::new();
    generator.setup(level);
    let mut hidden = HiddenBubbleContainer::new();
    hidden.load_level(level);

    let mut lines = Vec::with_capacity(rows.min(hidden.row_count()));
    while lines.len() < rows {
        let Some(row) = hidden.generate_row(&mut generator, registry, &NoTextures) else {
            break;
        };
        lines.push(format_row(&row, &generator));
    }
    lines
}

pub fn format_row(row: &RevealedRow, generator: &BubbleGenerator) -> String {
    let cells: Vec<&str> = row
        .cells
        .iter()
        .map(|cell| {
            cell.and_then(|r| generator.heap().get(r))
                .map_or(".", |bubble| bubble.color().name())
        })
        .collect();
    format!(
        "board {:>2} row {:>2} | {}",
        row.board_id,
        row.row_id,
        cells.join(" ")
    )
}
