//! Startup configuration
//!
//! The process takes zero or two positional arguments (`columns rows`)
//! selecting the brick-grid size. Anything malformed fails fast here;
//! nothing else about a running session is user-configurable.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS};

/// Brick-grid dimensions for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Bricks per row
    pub cols: u32,
    /// Number of brick rows
    pub rows: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }
}

impl GameConfig {
    /// Parse the positional arguments: empty, or `columns rows`
    pub fn from_args<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(Self::default()),
            [cols, rows] => {
                let cols: u32 = cols
                    .parse()
                    .with_context(|| format!("column count {cols:?} is not a number"))?;
                let rows: u32 = rows
                    .parse()
                    .with_context(|| format!("row count {rows:?} is not a number"))?;
                if cols == 0 || rows == 0 {
                    bail!("brick grid must be at least 1x1, got {cols}x{rows}");
                }
                Ok(Self { cols, rows })
            }
            other => bail!(
                "expected zero or two arguments (columns rows), got {}",
                other.len()
            ),
        }
    }

    /// Bricks in a full grid
    pub fn brick_total(&self) -> u32 {
        self.cols * self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_uses_default_grid() {
        let config = GameConfig::from_args(args(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.brick_total(), DEFAULT_COLS * DEFAULT_ROWS);
    }

    #[test]
    fn test_two_args_set_the_grid() {
        let config = GameConfig::from_args(args(&["10", "4"])).unwrap();
        assert_eq!(config.cols, 10);
        assert_eq!(config.rows, 4);
        assert_eq!(config.brick_total(), 40);
    }

    #[test]
    fn test_non_numeric_args_fail_fast() {
        let err = GameConfig::from_args(args(&["ten", "4"])).unwrap_err();
        assert!(err.to_string().contains("column count"));
        let err = GameConfig::from_args(args(&["10", "four"])).unwrap_err();
        assert!(err.to_string().contains("row count"));
    }

    #[test]
    fn test_wrong_arg_count_fails_fast() {
        assert!(GameConfig::from_args(args(&["10"])).is_err());
        assert!(GameConfig::from_args(args(&["10", "4", "2"])).is_err());
    }

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        assert!(GameConfig::from_args(args(&["0", "4"])).is_err());
        assert!(GameConfig::from_args(args(&["10", "0"])).is_err());
    }
}
