#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ordered level catalog for Labyrinth Snake.
//!
//! Levels ship as generation parameters rather than stored grids: every
//! [`LevelConfig`] is expanded through the maze generator and the difficulty
//! calibrator, so rebuilding the catalog from the same table always yields
//! identical levels.

mod shipped;

use labyrinth_snake_core::{CellCoord, Level, LevelId, MazeDimensions};
use labyrinth_snake_system_calibration::{derive_budget, shortest_path_length};
use labyrinth_snake_system_generation::generate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shipped::SHIPPED_LEVELS;

/// Generation parameters describing a single catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Number of logical rooms along the horizontal axis.
    pub width: u32,
    /// Number of logical rooms along the vertical axis.
    pub height: u32,
    /// Seed feeding the maze generator.
    pub seed: u64,
    /// Fraction of the optimal route granted as extra moves.
    pub slack: f64,
    /// Display name of the level.
    pub label: String,
}

/// Errors raised while loading or building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A configuration requested a maze with an empty or oversized axis.
    #[error("level {level} has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// One-based position of the offending configuration.
        level: u32,
        /// Requested logical width.
        width: u32,
        /// Requested logical height.
        height: u32,
    },
    /// A configuration used a negative or non-finite slack fraction.
    #[error("level {level} has invalid slack fraction {slack}")]
    InvalidSlack {
        /// One-based position of the offending configuration.
        level: u32,
        /// Slack fraction found in the configuration.
        slack: f64,
    },
    /// A configuration had an empty label.
    #[error("level {level} is missing a label")]
    MissingLabel {
        /// One-based position of the offending configuration.
        level: u32,
    },
    /// The catalog holds more levels than identifiers can address.
    #[error("catalog exceeds the maximum number of levels")]
    TooManyLevels,
    /// The generator produced a maze whose exit cannot be reached.
    #[error("level {level} has no route from entry to exit")]
    UnreachableExit {
        /// One-based position of the broken level.
        level: u32,
    },
    /// The catalog configuration text could not be parsed.
    #[error("failed to parse catalog configuration")]
    Parse(#[from] toml::de::Error),
}

/// Immutable, ordered collection of calibrated levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    /// Levels in catalog order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the catalog contains no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level with the provided identifier, if it exists.
    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.levels.get(index)
    }

    /// Level that follows `id` in catalog order.
    #[must_use]
    pub fn next_level(&self, id: LevelId) -> Option<&Level> {
        self.level(id.next())
    }

    /// Identifier of the final level.
    #[must_use]
    pub fn last_id(&self) -> Option<LevelId> {
        self.levels.last().map(Level::id)
    }
}

/// Generation parameters of the levels that ship with the game.
#[must_use]
pub fn default_configs() -> Vec<LevelConfig> {
    SHIPPED_LEVELS
        .iter()
        .map(|entry| LevelConfig {
            width: entry.width,
            height: entry.height,
            seed: entry.seed,
            slack: entry.slack,
            label: entry.label.to_owned(),
        })
        .collect()
}

/// Builds the catalog that ships with the game.
pub fn shipped_catalog() -> Result<Catalog, CatalogError> {
    build_catalog(&default_configs())
}

/// Parses level configurations from TOML `[[level]]` tables.
///
/// ```toml
/// [[level]]
/// width = 5
/// height = 5
/// seed = 42
/// slack = 0.6
/// label = "First Steps"
/// ```
pub fn configs_from_toml(text: &str) -> Result<Vec<LevelConfig>, CatalogError> {
    #[derive(Deserialize)]
    struct CatalogFile {
        #[serde(default)]
        level: Vec<LevelConfig>,
    }

    let file: CatalogFile = toml::from_str(text)?;
    Ok(file.level)
}

/// Expands configurations into calibrated levels, in order.
///
/// Identifiers are assigned from 1 by catalog position. Invalid
/// configurations abort the build.
pub fn build_catalog(configs: &[LevelConfig]) -> Result<Catalog, CatalogError> {
    let mut levels = Vec::with_capacity(configs.len());
    for (index, config) in configs.iter().enumerate() {
        let position = index
            .checked_add(1)
            .and_then(|position| u32::try_from(position).ok())
            .ok_or(CatalogError::TooManyLevels)?;
        levels.push(build_level(LevelId::new(position), config)?);
    }

    tracing::debug!(levels = levels.len(), "built level catalog");
    Ok(Catalog { levels })
}

fn build_level(id: LevelId, config: &LevelConfig) -> Result<Level, CatalogError> {
    let dimensions =
        MazeDimensions::new(config.width, config.height).ok_or(CatalogError::InvalidDimensions {
            level: id.get(),
            width: config.width,
            height: config.height,
        })?;
    if !config.slack.is_finite() || config.slack < 0.0 {
        return Err(CatalogError::InvalidSlack {
            level: id.get(),
            slack: config.slack,
        });
    }
    if config.label.trim().is_empty() {
        return Err(CatalogError::MissingLabel { level: id.get() });
    }

    let grid = generate(dimensions, config.seed);
    let entry = CellCoord::new(1, 1);
    let exit = CellCoord::new(grid.rows() - 2, grid.columns() - 2);
    let shortest = shortest_path_length(&grid, entry, exit)
        .ok_or(CatalogError::UnreachableExit { level: id.get() })?;
    let budget = derive_budget(shortest, config.slack);

    tracing::trace!(
        level = id.get(),
        label = %config.label,
        shortest,
        budget,
        "calibrated level"
    );

    Ok(Level::new(
        id,
        config.label.clone(),
        grid,
        entry,
        exit,
        shortest,
        budget,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32, slack: f64) -> LevelConfig {
        LevelConfig {
            width,
            height,
            seed: 9,
            slack,
            label: "Test".to_owned(),
        }
    }

    #[test]
    fn zero_dimensions_fail_fast() {
        let error = build_catalog(&[config(3, 3, 0.1), config(0, 4, 0.1)]).expect_err("invalid");
        assert!(matches!(
            error,
            CatalogError::InvalidDimensions {
                level: 2,
                width: 0,
                height: 4
            }
        ));
    }

    #[test]
    fn oversized_dimensions_from_toml_fail_fast() {
        let configs = configs_from_toml(
            r#"
            [[level]]
            width = 4294967295
            height = 5
            seed = 1
            slack = 0.5
            label = "Endless"
            "#,
        )
        .expect("valid toml");

        let error = build_catalog(&configs).expect_err("invalid");
        assert!(matches!(
            error,
            CatalogError::InvalidDimensions {
                level: 1,
                width: u32::MAX,
                height: 5
            }
        ));
    }

    #[test]
    fn dimensions_beyond_the_side_limit_fail_fast() {
        let too_tall = config(3, MazeDimensions::MAX_SIDE + 1, 0.1);
        let error = build_catalog(&[too_tall]).expect_err("invalid");
        assert!(matches!(error, CatalogError::InvalidDimensions { level: 1, .. }));
    }

    #[test]
    fn negative_slack_fails_fast() {
        let error = build_catalog(&[config(3, 3, -0.2)]).expect_err("invalid");
        assert!(matches!(error, CatalogError::InvalidSlack { level: 1, .. }));
    }

    #[test]
    fn blank_label_fails_fast() {
        let mut blank = config(2, 2, 0.0);
        blank.label = "   ".to_owned();
        let error = build_catalog(&[blank]).expect_err("invalid");
        assert!(matches!(error, CatalogError::MissingLabel { level: 1 }));
    }

    #[test]
    fn empty_configuration_builds_empty_catalog() {
        let catalog = build_catalog(&[]).expect("empty catalog");
        assert!(catalog.is_empty());
        assert_eq!(catalog.last_id(), None);
        assert!(catalog.level(LevelId::new(1)).is_none());
    }

    #[test]
    fn level_zero_is_never_found() {
        let catalog = build_catalog(&[config(2, 2, 0.0)]).expect("catalog");
        assert!(catalog.level(LevelId::new(0)).is_none());
        assert!(catalog.level(LevelId::new(1)).is_some());
        assert!(catalog.next_level(LevelId::new(1)).is_none());
    }

    #[test]
    fn toml_configs_parse_in_order() {
        let configs = configs_from_toml(
            r#"
            [[level]]
            width = 4
            height = 3
            seed = 11
            slack = 0.25
            label = "Alpha"

            [[level]]
            width = 2
            height = 2
            seed = 12
            slack = 0.0
            label = "Beta"
            "#,
        )
        .expect("valid toml");

        assert_eq!(configs.len(), 2);
        assert_eq!(
            configs[0],
            LevelConfig {
                width: 4,
                height: 3,
                seed: 11,
                slack: 0.25,
                label: "Alpha".to_owned(),
            }
        );
        assert_eq!(configs[1].label, "Beta");
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let error = configs_from_toml("[[level]]\nwidth = \"wide\"").expect_err("invalid");
        assert!(matches!(error, CatalogError::Parse(_)));
    }
}
