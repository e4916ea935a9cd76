//! Startup configuration
//!
//! The board layout and the item catalog are supplied once, before the first
//! pick. Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults (8x8, seed 1, the standard five-item catalog)
//! 2. A JSON file (`GameConfig::load`), every field optional
//! 3. Environment variables (`GameConfig::apply_env`)
//!
//! # Environment Variables
//!
//! - `TILE_MATCH_WIDTH` / `TILE_MATCH_HEIGHT`: grid size for a random board
//! - `TILE_MATCH_SEED`: RNG seed
//! - `TILE_MATCH_ANIMATION_MS`: how long the host presenter holds each animation
//! - `TILE_MATCH_MAX_CASCADE`: pop limit per cascade
//!
//! Unparsable values are ignored.
//!
//! # File Format
//!
//! ```json
//! {
//!   "seed": 7,
//!   "catalog": [
//!     { "name": "ruby", "symbol": "r", "value": 3 },
//!     { "name": "opal", "symbol": "o", "value": 1 }
//!   ],
//!   "rows": ["ror", "oro"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameError, ItemCatalog};
use crate::types::{
    ItemDef, DEFAULT_HEIGHT, DEFAULT_MAX_CASCADE_STEPS, DEFAULT_WIDTH, TWEEN_DURATION_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] GameError),
}

/// Catalog entry as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub symbol: char,
    pub value: u32,
}

impl From<&CatalogEntry> for ItemDef {
    fn from(entry: &CatalogEntry) -> Self {
        ItemDef::new(entry.name.clone(), entry.symbol, entry.value)
    }
}

impl From<&ItemDef> for CatalogEntry {
    fn from(item: &ItemDef) -> Self {
        Self {
            name: item.name.clone(),
            symbol: item.symbol,
            value: item.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub animation_ms: u64,
    pub max_cascade_steps: u32,
    pub catalog: Vec<CatalogEntry>,
    /// Preset layout as rows of catalog symbols; overrides width/height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
            animation_ms: TWEEN_DURATION_MS,
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
            catalog: ItemCatalog::standard_items()
                .iter()
                .map(CatalogEntry::from)
                .collect(),
            rows: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        if let Some(width) = parsed("TILE_MATCH_WIDTH") {
            self.width = width;
        }
        if let Some(height) = parsed("TILE_MATCH_HEIGHT") {
            self.height = height;
        }
        if let Some(seed) = parsed("TILE_MATCH_SEED") {
            self.seed = seed;
        }
        if let Some(ms) = parsed("TILE_MATCH_ANIMATION_MS") {
            self.animation_ms = ms;
        }
        if let Some(steps) = parsed("TILE_MATCH_MAX_CASCADE") {
            self.max_cascade_steps = steps;
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn build_catalog(&self) -> Result<ItemCatalog, GameError> {
        ItemCatalog::new(self.catalog.iter().map(ItemDef::from).collect())
    }

    /// Catalog must be valid; a random board needs non-zero dimensions.
    /// Preset rows are checked against the catalog when the grid is built.
    pub fn validate(&self) -> Result<(), GameError> {
        self.build_catalog()?;
        match &self.rows {
            Some(rows) if rows.is_empty() => Err(GameError::EmptyLayout),
            Some(_) => Ok(()),
            None if self.width == 0 || self.height == 0 => Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_board() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (8, 8));
        assert_eq!(config.catalog.len(), 5);
        assert_eq!(config.animation_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "seed": 42, "width": 5 }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 8);
        assert_eq!(config.catalog, GameConfig::default().catalog);
    }

    #[test]
    fn custom_catalog_and_rows() {
        let json = r#"{
            "catalog": [
                { "name": "ruby", "symbol": "r", "value": 3 },
                { "name": "opal", "symbol": "o", "value": 1 }
            ],
            "rows": ["ror", "oro"]
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.value(catalog.by_symbol('r').unwrap()), 3);
        assert_eq!(config.rows.as_deref().map(|r| r.len()), Some(2));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "catalog": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(GameError::EmptyCatalog)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = GameConfig::from_json_str(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GameError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ seed: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/nonexistent/tile-match.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
