//! # Costing Configuration Module
//!
//! Runtime settings for the recipe costing binary, read from environment
//! variables (a `.env` file is loaded first by the binary).

use crate::costing_errors::CostingError;
use crate::name_normalizer::AliasTable;
use anyhow::Result;
use log::info;
use std::env;
use std::path::PathBuf;

// Constants for costing configuration
pub const DEFAULT_CATALOG_DIR: &str = "json";
pub const DEFAULT_RECIPES_PATH: &str = "recipes.json";
pub const DEFAULT_RECIPE_LIMIT: usize = 3;

pub const CATALOG_DIR_VAR: &str = "CATALOG_DIR";
pub const RECIPES_PATH_VAR: &str = "RECIPES_PATH";
pub const ALIASES_PATH_VAR: &str = "ALIASES_PATH";
pub const RECIPE_LIMIT_VAR: &str = "RECIPE_LIMIT";

/// Configuration for a costing run
#[derive(Debug, Clone, PartialEq)]
pub struct CostingConfig {
    /// Directory holding the scraped `*.json` catalog files
    pub catalog_dir: PathBuf,
    /// JSON file with the recipes to cost
    pub recipes_path: PathBuf,
    /// Optional JSON alias table replacing the built-in one
    pub aliases_path: Option<PathBuf>,
    /// Maximum number of recipes costed per run
    pub recipe_limit: usize,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_PATH),
            aliases_path: None,
            recipe_limit: DEFAULT_RECIPE_LIMIT,
        }
    }
}

impl CostingConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, CostingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CostingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let recipe_limit = match lookup(RECIPE_LIMIT_VAR) {
            Some(raw) => {
                let limit: usize = raw.trim().parse().map_err(|_| {
                    CostingError::Config(format!("{RECIPE_LIMIT_VAR} must be a number, got '{raw}'"))
                })?;
                if limit == 0 {
                    return Err(CostingError::Config(format!(
                        "{RECIPE_LIMIT_VAR} must be at least 1"
                    )));
                }
                limit
            }
            None => defaults.recipe_limit,
        };

        let config = Self {
            catalog_dir: lookup(CATALOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_dir),
            recipes_path: lookup(RECIPES_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.recipes_path),
            aliases_path: lookup(ALIASES_PATH_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            recipe_limit,
        };

        info!(
            "Costing config: catalog_dir={}, recipes_path={}, aliases_path={:?}, recipe_limit={}",
            config.catalog_dir.display(),
            config.recipes_path.display(),
            config.aliases_path,
            config.recipe_limit
        );

        Ok(config)
    }

    /// Alias table from `aliases_path`, or the built-in table
    pub fn load_aliases(&self) -> Result<AliasTable> {
        match &self.aliases_path {
            Some(path) => AliasTable::load_file(path),
            None => Ok(AliasTable::default()),
        }
    }
}
