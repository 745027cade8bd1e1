//! # Costing Error Types Module
//!
//! This module defines the error types used throughout the recipe costing engine.
//! Per-ingredient failures are local: the orchestrator records them and keeps going.

use thiserror::Error;

/// Errors raised while loading catalogs or resolving ingredients
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostingError {
    /// The quantity token of an ingredient line could not be evaluated
    #[error("Parse error: {0}")]
    Parse(String),
    /// No catalog product matched the ingredient in either phase
    #[error("No catalog match for ingredient: {0}")]
    NoMatch(String),
    /// A catalog price string is not a non-negative amount
    #[error("Malformed price '{price}' for product '{name}'")]
    MalformedPrice { name: String, price: String },
    /// Catalog file or directory could not be read
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),
    /// Invalid runtime configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
