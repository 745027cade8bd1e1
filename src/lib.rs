//! # Recipe Costing
//!
//! Resolves recipe ingredient lines against a catalog of scraped store prices
//! and produces a shopping list with an estimated total cost per recipe.

pub mod aggregator;
pub mod catalog;
pub mod costing;
pub mod costing_config;
pub mod costing_errors;
pub mod matcher;
pub mod measurement_patterns;
pub mod name_normalizer;
pub mod quantity_parser;
