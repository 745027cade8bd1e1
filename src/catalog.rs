//! # Price Catalog
//!
//! This module holds the in-memory catalog of scraped store products.
//! Raw `{name, price}` records are validated once when the catalog is built:
//! entries whose price cannot be read as a non-negative amount are dropped,
//! so the matcher only ever sees products with a usable price.
//!
//! ## Price formats
//!
//! - `"2,50€"` — comma as decimal separator, trailing euro sign
//! - `"3€"` — whole euros
//! - `2.5` — a plain JSON number
//!
//! ## Usage
//!
//! ```rust
//! use recipe_costing::catalog::{Catalog, PriceEntry};
//!
//! let catalog = Catalog::from_entries(vec![
//!     PriceEntry::new("Tomate ronde", "2,50€"),
//!     PriceEntry::new("Fromage râpé", "1,80€"),
//! ]);
//! assert_eq!(catalog.len(), 2);
//! ```

use crate::costing_errors::CostingError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Price as found in a scraped catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Store formatted price, e.g. "2,50€"
    Text(String),
    /// Plain numeric price
    Number(serde_json::Number),
}

/// One scraped product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub name: String,
    pub price: PriceValue,
}

/// A catalog product whose price has been validated
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub name: String,
    pub price: Decimal,
}

/// Read-only collection of priced products
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
    rejected: usize,
}

impl PriceEntry {
    /// Create an entry with a store formatted price string
    pub fn new(name: &str, price: &str) -> Self {
        Self {
            name: name.to_string(),
            price: PriceValue::Text(price.to_string()),
        }
    }

    /// Convert the raw price to a decimal amount
    pub fn parsed_price(&self) -> Result<Decimal, CostingError> {
        let parsed = match &self.price {
            PriceValue::Text(text) => parse_price_text(text),
            PriceValue::Number(number) => Decimal::from_str(&number.to_string()).ok(),
        };

        match parsed {
            Some(amount) if !amount.is_sign_negative() => Ok(amount),
            _ => Err(CostingError::MalformedPrice {
                name: self.name.clone(),
                price: match &self.price {
                    PriceValue::Text(text) => text.clone(),
                    PriceValue::Number(number) => number.to_string(),
                },
            }),
        }
    }
}

/// Parse a store price such as "2,50€" into a decimal amount
pub fn parse_price_text(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace('€', "").trim().replace(',', ".");
    Decimal::from_str(&cleaned).ok()
}

impl Catalog {
    /// Build a catalog, dropping entries with a malformed price
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PriceEntry>,
    {
        let mut products = Vec::new();
        let mut rejected = 0;

        for entry in entries {
            match entry.parsed_price() {
                Ok(price) => products.push(CatalogProduct {
                    name: entry.name,
                    price,
                }),
                Err(e) => {
                    warn!("Excluding catalog entry from matching: {e}");
                    rejected += 1;
                }
            }
        }

        debug!(
            "Catalog built with {} products ({} rejected)",
            products.len(),
            rejected
        );

        Self { products, rejected }
    }

    /// Products in catalog order
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of entries excluded because of a malformed price
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Load every `*.json` file of a directory into one catalog
    ///
    /// Files are read in file-name order so catalog order (and therefore
    /// matcher tie-breaking) is stable between runs.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CostingError::CatalogLoad(format!(
                "catalog directory does not exist: {}",
                dir.display()
            ))
            .into());
        }

        let mut files: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read catalog directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut entries = Vec::new();
        for file in &files {
            entries.extend(load_entries(file)?);
        }

        info!(
            "Loaded {} catalog entries from {} files in {}",
            entries.len(),
            files.len(),
            dir.display()
        );

        Ok(Self::from_entries(entries))
    }
}

/// Read one JSON array of `{name, price}` records
pub fn load_entries(path: &Path) -> Result<Vec<PriceEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let entries: Vec<PriceEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid catalog JSON in {}", path.display()))?;
    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
