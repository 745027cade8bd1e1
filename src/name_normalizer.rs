//! # Name Normalizer
//!
//! Ingredient names in recipes and product names in store catalogs rarely agree on
//! plural forms or on how specific they are. This module makes them comparable:
//!
//! - [`to_singular`] strips trailing plural markers, applied to both sides
//! - [`normalize_for_match`] lower-cases and drops "frais"/"fraîche" qualifiers
//! - [`AliasTable`] rewrites generic names to the catalog product a shopper
//!   would actually pick ("tomate" -> "tomate ronde")

use anyhow::{anyhow, Context, Result};
use log::{debug, trace};
use std::fs;
use std::path::Path;

/// Freshness qualifiers that never appear in catalog product names
const FRESHNESS_WORDS: [&str; 5] = ["frais", "fraîche", "fraîches", "fraiche", "fraiches"];

/// Built-in aliases, tested in this order
const DEFAULT_ALIASES: [(&str, &str); 3] = [
    ("tomate", "tomate ronde"),
    ("salade", "salade"),
    ("jambon", "jambon cru"),
];

/// Drop trailing "s" characters
///
/// A heuristic for French plurals, not a full singularizer. All trailing
/// "s" are removed so that applying it twice gives the same result.
pub fn to_singular(name: &str) -> &str {
    name.trim_end_matches('s')
}

/// Normalize a recipe ingredient name for exact/keyword comparison
pub fn normalize_for_match(name: &str) -> String {
    let lowered = name.to_lowercase();
    let without_freshness = lowered
        .split_whitespace()
        .filter(|word| !FRESHNESS_WORDS.contains(word))
        .collect::<Vec<&str>>()
        .join(" ");

    to_singular(&without_freshness).to_string()
}

/// Normalize a catalog product name for exact/keyword comparison
pub fn normalize_catalog_name(name: &str) -> String {
    to_singular(&name.to_lowercase()).to_string()
}

/// Ordered mapping of raw ingredient names to preferred catalog names
///
/// Order matters: when several keys are substrings of a name, the first key
/// in the table wins.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_ALIASES
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }
}

impl AliasTable {
    /// Build a table from `(key, canonical)` pairs, keeping their order
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        }
    }

    /// Load a JSON array of `[key, canonical]` pairs
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias file {}", path.display()))?;
        let pairs: Vec<(String, String)> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid alias JSON in {}", path.display()))?;
        if let Some(position) = pairs.iter().position(|(key, _)| key.trim().is_empty()) {
            return Err(anyhow!("empty alias key at entry {position}")
                .context(format!("Invalid alias table in {}", path.display())));
        }
        debug!("Loaded {} aliases from {}", pairs.len(), path.display());
        Ok(Self::from_pairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve an ingredient name to its preferred catalog name
    ///
    /// 1. If the name contains a key, the whole name becomes that key's value
    ///    (first key in table order wins).
    /// 2. The result is then looked up with its plural flipped: a name ending
    ///    in "s" is looked up without it, any other name with an "s" appended.
    pub fn canonicalize(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        let name = match self
            .entries
            .iter()
            .find(|(key, _)| lowered.contains(key.as_str()))
        {
            Some((key, value)) => {
                trace!("Alias '{}' matched in '{}' -> '{}'", key, name, value);
                value.clone()
            }
            None => name.to_string(),
        };

        let lowered = name.to_lowercase();
        let flipped = match lowered.strip_suffix('s') {
            Some(singular) => self.lookup(singular),
            None => self.lookup(&format!("{lowered}s")),
        };

        match flipped {
            Some(value) => value.to_string(),
            None => name,
        }
    }
}
