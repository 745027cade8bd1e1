//! # Recipe Costing
//!
//! Drives the parser, alias table and matcher over every ingredient line of a
//! recipe, then aggregates the resolved products into a shopping list with a
//! total cost.
//!
//! A line that cannot be parsed or matched never aborts the recipe: it is
//! recorded in [`RecipeCostResult::skipped`] and left out of the list and total.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_costing::catalog::{Catalog, PriceEntry};
//! use recipe_costing::costing::{Recipe, RecipeCoster};
//! use recipe_costing::name_normalizer::AliasTable;
//!
//! let catalog = Catalog::from_entries(vec![
//!     PriceEntry::new("Tomate ronde", "2,50€"),
//!     PriceEntry::new("Fromage râpé", "1,80€"),
//! ]);
//! let aliases = AliasTable::default();
//! let coster = RecipeCoster::new(&catalog, &aliases);
//!
//! let recipe = Recipe::new("Tarte", &["2 tomates", "fromage"]);
//! let result = coster.cost_recipe(&recipe);
//! assert_eq!(result.total_cost.to_string(), "4.30");
//! ```

use crate::aggregator::{aggregate, ResolvedIngredient, ShoppingListEntry};
use crate::catalog::Catalog;
use crate::costing_errors::CostingError;
use crate::matcher::{match_ingredient, MatchKind};
use crate::name_normalizer::AliasTable;
use crate::quantity_parser::parse_ingredient_line;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// A recipe as returned by the recipe search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// An ingredient line left out of the shopping list, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedIngredient {
    pub line: String,
    pub reason: CostingError,
}

/// Shopping list and total cost for one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCostResult {
    pub recipe_name: String,
    pub shopping_list: Vec<ShoppingListEntry>,
    /// Sum of the price of every resolved ingredient occurrence
    pub total_cost: Decimal,
    pub skipped: Vec<SkippedIngredient>,
}

impl Recipe {
    pub fn new(name: &str, ingredients: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Costs recipes against a read-only catalog
pub struct RecipeCoster<'a> {
    catalog: &'a Catalog,
    aliases: &'a AliasTable,
}

impl<'a> RecipeCoster<'a> {
    pub fn new(catalog: &'a Catalog, aliases: &'a AliasTable) -> Self {
        Self { catalog, aliases }
    }

    /// Resolve one ingredient line to a catalog product and a quantity
    pub fn resolve_line(&self, line: &str) -> Result<(ResolvedIngredient, u32), CostingError> {
        let parsed = parse_ingredient_line(line)?
            .ok_or_else(|| CostingError::Parse(format!("no ingredient name in '{line}'")))?;

        let canonical = self.aliases.canonicalize(&parsed.name);
        debug!("Parsed '{}' as {}, canonical name '{}'", line, parsed, canonical);

        let found = match_ingredient(&canonical, self.catalog)
            .ok_or_else(|| CostingError::NoMatch(canonical.clone()))?;

        Ok((
            ResolvedIngredient {
                name: found.product.name.clone(),
                price: found.product.price,
                kind: found.kind,
            },
            parsed.quantity,
        ))
    }

    /// Cost a single recipe
    pub fn cost_recipe(&self, recipe: &Recipe) -> RecipeCostResult {
        let mut resolved = Vec::new();
        let mut skipped = Vec::new();

        for line in &recipe.ingredients {
            match self.resolve_line(line) {
                Ok(occurrence) => resolved.push(occurrence),
                Err(reason) => {
                    warn!("Skipping ingredient '{}' in '{}': {}", line, recipe.name, reason);
                    skipped.push(SkippedIngredient {
                        line: line.clone(),
                        reason,
                    });
                }
            }
        }

        let (shopping_list, total_cost) = aggregate(resolved);

        info!(
            "Costed recipe '{}': {} products, {} skipped, total {}",
            recipe.name,
            shopping_list.len(),
            skipped.len(),
            total_cost
        );

        RecipeCostResult {
            recipe_name: recipe.name.clone(),
            shopping_list,
            total_cost,
            skipped,
        }
    }

    /// Cost recipes one after another, one result per recipe
    pub fn cost_recipes(&self, recipes: &[Recipe]) -> Vec<RecipeCostResult> {
        recipes.iter().map(|recipe| self.cost_recipe(recipe)).collect()
    }
}

/// Read a JSON array of `{name, ingredients}` recipe records
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipes file {}", path.display()))?;
    let recipes: Vec<Recipe> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid recipes JSON in {}", path.display()))?;
    info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Format an amount with two decimals and the euro sign
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}€",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Render the console report for one recipe
///
/// Products not matched by exact name show the match confidence.
pub fn format_report(result: &RecipeCostResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Recette: {}", result.recipe_name);
    let _ = writeln!(output, "Ingrédients à acheter:");
    for entry in &result.shopping_list {
        let _ = write!(
            output,
            "- {}: {} (x{})",
            entry.name,
            format_amount(entry.price),
            entry.quantity
        );
        if entry.kind != MatchKind::Exact {
            let _ = write!(output, " [confiance {:.0}%]", entry.kind.confidence() * 100.0);
        }
        output.push('\n');
    }
    if !result.skipped.is_empty() {
        let _ = writeln!(output, "Ingrédients introuvables: {}", result.skipped.len());
    }
    let _ = write!(output, "Coût total: {}", format_amount(result.total_cost));

    output
}
