//! # Catalog Matcher
//!
//! Finds the catalog product that best corresponds to an ingredient name.
//!
//! ## Strategy
//!
//! 1. **Exact/keyword phase** on normalized names (lower-case, singular, no
//!    freshness qualifier):
//!    - an exact name match anywhere in the catalog wins;
//!    - otherwise the first product containing at least half (rounded up) of
//!      the ingredient's words.
//! 2. **Substring/cheapest phase**, only when phase 1 found nothing: among the
//!    products whose lower-cased name contains the ingredient name, the
//!    cheapest one (first in catalog order on equal prices).

use crate::catalog::{Catalog, CatalogProduct};
use crate::name_normalizer::{normalize_catalog_name, normalize_for_match};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Which phase resolved an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Normalized names are equal
    Exact,
    /// At least half of the ingredient words appear in the product name
    Keyword,
    /// Cheapest product containing the ingredient name
    CheapestSubstring,
}

impl MatchKind {
    /// Confidence level in the match (0.0 to 1.0)
    pub fn confidence(self) -> f32 {
        match self {
            MatchKind::Exact => 1.0,
            MatchKind::Keyword => 0.8,
            MatchKind::CheapestSubstring => 0.5,
        }
    }
}

/// A catalog product chosen for an ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch<'a> {
    pub product: &'a CatalogProduct,
    pub kind: MatchKind,
}

/// Resolve an ingredient name against the catalog
pub fn match_ingredient<'a>(name: &str, catalog: &'a Catalog) -> Option<CatalogMatch<'a>> {
    let result =
        match_by_keywords(name, catalog).or_else(|| match_cheapest_substring(name, catalog));

    match &result {
        Some(found) => debug!(
            "Matched '{}' -> '{}' ({:?})",
            name, found.product.name, found.kind
        ),
        None => debug!("No catalog product matches '{}'", name),
    }

    result
}

/// Phase 1: exact normalized equality, then word overlap
pub fn match_by_keywords<'a>(name: &str, catalog: &'a Catalog) -> Option<CatalogMatch<'a>> {
    let ingredient = normalize_for_match(name);
    if ingredient.is_empty() {
        return None;
    }

    let products = catalog.products();
    let normalized: Vec<String> = products
        .iter()
        .map(|p| normalize_catalog_name(&p.name))
        .collect();

    if let Some(index) = normalized.iter().position(|n| *n == ingredient) {
        return Some(CatalogMatch {
            product: &products[index],
            kind: MatchKind::Exact,
        });
    }

    let words: Vec<&str> = ingredient.split_whitespace().collect();
    let required = words.len().div_ceil(2);
    trace!(
        "Keyword phase for '{}': {} of {} words required",
        ingredient,
        required,
        words.len()
    );

    normalized
        .iter()
        .position(|n| words.iter().filter(|w| n.contains(*w)).count() >= required)
        .map(|index| CatalogMatch {
            product: &products[index],
            kind: MatchKind::Keyword,
        })
}

/// Phase 2: cheapest product whose name contains the ingredient name
pub fn match_cheapest_substring<'a>(name: &str, catalog: &'a Catalog) -> Option<CatalogMatch<'a>> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    catalog
        .products()
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .min_by(|a, b| a.price.cmp(&b.price))
        .map(|product| CatalogMatch {
            product,
            kind: MatchKind::CheapestSubstring,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PriceEntry;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        Catalog::from_entries(
            entries
                .iter()
                .map(|(name, price)| PriceEntry::new(name, price)),
        )
    }

    #[test]
    fn test_exact_match_beats_earlier_keyword_match() {
        let catalog = catalog(&[("Tomate ronde bio", "3,10€"), ("Tomate ronde", "2,50€")]);

        let found = match_ingredient("tomate rondes", &catalog).unwrap();
        assert_eq!(found.product.name, "Tomate ronde");
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn test_keyword_match_takes_first_in_catalog_order() {
        let catalog = catalog(&[
            ("Lait entier", "1,20€"),
            ("Fromage râpé", "1,80€"),
            ("Fromage blanc", "1,10€"),
        ]);

        let found = match_ingredient("fromage", &catalog).unwrap();
        assert_eq!(found.product.name, "Fromage râpé");
        assert_eq!(found.kind, MatchKind::Keyword);
    }

    #[test]
    fn test_keyword_match_needs_half_the_words() {
        let catalog = catalog(&[("Huile de tournesol", "2,00€")]);

        // "huile" + "olive" + "vierge": 1 of 3 words present, 2 required
        assert!(match_by_keywords("huile olive vierge", &catalog).is_none());
        // "huile" + "olive": 1 of 2 words present, 1 required
        assert!(match_by_keywords("huile olive", &catalog).is_some());
    }

    #[test]
    fn test_freshness_qualifier_is_ignored() {
        let catalog = catalog(&[("Basilic", "1,49€")]);

        let found = match_ingredient("basilic frais", &catalog).unwrap();
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn test_substring_phase_picks_cheapest() {
        let catalog = catalog(&[("Sauce tomate A", "3,50€"), ("Sauce tomate B", "2,00€")]);

        let found = match_cheapest_substring("Sauce tomate", &catalog).unwrap();
        assert_eq!(found.product.name, "Sauce tomate B");
        assert_eq!(found.kind, MatchKind::CheapestSubstring);
    }

    #[test]
    fn test_substring_phase_keeps_catalog_order_on_equal_prices() {
        let catalog = catalog(&[("Crème liquide", "1,50€"), ("Crème épaisse", "1,50€")]);

        let found = match_cheapest_substring("crème", &catalog).unwrap();
        assert_eq!(found.product.name, "Crème liquide");
    }

    #[test]
    fn test_substring_phase_only_runs_after_keyword_phase_fails() {
        // "s" singularizes to an empty name, so only the substring phase can match
        let catalog = catalog(&[("Sucre en poudre", "1,30€"), ("Sel fin", "0,60€")]);

        let found = match_ingredient("s", &catalog).unwrap();
        assert_eq!(found.product.name, "Sel fin");
        assert_eq!(found.kind, MatchKind::CheapestSubstring);
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog(&[("Tomate ronde", "2,50€")]);
        assert!(match_ingredient("saffran", &catalog).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(match_ingredient("tomate", &Catalog::default()).is_none());
    }
}
