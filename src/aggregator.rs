//! # Shopping List Aggregator
//!
//! Merges the resolved ingredients of a recipe into a shopping list.
//!
//! The total cost adds the price of every resolved ingredient occurrence. The
//! shopping list keeps one line per product name, summing quantities, while the
//! line price stays the unit price of the first occurrence. A line's price is
//! therefore not multiplied by its merged quantity. Merged quantities saturate
//! at `u32::MAX`.

use crate::matcher::MatchKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The catalog product chosen for one ingredient occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIngredient {
    pub name: String,
    pub price: Decimal,
    /// Matcher phase that chose the product
    pub kind: MatchKind,
}

/// One line of a recipe's shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    /// Match kind of the first occurrence
    pub kind: MatchKind,
}

/// Merge resolved occurrences into `(shopping list, total cost)`
///
/// Lines keep the order in which each product first appeared.
pub fn aggregate<I>(resolved: I) -> (Vec<ShoppingListEntry>, Decimal)
where
    I: IntoIterator<Item = (ResolvedIngredient, u32)>,
{
    let mut shopping_list: Vec<ShoppingListEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut total_cost = Decimal::ZERO;

    for (ingredient, quantity) in resolved {
        total_cost += ingredient.price;

        match positions.get(&ingredient.name).copied() {
            Some(index) => {
                let entry = &mut shopping_list[index];
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None => {
                positions.insert(ingredient.name.clone(), shopping_list.len());
                shopping_list.push(ShoppingListEntry {
                    name: ingredient.name,
                    price: ingredient.price,
                    quantity,
                    kind: ingredient.kind,
                });
            }
        }
    }

    (shopping_list, total_cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(name: &str, price: &str) -> ResolvedIngredient {
        ResolvedIngredient {
            name: name.to_string(),
            price: price.parse().unwrap(),
            kind: MatchKind::Exact,
        }
    }

    #[test]
    fn test_duplicate_products_are_merged() {
        let (list, total) = aggregate(vec![
            (resolved("Tomate ronde", "2.50"), 2),
            (resolved("Tomate ronde", "2.50"), 3),
        ]);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, 5);
        assert_eq!(list[0].price, "2.50".parse::<Decimal>().unwrap());
        // Each occurrence adds its own price once, regardless of quantity
        assert_eq!(total, "5.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_first_occurrence_order_is_kept() {
        let (list, _) = aggregate(vec![
            (resolved("Oignon jaune", "0.40"), 1),
            (resolved("Beurre doux", "2.10"), 1),
            (resolved("Oignon jaune", "0.40"), 2),
        ]);

        let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Oignon jaune", "Beurre doux"]);
    }

    #[test]
    fn test_line_price_comes_from_first_occurrence() {
        let (list, total) = aggregate(vec![
            (resolved("Lait", "1.00"), 1),
            (resolved("Lait", "1.20"), 1),
        ]);

        assert_eq!(list[0].price, "1.00".parse::<Decimal>().unwrap());
        assert_eq!(total, "2.20".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_merged_quantity_saturates() {
        let (list, total) = aggregate(vec![
            (resolved("Tomate ronde", "2.50"), 4_000_000_000),
            (resolved("Tomate ronde", "2.50"), 4_000_000_000),
        ]);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, u32::MAX);
        assert_eq!(total, "5.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_entry_keeps_first_match_kind() {
        let mut fuzzy = resolved("Crème liquide", "1.50");
        fuzzy.kind = MatchKind::CheapestSubstring;

        let (list, _) = aggregate(vec![(fuzzy, 1), (resolved("Crème liquide", "1.50"), 1)]);

        assert_eq!(list[0].kind, MatchKind::CheapestSubstring);
        assert_eq!(list[0].quantity, 2);
    }

    #[test]
    fn test_empty_input() {
        let (list, total) = aggregate(Vec::new());
        assert!(list.is_empty());
        assert_eq!(total, Decimal::ZERO);
    }
}
