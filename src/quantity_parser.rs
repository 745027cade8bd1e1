//! # Quantity Parser
//!
//! This module turns a free-text recipe ingredient line into a purchasable count
//! and a cleaned ingredient name.
//!
//! ## Features
//!
//! - Leading quantities as integers, decimals (`1.5`, `.5`) or fractions (`1/2`)
//! - Missing quantity defaults to one item
//! - Mass and volume units (`g`, `cl`) describe an amount, not a count, so they
//!   always buy a single item
//! - Fractional counts are rounded up: a recipe needing 1.5 items buys 2
//!
//! ## Usage
//!
//! ```rust
//! use recipe_costing::quantity_parser::parse_ingredient_line;
//!
//! let parsed = parse_ingredient_line("200g de tomates").unwrap().unwrap();
//! assert_eq!(parsed.quantity, 1);
//! assert_eq!(parsed.name, "tomates");
//! ```

use crate::costing_errors::CostingError;
use crate::measurement_patterns::{INGREDIENT_LINE_REGEX, UNIT_MARKER_REGEX, UNIT_PHRASE_REGEX};
use log::{debug, trace};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ingredient line reduced to a count and a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Number of catalog items to buy, always at least 1
    pub quantity: u32,
    /// Ingredient name with unit phrases and leading "de" removed
    pub name: String,
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.quantity, self.name)
    }
}

/// Parse a single ingredient line
///
/// Returns `Ok(None)` when the line has no ingredient name at all, and
/// `Err(CostingError::Parse)` when the quantity token cannot be evaluated.
/// Both are treated by callers as "skip this ingredient".
pub fn parse_ingredient_line(line: &str) -> Result<Option<ParsedIngredient>, CostingError> {
    let Some(captures) = INGREDIENT_LINE_REGEX.captures(line) else {
        debug!("No ingredient shape found in line: '{}'", line);
        return Ok(None);
    };

    let raw_name = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    let mut quantity = match captures.get(1) {
        Some(token) => evaluate_quantity(token.as_str())?,
        None => Decimal::ONE,
    };

    if UNIT_MARKER_REGEX.is_match(raw_name) {
        trace!("Mass/volume unit in '{}', buying a single item", raw_name);
        quantity = Decimal::ONE;
    }

    let name = clean_ingredient_name(raw_name);
    if name.is_empty() {
        debug!("Ingredient line '{}' has an empty name", line);
        return Ok(None);
    }

    let quantity = quantity
        .ceil()
        .max(Decimal::ONE)
        .to_u32()
        .ok_or_else(|| CostingError::Parse(format!("quantity out of range in '{line}'")))?;

    trace!("Parsed '{}' -> {} x '{}'", line, quantity, name);
    Ok(Some(ParsedIngredient { quantity, name }))
}

/// Evaluate a quantity token made only of digits, a decimal point or a single `/`
pub fn evaluate_quantity(token: &str) -> Result<Decimal, CostingError> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_number(numerator)?;
            let denominator = parse_number(denominator)?;
            if denominator.is_zero() {
                return Err(CostingError::Parse(format!("division by zero in '{token}'")));
            }
            numerator
                .checked_div(denominator)
                .ok_or_else(|| CostingError::Parse(format!("fraction overflow in '{token}'")))
        }
        None => parse_number(token),
    }
}

fn parse_number(literal: &str) -> Result<Decimal, CostingError> {
    let valid = !literal.is_empty()
        && literal.chars().all(|c| c.is_ascii_digit() || c == '.')
        && literal.chars().filter(|&c| c == '.').count() <= 1;
    if !valid {
        return Err(CostingError::Parse(format!("invalid number '{literal}'")));
    }

    let normalized = if literal.starts_with('.') {
        format!("0{literal}")
    } else {
        literal.to_string()
    };

    Decimal::from_str(&normalized)
        .map_err(|e| CostingError::Parse(format!("invalid number '{literal}': {e}")))
}

/// Remove unit phrases ("g de ", "cl de ") and a leading "de "
fn clean_ingredient_name(raw_name: &str) -> String {
    let name = UNIT_PHRASE_REGEX.replace(raw_name, "");
    let name = name.trim();
    let name = name.strip_prefix("de ").unwrap_or(name);

    name.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedIngredient {
        parse_ingredient_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_without_quantity() {
        let result = parse("fromage");
        assert_eq!(result.quantity, 1);
        assert_eq!(result.name, "fromage");
    }

    #[test]
    fn test_parse_integer_quantity() {
        let result = parse("2 tomates fraîches");
        assert_eq!(result.quantity, 2);
        assert_eq!(result.name, "tomates fraîches");
    }

    #[test]
    fn test_decimal_and_fraction_round_up() {
        assert_eq!(parse("1.4 oignons").quantity, 2);
        assert_eq!(parse("1/2 citron").quantity, 1);
        assert_eq!(parse("3/2 concombres").quantity, 2);
        assert_eq!(parse(".5 avocat").quantity, 1);
        assert_eq!(parse("2.0 poivrons").quantity, 2);
    }

    #[test]
    fn test_mass_and_volume_units_force_single_item() {
        let result = parse("200g de tomates");
        assert_eq!(result.quantity, 1);
        assert_eq!(result.name, "tomates");

        let result = parse("250 g de farine");
        assert_eq!(result.quantity, 1);
        assert_eq!(result.name, "farine");

        let result = parse("20 cl de crème fraîche");
        assert_eq!(result.quantity, 1);
        assert_eq!(result.name, "crème fraîche");
    }

    #[test]
    fn test_letter_g_inside_word_is_not_a_unit() {
        let result = parse("3 aubergines");
        assert_eq!(result.quantity, 3);
        assert_eq!(result.name, "aubergines");
    }

    #[test]
    fn test_leading_de_is_removed() {
        assert_eq!(parse("de sel").name, "sel");
        assert_eq!(parse("2 huile d'olive").name, "huile d'olive");
    }

    #[test]
    fn test_zero_quantity_buys_one_item() {
        assert_eq!(parse("0 carottes").quantity, 1);
    }

    #[test]
    fn test_line_without_name_is_skipped() {
        assert_eq!(parse_ingredient_line("").unwrap(), None);
        assert_eq!(parse_ingredient_line("12").unwrap(), None);
        assert_eq!(parse_ingredient_line("1/2").unwrap(), None);
    }

    #[test]
    fn test_evaluate_quantity() {
        assert_eq!(evaluate_quantity("3").unwrap(), Decimal::from(3));
        assert_eq!(evaluate_quantity("1/4").unwrap(), Decimal::new(25, 2));
        assert!(matches!(evaluate_quantity("1/0"), Err(CostingError::Parse(_))));
        assert!(matches!(evaluate_quantity("1+1"), Err(CostingError::Parse(_))));
        assert!(matches!(evaluate_quantity("١"), Err(CostingError::Parse(_))));
    }

    #[test]
    fn test_unevaluable_quantity_is_a_parse_error() {
        assert!(matches!(
            parse_ingredient_line("1/0 pommes"),
            Err(CostingError::Parse(_))
        ));
        assert!(matches!(
            parse_ingredient_line("99999999999999999999999 pommes"),
            Err(CostingError::Parse(_))
        ));
    }
}
