//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to split a recipe ingredient line
//! into a quantity token and an ingredient name.

use lazy_static::lazy_static;
use regex::Regex;

// Optional leading quantity (fraction, decimal or integer) followed by a name made
// of letters, spaces and apostrophes. Not anchored: the first matching span wins.
pub const INGREDIENT_LINE_PATTERN: &str = r"(\d+/\d+|\d+(?:\.\d+)?|\.\d+)?\s*([\p{L}\s'’]+)";

// Mass or volume unit standing as its own token ("200 g de", "200g de", "5 cl d'huile")
pub const UNIT_MARKER_PATTERN: &str = r"\b(?:g|cl)\b";

// Unit followed by "de", removed from the ingredient name
pub const UNIT_PHRASE_PATTERN: &str = r"\b(?:g|cl) de ";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref INGREDIENT_LINE_REGEX: Regex =
        Regex::new(INGREDIENT_LINE_PATTERN).expect("Ingredient line pattern should be valid");
    pub static ref UNIT_MARKER_REGEX: Regex =
        Regex::new(UNIT_MARKER_PATTERN).expect("Unit marker pattern should be valid");
    pub static ref UNIT_PHRASE_REGEX: Regex =
        Regex::new(UNIT_PHRASE_PATTERN).expect("Unit phrase pattern should be valid");
}
