use serde::Serialize;
use strum::{AsRefStr, Display};

use super::lexer::{Token, leading_amount, tokenize};

pub const TEASPOON_GRAMS: f64 = 5.0;
pub const TABLESPOON_GRAMS: f64 = 15.0;
pub const PINCH_GRAMS: f64 = 0.5;

const TEASPOON_WORDS: &[&str] = &["cdta", "cdtas", "tsp"];
const TABLESPOON_WORDS: &[&str] = &["cda", "cdas", "tbsp"];
const COUNT_WORDS: &[&str] = &[
    "rebanada",
    "rebanadas",
    "grande",
    "grandes",
    "mediano",
    "medianos",
    "mediana",
    "medianas",
    "medium",
    "large",
    "pot",
    "vasito",
    "vasitos",
    "cup",
    "cups",
    "taza",
    "tazas",
    "lata",
    "latas",
    "unidad",
    "unidades",
    "slice",
    "slices",
];

#[derive(Serialize, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseUnit {
    #[serde(rename = "g")]
    #[strum(serialize = "g")]
    Gram,
    #[serde(rename = "ml")]
    #[strum(serialize = "ml")]
    Millilitre,
    #[serde(rename = "count")]
    #[strum(serialize = "count")]
    Count,
    #[serde(rename = "unknown")]
    #[strum(serialize = "unknown")]
    Unknown,
}

/// A quantity reduced to grams, millilitres or a discrete count.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct NormalizedQuantity {
    pub amount: f64,
    pub unit: BaseUnit,
}

impl NormalizedQuantity {
    /// What an unrecognised quantity normalizes to.
    pub const UNKNOWN: NormalizedQuantity = NormalizedQuantity {
        amount: 0.0,
        unit: BaseUnit::Unknown,
    };

    pub fn grams(amount: f64) -> Self {
        Self {
            amount,
            unit: BaseUnit::Gram,
        }
    }

    pub fn millilitres(amount: f64) -> Self {
        Self {
            amount,
            unit: BaseUnit::Millilitre,
        }
    }

    pub fn count(amount: f64) -> Self {
        Self {
            amount,
            unit: BaseUnit::Count,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.unit == BaseUnit::Unknown
    }
}

/// Parse a quantity into grams, millilitres or a count.
///
/// Rules, first match wins:
/// 1. `(120g)` anywhere in the string
/// 2. number followed by `g` or `ml`
/// 3. number or glyph followed by a spoon measure (`cdta`/`tsp` 5 g, `cda`/`tbsp` 15 g)
/// 4. number followed by a count word (`rebanadas`, `mediano`, `lata`, ...),
///    or a lone glyph followed by any word (`½ aguacate`)
/// 5. bare number
/// 6. `pinch` / `pizca`
/// 7. otherwise zero of [`BaseUnit::Unknown`]
pub fn parse_normalized(raw: &str) -> NormalizedQuantity {
    let trimmed = raw.trim();
    let tokens = tokenize(trimmed);

    let parenthetical = tokens.iter().find_map(|t| match t.token {
        Token::ParentheticalGrams(grams) => Some(grams),
        _ => None,
    });
    if let Some(grams) = parenthetical {
        return NormalizedQuantity::grams(grams);
    }

    if let Some(lead) = leading_amount(&tokens) {
        let unit_word = tokens
            .get(lead.tokens)
            .and_then(|t| t.word())
            .map(str::to_lowercase);

        match unit_word.as_deref() {
            Some("g") => return NormalizedQuantity::grams(lead.value),
            Some("ml") => return NormalizedQuantity::millilitres(lead.value),
            Some(word) if TEASPOON_WORDS.contains(&word) => {
                return NormalizedQuantity::grams(lead.value * TEASPOON_GRAMS);
            }
            Some(word) if TABLESPOON_WORDS.contains(&word) => {
                return NormalizedQuantity::grams(lead.value * TABLESPOON_GRAMS);
            }
            Some(word) if COUNT_WORDS.contains(&word) => {
                return NormalizedQuantity::count(lead.value);
            }
            Some(_) if lead.glyph_only => return NormalizedQuantity::count(lead.value),
            None if lead.tokens == tokens.len() => return NormalizedQuantity::count(lead.value),
            _ => {}
        }
    }

    let is_pinch = tokens
        .iter()
        .filter_map(|t| t.word())
        .map(str::to_lowercase)
        .any(|word| word.contains("pinch") || word.contains("pizca"));
    if is_pinch {
        return NormalizedQuantity::grams(PINCH_GRAMS);
    }

    NormalizedQuantity::UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parses(raw: &str, amount: f64, unit: BaseUnit) {
        let parsed = parse_normalized(raw);
        assert!(
            (parsed.amount - amount).abs() < 1e-9 && parsed.unit == unit,
            "{raw:?} parsed as {parsed:?}, expected {amount} {unit}"
        );
    }

    #[test]
    fn test_weights_and_volumes() {
        assert_parses("250g", 250.0, BaseUnit::Gram);
        assert_parses("70g seca", 70.0, BaseUnit::Gram);
        assert_parses("30 g granos", 30.0, BaseUnit::Gram);
        assert_parses("150ml", 150.0, BaseUnit::Millilitre);
        assert_parses("1,5 ml", 1.5, BaseUnit::Millilitre);
    }

    #[test]
    fn test_parenthetical_grams_beat_leading_count() {
        assert_parses("1 lata (120g)", 120.0, BaseUnit::Gram);
        assert_parses("2 latas (160g)", 160.0, BaseUnit::Gram);
        assert_parses("1 can (120g)", 120.0, BaseUnit::Gram);
    }

    #[test]
    fn test_spoon_measures() {
        assert_parses("\u{bd} cdta", 2.5, BaseUnit::Gram);
        assert_parses("2 cdtas", 10.0, BaseUnit::Gram);
        assert_parses("1 tsp", 5.0, BaseUnit::Gram);
        assert_parses("1 cda", 15.0, BaseUnit::Gram);
        assert_parses("\u{bc} tbsp", 3.75, BaseUnit::Gram);
        assert_parses("1\u{bd} cdas", 22.5, BaseUnit::Gram);
        assert_parses("1 CDA", 15.0, BaseUnit::Gram);
    }

    #[test]
    fn test_count_words() {
        assert_parses("2 rebanadas", 2.0, BaseUnit::Count);
        assert_parses("1 rebanada", 1.0, BaseUnit::Count);
        assert_parses("1 mediano", 1.0, BaseUnit::Count);
        assert_parses("2 grandes", 2.0, BaseUnit::Count);
        assert_parses("1 pot", 1.0, BaseUnit::Count);
        assert_parses("3 unidades", 3.0, BaseUnit::Count);
        assert_parses("\u{bd} mediano", 0.5, BaseUnit::Count);
    }

    #[test]
    fn test_lone_glyph_with_other_word_is_a_count() {
        assert_parses("\u{bd} aguacate", 0.5, BaseUnit::Count);
        assert_parses("\u{bd}", 0.5, BaseUnit::Count);
    }

    #[test]
    fn test_bare_number_is_a_count() {
        assert_parses("2", 2.0, BaseUnit::Count);
        assert_parses(" 12 ", 12.0, BaseUnit::Count);
    }

    #[test]
    fn test_pinch() {
        assert_parses("pinch", PINCH_GRAMS, BaseUnit::Gram);
        assert_parses("1 pizca", PINCH_GRAMS, BaseUnit::Gram);
    }

    #[test]
    fn test_unrecognised_quantities_are_unknown() {
        assert_eq!(parse_normalized("al gusto"), NormalizedQuantity::UNKNOWN);
        assert_eq!(parse_normalized(""), NormalizedQuantity::UNKNOWN);
        assert_eq!(parse_normalized("1 bar"), NormalizedQuantity::UNKNOWN);
        assert!(parse_normalized("1/2 taza").is_unknown());
    }
}
