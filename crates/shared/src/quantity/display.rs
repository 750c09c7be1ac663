use super::lexer::{leading_amount, tokenize};

/// Unit shown when a quantity is a bare number.
pub const DEFAULT_DISPLAY_UNIT: &str = "unidad";

/// A quantity as it should be shown to a person: the amount plus whatever
/// text followed it, untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayQuantity {
    Measured { amount: f64, unit: String },
    /// No leading amount; the raw text is kept verbatim.
    Unparsed(String),
}

impl DisplayQuantity {
    pub fn amount(&self) -> Option<f64> {
        match self {
            DisplayQuantity::Measured { amount, .. } => Some(*amount),
            DisplayQuantity::Unparsed(_) => None,
        }
    }

    /// The unit of a measured quantity, or the raw text of an unparsed one.
    pub fn unit(&self) -> &str {
        match self {
            DisplayQuantity::Measured { unit, .. } => unit,
            DisplayQuantity::Unparsed(raw) => raw,
        }
    }
}

/// Parse a quantity for display.
///
/// * `"250g"` → 250 `g`
/// * `"½ cdta"` → 0.5 `cdta`
/// * `"1 lata (120g)"` → 1 `lata (120g)`
/// * `"2"` → 2 `unidad`
/// * `"al gusto"` → unparsed, text kept
pub fn parse_display(raw: &str) -> DisplayQuantity {
    let trimmed = raw.trim();
    let tokens = tokenize(trimmed);

    let Some(lead) = leading_amount(&tokens) else {
        return DisplayQuantity::Unparsed(raw.to_owned());
    };

    let rest = trimmed[lead.end..].trim();
    let unit = if rest.is_empty() {
        DEFAULT_DISPLAY_UNIT
    } else {
        rest
    };

    DisplayQuantity::Measured {
        amount: lead.value,
        unit: unit.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(amount: f64, unit: &str) -> DisplayQuantity {
        DisplayQuantity::Measured {
            amount,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_number_and_unit() {
        assert_eq!(parse_display("250g"), measured(250.0, "g"));
        assert_eq!(parse_display("2 rebanadas"), measured(2.0, "rebanadas"));
        assert_eq!(parse_display("1 mediano"), measured(1.0, "mediano"));
        assert_eq!(parse_display("  150 ml  "), measured(150.0, "ml"));
    }

    #[test]
    fn test_leading_fraction_glyph() {
        assert_eq!(parse_display("\u{bd} cdta"), measured(0.5, "cdta"));
        assert_eq!(parse_display("\u{bc}"), measured(0.25, DEFAULT_DISPLAY_UNIT));
        assert_eq!(parse_display("\u{2153} taza"), measured(0.333, "taza"));
    }

    #[test]
    fn test_fraction_glued_to_number() {
        assert_eq!(parse_display("1\u{bd} tazas"), measured(1.5, "tazas"));
        assert_eq!(parse_display("2\u{be}"), measured(2.75, DEFAULT_DISPLAY_UNIT));
    }

    #[test]
    fn test_unit_keeps_parenthetical_text() {
        assert_eq!(parse_display("1 lata (120g)"), measured(1.0, "lata (120g)"));
    }

    #[test]
    fn test_bare_number_defaults_unit() {
        assert_eq!(parse_display("2"), measured(2.0, DEFAULT_DISPLAY_UNIT));
        assert_eq!(parse_display("1,5"), measured(1.5, DEFAULT_DISPLAY_UNIT));
    }

    #[test]
    fn test_unparseable_text_passes_through() {
        assert_eq!(parse_display(""), DisplayQuantity::Unparsed(String::new()));
        assert_eq!(
            parse_display("al gusto"),
            DisplayQuantity::Unparsed("al gusto".to_string())
        );
        assert_eq!(parse_display("al gusto").amount(), None);
        assert_eq!(parse_display("un pu\u{f1}ado").unit(), "un pu\u{f1}ado");
    }
}
