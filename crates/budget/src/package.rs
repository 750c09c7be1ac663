use mealcost_shared::quantity::lexer::{leading_amount, tokenize};
use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(Serialize, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PackageUnit {
    #[serde(rename = "g")]
    #[strum(serialize = "g")]
    Gram,
    #[serde(rename = "ml")]
    #[strum(serialize = "ml")]
    Millilitre,
    Stuks,
    Unknown,
}

/// Contents of one retail package.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct PackageSize {
    pub amount: f64,
    pub unit: PackageUnit,
}

impl PackageSize {
    pub const UNKNOWN: PackageSize = PackageSize {
        amount: 0.0,
        unit: PackageUnit::Unknown,
    };

    pub fn grams(amount: f64) -> Self {
        Self {
            amount,
            unit: PackageUnit::Gram,
        }
    }

    /// Parse a retailer size label. The leading amount wins, so
    /// `"370g (6 stuks)"` is a 370 g package.
    ///
    /// ```
    /// use mealcost_budget::{PackageSize, PackageUnit};
    ///
    /// assert_eq!(PackageSize::parse("1.5l").amount, 1500.0);
    /// assert_eq!(PackageSize::parse("10 stuks").unit, PackageUnit::Stuks);
    /// ```
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        let tokens = tokenize(&label);

        let Some(lead) = leading_amount(&tokens) else {
            return Self::UNKNOWN;
        };
        let Some(word) = tokens.get(lead.tokens).and_then(|t| t.word()) else {
            return Self::UNKNOWN;
        };

        let (factor, unit) = match word {
            "g" | "gr" | "gram" | "grams" | "gramos" => (1.0, PackageUnit::Gram),
            "kg" => (1000.0, PackageUnit::Gram),
            "ml" => (1.0, PackageUnit::Millilitre),
            "l" | "liter" | "litro" | "litros" => (1000.0, PackageUnit::Millilitre),
            "stuk" | "stuks" => (1.0, PackageUnit::Stuks),
            _ => return Self::UNKNOWN,
        };

        Self {
            amount: lead.value * factor,
            unit,
        }
    }

    pub fn is_count_based(&self) -> bool {
        self.unit == PackageUnit::Stuks
    }
}
