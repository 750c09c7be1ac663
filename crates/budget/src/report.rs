use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display};

use crate::reconciler::UsageConversion;

/// Round to whole cents. Only applied when a report is shown or serialized.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn serialize_cents<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_cents(*value))
}

pub(crate) fn serialize_optional_cents<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_cents(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[derive(Serialize, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PriceSource {
    Catalog,
    /// Receipt-derived price for produce bought loose.
    FreshEstimate,
}

/// Cost of one priced ingredient for the week. Amounts are kept at full
/// precision and rounded to cents when serialized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LineItem {
    pub ingredient: String,
    /// `"180g"`, `"500ml"` or `"6 units"`.
    pub weekly_usage: String,
    pub product: String,
    pub source: PriceSource,
    pub package: String,
    pub price_eur: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub packages: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub cost_eur: f64,
    pub conversion: UsageConversion,
}

/// Ingredient used this week with no catalog or fresh price.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UnpricedIngredient {
    pub ingredient: String,
    pub grams: f64,
    pub count: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CostReport {
    pub year: i32,
    pub week: u32,
    pub items: Vec<LineItem>,
    #[serde(serialize_with = "serialize_cents")]
    pub total_grocery_eur: f64,
    pub unpriced: Vec<UnpricedIngredient>,
}

impl CostReport {
    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }

    pub fn item(&self, ingredient: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.ingredient == ingredient)
    }

    /// Line items, most expensive first; ties keep ingredient order.
    pub fn items_by_cost(&self) -> Vec<&LineItem> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| b.cost_eur.total_cmp(&a.cost_eur));
        items
    }
}
