use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, read_document};

/// Receipt-derived price for produce that has no catalog product.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FreshPriceEntry {
    pub price_eur: f64,
    pub size_g: f64,
    #[serde(default)]
    pub note: String,
}

/// Lookup tables injected into the aggregator and the cost reconciler.
///
/// Every table is keyed by ingredient name. `aliases` maps source-language
/// names to canonical ones; the remaining cost tables are keyed by canonical
/// name. `categories` is keyed by the name as written in the plan.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LookupTables {
    pub aliases: BTreeMap<String, String>,
    pub skip: BTreeSet<String>,
    pub grams_per_unit: BTreeMap<String, f64>,
    pub fresh_prices: BTreeMap<String, FreshPriceEntry>,
    pub categories: BTreeMap<String, String>,
}

impl LookupTables {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let tables: LookupTables = read_document(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            aliases = tables.aliases.len(),
            fresh_prices = tables.fresh_prices.len(),
            "lookup tables loaded"
        );

        Ok(tables)
    }

    /// Canonical name for `name`; identity when no alias exists.
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.contains(name)
    }

    /// Grams one discrete unit of `ingredient` weighs. Non-positive entries
    /// are treated as missing.
    pub fn grams_per_unit(&self, ingredient: &str) -> Option<f64> {
        self.grams_per_unit
            .get(ingredient)
            .copied()
            .filter(|grams| *grams > 0.0)
    }

    pub fn fresh_price(&self, ingredient: &str) -> Option<&FreshPriceEntry> {
        self.fresh_prices.get(ingredient)
    }

    pub fn category_key(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    pub fn with_skip(mut self, name: impl Into<String>) -> Self {
        self.skip.insert(name.into());
        self
    }

    pub fn with_grams_per_unit(mut self, ingredient: impl Into<String>, grams: f64) -> Self {
        self.grams_per_unit.insert(ingredient.into(), grams);
        self
    }

    pub fn with_fresh_price(
        mut self,
        ingredient: impl Into<String>,
        price_eur: f64,
        size_g: f64,
        note: impl Into<String>,
    ) -> Self {
        self.fresh_prices.insert(
            ingredient.into(),
            FreshPriceEntry {
                price_eur,
                size_g,
                note: note.into(),
            },
        );
        self
    }

    pub fn with_category(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.categories.insert(name.into(), category.into());
        self
    }
}
