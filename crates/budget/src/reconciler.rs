use std::collections::BTreeMap;

use mealcost_shared::quantity::{BaseUnit, parse_normalized};
use mealcost_shared::{Item, LookupTables, MealPlan, ProductCatalog, Tally};
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::package::{PackageSize, PackageUnit};
use crate::report::{CostReport, LineItem, PriceSource, UnpricedIngredient};

/// How a week's usage was brought into the unit its package is sold in.
#[derive(Serialize, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UsageConversion {
    /// Usage was already in the package's unit.
    Direct,
    /// Grams turned into pieces through the grams-per-unit table.
    GramsToUnits,
    /// No grams-per-unit entry for a piece-counted package: each gram counts
    /// as one piece.
    GramsAsUnitsFallback,
    /// Pieces turned into grams through the grams-per-unit table.
    UnitsToGrams,
    /// No grams-per-unit entry for a weighed package: each piece uses up a
    /// whole package.
    UnitPerPackageFallback,
}

/// Grams (or millilitres) and pieces of one ingredient used in a week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientUsage {
    grams: Tally,
    count: Tally,
}

impl IngredientUsage {
    pub fn grams(&self) -> f64 {
        self.grams.total()
    }

    pub fn count(&self) -> f64 {
        self.count.total()
    }

    pub fn is_zero(&self) -> bool {
        self.grams() == 0.0 && self.count() == 0.0
    }
}

/// Sum usage per canonical ingredient name.
///
/// Skipped items (by plan name or canonical name) are ignored. Quantities
/// the normalizer cannot read still register the ingredient, with zero usage.
pub fn accumulate<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    tables: &LookupTables,
) -> BTreeMap<String, IngredientUsage> {
    let mut usage: BTreeMap<String, IngredientUsage> = BTreeMap::new();

    for item in items {
        if tables.is_skipped(&item.name) {
            continue;
        }
        let canonical = tables.canonical_name(&item.name);
        if tables.is_skipped(canonical) {
            continue;
        }

        let quantity = parse_normalized(&item.quantity);
        let entry = usage.entry(canonical.to_owned()).or_default();
        match quantity.unit {
            BaseUnit::Gram | BaseUnit::Millilitre => entry.grams.add(quantity.amount),
            BaseUnit::Count => entry.count.add(quantity.amount),
            BaseUnit::Unknown => {
                tracing::trace!(ingredient = canonical, quantity = %item.quantity, "unreadable quantity");
            }
        }
    }

    usage
}

/// Where an ingredient's price comes from.
struct PriceQuote {
    price_eur: f64,
    package: PackageSize,
    package_label: Option<String>,
    product: String,
    source: PriceSource,
}

/// Prices a week of meals against the product catalog and fresh-price table.
pub struct CostReconciler<'a> {
    catalog: &'a ProductCatalog,
    tables: &'a LookupTables,
}

impl<'a> CostReconciler<'a> {
    pub fn new(catalog: &'a ProductCatalog, tables: &'a LookupTables) -> Self {
        Self { catalog, tables }
    }

    #[tracing::instrument(skip_all, fields(plan = %plan.label()))]
    pub fn compute(&self, plan: &MealPlan) -> CostReport {
        let usage = accumulate(plan.grocery_items(), self.tables);

        let mut items = Vec::new();
        let mut unpriced = Vec::new();
        let mut total = Tally::default();

        for (ingredient, usage) in usage {
            match self.cost_ingredient(&ingredient, &usage) {
                Some(item) => {
                    total.add(item.cost_eur);
                    items.push(item);
                }
                None if !usage.is_zero() => {
                    tracing::debug!(
                        ingredient = %ingredient,
                        grams = usage.grams(),
                        count = usage.count(),
                        "no price source"
                    );
                    unpriced.push(UnpricedIngredient {
                        ingredient,
                        grams: usage.grams(),
                        count: usage.count(),
                    });
                }
                None => {}
            }
        }

        let report = CostReport {
            year: plan.year,
            week: plan.week,
            items,
            total_grocery_eur: total.total(),
            unpriced,
        };
        tracing::info!(
            priced = report.items.len(),
            unpriced = report.unpriced.len(),
            total_eur = report.total_grocery_eur,
            "week costed"
        );

        report
    }

    /// Line item for one ingredient, or `None` when nothing prices it.
    pub fn cost_ingredient(&self, ingredient: &str, usage: &IngredientUsage) -> Option<LineItem> {
        let quote = self.quote(ingredient)?;
        let grams = usage.grams();
        let count = usage.count();
        let pkg_size = quote.package.amount;
        let grams_per_unit = self.tables.grams_per_unit(ingredient);

        let (usable, conversion, weekly_usage, package) = if quote.package.is_count_based() {
            let (usable, conversion) = match grams_per_unit {
                _ if grams == 0.0 => (count, UsageConversion::Direct),
                Some(per_unit) => (count + grams / per_unit, UsageConversion::GramsToUnits),
                None => (count + grams, UsageConversion::GramsAsUnitsFallback),
            };

            (
                usable,
                conversion,
                format!("{usable:.0} units"),
                format!("{pkg_size:.0} stuks"),
            )
        } else {
            if quote.package.unit == PackageUnit::Unknown {
                tracing::warn!(
                    ingredient,
                    package = quote.package_label.as_deref().unwrap_or(""),
                    "unknown package size, costing as zero packages"
                );
            }

            let (usable, conversion) = match grams_per_unit {
                _ if count == 0.0 => (grams, UsageConversion::Direct),
                Some(per_unit) => (grams + count * per_unit, UsageConversion::UnitsToGrams),
                None => (grams + count * pkg_size, UsageConversion::UnitPerPackageFallback),
            };
            let unit = match quote.package.unit {
                PackageUnit::Millilitre => "ml",
                _ => "g",
            };

            (
                usable,
                conversion,
                format!("{usable:.0}{unit}"),
                quote
                    .package_label
                    .clone()
                    .unwrap_or_else(|| format!("{pkg_size:.0}g")),
            )
        };

        if !matches!(conversion, UsageConversion::Direct) {
            tracing::debug!(ingredient, %conversion, grams, count, "usage converted");
        }

        let packages = if pkg_size > 0.0 { usable / pkg_size } else { 0.0 };

        Some(LineItem {
            ingredient: ingredient.to_owned(),
            weekly_usage,
            product: quote.product,
            source: quote.source,
            package,
            price_eur: quote.price_eur,
            packages,
            cost_eur: packages * quote.price_eur,
            conversion,
        })
    }

    /// Catalog first, then the fresh-price table.
    fn quote(&self, ingredient: &str) -> Option<PriceQuote> {
        if let Some(entry) = self.catalog.get(ingredient) {
            return Some(PriceQuote {
                price_eur: entry.price_eur,
                package: PackageSize::parse(&entry.size),
                package_label: Some(entry.size.clone()),
                product: entry.product.clone(),
                source: PriceSource::Catalog,
            });
        }

        self.tables.fresh_price(ingredient).map(|fresh| PriceQuote {
            price_eur: fresh.price_eur,
            package: PackageSize::grams(fresh.size_g),
            package_label: None,
            product: format!("[Fresh] {}", fresh.note),
            source: PriceSource::FreshEstimate,
        })
    }
}

/// Cost a week's groceries.
pub fn compute_weekly_cost(
    plan: &MealPlan,
    catalog: &ProductCatalog,
    tables: &LookupTables,
) -> CostReport {
    CostReconciler::new(catalog, tables).compute(plan)
}

#[cfg(test)]
mod tests {
    use mealcost_shared::ProductCatalogEntry;

    use super::*;

    fn item(name: &str, quantity: &str) -> Item {
        Item {
            name: name.to_string(),
            quantity: quantity.to_string(),
            kcal: 0,
        }
    }

    fn catalog(entries: &[(&str, f64, &str)]) -> ProductCatalog {
        entries
            .iter()
            .map(|(name, price_eur, size)| {
                (
                    name.to_string(),
                    ProductCatalogEntry {
                        price_eur: *price_eur,
                        size: size.to_string(),
                        product: format!("AH {name}"),
                        url: None,
                    },
                )
            })
            .collect()
    }

    fn usage(grams: f64, count: f64) -> IngredientUsage {
        let mut usage = IngredientUsage::default();
        usage.grams.add(grams);
        usage.count.add(count);
        usage
    }

    #[test]
    fn test_accumulate_translates_and_skips() {
        let tables = LookupTables::default()
            .with_alias("Egg", "Huevos")
            .with_alias("Water", "Agua")
            .with_skip("Agua")
            .with_skip("Sal");
        let items = [
            item("Egg", "2"),
            item("Huevos", "1 unidad"),
            item("Water", "250 ml"),
            item("Sal", "pizca"),
            item("Avena", "40g"),
            item("Avena", "al gusto"),
        ];

        let usage = accumulate(&items, &tables);

        assert_eq!(usage.keys().collect::<Vec<_>>(), vec!["Avena", "Huevos"]);
        assert_eq!(usage["Huevos"].count(), 3.0);
        assert_eq!(usage["Avena"].grams(), 40.0);
    }

    #[test]
    fn test_alias_of_skipped_ingredient_is_skipped() {
        let tables = LookupTables::default()
            .with_alias("Salt", "Sal")
            .with_skip("Sal");
        let items = [item("Salt", "1 cdta"), item("Sal", "pizca"), item("Miel", "1 cda")];

        let usage = accumulate(&items, &tables);

        assert_eq!(usage.keys().collect::<Vec<_>>(), vec!["Miel"]);
        assert_eq!(usage["Miel"].grams(), 15.0);
    }

    #[test]
    fn test_weighed_package() {
        let catalog = catalog(&[("Avena", 1.29, "500g")]);
        let tables = LookupTables::default();
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Avena", &usage(250.0, 0.0)).unwrap();
        assert_eq!(line.weekly_usage, "250g");
        assert_eq!(line.package, "500g");
        assert_eq!(line.packages, 0.5);
        assert_eq!(line.conversion, UsageConversion::Direct);
        assert_eq!(line.source, PriceSource::Catalog);
    }

    #[test]
    fn test_volume_package_prints_millilitres() {
        let catalog = catalog(&[("Leche", 1.15, "1L")]);
        let tables = LookupTables::default();
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Leche", &usage(750.0, 0.0)).unwrap();
        assert_eq!(line.weekly_usage, "750ml");
        assert_eq!(line.package, "1L");
        assert_eq!(line.packages, 0.75);
    }

    #[test]
    fn test_piece_package_converts_grams() {
        let catalog = catalog(&[("Huevos", 3.19, "10 stuks")]);
        let tables = LookupTables::default().with_grams_per_unit("Huevos", 50.0);
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Huevos", &usage(100.0, 4.0)).unwrap();
        assert_eq!(line.weekly_usage, "6 units");
        assert_eq!(line.package, "10 stuks");
        assert_eq!(line.packages, 0.6);
        assert_eq!(line.conversion, UsageConversion::GramsToUnits);
    }

    #[test]
    fn test_piece_package_without_factor_falls_back() {
        let catalog = catalog(&[("Huevos", 3.19, "10 stuks")]);
        let tables = LookupTables::default();
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Huevos", &usage(3.0, 2.0)).unwrap();
        assert_eq!(line.conversion, UsageConversion::GramsAsUnitsFallback);
        assert_eq!(line.packages, 0.5);
    }

    #[test]
    fn test_weighed_package_without_factor_uses_one_package_per_piece() {
        let catalog = catalog(&[("Yogur griego", 2.49, "500g")]);
        let tables = LookupTables::default();
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Yogur griego", &usage(0.0, 2.0)).unwrap();
        assert_eq!(line.conversion, UsageConversion::UnitPerPackageFallback);
        assert_eq!(line.packages, 2.0);
        assert_eq!(line.weekly_usage, "1000g");
    }

    #[test]
    fn test_unknown_package_costs_nothing() {
        let catalog = catalog(&[("Cilantro", 0.99, "per bos")]);
        let tables = LookupTables::default();
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Cilantro", &usage(10.0, 0.0)).unwrap();
        assert_eq!(line.packages, 0.0);
        assert_eq!(line.cost_eur, 0.0);
        assert_eq!(line.package, "per bos");
    }

    #[test]
    fn test_catalog_wins_over_fresh_price() {
        let catalog = catalog(&[("Banana", 1.69, "5 stuks")]);
        let tables = LookupTables::default().with_fresh_price("Banana", 0.25, 120.0, "loose");
        let reconciler = CostReconciler::new(&catalog, &tables);

        let line = reconciler.cost_ingredient("Banana", &usage(0.0, 5.0)).unwrap();
        assert_eq!(line.source, PriceSource::Catalog);
        assert_eq!(line.packages, 1.0);

        assert!(reconciler.cost_ingredient("Kiwi", &usage(0.0, 1.0)).is_none());
    }
}
