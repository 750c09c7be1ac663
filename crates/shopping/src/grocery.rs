use std::collections::{BTreeMap, BTreeSet};

use mealcost_shared::{LookupTables, ProductCatalog};
use serde::Serialize;

use crate::categorization::{CategorizationService, Category};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryLine {
    pub name: String,
    pub quantity: String,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrocerySection {
    pub category: Category,
    pub label: &'static str,
    pub lines: Vec<GroceryLine>,
}

/// A week's shopping list grouped by supermarket section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroceryList {
    pub sections: Vec<GrocerySection>,
}

impl GroceryList {
    /// Build from aggregated quantities (ingredient name → display string).
    ///
    /// Sections follow aisle order and empty ones are left out. Products are
    /// looked up by the name as written in the plan.
    pub fn build(
        aggregated: &BTreeMap<String, String>,
        tables: &LookupTables,
        stock: &BTreeSet<String>,
        catalog: &ProductCatalog,
    ) -> Self {
        let mut grouped: BTreeMap<Category, Vec<GroceryLine>> = BTreeMap::new();

        for (name, quantity) in aggregated {
            let product = catalog.get(name);
            let line = GroceryLine {
                name: name.clone(),
                quantity: quantity.clone(),
                in_stock: stock.contains(name),
                product: product
                    .map(|p| p.product.clone())
                    .filter(|p| !p.is_empty()),
                url: product.and_then(|p| p.url.clone()).filter(|u| !u.is_empty()),
                price_eur: product.map(|p| p.price_eur),
            };

            grouped
                .entry(CategorizationService::categorize(tables, name))
                .or_default()
                .push(line);
        }

        let sections = grouped
            .into_iter()
            .map(|(category, mut lines)| {
                lines.sort_by(|a, b| a.name.cmp(&b.name));
                GrocerySection {
                    category,
                    label: category.label(),
                    lines,
                }
            })
            .collect();

        Self { sections }
    }

    pub fn lines(&self) -> impl Iterator<Item = &GroceryLine> {
        self.sections.iter().flat_map(|section| section.lines.iter())
    }

    pub fn total_count(&self) -> usize {
        self.lines().count()
    }

    pub fn in_stock_count(&self) -> usize {
        self.lines().filter(|line| line.in_stock).count()
    }

    pub fn missing_count(&self) -> usize {
        self.total_count() - self.in_stock_count()
    }

    /// The list minus everything already at home.
    pub fn without_stocked(&self) -> Self {
        let sections = self
            .sections
            .iter()
            .filter_map(|section| {
                let lines: Vec<_> = section
                    .lines
                    .iter()
                    .filter(|line| !line.in_stock)
                    .cloned()
                    .collect();

                (!lines.is_empty()).then(|| GrocerySection {
                    category: section.category,
                    label: section.label,
                    lines,
                })
            })
            .collect();

        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
