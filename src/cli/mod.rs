//! Subcommands. Each one returns the text to print so the binary stays a
//! thin shell around them.

pub mod cost;
pub mod grocery;
pub mod spending;
pub mod week;

use std::collections::BTreeSet;

use mealcost_shared::{LookupTables, ProductCatalog, load_stock};

use crate::config::DataConfig;

/// Catalog and lookup tables shared by the costing and grocery commands.
pub struct DataSources {
    pub catalog: ProductCatalog,
    pub tables: LookupTables,
}

impl DataSources {
    pub fn load(data: &DataConfig) -> anyhow::Result<Self> {
        Ok(Self {
            catalog: ProductCatalog::load(&data.catalog)?,
            tables: LookupTables::load(&data.tables)?,
        })
    }
}

/// Stock set, empty when no stock document is configured.
pub fn load_stock_set(data: &DataConfig) -> anyhow::Result<BTreeSet<String>> {
    match &data.stock {
        Some(path) => Ok(load_stock(path)?),
        None => Ok(BTreeSet::new()),
    }
}

/// First `max` characters of `text`.
pub(crate) fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
