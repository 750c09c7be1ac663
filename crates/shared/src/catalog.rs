use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, read_document};

/// A retailer product an ingredient is bought as.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProductCatalogEntry {
    pub price_eur: f64,
    /// Package label as printed by the retailer, e.g. `"370g (6 stuks)"`.
    pub size: String,
    #[serde(rename = "ah_product")]
    pub product: String,
    #[serde(rename = "ah_url", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Canonical ingredient name → product.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ProductCatalog {
    entries: BTreeMap<String, ProductCatalogEntry>,
}

impl ProductCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let catalog: ProductCatalog = read_document(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            products = catalog.len(),
            "product catalog loaded"
        );

        Ok(catalog)
    }

    pub fn get(&self, ingredient: &str) -> Option<&ProductCatalogEntry> {
        self.entries.get(ingredient)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ProductCatalogEntry)> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = (String, ProductCatalogEntry)>>(iter: I) -> Self {
        ProductCatalog {
            entries: iter.into_iter().collect(),
        }
    }
}
