use mealcost_shared::LookupTables;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Supermarket section, declared in aisle order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    CarnesProteinas,
    Lacteos,
    Frutas,
    Verduras,
    Panaderia,
    FrutosSecos,
    Despensa,
    Suplementos,
    Otros,
}

impl Category {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::CarnesProteinas => "Carnes & Prote\u{ed}nas",
            Category::Lacteos => "L\u{e1}cteos",
            Category::Frutas => "Frutas",
            Category::Verduras => "Verduras",
            Category::Panaderia => "Panader\u{ed}a & Cereales",
            Category::FrutosSecos => "Frutos Secos",
            Category::Despensa => "Despensa",
            Category::Suplementos => "Suplementos",
            Category::Otros => "Otros",
        }
    }
}

/// Categorization Service
///
/// Maps an ingredient to its supermarket section through the `categories`
/// lookup table. Ingredients missing from the table, or mapped to a key
/// that is not a known section, land in [`Category::Otros`].
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(tables: &LookupTables, ingredient_name: &str) -> Category {
        let Some(key) = tables.category_key(ingredient_name) else {
            return Category::Otros;
        };

        key.parse().unwrap_or_else(|_| {
            tracing::debug!(ingredient = ingredient_name, key, "unknown category key");
            Category::Otros
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aisle_order() {
        assert_eq!(Category::VARIANTS.first(), Some(&Category::CarnesProteinas));
        assert_eq!(Category::VARIANTS.last(), Some(&Category::Otros));
        assert!(Category::Lacteos < Category::Frutas);
        assert!(Category::Despensa < Category::Suplementos);
    }

    #[test]
    fn test_keys_round_trip_through_strings() {
        for category in Category::VARIANTS {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
        assert_eq!(Category::FrutosSecos.to_string(), "frutos_secos");
    }

    #[test]
    fn test_categorize_from_table() {
        let tables = LookupTables::default()
            .with_category("Pechuga de pollo", "carnes_proteinas")
            .with_category("Yogur griego", "lacteos")
            .with_category("Chicle", "golosinas");

        assert_eq!(
            CategorizationService::categorize(&tables, "Pechuga de pollo"),
            Category::CarnesProteinas
        );
        assert_eq!(
            CategorizationService::categorize(&tables, "Yogur griego"),
            Category::Lacteos
        );
        assert_eq!(CategorizationService::categorize(&tables, "Chicle"), Category::Otros);
        assert_eq!(CategorizationService::categorize(&tables, "Kiwi"), Category::Otros);
    }
}
