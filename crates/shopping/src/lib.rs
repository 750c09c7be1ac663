pub mod aggregation;
pub mod categorization;
pub mod grocery;

pub use aggregation::{AggregatedIngredient, IngredientAggregationService};
pub use categorization::{CategorizationService, Category};
pub use grocery::{GroceryLine, GroceryList, GrocerySection};
