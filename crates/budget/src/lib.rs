pub mod package;
pub mod reconciler;
pub mod report;
pub mod spending;
pub mod weekly;

pub use package::{PackageSize, PackageUnit};
pub use reconciler::{CostReconciler, IngredientUsage, UsageConversion, accumulate, compute_weekly_cost};
pub use report::{CostReport, LineItem, PriceSource, UnpricedIngredient, round_cents};
pub use spending::{FactorPlan, SpendingEntry, SpendingSummary};
pub use weekly::{WeekOutcome, cost_plans_dir, cost_weeks};
