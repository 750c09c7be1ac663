use std::collections::BTreeMap;

use mealcost_shared::quantity::{DisplayQuantity, parse_display};
use mealcost_shared::{Item, MealPlan, Tally};
use serde::Serialize;

/// Everything a week asks for of one ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub name: String,
    /// Summed amount per literal unit string, e.g. `"rebanadas" → 3`.
    pub buckets: BTreeMap<String, f64>,
    /// Quantities with no leading amount, sorted, blanks dropped.
    pub fragments: Vec<String>,
}

impl AggregatedIngredient {
    /// `"250 g, 1.5 unidad, al gusto"`; empty when nothing was measurable.
    pub fn display(&self) -> String {
        self.buckets
            .iter()
            .map(|(unit, total)| format!("{} {unit}", format_amount(*total)))
            .chain(self.fragments.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Integers print without decimals, everything else with one.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.1}")
    }
}

/// Ingredient Aggregation Service
///
/// Stateless service that sums a week's quantities per ingredient for the
/// shopping list. Names are grouped verbatim, so `Apple` and `Manzana` stay
/// separate lines; quantities only add up when their unit text is identical.
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Ingredient name → display string, in name order.
    pub fn aggregate(plan: &MealPlan) -> BTreeMap<String, String> {
        Self::aggregate_detailed(plan)
            .into_iter()
            .map(|ingredient| {
                let display = ingredient.display();
                (ingredient.name, display)
            })
            .collect()
    }

    #[tracing::instrument(skip_all, fields(plan = %plan.label()))]
    pub fn aggregate_detailed(plan: &MealPlan) -> Vec<AggregatedIngredient> {
        let result = Self::aggregate_items(plan.grocery_items());
        tracing::debug!(ingredients = result.len(), "plan aggregated");

        result
    }

    /// Aggregate items that already passed the meal exclusion rule.
    pub fn aggregate_items<'a>(
        items: impl IntoIterator<Item = &'a Item>,
    ) -> Vec<AggregatedIngredient> {
        let mut groups: BTreeMap<&str, (BTreeMap<String, Tally>, Vec<String>)> = BTreeMap::new();

        for item in items {
            let (buckets, fragments) = groups.entry(item.name.as_str()).or_default();

            match parse_display(&item.quantity) {
                DisplayQuantity::Measured { amount, unit } => {
                    buckets.entry(unit).or_default().add(amount);
                }
                DisplayQuantity::Unparsed(raw) => {
                    let raw = raw.trim();
                    if !raw.is_empty() {
                        fragments.push(raw.to_owned());
                    }
                }
            }
        }

        groups
            .into_iter()
            .map(|(name, (buckets, mut fragments))| {
                fragments.sort();

                AggregatedIngredient {
                    name: name.to_owned(),
                    buckets: buckets
                        .into_iter()
                        .map(|(unit, tally)| (unit, tally.total()))
                        .collect(),
                    fragments,
                }
            })
            .collect()
    }
}
