use serde::{Deserialize, Serialize};

use crate::report::{CostReport, round_cents, serialize_cents, serialize_optional_cents};
use crate::weekly::WeekOutcome;

/// Fixed weekly spend on pre-packaged meals.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FactorPlan {
    pub weekly_eur: f64,
    pub meals_per_week: u32,
}

impl FactorPlan {
    pub fn cost_per_meal(&self) -> f64 {
        if self.meals_per_week == 0 {
            return 0.0;
        }
        self.weekly_eur / f64::from(self.meals_per_week)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpendingEntry {
    pub year: i32,
    pub week: u32,
    #[serde(serialize_with = "serialize_cents")]
    pub factor_eur: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub grocery_eur: f64,
}

impl SpendingEntry {
    /// The week's grocery total enters the ledger rounded to cents, as it
    /// was reported.
    pub fn from_report(report: &CostReport, factor: &FactorPlan) -> Self {
        Self {
            year: report.year,
            week: report.week,
            factor_eur: factor.weekly_eur,
            grocery_eur: round_cents(report.total_grocery_eur),
        }
    }

    pub fn total(&self) -> f64 {
        self.factor_eur + self.grocery_eur
    }

    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SpendingSummary {
    pub weeks: Vec<SpendingEntry>,
    #[serde(serialize_with = "serialize_cents")]
    pub total_factor_eur: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub total_grocery_eur: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub total_spent_eur: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub average_weekly_eur: f64,
    /// Spend of the most recent week, if any week was costed.
    #[serde(serialize_with = "serialize_optional_cents")]
    pub latest_week_eur: Option<f64>,
    #[serde(serialize_with = "serialize_cents")]
    pub budget_weekly_eur: f64,
    /// Labels of weeks whose total went over the weekly budget.
    pub weeks_over_budget: Vec<String>,
}

impl SpendingSummary {
    /// Summarise costed weeks, oldest first. Failed weeks are left out.
    pub fn from_outcomes(
        outcomes: &[WeekOutcome],
        factor: &FactorPlan,
        budget_weekly_eur: f64,
    ) -> Self {
        let entries = outcomes
            .iter()
            .filter_map(WeekOutcome::report)
            .map(|report| SpendingEntry::from_report(report, factor))
            .collect();

        Self::from_entries(entries, budget_weekly_eur)
    }

    pub fn from_entries(mut weeks: Vec<SpendingEntry>, budget_weekly_eur: f64) -> Self {
        weeks.sort_by_key(|entry| (entry.year, entry.week));

        let total_factor_eur: f64 = weeks.iter().map(|e| e.factor_eur).sum();
        let total_grocery_eur: f64 = weeks.iter().map(|e| e.grocery_eur).sum();
        let total_spent_eur = total_factor_eur + total_grocery_eur;
        let average_weekly_eur = if weeks.is_empty() {
            0.0
        } else {
            total_spent_eur / weeks.len() as f64
        };
        let weeks_over_budget = weeks
            .iter()
            .filter(|entry| entry.total() > budget_weekly_eur)
            .map(SpendingEntry::label)
            .collect();

        Self {
            latest_week_eur: weeks.last().map(SpendingEntry::total),
            weeks,
            total_factor_eur,
            total_grocery_eur,
            total_spent_eur,
            average_weekly_eur,
            budget_weekly_eur,
            weeks_over_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(week: u32, grocery_eur: f64) -> SpendingEntry {
        SpendingEntry {
            year: 2026,
            week,
            factor_eur: 62.93,
            grocery_eur,
        }
    }

    #[test]
    fn test_cost_per_meal() {
        let factor = FactorPlan {
            weekly_eur: 62.93,
            meals_per_week: 6,
        };
        assert!((factor.cost_per_meal() - 10.488333).abs() < 1e-6);

        let none = FactorPlan {
            weekly_eur: 0.0,
            meals_per_week: 0,
        };
        assert_eq!(none.cost_per_meal(), 0.0);
    }

    #[test]
    fn test_summary() {
        let summary = SpendingSummary::from_entries(
            vec![entry(8, 70.0), entry(6, 40.0), entry(7, 50.0)],
            120.0,
        );

        let weeks: Vec<_> = summary.weeks.iter().map(|e| e.week).collect();
        assert_eq!(weeks, vec![6, 7, 8]);
        assert!((summary.total_factor_eur - 188.79).abs() < 1e-9);
        assert!((summary.total_grocery_eur - 160.0).abs() < 1e-9);
        assert!((summary.total_spent_eur - 348.79).abs() < 1e-9);
        assert!((summary.average_weekly_eur - 116.263333).abs() < 1e-6);
        assert!((summary.latest_week_eur.unwrap() - 132.93).abs() < 1e-9);
        assert_eq!(summary.weeks_over_budget, vec!["2026-W08"]);
    }

    #[test]
    fn test_summary_serializes_cents() {
        let summary = SpendingSummary::from_entries(
            vec![entry(6, 0.1), entry(7, 0.2), entry(8, 10.0)],
            120.0,
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_grocery_eur"], 10.3);
        assert_eq!(json["total_factor_eur"], 188.79);
        assert_eq!(json["weeks"][0]["factor_eur"], 62.93);
        assert_eq!(json["average_weekly_eur"], 66.36);

        let empty = serde_json::to_value(SpendingSummary::from_entries(vec![], 120.0)).unwrap();
        assert!(empty["latest_week_eur"].is_null());
    }

    #[test]
    fn test_empty_summary() {
        let summary = SpendingSummary::from_entries(vec![], 120.0);
        assert_eq!(summary.average_weekly_eur, 0.0);
        assert_eq!(summary.latest_week_eur, None);
        assert!(summary.weeks_over_budget.is_empty());
    }
}
