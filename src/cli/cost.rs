use std::fmt::{self, Write as _};
use std::path::Path;

use mealcost_budget::{
    CostReport, FactorPlan, WeekOutcome, compute_weekly_cost, cost_plans_dir, round_cents,
};
use mealcost_shared::load_plan;
use serde::Serialize;

use crate::cli::{DataSources, clip};
use crate::config::Config;

const RULE_WIDTH: usize = 110;

#[derive(Serialize)]
struct FailedWeek {
    file: String,
    error: String,
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    weeks: Vec<&'a CostReport>,
    failed: Vec<FailedWeek>,
}

/// Cost one plan, or every plan in the configured plans directory.
///
/// A failing week is reported and skipped; the command only fails when no
/// week could be costed at all.
pub fn run(config: &Config, week: Option<&Path>, json: bool) -> anyhow::Result<String> {
    let sources = DataSources::load(&config.data)?;
    let factor = config.budget.factor_plan();

    if let Some(path) = week {
        let plan = load_plan(path)?;
        let report = compute_weekly_cost(&plan, &sources.catalog, &sources.tables);
        return if json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(render_report(&report, &factor)?)
        };
    }

    let outcomes = cost_plans_dir(&config.data.plans_dir, &sources.catalog, &sources.tables)?;
    if outcomes.is_empty() {
        tracing::info!(dir = %config.data.plans_dir, "no plans found");
        return Ok(String::new());
    }

    let reports: Vec<_> = outcomes.iter().filter_map(WeekOutcome::report).collect();
    let failed: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            WeekOutcome::Failed { path, error } => Some(FailedWeek {
                file: path.display().to_string(),
                error: error.to_string(),
            }),
            WeekOutcome::Costed { .. } => None,
        })
        .collect();

    if reports.is_empty() {
        anyhow::bail!("none of the {} plans could be costed", failed.len());
    }

    if json {
        return Ok(serde_json::to_string_pretty(&BatchOutput {
            weeks: reports,
            failed,
        })?);
    }

    let mut out = String::new();
    for report in reports {
        out.push_str(&render_report(report, &factor)?);
        out.push('\n');
    }
    for week in &failed {
        writeln!(out, "Skipped {}: {}", week.file, week.error)?;
    }

    Ok(out)
}

/// Plain-text cost table, most expensive ingredient first.
pub fn render_report(report: &CostReport, factor: &FactorPlan) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let rule = "-".repeat(RULE_WIDTH);
    let total = round_cents(report.total_grocery_eur);
    let with_factor = round_cents(report.total_grocery_eur + factor.weekly_eur);

    writeln!(out, "### {}", report.label())?;
    writeln!(
        out,
        "{:<28} {:<12} {:<32} {:<14} {:>6} {:>5} {:>7}",
        "Ingredient", "Usage", "Product", "Pkg", "\u{20ac}/pkg", "Pkgs", "\u{20ac} Cost"
    )?;
    writeln!(out, "{rule}")?;

    for item in report.items_by_cost() {
        writeln!(
            out,
            "{:<28} {:<12} {:<32} {:<14} {:>6.2} {:>5.2} {:>7.2}",
            item.ingredient,
            item.weekly_usage,
            clip(&item.product, 31),
            item.package,
            item.price_eur,
            round_cents(item.packages),
            round_cents(item.cost_eur),
        )?;
    }

    writeln!(out, "{rule}")?;
    writeln!(out, "{:<28} {:>80.2}", "TOTAL GROCERY", total)?;
    writeln!(
        out,
        "{:<28} {:>80.2}",
        format!("+ Factor ({} meals)", factor.meals_per_week),
        factor.weekly_eur
    )?;
    writeln!(out, "{:<28} {:>80.2}", "= TOTAL DIET COST", with_factor)?;

    if !report.unpriced.is_empty() {
        writeln!(out, "\nUnpriced ({}):", report.unpriced.len())?;
        for item in &report.unpriced {
            writeln!(
                out,
                "  - {}: {:.0}g + {:.0} count",
                item.ingredient, item.grams, item.count
            )?;
        }
    }

    Ok(out)
}
