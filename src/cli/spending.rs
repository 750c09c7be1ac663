use std::fmt::{self, Write as _};

use mealcost_budget::{FactorPlan, SpendingSummary, cost_plans_dir};

use crate::cli::DataSources;
use crate::config::Config;

/// Spending across every costed week in the plans directory.
pub fn run(config: &Config, json: bool) -> anyhow::Result<String> {
    let sources = DataSources::load(&config.data)?;
    let factor = config.budget.factor_plan();

    let outcomes = cost_plans_dir(&config.data.plans_dir, &sources.catalog, &sources.tables)?;
    let summary =
        SpendingSummary::from_outcomes(&outcomes, &factor, config.budget.budget_weekly_eur);
    tracing::info!(
        weeks = summary.weeks.len(),
        over_budget = summary.weeks_over_budget.len(),
        "spending summarised"
    );

    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    Ok(render_summary(&summary, &factor)?)
}

pub fn render_summary(
    summary: &SpendingSummary,
    factor: &FactorPlan,
) -> Result<String, fmt::Error> {
    if summary.weeks.is_empty() {
        return Ok("No hay datos de gasto a\u{fa}n.\n".to_string());
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<10} {:>8} {:>12} {:>8}",
        "Semana", "Factor", "Supermercado", "Total"
    )?;
    for entry in &summary.weeks {
        let marker = if entry.total() > summary.budget_weekly_eur {
            "  !"
        } else {
            ""
        };
        writeln!(
            out,
            "{:<10} {:>8.2} {:>12.2} {:>8.2}{marker}",
            entry.label(),
            entry.factor_eur,
            entry.grocery_eur,
            entry.total()
        )?;
    }

    writeln!(
        out,
        "\nTotal gastado: \u{20ac}{:.0}  \u{b7}  Promedio semanal: \u{20ac}{:.0}  \u{b7}  Esta semana: \u{20ac}{:.0}",
        summary.total_spent_eur,
        summary.average_weekly_eur,
        summary.latest_week_eur.unwrap_or_default()
    )?;
    writeln!(
        out,
        "Factor: {} comidas/semana  \u{b7}  \u{20ac}{:.2}/comida  \u{b7}  \u{20ac}{:.2}/semana  \u{b7}  Total: \u{20ac}{:.0}",
        factor.meals_per_week,
        factor.cost_per_meal(),
        factor.weekly_eur,
        summary.total_factor_eur
    )?;
    write!(
        out,
        "Presupuesto: \u{20ac}{:.0}/semana",
        summary.budget_weekly_eur
    )?;
    if summary.weeks_over_budget.is_empty() {
        out.push('\n');
    } else {
        writeln!(
            out,
            "  \u{b7}  Por encima: {}",
            summary.weeks_over_budget.join(", ")
        )?;
    }

    Ok(out)
}
