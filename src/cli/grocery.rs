use std::fmt::Write as _;
use std::path::Path;

use mealcost_shared::load_plan;
use mealcost_shopping::{GroceryList, IngredientAggregationService};
use serde::Serialize;

use crate::cli::{DataSources, load_stock_set};
use crate::config::Config;

#[derive(Serialize)]
struct GroceryOutput<'a> {
    year: i32,
    week: u32,
    total: usize,
    in_stock: usize,
    missing: usize,
    #[serde(flatten)]
    list: &'a GroceryList,
}

/// Categorized shopping list for one week.
pub fn run(config: &Config, week: &Path, missing_only: bool, json: bool) -> anyhow::Result<String> {
    let plan = load_plan(week)?;
    let sources = DataSources::load(&config.data)?;
    let stock = load_stock_set(&config.data)?;

    let aggregated = IngredientAggregationService::aggregate(&plan);
    let list = GroceryList::build(&aggregated, &sources.tables, &stock, &sources.catalog);
    tracing::info!(
        plan = %plan.label(),
        ingredients = list.total_count(),
        missing = list.missing_count(),
        "grocery list built"
    );

    let shown = if missing_only {
        list.without_stocked()
    } else {
        list.clone()
    };

    if json {
        return Ok(serde_json::to_string_pretty(&GroceryOutput {
            year: plan.year,
            week: plan.week,
            total: list.total_count(),
            in_stock: list.in_stock_count(),
            missing: list.missing_count(),
            list: &shown,
        })?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{}: {} ingredientes para esta semana",
        plan.label(),
        list.total_count()
    )?;
    if !stock.is_empty() {
        writeln!(
            out,
            "{} de {} ingredientes en casa. Faltan {}.",
            list.in_stock_count(),
            list.total_count(),
            list.missing_count()
        )?;
    }

    out.push_str(&render_list(&shown));

    Ok(out)
}

pub fn render_list(list: &GroceryList) -> String {
    let mut out = String::new();

    for section in &list.sections {
        out.push_str(&format!("\n#### {}\n", section.label));

        for line in &section.lines {
            let mut parts = vec![format!(
                "{} {}",
                if line.in_stock { "[x]" } else { "[ ]" },
                line.name
            )];
            if !line.quantity.is_empty() {
                parts.push(line.quantity.clone());
            }
            match (&line.product, &line.url) {
                (Some(product), Some(url)) => parts.push(format!("{product} <{url}>")),
                (Some(product), None) => parts.push(product.clone()),
                _ => {}
            }
            if let Some(price) = line.price_eur {
                parts.push(format!("\u{20ac}{price:.2}"));
            }

            out.push_str(&parts.join("  \u{b7}  "));
            out.push('\n');
        }
    }

    out
}
