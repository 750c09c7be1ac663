use std::fmt::{self, Write as _};
use std::path::Path;

use mealcost_shared::{WeekOverview, load_plan};

use crate::cli::clip;
use crate::config::Config;

pub fn run(config: &Config, week: &Path, json: bool) -> anyhow::Result<String> {
    let plan = load_plan(week)?;
    let overview = WeekOverview::new(&plan, config.profile.daily_target_kcal);

    if json {
        return Ok(serde_json::to_string_pretty(&overview)?);
    }

    Ok(render_overview(&overview)?)
}

/// One row per day: weekday, dinner, flags and calories against the target.
pub fn render_overview(overview: &WeekOverview) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "{}-W{:02}  \u{b7}  objetivo {} kcal",
        overview.year, overview.week, overview.target_kcal
    )?;
    writeln!(
        out,
        "{:<4} {:<10} {:<38} {:<24} {:>5}  {}",
        "D\u{ed}a", "Fecha", "Cena", "", "Kcal", "Estado"
    )?;

    for day in &overview.days {
        let mut flags = Vec::new();
        if day.office_day {
            flags.push("Oficina");
        }
        if let Some(source) = day.dinner_source {
            let label = source.label_es();
            if !label.is_empty() {
                flags.push(label);
            }
        }

        writeln!(
            out,
            "{:<4} {:<10} {:<38} {:<24} {:>5}  {}",
            clip(&day.weekday, 3),
            day.date,
            day.dinner,
            flags.join(", "),
            day.total_kcal,
            day.status
        )?;
        if let Some(notes) = &day.notes {
            writeln!(out, "     {notes}")?;
        }
    }

    if let Some(average) = overview.average_kcal() {
        writeln!(
            out,
            "\nPromedio: {average:.0} kcal  \u{b7}  {}/{} d\u{ed}as en objetivo",
            overview.days_on_target(),
            overview.days.len()
        )?;
    }

    Ok(out)
}
