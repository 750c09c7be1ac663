use std::path::{Path, PathBuf};

use mealcost_shared::{DocumentError, LookupTables, ProductCatalog, discover_plans, load_plan};

use crate::reconciler::CostReconciler;
use crate::report::CostReport;

/// Result of costing one plan file. A failed week never stops the others.
#[derive(Debug)]
pub enum WeekOutcome {
    Costed { path: PathBuf, report: CostReport },
    Failed { path: PathBuf, error: DocumentError },
}

impl WeekOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WeekOutcome::Costed { path, .. } | WeekOutcome::Failed { path, .. } => path,
        }
    }

    pub fn report(&self) -> Option<&CostReport> {
        match self {
            WeekOutcome::Costed { report, .. } => Some(report),
            WeekOutcome::Failed { .. } => None,
        }
    }
}

/// Cost each plan file independently, in the order given.
pub fn cost_weeks(
    paths: &[PathBuf],
    catalog: &ProductCatalog,
    tables: &LookupTables,
) -> Vec<WeekOutcome> {
    let reconciler = CostReconciler::new(catalog, tables);

    paths
        .iter()
        .map(|path| match load_plan(path) {
            Ok(plan) => WeekOutcome::Costed {
                path: path.clone(),
                report: reconciler.compute(&plan),
            },
            Err(error) => {
                tracing::warn!(error = %error, "week skipped");
                WeekOutcome::Failed {
                    path: path.clone(),
                    error,
                }
            }
        })
        .collect()
}

/// Cost every `W*.json` plan in `dir`. Fails only if the directory itself
/// cannot be listed.
pub fn cost_plans_dir(
    dir: impl AsRef<Path>,
    catalog: &ProductCatalog,
    tables: &LookupTables,
) -> mealcost_shared::Result<Vec<WeekOutcome>> {
    let paths = discover_plans(dir)?;
    Ok(cost_weeks(&paths, catalog, tables))
}
