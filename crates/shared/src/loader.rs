use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{DocumentError, MealPlan, Result};

/// Read and deserialize a JSON document, naming the file on failure.
pub fn read_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| DocumentError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_plan(path: impl AsRef<Path>) -> Result<MealPlan> {
    let plan: MealPlan = read_document(path.as_ref())?;
    tracing::debug!(
        path = %path.as_ref().display(),
        week = plan.week,
        days = plan.days.len(),
        "plan loaded"
    );

    Ok(plan)
}

/// Ingredient names already at home, stored as a JSON array of strings.
pub fn load_stock(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    let names: Vec<String> = read_document(path)?;

    Ok(names
        .into_iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Week plan files (`W*.json`) in `dir`, drafts excluded, sorted by name.
pub fn discover_plans(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| DocumentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut plans = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DocumentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.starts_with('W') && name.ends_with(".json") && !name.contains("draft") {
            plans.push(path);
        }
    }

    plans.sort();

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    const PLAN: &str = r#"{"year": 2026, "week": 7, "days": []}"#;

    #[test]
    fn test_discover_plans_skips_drafts_and_other_files() {
        let dir = TempDir::new().unwrap();
        for name in [
            "W08.json",
            "W07.json",
            "W09-draft.json",
            "manifest.json",
            "W10.txt",
        ] {
            fs::write(dir.child(name), PLAN).unwrap();
        }

        let found: Vec<_> = discover_plans(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(found, vec!["W07.json", "W08.json"]);
    }

    #[test]
    fn test_load_plan_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let broken = dir.child("W03.json");
        fs::write(&broken, "{\"year\": 2026").unwrap();

        let err = load_plan(&broken).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed { .. }));
        assert_eq!(err.path(), broken.as_path());
        assert!(err.to_string().contains("W03.json"));

        let missing = dir.child("W04.json");
        let err = load_plan(&missing).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_load_stock_trims_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("stock.json");
        fs::write(&path, r#"[" Avena ", "", "Miel"]"#).unwrap();

        let stock = load_stock(&path).unwrap();
        assert_eq!(stock.len(), 2);
        assert!(stock.contains("Avena"));
        assert!(stock.contains("Miel"));
    }
}
