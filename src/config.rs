use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealcost_budget::FactorPlan;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub profile: ProfileConfig,
    pub budget: BudgetConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Where plan, catalog and lookup documents live.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub plans_dir: String,
    pub catalog: String,
    pub tables: String,
    /// JSON array of ingredients already at home.
    #[serde(default)]
    pub stock: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProfileConfig {
    pub daily_target_kcal: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BudgetConfig {
    /// Weekly spend on pre-packaged dinners.
    pub factor_weekly_eur: f64,
    pub factor_meals_week: u32,
    pub budget_weekly_eur: f64,
}

impl BudgetConfig {
    pub fn factor_plan(&self) -> FactorPlan {
        FactorPlan {
            weekly_eur: self.factor_weekly_eur,
            meals_per_week: self.factor_meals_week,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON logs even outside production.
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALCOST__DATA__PLANS_DIR, etc.)
    /// 2. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("data.plans_dir", "data/plans")?
            .set_default("data.catalog", "data/products.json")?
            .set_default("data.tables", "data/lookup_tables.json")?
            .set_default("profile.daily_target_kcal", 1800)?
            .set_default("budget.factor_weekly_eur", 62.93)?
            .set_default("budget.factor_meals_week", 6)?
            .set_default("budget.budget_weekly_eur", 120.0)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALCOST")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.profile.daily_target_kcal <= 0 {
            return Err("Daily calorie target must be greater than 0".to_string());
        }
        if self.budget.factor_weekly_eur < 0.0 {
            return Err("Weekly factor spend cannot be negative".to_string());
        }
        if self.budget.factor_meals_week == 0 {
            return Err("Factor meals per week must be at least 1".to_string());
        }
        if self.budget.budget_weekly_eur <= 0.0 {
            return Err("Weekly budget must be greater than 0".to_string());
        }
        Ok(())
    }
}
