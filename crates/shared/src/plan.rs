use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::calendar::{Weekday, weekday_es};

pub const DINNER_SLOT: &str = "dinner";

const DINNER_NAME_MAX_CHARS: usize = 35;

/// Where a meal comes from. Only meaningful for the dinner slot.
#[derive(
    Serialize, Deserialize, EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealSource {
    /// Pre-packaged meal delivered from outside, never bought at the grocery store.
    Factor,
    /// Social or restaurant dinner.
    Free,
    Homemade,
    #[serde(other)]
    Other,
}

impl MealSource {
    /// Sources whose ingredients are not bought by the household.
    pub fn is_external(self) -> bool {
        matches!(self, MealSource::Factor | MealSource::Free)
    }

    pub fn label_es(self) -> &'static str {
        match self {
            MealSource::Factor => "Factor",
            MealSource::Free => "Libre / Social",
            MealSource::Homemade => "Casero",
            MealSource::Other => "",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub kcal: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Meal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MealSource>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub total_kcal: i64,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portable: Option<bool>,
}

impl Meal {
    /// A meal is left out of grocery aggregation and costing only when it is
    /// the dinner and that dinner is a factor or free one.
    pub fn is_excluded_from_groceries(&self, slot: &str) -> bool {
        slot == DINNER_SLOT && self.source.is_some_and(MealSource::is_external)
    }

    /// Explicit name, else the first item's name, else empty.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.items.first().map(|i| i.name.as_str()).unwrap_or(""),
        }
    }

    pub fn is_portable(&self) -> bool {
        self.portable.unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Day {
    pub date: String,
    pub weekday: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub total_kcal: i64,
    #[serde(default)]
    pub meals: BTreeMap<String, Meal>,
}

impl Day {
    pub fn dinner(&self) -> Option<&Meal> {
        self.meals.get(DINNER_SLOT)
    }

    /// Explicit flag wins; otherwise Fridays are office days.
    pub fn is_office_day(&self) -> bool {
        self.office_day.unwrap_or_else(|| {
            matches!(self.weekday.parse::<Weekday>(), Ok(Weekday::Friday))
        })
    }

    pub fn weekday_es(&self) -> &str {
        weekday_es(&self.weekday)
    }

    pub fn dinner_display_name(&self) -> String {
        let name = self.dinner().map(Meal::display_name).unwrap_or("");
        if name.is_empty() {
            return "\u{2014}".to_owned();
        }

        if name.chars().count() > DINNER_NAME_MAX_CHARS {
            let head: String = name.chars().take(DINNER_NAME_MAX_CHARS).collect();
            format!("{head}...")
        } else {
            name.to_owned()
        }
    }
}

/// One week of planned meals, read-only once loaded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MealPlan {
    pub year: i32,
    pub week: u32,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl MealPlan {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Every item that has to be bought, in plan order, after dropping factor
    /// and free dinners.
    pub fn grocery_items(&self) -> impl Iterator<Item = &Item> {
        self.days
            .iter()
            .flat_map(|day| day.meals.iter())
            .filter(|(slot, meal)| !meal.is_excluded_from_groceries(slot))
            .flat_map(|(_, meal)| meal.items.iter())
    }

    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }
}
