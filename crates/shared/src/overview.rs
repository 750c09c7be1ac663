use serde::Serialize;

use crate::calendar::{CalorieStatus, slot_label_es};
use crate::plan::{DINNER_SLOT, Day, MealPlan, MealSource};

/// Slots shown under the dinner, in the order they are eaten.
const DAYTIME_SLOTS: [&str; 4] = ["breakfast", "lunch", "snack1", "snack2"];

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MealSummary {
    pub slot: String,
    pub label: String,
    pub name: String,
    pub time: String,
    pub total_kcal: i64,
    pub portable: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub weekday: String,
    pub total_kcal: i64,
    pub status: CalorieStatus,
    pub office_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub dinner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner_source: Option<MealSource>,
    /// Dinner first, then the daytime slots present in the plan.
    pub meals: Vec<MealSummary>,
}

impl DaySummary {
    pub fn new(day: &Day, target_kcal: i64) -> Self {
        let meals = std::iter::once(DINNER_SLOT)
            .chain(DAYTIME_SLOTS)
            .filter_map(|slot| {
                let meal = day.meals.get(slot)?;
                Some(MealSummary {
                    slot: slot.to_owned(),
                    label: slot_label_es(slot).to_owned(),
                    name: meal.display_name().to_owned(),
                    time: meal.time.clone(),
                    total_kcal: meal.total_kcal,
                    portable: meal.is_portable(),
                })
            })
            .collect();

        Self {
            date: day.date.clone(),
            weekday: day.weekday_es().to_owned(),
            total_kcal: day.total_kcal,
            status: CalorieStatus::classify(day.total_kcal, target_kcal),
            office_day: day.is_office_day(),
            notes: day.notes.clone().filter(|notes| !notes.is_empty()),
            dinner: day.dinner_display_name(),
            dinner_source: day.dinner().and_then(|meal| meal.source),
            meals,
        }
    }
}

/// Calories and dinners of a week at a glance.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WeekOverview {
    pub year: i32,
    pub week: u32,
    pub target_kcal: i64,
    pub days: Vec<DaySummary>,
}

impl WeekOverview {
    pub fn new(plan: &MealPlan, target_kcal: i64) -> Self {
        Self {
            year: plan.year,
            week: plan.week,
            target_kcal,
            days: plan
                .days
                .iter()
                .map(|day| DaySummary::new(day, target_kcal))
                .collect(),
        }
    }

    pub fn average_kcal(&self) -> Option<f64> {
        if self.days.is_empty() {
            return None;
        }
        let total: i64 = self.days.iter().map(|day| day.total_kcal).sum();
        Some(total as f64 / self.days.len() as f64)
    }

    pub fn days_on_target(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.status == CalorieStatus::OnTarget)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> MealPlan {
        MealPlan::from_json(
            r#"{
                "year": 2026,
                "week": 7,
                "days": [
                    {"date": "2026-02-09", "weekday": "Monday", "total_kcal": 1830, "meals": {
                        "lunch": {"time": "13:00", "total_kcal": 600, "portable": true,
                                  "items": [{"name": "Ensalada de atún", "quantity": "1 lata (120g)", "kcal": 200}]},
                        "breakfast": {"name": "Avena con fruta", "time": "08:00", "total_kcal": 400, "items": []},
                        "dinner": {"name": "Salmón al horno con verduras asadas y quinoa", "source": "homemade",
                                   "time": "19:30", "total_kcal": 700, "items": []}
                    }},
                    {"date": "2026-02-13", "weekday": "Friday", "total_kcal": 1650, "notes": "cena fuera",
                     "meals": {"dinner": {"source": "free", "time": "20:00", "total_kcal": 800, "items": []}}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_day_summaries() {
        let overview = WeekOverview::new(&plan(), 1800);
        let monday = &overview.days[0];

        assert_eq!(monday.weekday, "Lunes");
        assert_eq!(monday.status, CalorieStatus::OnTarget);
        assert!(!monday.office_day);
        assert_eq!(monday.dinner, "Salm\u{f3}n al horno con verduras asadas...");
        assert_eq!(monday.dinner_source, Some(MealSource::Homemade));

        let slots: Vec<_> = monday.meals.iter().map(|m| m.slot.as_str()).collect();
        assert_eq!(slots, vec!["dinner", "breakfast", "lunch"]);
        assert_eq!(monday.meals[2].name, "Ensalada de at\u{fa}n");
        assert!(monday.meals[2].portable);

        let friday = &overview.days[1];
        assert_eq!(friday.status, CalorieStatus::OffTarget);
        assert!(friday.office_day);
        assert_eq!(friday.dinner, "\u{2014}");
        assert_eq!(friday.notes.as_deref(), Some("cena fuera"));
    }

    #[test]
    fn test_week_totals() {
        let overview = WeekOverview::new(&plan(), 1800);
        assert_eq!(overview.average_kcal(), Some(1740.0));
        assert_eq!(overview.days_on_target(), 1);

        let empty = MealPlan::from_json(r#"{"year": 2026, "week": 8}"#).unwrap();
        assert_eq!(WeekOverview::new(&empty, 1800).average_kcal(), None);
    }
}
