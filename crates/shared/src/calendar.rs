use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

const ON_TARGET_KCAL: i64 = 50;
const NEAR_TARGET_KCAL: i64 = 100;

#[derive(EnumString, Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn spanish(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Mi\u{e9}rcoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "S\u{e1}bado",
            Weekday::Sunday => "Domingo",
        }
    }
}

/// Spanish name of an English weekday; anything unrecognised passes through.
pub fn weekday_es(weekday: &str) -> &str {
    match weekday.parse::<Weekday>() {
        Ok(day) => day.spanish(),
        Err(_) => weekday,
    }
}

pub fn slot_label_es(slot: &str) -> &str {
    match slot {
        "breakfast" => "Desayuno",
        "lunch" => "Almuerzo",
        "snack1" => "Merienda 1",
        "snack2" => "Merienda 2",
        "dinner" => "Cena",
        other => other,
    }
}

/// How close a day's calories landed to the daily target.
#[derive(Serialize, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CalorieStatus {
    OnTarget,
    NearTarget,
    OffTarget,
}

impl CalorieStatus {
    pub fn classify(actual: i64, target: i64) -> Self {
        let diff = (actual - target).abs();
        if diff <= ON_TARGET_KCAL {
            CalorieStatus::OnTarget
        } else if diff <= NEAR_TARGET_KCAL {
            CalorieStatus::NearTarget
        } else {
            CalorieStatus::OffTarget
        }
    }
}
