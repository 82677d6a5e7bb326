use serde::{Deserialize, Serialize};

/// Day label as shown in the scheduler, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayLabel {
    Senin,
    Selasa,
    Rabu,
    Kamis,
    Jumat,
    Sabtu,
    Minggu,
}

impl DayLabel {
    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        use chrono::Weekday::*;
        match weekday {
            Mon => DayLabel::Senin,
            Tue => DayLabel::Selasa,
            Wed => DayLabel::Rabu,
            Thu => DayLabel::Kamis,
            Fri => DayLabel::Jumat,
            Sat => DayLabel::Sabtu,
            Sun => DayLabel::Minggu,
        }
    }
}

/// A watering reminder. `is_active` is display state only; nothing fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringAlarm {
    pub id: String,
    /// Time of day, `HH:MM`.
    pub time: String,
    pub days: Vec<DayLabel>,
    pub is_active: bool,
    pub label: String,
}
