//! Month view for the scheduler page. Nothing here fires anything; it only
//! lays the active alarms over the days of a month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::alarm::{DayLabel, WateringAlarm};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlarmSlot {
    pub id: String,
    pub time: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: DayLabel,
    pub alarms: Vec<AlarmSlot>,
}

/// Returns one entry per day of `year`-`month`, or `None` for an invalid month.
/// Slots within a day are ordered by time.
pub fn month_calendar(alarms: &[WateringAlarm], year: i32, month: u32) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let weekday = DayLabel::from_weekday(date.weekday());
            let mut slots: Vec<AlarmSlot> = alarms
                .iter()
                .filter(|a| a.is_active && a.days.contains(&weekday))
                .map(|a| AlarmSlot {
                    id: a.id.clone(),
                    time: a.time.clone(),
                    label: a.label.clone(),
                })
                .collect();
            slots.sort_by(|a, b| a.time.cmp(&b.time));

            CalendarDay {
                date,
                day: date.day(),
                weekday,
                alarms: slots,
            }
        })
        .collect();

    Some(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alarm(id: &str, time: &str, days: Vec<DayLabel>, is_active: bool) -> WateringAlarm {
        WateringAlarm {
            id: id.to_string(),
            time: time.to_string(),
            days,
            is_active,
            label: format!("alarm {id}"),
        }
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(month_calendar(&[], 2024, 2).unwrap().len(), 29);
        assert_eq!(month_calendar(&[], 2023, 2).unwrap().len(), 28);
        assert_eq!(month_calendar(&[], 2023, 10).unwrap().len(), 31);
    }

    #[test]
    fn test_invalid_month() {
        assert!(month_calendar(&[], 2023, 13).is_none());
        assert!(month_calendar(&[], 2023, 0).is_none());
    }

    #[test]
    fn test_active_alarms_land_on_their_weekdays() {
        let alarms = vec![
            alarm("1", "07:00", vec![DayLabel::Senin, DayLabel::Rabu], true),
            alarm("2", "16:30", vec![DayLabel::Senin], false),
        ];
        // 2023-10-02 is a Monday.
        let days = month_calendar(&alarms, 2023, 10).unwrap();

        let monday = &days[1];
        assert_eq!(monday.weekday, DayLabel::Senin);
        assert_eq!(monday.alarms.len(), 1);
        assert_eq!(monday.alarms[0].id, "1");

        let tuesday = &days[2];
        assert!(tuesday.alarms.is_empty());

        let with_alarms = days.iter().filter(|d| !d.alarms.is_empty()).count();
        // Mondays 2,9,16,23,30 and Wednesdays 4,11,18,25.
        assert_eq!(with_alarms, 9);
    }

    #[test]
    fn test_slots_sorted_by_time() {
        let alarms = vec![
            alarm("late", "18:00", vec![DayLabel::Minggu], true),
            alarm("early", "06:15", vec![DayLabel::Minggu], true),
        ];
        // 2023-10-01 is a Sunday.
        let days = month_calendar(&alarms, 2023, 10).unwrap();
        let ids: Vec<_> = days[0].alarms.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
