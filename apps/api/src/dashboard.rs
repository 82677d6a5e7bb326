//! Dashboard figures. Readings are fixed mock values; no sensor is polled.

use axum::Json;
use serde::Serialize;

use crate::models::sensor::{SensorReading, StatCard};

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        label: "Suhu",
        value: "24°C",
        sub_value: "Optimal: 18-25°C",
    },
    StatCard {
        label: "Kelembaban",
        value: "72%",
        sub_value: "Target: 60-80%",
    },
    StatCard {
        label: "Intensitas Cahaya",
        value: "450 Lux",
        sub_value: "Matahari Cerah",
    },
    StatCard {
        label: "Prediksi Panen",
        value: "12 Hari",
        sub_value: "+2kg dari bulan lalu",
    },
];

pub const HOURLY_READINGS: [SensorReading; 6] = [
    SensorReading { time: "06:00", temp: 18.0, humidity: 85.0 },
    SensorReading { time: "09:00", temp: 22.0, humidity: 75.0 },
    SensorReading { time: "12:00", temp: 26.0, humidity: 60.0 },
    SensorReading { time: "15:00", temp: 25.0, humidity: 65.0 },
    SensorReading { time: "18:00", temp: 21.0, humidity: 80.0 },
    SensorReading { time: "21:00", temp: 19.0, humidity: 88.0 },
];

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: &'static [StatCard],
    pub readings: &'static [SensorReading],
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard() -> Json<DashboardResponse> {
    Json(DashboardResponse {
        stats: &STAT_CARDS,
        readings: &HOURLY_READINGS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_are_in_time_order() {
        let times: Vec<_> = HOURLY_READINGS.iter().map(|r| r.time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }

    #[test]
    fn test_humidity_is_a_percentage() {
        assert!(HOURLY_READINGS
            .iter()
            .all(|r| (0.0..=100.0).contains(&r.humidity)));
    }
}
