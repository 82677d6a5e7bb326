use serde::Serialize;

/// One point of the hourly climate chart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensorReading {
    pub time: &'static str,
    pub temp: f32,
    pub humidity: f32,
}

/// A headline figure on the dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub sub_value: &'static str,
}
