//! Alarm store — watering reminders persisted as one list.
//!
//! Every mutation loads the list, changes it and writes the whole list back.
//! Toggling and deleting an unknown id change nothing and write nothing.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveTime;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::alarm::{DayLabel, WateringAlarm};
use crate::storage::{load_json, save_json, KvStore, StorageError, ALARMS_KEY};

#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fields a caller supplies for a new alarm. New alarms start active.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlarm {
    pub time: String,
    pub days: Vec<DayLabel>,
    pub label: String,
}

fn seed_alarms() -> Vec<WateringAlarm> {
    vec![
        WateringAlarm {
            id: "1".to_string(),
            time: "07:00".to_string(),
            days: vec![DayLabel::Senin, DayLabel::Rabu, DayLabel::Jumat],
            is_active: true,
            label: "Penyiraman Pagi".to_string(),
        },
        WateringAlarm {
            id: "2".to_string(),
            time: "16:30".to_string(),
            days: vec![DayLabel::Selasa, DayLabel::Kamis, DayLabel::Sabtu],
            is_active: false,
            label: "Penyiraman Sore".to_string(),
        },
    ]
}

pub struct AlarmStore {
    kv: Arc<dyn KvStore>,
    write_lock: Mutex<()>,
}

impl AlarmStore {
    /// Opens the store, writing the two default alarms if no list was ever stored.
    pub async fn open(kv: Arc<dyn KvStore>) -> Result<Self, StorageError> {
        if kv.get(ALARMS_KEY).await?.is_none() {
            save_json(kv.as_ref(), ALARMS_KEY, &seed_alarms()).await?;
            info!("Seeded default watering alarms");
        }
        Ok(Self::with_store(kv))
    }

    /// Wraps `kv` as-is, without seeding.
    pub fn with_store(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<WateringAlarm>, StorageError> {
        Ok(load_json(self.kv.as_ref(), ALARMS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, alarms: &[WateringAlarm]) -> Result<(), StorageError> {
        save_json(self.kv.as_ref(), ALARMS_KEY, alarms).await
    }

    /// Flips `is_active` on the matching alarm and returns it.
    pub async fn toggle(&self, id: &str) -> Result<Option<WateringAlarm>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut alarms = self.list().await?;

        let Some(alarm) = alarms.iter_mut().find(|a| a.id == id) else {
            debug!("toggle: no alarm with id {id}");
            return Ok(None);
        };
        alarm.is_active = !alarm.is_active;
        let toggled = alarm.clone();

        self.save(&alarms).await?;
        Ok(Some(toggled))
    }

    /// Removes the matching alarm. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut alarms = self.list().await?;

        let before = alarms.len();
        alarms.retain(|a| a.id != id);
        if alarms.len() == before {
            debug!("delete: no alarm with id {id}");
            return Ok(false);
        }

        self.save(&alarms).await?;
        Ok(true)
    }

    pub async fn create(&self, new: NewAlarm) -> Result<WateringAlarm, AlarmError> {
        let alarm = validate_new_alarm(new)?;

        let _guard = self.write_lock.lock().await;
        let mut alarms = self.list().await?;
        alarms.push(alarm.clone());
        self.save(&alarms).await?;

        info!("Created alarm {} at {}", alarm.id, alarm.time);
        Ok(alarm)
    }
}

fn validate_new_alarm(new: NewAlarm) -> Result<WateringAlarm, AlarmError> {
    let time = NaiveTime::parse_from_str(new.time.trim(), "%H:%M").map_err(|_| {
        AlarmError::Validation(format!("time '{}' must be HH:MM", new.time))
    })?;

    if new.days.is_empty() {
        return Err(AlarmError::Validation(
            "at least one day is required".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    if !new.days.iter().all(|d| seen.insert(*d)) {
        return Err(AlarmError::Validation("days must not repeat".to_string()));
    }

    let label = new.label.trim();
    if label.is_empty() {
        return Err(AlarmError::Validation("label cannot be empty".to_string()));
    }

    Ok(WateringAlarm {
        id: Uuid::new_v4().to_string(),
        time: time.format("%H:%M").to_string(),
        days: new.days,
        is_active: true,
        label: label.to_string(),
    })
}
