// Watering scheduler: the alarm list and its month view.
// Alarms are records only; no timer or notification is attached to them.

pub mod calendar;
pub mod handlers;
pub mod store;

pub use store::{AlarmError, AlarmStore};
