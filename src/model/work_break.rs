use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A bounded pause inside an attendance day. Duration is kept in minutes;
/// the parent attendance converts to hours when subtracting.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Break {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub attendance_id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes between start and end, 0 while the break is open.
    #[schema(example = 60.0)]
    pub duration_minutes: f64,
    #[schema(example = "lunch")]
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Break {
    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// Recomputes `duration_minutes` from the timestamps. An open break
    /// has no duration yet.
    pub fn calculate_duration(&mut self) {
        self.duration_minutes = match self.end_time {
            Some(end) => (end - self.start_time).num_seconds() as f64 / 60.0,
            None => 0.0,
        };
    }
}
