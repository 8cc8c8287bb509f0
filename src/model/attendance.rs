use crate::model::work_break::Break;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use strum::Display;
use utoipa::ToSchema;

/// Derived presence state. Never persisted: always recomputed from the
/// check-in/check-out timestamps so the stored row cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Absent,
    Present,
    Completed,
}

/// One user's recorded presence for one calendar date. At most one row
/// exists per (user_id, date); the schema carries a UNIQUE key for it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub user_id: u64,
    #[schema(value_type = String, format = "date", example = "2024-01-15")]
    pub date: NaiveDate,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    /// Fractional hours worked, net of ended breaks. Never negative.
    #[schema(example = 7.0)]
    pub total_work_hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Loaded on demand, not a column.
    #[sqlx(skip)]
    #[serde(skip)]
    pub breaks: Vec<Break>,
}

impl Attendance {
    pub fn status(&self) -> AttendanceStatus {
        match (self.check_in_time, self.check_out_time) {
            (None, _) => AttendanceStatus::Absent,
            (Some(_), None) => AttendanceStatus::Present,
            (Some(_), Some(_)) => AttendanceStatus::Completed,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        self.check_in_time.is_some()
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    /// Recomputes `total_work_hours`: zero unless both stamps are set,
    /// otherwise the span minus every ended break (open breaks count 0),
    /// clamped at zero against clock skew or bad data.
    pub fn calculate_work_hours(&mut self) {
        let (check_in, check_out) = match (self.check_in_time, self.check_out_time) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                self.total_work_hours = 0.0;
                return;
            }
        };

        let mut hours = (check_out - check_in).num_seconds() as f64 / 3600.0;
        for b in &self.breaks {
            if let Some(end) = b.end_time {
                hours -= (end - b.start_time).num_seconds() as f64 / 3600.0;
            }
        }

        self.total_work_hours = hours.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn attendance(check_in: Option<&str>, check_out: Option<&str>) -> Attendance {
        Attendance {
            id: 1,
            user_id: 1,
            date: "2024-01-15".parse().unwrap(),
            check_in_time: check_in.map(ts),
            check_out_time: check_out.map(ts),
            total_work_hours: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            breaks: Vec::new(),
        }
    }

    fn ended_break(start: &str, end: &str) -> Break {
        Break {
            id: 1,
            attendance_id: 1,
            start_time: ts(start),
            end_time: Some(ts(end)),
            duration_minutes: 0.0,
            reason: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_follows_timestamp_presence() {
        assert_eq!(attendance(None, None).status(), AttendanceStatus::Absent);
        assert_eq!(
            attendance(Some("2024-01-15 09:00:00"), None).status(),
            AttendanceStatus::Present
        );
        assert_eq!(
            attendance(Some("2024-01-15 09:00:00"), Some("2024-01-15 17:00:00")).status(),
            AttendanceStatus::Completed
        );
    }

    #[test]
    fn work_hours_zero_without_both_stamps() {
        let mut a = attendance(Some("2024-01-15 09:00:00"), None);
        a.total_work_hours = 5.0;
        a.calculate_work_hours();
        assert_eq!(a.total_work_hours, 0.0);
    }

    #[test]
    fn work_hours_subtract_ended_breaks_only() {
        let mut a = attendance(Some("2024-01-15 09:00:00"), Some("2024-01-15 17:00:00"));
        a.breaks.push(ended_break("2024-01-15 12:00:00", "2024-01-15 13:00:00"));
        // An open break contributes nothing.
        a.breaks.push(Break {
            end_time: None,
            ..ended_break("2024-01-15 15:00:00", "2024-01-15 15:30:00")
        });
        a.calculate_work_hours();
        assert_eq!(a.total_work_hours, 7.0);
    }

    #[test]
    fn work_hours_clamped_at_zero() {
        let mut a = attendance(Some("2024-01-15 09:00:00"), Some("2024-01-15 09:30:00"));
        a.breaks.push(ended_break("2024-01-15 09:00:00", "2024-01-15 11:00:00"));
        a.calculate_work_hours();
        assert_eq!(a.total_work_hours, 0.0);
    }

    #[test]
    fn calculate_work_hours_is_idempotent() {
        let mut a = attendance(Some("2024-01-15 09:00:00"), Some("2024-01-15 17:30:00"));
        a.calculate_work_hours();
        let first = a.total_work_hours;
        a.calculate_work_hours();
        assert_eq!(a.total_work_hours, first);
        assert!(first >= 0.0);
    }
}
