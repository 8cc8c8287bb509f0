use crate::error::HrmError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The closed set of leave categories. Stored as lowercase strings;
/// unknown codes are rejected at the serde/sqlx boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Display,
    EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveTypeName {
    Sick,
    Vacation,
    Personal,
    Maternity,
    Paternity,
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// A leave request. Dates are inclusive at both ends; `days` is derived
/// via [`calculate_leave_days`] whenever the range changes.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Leave {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub user_id: u64,
    pub leave_type: LeaveTypeName,
    pub status: LeaveStatus,
    #[schema(value_type = String, format = "date", example = "2025-06-10")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date", example = "2025-06-12")]
    pub end_date: NaiveDate,
    #[schema(example = 3.0)]
    pub days: f64,
    #[schema(example = "family trip")]
    pub reason: String,
    pub description: Option<String>,
    pub approved_by: Option<u64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<u64>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub reject_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inclusive calendar-day count: both endpoints count, so a single-day
/// leave is 1 day. All days are treated as full business days.
pub fn calculate_leave_days(start: NaiveDate, end: NaiveDate) -> f64 {
    ((end - start).num_days() + 1) as f64
}

impl Leave {
    /// Validates a draft before it is persisted; surfaces the first
    /// violated rule. `today` is passed in so the check is testable.
    pub fn validate(&self, today: NaiveDate) -> Result<(), HrmError> {
        if self.start_date > self.end_date {
            return Err(HrmError::InvalidDateRange);
        }
        if self.start_date < today {
            return Err(HrmError::LeaveDateInPast);
        }
        if self.reason.trim().is_empty() {
            return Err(HrmError::ReasonRequired);
        }
        Ok(())
    }

    pub fn can_approve(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    pub fn can_reject(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self.status, LeaveStatus::Pending | LeaveStatus::Approved)
    }

    /// True when this leave still blocks other requests on the same days.
    pub fn blocks_overlap(&self) -> bool {
        !matches!(self.status, LeaveStatus::Cancelled | LeaveStatus::Rejected)
    }
}
