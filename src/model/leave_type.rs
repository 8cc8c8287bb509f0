use crate::error::HrmError;
use crate::model::leave::LeaveTypeName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

/// Catalog row describing one leave category and its default annual
/// entitlement. The `code` column is unique and referenced by leaves.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "sick")]
    pub code: LeaveTypeName,
    #[schema(example = "Sick Leave")]
    pub name: String,
    pub description: String,
    #[schema(example = 10)]
    pub default_days_per_year: i32,
    pub is_active: bool,
    pub requires_approval: bool,
    #[schema(example = "#dc3545")]
    pub color: String,
    #[schema(example = "medical")]
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a catalog row.
#[derive(Debug, Clone, serde::Deserialize, ToSchema)]
pub struct NewLeaveType {
    #[schema(example = "sick")]
    pub code: LeaveTypeName,
    #[schema(example = "Sick Leave")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = 10)]
    pub default_days_per_year: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    #[serde(default = "default_color")]
    #[schema(example = "#007bff")]
    pub color: String,
    #[serde(default)]
    pub icon: String,
}

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    "#007bff".to_string()
}

/// Checks a raw code against the closed set of known leave types.
pub fn validate_leave_type(code: &str) -> Result<LeaveTypeName, HrmError> {
    LeaveTypeName::from_str(code).map_err(|_| HrmError::InvalidLeaveType)
}

/// Seed row used to populate an empty catalog at startup.
pub struct LeaveTypeSeed {
    pub code: LeaveTypeName,
    pub name: &'static str,
    pub description: &'static str,
    pub default_days_per_year: i32,
    pub color: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_LEAVE_TYPES: [LeaveTypeSeed; 6] = [
    LeaveTypeSeed {
        code: LeaveTypeName::Sick,
        name: "Sick Leave",
        description: "Medical leave for illness, injury, or health-related issues.",
        default_days_per_year: 10,
        color: "#dc3545",
        icon: "medical",
    },
    LeaveTypeSeed {
        code: LeaveTypeName::Vacation,
        name: "Vacation Leave",
        description: "Annual vacation time for rest, relaxation, and personal activities.",
        default_days_per_year: 20,
        color: "#28a745",
        icon: "vacation",
    },
    LeaveTypeSeed {
        code: LeaveTypeName::Personal,
        name: "Personal Leave",
        description: "Personal time off for various personal matters.",
        default_days_per_year: 5,
        color: "#ffc107",
        icon: "personal",
    },
    LeaveTypeSeed {
        code: LeaveTypeName::Maternity,
        name: "Maternity Leave",
        description: "Leave for expecting mothers before and after childbirth.",
        default_days_per_year: 90,
        color: "#e83e8c",
        icon: "maternity",
    },
    LeaveTypeSeed {
        code: LeaveTypeName::Paternity,
        name: "Paternity Leave",
        description: "Leave for new fathers to bond with their newborn child.",
        default_days_per_year: 14,
        color: "#17a2b8",
        icon: "paternity",
    },
    LeaveTypeSeed {
        code: LeaveTypeName::Other,
        name: "Other Leave",
        description: "Other types of leave for special circumstances.",
        default_days_per_year: 0,
        color: "#6c757d",
        icon: "other",
    },
];
