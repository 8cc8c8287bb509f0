use crate::error::HrmError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Core identity record. The password hash never leaves the server:
/// it is skipped during serialization.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@company.com", format = "email")]
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(value_type = Option<String>, write_only)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Business validation applied before a user is stored.
    pub fn validate(name: &str, email: &str, password: &str) -> Result<(), HrmError> {
        if name.trim().is_empty() {
            return Err(HrmError::InvalidName);
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(HrmError::InvalidEmail);
        }
        if password.len() < 6 {
            return Err(HrmError::InvalidPassword);
        }
        Ok(())
    }
}
