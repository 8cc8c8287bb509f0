use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

/// Every failure an engine can produce, one variant per condition.
/// Transport mapping lives in the `ResponseError` impl below so the
/// services stay free of HTTP concerns.
#[derive(Debug, Display)]
pub enum HrmError {
    // Not found
    #[display(fmt = "user not found")]
    UserNotFound,
    #[display(fmt = "attendance not found")]
    AttendanceNotFound,
    #[display(fmt = "break not found")]
    BreakNotFound,
    #[display(fmt = "leave not found")]
    LeaveNotFound,
    #[display(fmt = "leave type not found")]
    LeaveTypeNotFound,

    // Conflicts
    #[display(fmt = "already checked in for this date")]
    AlreadyCheckedIn,
    #[display(fmt = "already checked out for this date")]
    AlreadyCheckedOut,
    #[display(fmt = "break already in progress")]
    BreakInProgress,
    #[display(fmt = "break already ended")]
    BreakAlreadyEnded,
    #[display(fmt = "leave is not pending, cannot approve")]
    LeaveAlreadyApproved,
    #[display(fmt = "leave is not pending, cannot reject")]
    LeaveAlreadyRejected,
    #[display(fmt = "user already exists")]
    UserAlreadyExists,
    #[display(fmt = "leave type already exists")]
    LeaveTypeExists,

    // Invalid input
    #[display(fmt = "not checked in yet")]
    NotCheckedIn,
    #[display(fmt = "invalid break time")]
    InvalidBreakTime,
    #[display(fmt = "invalid leave type")]
    InvalidLeaveType,
    #[display(fmt = "start date must be before or equal to end date")]
    InvalidDateRange,
    #[display(fmt = "leave date cannot be in the past")]
    LeaveDateInPast,
    #[display(fmt = "reason is required")]
    ReasonRequired,
    #[display(fmt = "name cannot be empty")]
    InvalidName,
    #[display(fmt = "invalid email format")]
    InvalidEmail,
    #[display(fmt = "password must be at least 6 characters")]
    InvalidPassword,

    // Auth
    #[display(fmt = "invalid credentials")]
    InvalidCredentials,
    #[display(fmt = "unauthorized access")]
    Unauthorized,

    // Business rules
    #[display(fmt = "leave dates overlap with existing leave")]
    LeaveOverlap,
    #[display(fmt = "leave cannot be cancelled in its current status")]
    CannotCancelLeave,
    #[display(fmt = "insufficient leave balance")]
    #[allow(dead_code)] // reserved: balance enforcement is not active yet
    InsufficientLeaveBalance,
    #[display(fmt = "leave type is in use and cannot be deleted")]
    LeaveTypeInUse,

    #[display(fmt = "database error")]
    Database(sqlx::Error),
    #[display(fmt = "password hashing error")]
    PasswordHash(argon2::password_hash::Error),
}

impl From<sqlx::Error> for HrmError {
    fn from(err: sqlx::Error) -> Self {
        HrmError::Database(err)
    }
}

impl From<argon2::password_hash::Error> for HrmError {
    fn from(err: argon2::password_hash::Error) -> Self {
        HrmError::PasswordHash(err)
    }
}

impl ResponseError for HrmError {
    fn status_code(&self) -> StatusCode {
        use HrmError::*;
        match self {
            UserNotFound | AttendanceNotFound | BreakNotFound | LeaveNotFound
            | LeaveTypeNotFound => StatusCode::NOT_FOUND,

            AlreadyCheckedIn | AlreadyCheckedOut | BreakInProgress | BreakAlreadyEnded
            | LeaveAlreadyApproved | LeaveAlreadyRejected | UserAlreadyExists
            | LeaveTypeExists => StatusCode::CONFLICT,

            NotCheckedIn | InvalidBreakTime | InvalidLeaveType | InvalidDateRange
            | LeaveDateInPast | ReasonRequired | InvalidName | InvalidEmail
            | InvalidPassword => StatusCode::BAD_REQUEST,

            InvalidCredentials => StatusCode::UNAUTHORIZED,
            Unauthorized => StatusCode::FORBIDDEN,

            LeaveOverlap | CannotCancelLeave | InsufficientLeaveBalance | LeaveTypeInUse => {
                StatusCode::BAD_REQUEST
            }

            Database(_) | PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            HrmError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                // Never leak driver details to the client
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "internal server error" }))
            }
            HrmError::PasswordHash(e) => {
                tracing::error!(error = %e, "password hashing failure");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "internal server error" }))
            }
            _ => HttpResponse::build(self.status_code())
                .json(json!({ "error": self.to_string() })),
        }
    }
}
