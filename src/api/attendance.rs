use crate::auth::auth::AuthUser;
use crate::error::HrmError;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::work_break::Break;
use crate::service::AttendanceService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendanceRequest {
    /// Defaults to the calling user
    #[schema(example = 1)]
    pub user_id: Option<u64>,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct CheckRequest {
    /// Defaults to today (UTC)
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendanceRequest {
    #[schema(example = "2024-01-15T09:00:00Z", format = "date-time", value_type = String)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[schema(example = "2024-01-15T17:00:00Z", format = "date-time", value_type = String)]
    pub check_out_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, IntoParams)]
pub struct DateQuery {
    #[param(example = "2024-01-15")]
    pub date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct RangeQuery {
    #[param(example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[param(example = "2024-01-31")]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct RecentQuery {
    /// Number of most recent days to return
    #[param(example = 7)]
    pub limit: Option<u32>,
}

/// Attendance row plus its derived status and loaded breaks.
#[derive(Serialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub user_id: u64,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[schema(example = 7.0)]
    pub total_work_hours: f64,
    #[schema(example = "completed")]
    pub status: AttendanceStatus,
    pub breaks: Vec<Break>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time", value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(a: Attendance) -> Self {
        let status = a.status();
        Self {
            id: a.id,
            user_id: a.user_id,
            date: a.date,
            check_in_time: a.check_in_time,
            check_out_time: a.check_out_time,
            total_work_hours: a.total_work_hours,
            status,
            breaks: a.breaks,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

fn respond(attendance: Attendance) -> HttpResponse {
    HttpResponse::Ok().json(AttendanceResponse::from(attendance))
}

fn respond_many(rows: Vec<Attendance>) -> HttpResponse {
    let rows: Vec<AttendanceResponse> = rows.into_iter().map(Into::into).collect();
    HttpResponse::Ok().json(rows)
}

/// Create (or fetch) the attendance row for a user and date
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendanceRequest,
    responses(
        (status = 200, description = "Attendance row", body = AttendanceResponse),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn create_attendance(
    auth: AuthUser,
    body: web::Json<CreateAttendanceRequest>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    let user_id = body.user_id.unwrap_or(auth.user_id);
    Ok(respond(attendance.create_attendance(user_id, body.date).await?))
}

/// Check in for the day
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Checked in", body = AttendanceResponse),
        (status = 409, description = "Already checked in"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    body: web::Json<CheckRequest>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(respond(attendance.check_in(auth.user_id, date).await?))
}

/// Check out for the day
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Checked out", body = AttendanceResponse),
        (status = 400, description = "Not checked in"),
        (status = 404, description = "No attendance row for the date"),
        (status = 409, description = "Already checked out"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    body: web::Json<CheckRequest>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(respond(attendance.check_out(auth.user_id, date).await?))
}

/// List all attendance rows
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    responses((status = 200, description = "All attendance rows")),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    Ok(respond_many(attendance.get_all_attendance().await?))
}

/// Get an attendance row by id
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance row", body = AttendanceResponse),
        (status = 404, description = "Attendance not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_attendance(
    path: web::Path<u64>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    Ok(respond(attendance.get_attendance_by_id(path.into_inner()).await?))
}

/// Correct an attendance row's timestamps
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance id")),
    request_body = UpdateAttendanceRequest,
    responses(
        (status = 200, description = "Updated row", body = AttendanceResponse),
        (status = 404, description = "Attendance not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update_attendance(
    path: web::Path<u64>,
    body: web::Json<UpdateAttendanceRequest>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    let updated = attendance
        .update_attendance(path.into_inner(), body.check_in_time, body.check_out_time)
        .await?;
    Ok(respond(updated))
}

/// Delete an attendance row
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Attendance not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    path: web::Path<u64>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    attendance.delete_attendance(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Get a user's attendance for one date
#[utoipa::path(
    get,
    path = "/api/v1/attendance/user/{user_id}",
    params(("user_id" = u64, Path, description = "User id"), DateQuery),
    responses(
        (status = 200, description = "Attendance row", body = AttendanceResponse),
        (status = 404, description = "User or attendance not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_user_attendance(
    path: web::Path<u64>,
    query: web::Query<DateQuery>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    Ok(respond(
        attendance
            .get_user_attendance(path.into_inner(), query.date)
            .await?,
    ))
}

/// Get a user's attendance over a date range
#[utoipa::path(
    get,
    path = "/api/v1/attendance/user/{user_id}/range",
    params(("user_id" = u64, Path, description = "User id"), RangeQuery),
    responses(
        (status = 200, description = "Attendance rows"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_user_attendance_range(
    path: web::Path<u64>,
    query: web::Query<RangeQuery>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    Ok(respond_many(
        attendance
            .get_user_attendance_range(path.into_inner(), query.start_date, query.end_date)
            .await?,
    ))
}

/// Get a user's most recent attendance rows
#[utoipa::path(
    get,
    path = "/api/v1/attendance/user/{user_id}/recent",
    params(("user_id" = u64, Path, description = "User id"), RecentQuery),
    responses(
        (status = 200, description = "Most recent attendance rows"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_recent_attendance(
    path: web::Path<u64>,
    query: web::Query<RecentQuery>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, HrmError> {
    let limit = query.limit.unwrap_or(7).min(100);
    Ok(respond_many(
        attendance.get_last_n_by_user(path.into_inner(), limit).await?,
    ))
}
