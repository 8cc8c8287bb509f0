use crate::error::HrmError;
use crate::service::BreakService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateBreakRequest {
    #[schema(example = 1)]
    pub attendance_id: u64,
    /// Defaults to now
    #[schema(example = "2024-01-15T12:00:00Z", format = "date-time", value_type = String)]
    pub start_time: Option<DateTime<Utc>>,
    #[schema(example = "lunch")]
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct EndBreakRequest {
    /// Defaults to now
    #[schema(example = "2024-01-15T13:00:00Z", format = "date-time", value_type = String)]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBreakRequest {
    #[schema(format = "date-time", value_type = Option<String>)]
    pub start_time: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub end_time: Option<DateTime<Utc>>,
    #[schema(example = "coffee")]
    pub reason: Option<String>,
}

/// Start a break
#[utoipa::path(
    post,
    path = "/api/v1/breaks",
    request_body = CreateBreakRequest,
    responses(
        (status = 201, description = "Break started"),
        (status = 404, description = "Attendance not found"),
        (status = 409, description = "A break is already in progress"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn create_break(
    body: web::Json<CreateBreakRequest>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    let start = body.start_time.unwrap_or_else(Utc::now);
    let created = breaks
        .create_break(body.attendance_id, start, &body.reason)
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// End an open break
#[utoipa::path(
    put,
    path = "/api/v1/breaks/{id}/end",
    params(("id" = u64, Path, description = "Break id")),
    request_body = EndBreakRequest,
    responses(
        (status = 200, description = "Break ended"),
        (status = 400, description = "End time precedes start time"),
        (status = 404, description = "Break not found"),
        (status = 409, description = "Break already ended"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn end_break(
    path: web::Path<u64>,
    body: web::Json<EndBreakRequest>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    let end = body.end_time.unwrap_or_else(Utc::now);
    Ok(HttpResponse::Ok().json(breaks.end_break(path.into_inner(), end).await?))
}

/// Get a break by id
#[utoipa::path(
    get,
    path = "/api/v1/breaks/{id}",
    params(("id" = u64, Path, description = "Break id")),
    responses(
        (status = 200, description = "Break"),
        (status = 404, description = "Break not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn get_break(
    path: web::Path<u64>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(breaks.get_break_by_id(path.into_inner()).await?))
}

/// List all breaks
#[utoipa::path(
    get,
    path = "/api/v1/breaks",
    responses((status = 200, description = "All breaks")),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn list_breaks(breaks: web::Data<BreakService>) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(breaks.get_all_breaks().await?))
}

/// List the breaks of one attendance day
#[utoipa::path(
    get,
    path = "/api/v1/breaks/attendance/{attendance_id}",
    params(("attendance_id" = u64, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Breaks for the attendance"),
        (status = 404, description = "Attendance not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn get_breaks_by_attendance(
    path: web::Path<u64>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(breaks.get_breaks_by_attendance_id(path.into_inner()).await?))
}

/// Correct a break
#[utoipa::path(
    put,
    path = "/api/v1/breaks/{id}",
    params(("id" = u64, Path, description = "Break id")),
    request_body = UpdateBreakRequest,
    responses(
        (status = 200, description = "Updated break"),
        (status = 400, description = "End time precedes start time"),
        (status = 404, description = "Break not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn update_break(
    path: web::Path<u64>,
    body: web::Json<UpdateBreakRequest>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    let body = body.into_inner();
    let updated = breaks
        .update_break(path.into_inner(), body.start_time, body.end_time, body.reason)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a break
#[utoipa::path(
    delete,
    path = "/api/v1/breaks/{id}",
    params(("id" = u64, Path, description = "Break id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Break not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Breaks"
)]
pub async fn delete_break(
    path: web::Path<u64>,
    breaks: web::Data<BreakService>,
) -> Result<HttpResponse, HrmError> {
    breaks.delete_break(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
