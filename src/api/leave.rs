use crate::auth::auth::AuthUser;
use crate::error::HrmError;
use crate::model::leave_type::validate_leave_type;
use crate::service::leave::LeaveDraft;
use crate::service::LeaveService;
use actix_web::{web, HttpResponse};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = "vacation")]
    pub leave_type: String,
    #[schema(example = "2025-06-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family trip")]
    pub reason: String,
    pub description: Option<String>,
}

impl LeaveRequest {
    fn into_draft(self) -> Result<LeaveDraft, HrmError> {
        Ok(LeaveDraft {
            leave_type: validate_leave_type(&self.leave_type)?,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            description: self.description,
        })
    }
}

#[derive(Deserialize, ToSchema)]
pub struct RejectLeaveRequest {
    #[schema(example = "short staffed that week")]
    pub reject_reason: String,
}

#[derive(Deserialize, IntoParams)]
pub struct LeaveRangeQuery {
    #[param(example = "2025-06-01")]
    pub start_date: NaiveDate,
    #[param(example = "2025-06-30")]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Defaults to the current year
    #[param(example = 2025)]
    pub year: Option<i32>,
}

/// Request a leave for the calling user
#[utoipa::path(
    post,
    path = "/api/v1/leaves",
    request_body = LeaveRequest,
    responses(
        (status = 201, description = "Leave created as pending"),
        (status = 400, description = "Invalid type, dates, or reason, or overlaps an existing leave"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn create_leave(
    auth: AuthUser,
    body: web::Json<LeaveRequest>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    let draft = body.into_inner().into_draft()?;
    let leave = leaves.create_leave(auth.user_id, draft).await?;
    Ok(HttpResponse::Created().json(leave))
}

/// List all leaves
#[utoipa::path(
    get,
    path = "/api/v1/leaves",
    responses((status = 200, description = "All leaves")),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn list_leaves(leaves: web::Data<LeaveService>) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.get_all_leaves().await?))
}

/// List leaves awaiting a decision
#[utoipa::path(
    get,
    path = "/api/v1/leaves/pending",
    responses((status = 200, description = "Pending leaves")),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn list_pending_leaves(
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.get_pending_leaves().await?))
}

/// Get a leave by id
#[utoipa::path(
    get,
    path = "/api/v1/leaves/{id}",
    params(("id" = u64, Path, description = "Leave id")),
    responses(
        (status = 200, description = "Leave"),
        (status = 404, description = "Leave not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_leave(
    path: web::Path<u64>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.get_leave_by_id(path.into_inner()).await?))
}

/// Rewrite a leave request
#[utoipa::path(
    put,
    path = "/api/v1/leaves/{id}",
    params(("id" = u64, Path, description = "Leave id")),
    request_body = LeaveRequest,
    responses(
        (status = 200, description = "Updated leave"),
        (status = 400, description = "Invalid type, dates, or reason"),
        (status = 404, description = "Leave not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn update_leave(
    path: web::Path<u64>,
    body: web::Json<LeaveRequest>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    let draft = body.into_inner().into_draft()?;
    Ok(HttpResponse::Ok().json(leaves.update_leave(path.into_inner(), draft).await?))
}

/// Delete a leave
#[utoipa::path(
    delete,
    path = "/api/v1/leaves/{id}",
    params(("id" = u64, Path, description = "Leave id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Leave not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn delete_leave(
    path: web::Path<u64>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    leaves.delete_leave(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Approve a pending leave; the caller becomes the approver
#[utoipa::path(
    put,
    path = "/api/v1/leaves/{id}/approve",
    params(("id" = u64, Path, description = "Leave id")),
    responses(
        (status = 200, description = "Approved leave"),
        (status = 404, description = "Leave not found"),
        (status = 409, description = "Leave is not pending"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn approve_leave(
    auth: AuthUser,
    path: web::Path<u64>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.approve_leave(path.into_inner(), auth.user_id).await?))
}

/// Reject a pending leave with a reason
#[utoipa::path(
    put,
    path = "/api/v1/leaves/{id}/reject",
    params(("id" = u64, Path, description = "Leave id")),
    request_body = RejectLeaveRequest,
    responses(
        (status = 200, description = "Rejected leave"),
        (status = 404, description = "Leave not found"),
        (status = 409, description = "Leave is not pending"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn reject_leave(
    auth: AuthUser,
    path: web::Path<u64>,
    body: web::Json<RejectLeaveRequest>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    let rejected = leaves
        .reject_leave(path.into_inner(), auth.user_id, body.into_inner().reject_reason)
        .await?;
    Ok(HttpResponse::Ok().json(rejected))
}

/// Cancel one's own pending or approved leave
#[utoipa::path(
    put,
    path = "/api/v1/leaves/{id}/cancel",
    params(("id" = u64, Path, description = "Leave id")),
    responses(
        (status = 200, description = "Cancelled leave"),
        (status = 400, description = "Leave cannot be cancelled"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Leave not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn cancel_leave(
    auth: AuthUser,
    path: web::Path<u64>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.cancel_leave(path.into_inner(), auth.user_id).await?))
}

/// List one user's leaves
#[utoipa::path(
    get,
    path = "/api/v1/leaves/user/{user_id}",
    params(("user_id" = u64, Path, description = "User id")),
    responses((status = 200, description = "User's leaves")),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_user_leaves(
    path: web::Path<u64>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leaves.get_user_leaves(path.into_inner()).await?))
}

/// List one user's leaves touching a date range
#[utoipa::path(
    get,
    path = "/api/v1/leaves/user/{user_id}/range",
    params(("user_id" = u64, Path, description = "User id"), LeaveRangeQuery),
    responses((status = 200, description = "Leaves overlapping the range")),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_user_leaves_by_range(
    path: web::Path<u64>,
    query: web::Query<LeaveRangeQuery>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    let rows = leaves
        .get_user_leaves_by_date_range(path.into_inner(), query.start_date, query.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Days of approved leave per type for one calendar year
#[utoipa::path(
    get,
    path = "/api/v1/leaves/user/{user_id}/balance",
    params(("user_id" = u64, Path, description = "User id"), BalanceQuery),
    responses((status = 200, description = "Per-type approved day totals")),
    security(("bearer_auth" = [])),
    tag = "Leaves"
)]
pub async fn get_user_leave_balance(
    path: web::Path<u64>,
    query: web::Query<BalanceQuery>,
    leaves: web::Data<LeaveService>,
) -> Result<HttpResponse, HrmError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let balance = leaves.get_user_leave_balance(path.into_inner(), year).await?;
    Ok(HttpResponse::Ok().json(balance))
}
