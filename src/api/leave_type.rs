use crate::error::HrmError;
use crate::model::leave_type::{validate_leave_type, NewLeaveType};
use crate::service::LeaveTypeService;
use actix_web::{web, HttpResponse};

// Re-exported so the OpenAPI components list can name it.
pub use crate::service::leave_type::LeaveTypeUsage;

/// Add a leave type to the catalog
#[utoipa::path(
    post,
    path = "/api/v1/leave-types",
    request_body = NewLeaveType,
    responses(
        (status = 201, description = "Leave type created"),
        (status = 409, description = "Code already in the catalog"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn create_leave_type(
    body: web::Json<NewLeaveType>,
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    let created = leave_types.create_leave_type(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/api/v1/leave-types",
    responses((status = 200, description = "All leave types")),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn list_leave_types(
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leave_types.get_all_leave_types().await?))
}

/// List active leave types only
#[utoipa::path(
    get,
    path = "/api/v1/leave-types/active",
    responses((status = 200, description = "Active leave types")),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn list_active_leave_types(
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leave_types.get_active_leave_types().await?))
}

/// Usage counts per leave type
#[utoipa::path(
    get,
    path = "/api/v1/leave-types/stats",
    responses((status = 200, description = "Leave counts per type", body = [LeaveTypeUsage])),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn leave_type_stats(
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leave_types.get_usage_stats().await?))
}

/// Get a leave type by its code
#[utoipa::path(
    get,
    path = "/api/v1/leave-types/code/{code}",
    params(("code" = String, Path, description = "Leave type code, e.g. vacation")),
    responses(
        (status = 200, description = "Leave type"),
        (status = 400, description = "Unknown code"),
        (status = 404, description = "Code not in the catalog"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn get_leave_type_by_code(
    path: web::Path<String>,
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    let code = validate_leave_type(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(leave_types.get_leave_type_by_code(code).await?))
}

/// Get a leave type by id
#[utoipa::path(
    get,
    path = "/api/v1/leave-types/{id}",
    params(("id" = u64, Path, description = "Leave type id")),
    responses(
        (status = 200, description = "Leave type"),
        (status = 404, description = "Leave type not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn get_leave_type(
    path: web::Path<u64>,
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(leave_types.get_leave_type_by_id(path.into_inner()).await?))
}

/// Update a leave type's descriptive fields
#[utoipa::path(
    put,
    path = "/api/v1/leave-types/{id}",
    params(("id" = u64, Path, description = "Leave type id")),
    request_body = NewLeaveType,
    responses(
        (status = 200, description = "Updated leave type"),
        (status = 404, description = "Leave type not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn update_leave_type(
    path: web::Path<u64>,
    body: web::Json<NewLeaveType>,
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    let updated = leave_types
        .update_leave_type(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Remove an unused leave type
#[utoipa::path(
    delete,
    path = "/api/v1/leave-types/{id}",
    params(("id" = u64, Path, description = "Leave type id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Leave type still referenced by leaves"),
        (status = 404, description = "Leave type not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Types"
)]
pub async fn delete_leave_type(
    path: web::Path<u64>,
    leave_types: web::Data<LeaveTypeService>,
) -> Result<HttpResponse, HrmError> {
    leave_types.delete_leave_type(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
