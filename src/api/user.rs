use crate::error::HrmError;
use crate::service::UserService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct ListQuery {
    /// Page size, capped at 100
    #[param(example = 20)]
    pub limit: Option<u32>,
    #[param(example = 0)]
    pub offset: Option<u32>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john@company.com")]
    pub email: Option<String>,
    #[schema(example = "newsecret")]
    pub password: Option<String>,
}

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListQuery),
    responses((status = 200, description = "Users")),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    query: web::Query<ListQuery>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, HrmError> {
    let limit = query.limit.unwrap_or(20).min(100);
    let offset = query.offset.unwrap_or(0);
    Ok(HttpResponse::Ok().json(users.list_users(limit, offset).await?))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    path: web::Path<u64>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(users.get_user_by_id(path.into_inner()).await?))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, description = "Invalid name, email, or password"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    path: web::Path<u64>,
    body: web::Json<UpdateUserRequest>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, HrmError> {
    let body = body.into_inner();
    let user = users
        .update_user(path.into_inner(), body.name, body.email, body.password)
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    path: web::Path<u64>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, HrmError> {
    users.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
