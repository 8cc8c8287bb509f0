use crate::{
    auth::jwt::{generate_access_token, generate_refresh_token, verify_token},
    config::Config,
    error::HrmError,
    models::TokenType,
    service::UserService,
};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@company.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "john@company.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(FromRow)]
struct RefreshRecord {
    id: u64,
    user_id: u64,
    revoked: bool,
}

async fn store_refresh_token(
    pool: &MySqlPool,
    user_id: u64,
    jti: &str,
    exp: usize,
) -> Result<(), HrmError> {
    sqlx::query(
        "INSERT INTO refresh_tokens (user_id, jti, expires_at) VALUES (?, ?, FROM_UNIXTIME(?))",
    )
    .bind(user_id)
    .bind(jti)
    .bind(exp as i64)
    .execute(pool)
    .await?;
    Ok(())
}

/// Creates an account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid name, email, or password"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    body: web::Json<RegisterRequest>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, HrmError> {
    let user = users
        .sign_up(body.name.trim(), body.email.trim(), &body.password)
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Checks credentials and issues an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPairResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[instrument(name = "auth_login", skip(body, users, pool, config), fields(email = %body.email))]
pub async fn login(
    body: web::Json<LoginRequest>,
    users: web::Data<UserService>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, HrmError> {
    let user = users.sign_in(body.email.trim(), &body.password).await?;

    let access_token = generate_access_token(
        user.id,
        user.email.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );
    let (refresh_token, refresh_claims) = generate_refresh_token(
        user.id,
        user.email.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    debug!(user_id = user.id, jti = %refresh_claims.jti, "storing refresh token");
    store_refresh_token(&pool, user.id, &refresh_claims.jti, refresh_claims.exp).await?;

    info!(user_id = user.id, "login successful");
    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access_token,
        refresh_token,
    }))
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Rotates a refresh token: the presented one is revoked and a fresh
/// pair is issued.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Auth",
    responses(
        (status = 200, description = "New token pair", body = TokenPairResponse),
        (status = 401, description = "Missing, invalid, or revoked refresh token"),
    )
)]
pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, HrmError> {
    let token = bearer_token(&req).ok_or(HrmError::InvalidCredentials)?;

    let claims =
        verify_token(token, &config.jwt_secret).map_err(|_| HrmError::InvalidCredentials)?;
    if claims.token_type != TokenType::Refresh {
        return Err(HrmError::InvalidCredentials);
    }

    let record = sqlx::query_as::<_, RefreshRecord>(
        "SELECT id, user_id, revoked FROM refresh_tokens WHERE jti = ?",
    )
    .bind(&claims.jti)
    .fetch_optional(pool.get_ref())
    .await?;

    let record = match record {
        Some(r) if !r.revoked => r,
        _ => return Err(HrmError::InvalidCredentials),
    };

    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = ?")
        .bind(record.id)
        .execute(pool.get_ref())
        .await?;

    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.user_id,
        claims.sub.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );
    store_refresh_token(&pool, record.user_id, &new_claims.jti, new_claims.exp).await?;

    let access_token = generate_access_token(
        claims.user_id,
        claims.sub,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access_token,
        refresh_token: new_refresh_token,
    }))
}

/// Revokes the presented refresh token. Always succeeds, even for
/// unknown tokens.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Refresh token revoked"))
)]
pub async fn logout(req: HttpRequest, pool: web::Data<MySqlPool>, config: web::Data<Config>) -> HttpResponse {
    let token = match bearer_token(&req) {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    let _ = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ?")
        .bind(&claims.jti)
        .execute(pool.get_ref())
        .await;

    HttpResponse::NoContent().finish()
}

/// Who am I, according to my token.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Current user id and email"))
)]
pub async fn me(user: crate::auth::auth::AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({"user_id": user.user_id, "email": user.email}))
}
