use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Serialize;
use tracing::warn;

use service::auth::domain::{AuthUser, Claims, LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::AuthService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: AuthUser,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: Claims,
}

#[utoipa::path(post, path = "/api/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let session = state.auth.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".into(),
            token: session.token,
            user: session.user,
        }),
    ))
}

#[utoipa::path(post, path = "/api/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged In"), (status = 400, description = "Bad Request")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token: session.token,
        user: session.user,
    }))
}

/// Echoes the verified claims; no secondary lookup.
#[utoipa::path(get, path = "/api/profile", tag = "auth",
    responses((status = 200, description = "Profile"), (status = 401, description = "Unauthenticated"), (status = 403, description = "Invalid token")))]
pub async fn profile(Extension(claims): Extension<Claims>) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: claims })
}

/// Route-layer guard for protected endpoints: validates
/// `Authorization: Bearer <token>` and injects the decoded claims.
/// Missing credential is 401; bad signature, malformed, or expired is 403.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();

    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        warn!(%path, "missing bearer token");
        return Err(AuthError::Unauthenticated.into());
    };

    let claims = state.auth.verify_token(token).map_err(|e| {
        warn!(%path, error = %e, "token validation failed");
        ApiError(e)
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
