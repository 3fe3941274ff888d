use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::auth::{SigninRequest, SignupRequest, TokenResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::StatusResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/validate", get(validate))
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 403, description = "Invalid email, invalid password, or email already registered", body = StatusResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(payload) = payload.map_err(|_| AppError::forbidden("Invalid email or password"))?;
    let resp = auth_service::signup(&state.pool, &state.tokens, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 403, description = "Invalid credentials", body = StatusResponse)
    ),
    tag = "Auth"
)]
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(payload) = payload.map_err(|_| AppError::forbidden("Invalid email or password"))?;
    let resp = auth_service::signin(&state.pool, &state.tokens, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/validate",
    responses(
        (status = 200, description = "Echo of the caller's verified claims", body = String),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn validate(user: AuthUser) -> String {
    format!("Hello, {} {}", user.role, user.email)
}
