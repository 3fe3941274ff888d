use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::profile::{ProfileDto, ProfileUserRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(put_me).delete(delete_me))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileDto),
        (status = 400, description = "Account or profile not found"),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<ProfileDto>> {
    let resp = profile_service::get_profile(&state.pool, &user.email).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/me",
    request_body = ProfileUserRequest,
    responses(
        (status = 200, description = "Resulting profile", body = ProfileDto),
        (status = 400, description = "Email mismatch or malformed body"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn put_me(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProfileUserRequest>, JsonRejection>,
) -> AppResult<Json<ProfileDto>> {
    let Json(payload) = payload.map_err(|_| AppError::bad_request())?;
    let resp = profile_service::upsert_profile(&state.pool, &user.email, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/me",
    responses(
        (status = 200, description = "Account and profile deleted"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn delete_me(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    profile_service::delete_account(&state.pool, &user.email).await?;
    Ok(StatusCode::OK)
}
