use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::categories::{CategoryDto, CategoryPost},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    routes::params::IdQuery,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(get_categories).post(create_category))
}

#[utoipa::path(
    get,
    path = "/categories",
    params(
        ("id" = Option<String>, Query, description = "Single category to fetch; omit for the full list")
    ),
    responses(
        (status = 200, description = "Category or full list", body = [CategoryDto]),
        (status = 400, description = "No category with the requested id")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn get_categories(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    match query.parsed() {
        Some(id) => {
            let item = category_service::get_category(&state.pool, id).await?;
            Ok(Json(item).into_response())
        }
        None => {
            let list = category_service::list_categories(&state.pool).await?;
            Ok(Json(list).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryPost,
    responses(
        (status = 200, description = "Created category", body = CategoryDto),
        (status = 400, description = "Duplicate id or malformed body"),
        (status = 403, description = "Caller is not staff")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CategoryPost>, JsonRejection>,
) -> AppResult<Json<CategoryDto>> {
    let Json(payload) = payload.map_err(|_| AppError::bad_request())?;
    let resp = category_service::create_category(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}
