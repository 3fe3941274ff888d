use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::meals::{MealDto, MealPost},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    routes::params::IdQuery,
    services::meal_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/meals", get(get_meals).post(create_meal))
}

#[utoipa::path(
    get,
    path = "/meals",
    params(
        ("id" = Option<String>, Query, description = "Single meal to fetch; omit for the full list")
    ),
    responses(
        (status = 200, description = "Meal or full list, category ids ordered by position", body = [MealDto]),
        (status = 400, description = "No meal with the requested id")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn get_meals(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    match query.parsed() {
        Some(id) => {
            let item = meal_service::get_meal(&state.pool, id).await?;
            Ok(Json(item).into_response())
        }
        None => {
            let list = meal_service::list_meals(&state.pool).await?;
            Ok(Json(list).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/meals",
    request_body = MealPost,
    responses(
        (status = 200, description = "Created meal with its requested category ids", body = MealDto),
        (status = 400, description = "Duplicate id, negative price, or malformed body"),
        (status = 403, description = "Caller is not staff")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn create_meal(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<MealPost>, JsonRejection>,
) -> AppResult<Json<MealDto>> {
    let Json(payload) = payload.map_err(|_| AppError::bad_request())?;
    let resp = meal_service::create_meal(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}
