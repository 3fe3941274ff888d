use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::orders::OrderDto,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::StatusResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order", post(place_order))
        .route("/order/{order_id}/markReady", post(mark_ready))
        .route("/orderHistory", get(order_history))
        .route("/orderIncomplete", get(order_incomplete))
}

#[utoipa::path(
    post,
    path = "/order",
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Placed order", body = OrderDto),
        (status = 400, description = "Empty list, unknown meal id, or no delivery address")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<Vec<i32>>, JsonRejection>,
) -> AppResult<Json<OrderDto>> {
    let Json(meal_ids) = payload.map_err(|_| AppError::bad_request())?;
    let resp = order_service::place_order(&state.pool, &user, meal_ids).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/order/{order_id}/markReady",
    params(
        ("order_id" = String, Path, description = "Order to complete")
    ),
    responses(
        (status = 200, description = "Completed order", body = OrderDto),
        (status = 400, description = "Non-numeric id or order not found", body = StatusResponse),
        (status = 403, description = "Caller is not staff", body = StatusResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn mark_ready(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderDto>> {
    let order_id: i32 = order_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid order ID".to_string()))?;
    let resp = order_service::mark_ready(&state.pool, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orderHistory",
    responses(
        (status = 200, description = "Every order, all users", body = [OrderDto])
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_history(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<OrderDto>>> {
    let resp = order_service::order_history(&state.pool).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orderIncomplete",
    responses(
        (status = 200, description = "Orders still in progress", body = [OrderDto])
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_incomplete(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<OrderDto>>> {
    let resp = order_service::incomplete_orders(&state.pool).await?;
    Ok(Json(resp))
}
