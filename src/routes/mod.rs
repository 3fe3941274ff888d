use axum::{Router, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod categories;
pub mod doc;
pub mod health;
pub mod meals;
pub mod orders;
pub mod params;
pub mod profile;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .merge(auth::router())
        .merge(profile::router())
        .merge(categories::router())
        .merge(meals::router())
        .merge(orders::router())
}

async fn hello() -> &'static str {
    "Hello World!"
}
