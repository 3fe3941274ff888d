use axum::extract::FromRef;

use crate::{db::DbPool, token::TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: TokenIssuer,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
