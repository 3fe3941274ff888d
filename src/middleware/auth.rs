use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{error::AppError, token::TokenIssuer};

/// Verified token claims for the calling user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: String,
}

impl AuthUser {
    /// Staff accounts may create catalog entries and complete orders.
    pub fn is_staff(&self) -> bool {
        self.role.eq_ignore_ascii_case("staff")
    }
}

pub fn ensure_staff(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_staff() {
        return Err(AppError::forbidden("Access denied"));
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthUser
where
    TokenIssuer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?
            .trim();

        let claims = TokenIssuer::from_ref(state).verify(token)?;

        Ok(AuthUser {
            email: claims.email,
            role: claims.user_type,
        })
    }
}
