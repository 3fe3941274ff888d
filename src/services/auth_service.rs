use std::sync::LazyLock;

use regex::Regex;

use crate::{
    db::DbPool,
    dto::auth::{SigninRequest, SignupRequest, TokenResponse},
    error::{AppError, AppResult},
    models::Account,
    token::TokenIssuer,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+[A-Za-z0-9._%+-]*@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("valid email pattern")
});

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// At least six characters, at least one letter and one digit.
pub fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= 6
        && s.chars().any(char::is_alphabetic)
        && s.chars().any(char::is_numeric)
}

pub async fn signup(
    pool: &DbPool,
    tokens: &TokenIssuer,
    payload: SignupRequest,
) -> AppResult<TokenResponse> {
    if !is_valid_email(&payload.email) {
        return Err(AppError::forbidden("Invalid email"));
    }
    if !is_valid_password(&payload.password) {
        return Err(AppError::forbidden("Invalid password"));
    }

    let mut tx = pool.begin().await?;

    let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(payload.email.as_str())
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_some() {
        return Err(AppError::forbidden("User already exists"));
    }

    // Credentials are stored verbatim; see DESIGN.md.
    sqlx::query("INSERT INTO users (email, user_type, password) VALUES ($1, $2, $3)")
        .bind(payload.email.as_str())
        .bind(payload.user_type.as_str())
        .bind(payload.password.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let token = tokens.issue(&payload.email, &payload.user_type)?;
    Ok(TokenResponse { token })
}

pub async fn signin(
    pool: &DbPool,
    tokens: &TokenIssuer,
    payload: SigninRequest,
) -> AppResult<TokenResponse> {
    let account: Option<Account> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(payload.email.as_str())
        .fetch_optional(pool)
        .await?;

    // Same message for a missing account and a wrong password.
    let account = match account {
        Some(a) if a.password == payload.password => a,
        _ => return Err(AppError::forbidden("Invalid email or password")),
    };

    let token = tokens.issue(&account.email, &account.user_type)?;
    Ok(TokenResponse { token })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conventional_addresses() {
        assert!(is_valid_email("diner@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(is_valid_email("a1@b2.cc"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("diner@example"));
        assert!(!is_valid_email("diner@example.c"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(".diner@example.com"));
        assert!(!is_valid_email("diner example@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_needs_six_chars_a_letter_and_a_digit() {
        assert!(!is_valid_password("abc12"));
        assert!(is_valid_password("abcdef1"));
        assert!(!is_valid_password("abcdefg"));
        assert!(!is_valid_password("1234567"));
        assert!(is_valid_password("abc123"));
    }
}
