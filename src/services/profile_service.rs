use crate::{
    db::DbPool,
    dto::profile::{ProfileDto, ProfileUserRequest},
    error::{AppError, AppResult},
    models::{Account, Profile},
};

pub async fn get_profile(pool: &DbPool, email: &str) -> AppResult<ProfileDto> {
    let account: Option<Account> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    let account = account.ok_or_else(AppError::bad_request)?;

    let profile: Option<Profile> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(account.id)
        .fetch_optional(pool)
        .await?;
    let profile = profile.ok_or_else(AppError::bad_request)?;

    Ok(ProfileDto {
        name: profile.name,
        user_type: account.user_type,
        phone: profile.phone,
        email: account.email,
        address: profile.address,
    })
}

/// Updates the account role and inserts or updates the profile row.
pub async fn upsert_profile(
    pool: &DbPool,
    token_email: &str,
    payload: ProfileUserRequest,
) -> AppResult<ProfileDto> {
    if payload.email != token_email {
        return Err(AppError::bad_request());
    }

    let mut tx = pool.begin().await?;

    let account: Option<Account> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(token_email)
        .fetch_optional(&mut *tx)
        .await?;
    let account = account.ok_or(AppError::NotFound)?;

    sqlx::query("UPDATE users SET user_type = $2 WHERE id = $1")
        .bind(account.id)
        .bind(payload.user_type.as_str())
        .execute(&mut *tx)
        .await?;

    let exists: Option<(i32,)> = sqlx::query_as("SELECT user_id FROM profiles WHERE user_id = $1")
        .bind(account.id)
        .fetch_optional(&mut *tx)
        .await?;

    if exists.is_some() {
        sqlx::query("UPDATE profiles SET name = $2, phone = $3, address = $4 WHERE user_id = $1")
            .bind(account.id)
            .bind(payload.name.as_str())
            .bind(payload.phone.as_str())
            .bind(payload.address.as_str())
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query(
            "INSERT INTO profiles (user_id, name, phone, email, address) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id)
        .bind(payload.name.as_str())
        .bind(payload.phone.as_str())
        .bind(payload.email.as_str())
        .bind(payload.address.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(ProfileDto {
        name: payload.name,
        user_type: payload.user_type,
        phone: payload.phone,
        email: payload.email,
        address: payload.address,
    })
}

pub async fn delete_account(pool: &DbPool, email: &str) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let account: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&mut *tx)
        .await?;
    let (user_id,) = account.ok_or(AppError::NotFound)?;

    // Profile row first; it references the account.
    sqlx::query("DELETE FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
