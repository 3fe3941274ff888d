use std::collections::{HashMap, HashSet};

use rand::Rng;
use sqlx::{Postgres, Transaction};

use crate::{
    db::DbPool,
    dto::orders::OrderDto,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{self, ORDER_STATUS_COMPLETE, ORDER_STATUS_IN_PROGRESS, Order},
};

const ORDER_ID_INSERT_ATTEMPTS: u32 = 3;

/// Composes the caller's account, profile address, and the snapshot meal
/// prices into one priced order record.
pub async fn place_order(pool: &DbPool, user: &AuthUser, meal_ids: Vec<i32>) -> AppResult<OrderDto> {
    if meal_ids.is_empty() {
        return Err(AppError::bad_request());
    }

    let mut tx = pool.begin().await?;

    let account: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(user.email.as_str())
        .fetch_optional(&mut *tx)
        .await?;
    let (user_id,) = account.ok_or_else(AppError::bad_request)?;

    let address: Option<(String,)> = sqlx::query_as("SELECT address FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    let (address,) = address.ok_or_else(AppError::bad_request)?;
    if address.trim().is_empty() {
        return Err(AppError::bad_request());
    }

    let priced: Vec<(i32, f32)> =
        sqlx::query_as("SELECT meal_id, price FROM meals WHERE meal_id = ANY($1)")
            .bind(meal_ids.as_slice())
            .fetch_all(&mut *tx)
            .await?;
    let prices: HashMap<i32, f32> = priced.into_iter().collect();

    // Any unknown meal id aborts the whole order.
    let distinct: HashSet<i32> = meal_ids.iter().copied().collect();
    if prices.len() != distinct.len() {
        return Err(AppError::bad_request());
    }

    let total = order_total(&meal_ids, &prices);
    let meals_csv = models::encode_meal_ids(&meal_ids);

    let order_id = insert_order(&mut tx, user.email.as_str(), &meals_csv, total, &address).await?;

    tx.commit().await?;

    Ok(OrderDto {
        order_id,
        user_email: user.email.clone(),
        meals_ids: meal_ids,
        price: total,
        address,
        status: ORDER_STATUS_IN_PROGRESS.to_string(),
    })
}

pub async fn mark_ready(pool: &DbPool, user: &AuthUser, order_id: i32) -> AppResult<OrderDto> {
    ensure_staff(user)?;

    // Unconditional: completing an already-complete order still succeeds.
    let updated: Option<Order> =
        sqlx::query_as("UPDATE orders SET status = $2 WHERE order_id = $1 RETURNING *")
            .bind(order_id)
            .bind(ORDER_STATUS_COMPLETE)
            .fetch_optional(pool)
            .await?;

    updated.map(order_to_dto).ok_or_else(AppError::bad_request)
}

/// Every order, for any authenticated caller; there is no per-user filter.
pub async fn order_history(pool: &DbPool) -> AppResult<Vec<OrderDto>> {
    let rows: Vec<Order> = sqlx::query_as("SELECT * FROM orders").fetch_all(pool).await?;
    Ok(rows.into_iter().map(order_to_dto).collect())
}

pub async fn incomplete_orders(pool: &DbPool) -> AppResult<Vec<OrderDto>> {
    let rows: Vec<Order> = sqlx::query_as("SELECT * FROM orders WHERE status = $1")
        .bind(ORDER_STATUS_IN_PROGRESS)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(order_to_dto).collect())
}

/// Ids are random draws; on the rare collision the insert is retried with
/// a fresh id instead of surfacing the conflict.
async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    user_email: &str,
    meals_csv: &str,
    total: f32,
    address: &str,
) -> AppResult<i32> {
    for _ in 0..ORDER_ID_INSERT_ATTEMPTS {
        let order_id = rand::rng().random_range(0..i32::MAX);
        let inserted = sqlx::query(
            "INSERT INTO orders (order_id, user_email, meals_ids, price, address, status) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (order_id) DO NOTHING",
        )
        .bind(order_id)
        .bind(user_email)
        .bind(meals_csv)
        .bind(total)
        .bind(address)
        .bind(ORDER_STATUS_IN_PROGRESS)
        .execute(&mut **tx)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(order_id);
        }
        tracing::warn!(order_id, "order id collision, retrying");
    }
    Err(AppError::Internal(anyhow::anyhow!(
        "could not allocate a unique order id"
    )))
}

/// Duplicates in the request multiply cost: each occurrence counts once.
fn order_total(meal_ids: &[i32], prices: &HashMap<i32, f32>) -> f32 {
    meal_ids
        .iter()
        .filter_map(|id| prices.get(id))
        .map(|price| f64::from(*price))
        .sum::<f64>() as f32
}

fn order_to_dto(row: Order) -> OrderDto {
    let meals_ids = row.meal_id_list();
    OrderDto {
        order_id: row.order_id,
        user_email: row.user_email,
        meals_ids,
        price: row.price,
        address: row.address,
        status: row.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_counts_each_occurrence() {
        let prices = HashMap::from([(5, 10.0_f32), (7, 4.0_f32)]);
        assert_eq!(order_total(&[5, 5, 7], &prices), 24.0);
        assert_eq!(order_total(&[7], &prices), 4.0);
    }
}
