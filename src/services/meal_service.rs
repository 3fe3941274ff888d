use std::collections::HashSet;

use sqlx::{Postgres, Transaction};

use crate::{
    db::DbPool,
    dto::meals::{MealDto, MealPost},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Meal,
};

pub async fn list_meals(pool: &DbPool) -> AppResult<Vec<MealDto>> {
    let mut tx = pool.begin().await?;

    let meals: Vec<Meal> = sqlx::query_as("SELECT * FROM meals")
        .fetch_all(&mut *tx)
        .await?;

    let mut out = Vec::with_capacity(meals.len());
    for meal in meals {
        let category_ids = linked_category_ids(&mut tx, meal.meal_id).await?;
        out.push(meal_to_dto(meal, category_ids));
    }

    tx.commit().await?;
    Ok(out)
}

pub async fn get_meal(pool: &DbPool, id: i32) -> AppResult<MealDto> {
    let mut tx = pool.begin().await?;

    let meal: Option<Meal> = sqlx::query_as("SELECT * FROM meals WHERE meal_id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let meal = meal.ok_or_else(AppError::bad_request)?;

    let category_ids = linked_category_ids(&mut tx, meal.meal_id).await?;
    tx.commit().await?;

    Ok(meal_to_dto(meal, category_ids))
}

pub async fn create_meal(pool: &DbPool, user: &AuthUser, payload: MealPost) -> AppResult<MealDto> {
    ensure_staff(user)?;
    if payload.price < 0.0 {
        return Err(AppError::bad_request());
    }

    let mut tx = pool.begin().await?;

    let exists: Option<(i32,)> = sqlx::query_as("SELECT meal_id FROM meals WHERE meal_id = $1")
        .bind(payload.meal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_some() {
        return Err(AppError::bad_request());
    }

    sqlx::query("INSERT INTO meals (meal_id, title, price, image_url) VALUES ($1, $2, $3, $4)")
        .bind(payload.meal_id)
        .bind(payload.title.as_str())
        .bind(payload.price)
        .bind(payload.image_url.as_str())
        .execute(&mut *tx)
        .await?;

    // Linking is best-effort: the requested ids are de-duplicated keeping
    // first-occurrence order, position is the index in that list, and a
    // conflicting row is skipped rather than failing the meal.
    let category_ids = dedup_preserving_order(&payload.category_ids);
    for (position, &category_id) in category_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO meal_categories (meal_id, category_id, position) VALUES ($1, $2, $3) \
             ON CONFLICT (meal_id, category_id) DO NOTHING",
        )
        .bind(payload.meal_id)
        .bind(category_id)
        .bind(position as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    // The response reports the requested (de-duplicated) ids regardless of
    // which links actually persisted.
    Ok(MealDto {
        meal_id: payload.meal_id,
        title: payload.title,
        price: payload.price,
        image_url: payload.image_url,
        category_ids,
    })
}

async fn linked_category_ids(
    tx: &mut Transaction<'_, Postgres>,
    meal_id: i32,
) -> AppResult<Vec<i32>> {
    let rows: Vec<(i32,)> = sqlx::query_as(
        "SELECT category_id FROM meal_categories WHERE meal_id = $1 ORDER BY position ASC",
    )
    .bind(meal_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

fn meal_to_dto(row: Meal, category_ids: Vec<i32>) -> MealDto {
    MealDto {
        meal_id: row.meal_id,
        title: row.title,
        price: row.price,
        image_url: row.image_url,
        category_ids,
    }
}

fn dedup_preserving_order(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_preserving_order(&[3, 1, 3, 2]), vec![3, 1, 2]);
        assert_eq!(dedup_preserving_order(&[]), Vec::<i32>::new());
        assert_eq!(dedup_preserving_order(&[7, 7, 7]), vec![7]);
    }
}
