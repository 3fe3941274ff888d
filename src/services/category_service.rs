use crate::{
    db::DbPool,
    dto::categories::{CategoryDto, CategoryPost},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Category,
};

pub async fn list_categories(pool: &DbPool) -> AppResult<Vec<CategoryDto>> {
    let rows: Vec<Category> = sqlx::query_as("SELECT * FROM categories")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(category_to_dto).collect())
}

pub async fn get_category(pool: &DbPool, id: i32) -> AppResult<CategoryDto> {
    let row: Option<Category> = sqlx::query_as("SELECT * FROM categories WHERE category_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(category_to_dto).ok_or_else(AppError::bad_request)
}

pub async fn create_category(
    pool: &DbPool,
    user: &AuthUser,
    payload: CategoryPost,
) -> AppResult<CategoryDto> {
    ensure_staff(user)?;

    let mut tx = pool.begin().await?;

    let exists: Option<(i32,)> =
        sqlx::query_as("SELECT category_id FROM categories WHERE category_id = $1")
            .bind(payload.category_id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_some() {
        return Err(AppError::bad_request());
    }

    sqlx::query("INSERT INTO categories (category_id, title, description) VALUES ($1, $2, $3)")
        .bind(payload.category_id)
        .bind(payload.title.as_str())
        .bind(payload.description.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(CategoryDto {
        category_id: payload.category_id,
        title: payload.title,
        description: payload.description,
    })
}

fn category_to_dto(row: Category) -> CategoryDto {
    CategoryDto {
        category_id: row.category_id,
        title: row.title,
        description: row.description,
    }
}
