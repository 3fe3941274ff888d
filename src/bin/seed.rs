use axum_food_ordering_api::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    ensure_account(&pool, "staff@example.com", "staff", "staff123").await?;
    ensure_account(&pool, "client@example.com", "client", "client123").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_account(
    pool: &sqlx::PgPool,
    email: &str,
    user_type: &str,
    password: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (email, user_type, password)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET user_type = EXCLUDED.user_type
        "#,
    )
    .bind(email)
    .bind(user_type)
    .bind(password)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        (1, "Soups", "Starters served hot"),
        (2, "Mains", "The main course"),
        (3, "Desserts", "Something sweet"),
    ];
    for (category_id, title, description) in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, title, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (category_id) DO NOTHING
            "#,
        )
        .bind(category_id)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;
    }

    let meals = [
        (1, "Borscht", 6.5_f32, "https://example.com/img/borscht.png", 1),
        (2, "Pierogi", 8.0_f32, "https://example.com/img/pierogi.png", 2),
        (3, "Sernik", 4.0_f32, "https://example.com/img/sernik.png", 3),
    ];
    for (meal_id, title, price, image_url, category_id) in meals {
        sqlx::query(
            r#"
            INSERT INTO meals (meal_id, title, price, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (meal_id) DO NOTHING
            "#,
        )
        .bind(meal_id)
        .bind(title)
        .bind(price)
        .bind(image_url)
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO meal_categories (meal_id, category_id, position)
            VALUES ($1, $2, 0)
            ON CONFLICT (meal_id, category_id) DO NOTHING
            "#,
        )
        .bind(meal_id)
        .bind(category_id)
        .execute(pool)
        .await?;
    }

    Ok(())
}
