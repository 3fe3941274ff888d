use axum_food_ordering_api::{
    db::{DbPool, create_pool},
    dto::{
        auth::{SigninRequest, SignupRequest},
        categories::CategoryPost,
        meals::MealPost,
        profile::ProfileUserRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{ORDER_STATUS_COMPLETE, ORDER_STATUS_IN_PROGRESS},
    services::{auth_service, category_service, meal_service, order_service, profile_service},
    token::TokenIssuer,
};

// Integration flow: signup -> profile -> catalog -> order -> markReady.
#[tokio::test]
async fn signup_order_and_fulfillment_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let pool = setup_pool(&database_url).await?;
    let tokens = TokenIssuer::new("test-secret", "test-svc", "test-svc");

    // Signup issues a token carrying the submitted claims.
    let signup = auth_service::signup(
        &pool,
        &tokens,
        SignupRequest {
            email: "diner@example.com".into(),
            user_type: "client".into(),
            password: "dinner1".into(),
        },
    )
    .await?;
    let claims = tokens.verify(&signup.token)?;
    assert_eq!(claims.email, "diner@example.com");
    assert_eq!(claims.user_type, "client");

    // A second signup with the same email is rejected outright.
    let duplicate = auth_service::signup(
        &pool,
        &tokens,
        SignupRequest {
            email: "diner@example.com".into(),
            user_type: "client".into(),
            password: "dinner1".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Forbidden(_))));

    // Wrong password and unknown account fail the same way.
    let bad_password = auth_service::signin(
        &pool,
        &tokens,
        SigninRequest {
            email: "diner@example.com".into(),
            password: "wrong99".into(),
        },
    )
    .await;
    assert!(matches!(bad_password, Err(AppError::Forbidden(_))));

    auth_service::signup(
        &pool,
        &tokens,
        SignupRequest {
            email: "cook@example.com".into(),
            user_type: "staff".into(),
            password: "kitchen1".into(),
        },
    )
    .await?;

    let customer = AuthUser {
        email: "diner@example.com".into(),
        role: "client".into(),
    };
    let staff = AuthUser {
        email: "cook@example.com".into(),
        role: "staff".into(),
    };

    // The body email must match the token email.
    let mismatch = profile_service::upsert_profile(
        &pool,
        "diner@example.com",
        ProfileUserRequest {
            name: "Dana Diner".into(),
            user_type: "client".into(),
            phone: "555-0100".into(),
            email: "other@example.com".into(),
            address: "12 Elm Street".into(),
        },
    )
    .await;
    assert!(matches!(mismatch, Err(AppError::BadRequest(_))));

    profile_service::upsert_profile(
        &pool,
        "diner@example.com",
        ProfileUserRequest {
            name: "Dana Diner".into(),
            user_type: "client".into(),
            phone: "555-0100".into(),
            email: "diner@example.com".into(),
            address: "12 Elm Street".into(),
        },
    )
    .await?;

    let profile = profile_service::get_profile(&pool, "diner@example.com").await?;
    assert_eq!(profile.address, "12 Elm Street");

    // Non-staff cannot create catalog entries.
    let denied = category_service::create_category(
        &pool,
        &customer,
        CategoryPost {
            category_id: 1,
            title: "Soups".into(),
            description: "Starters served hot".into(),
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    for (category_id, title) in [(1, "Soups"), (2, "Mains"), (3, "Desserts")] {
        category_service::create_category(
            &pool,
            &staff,
            CategoryPost {
                category_id,
                title: title.into(),
                description: String::new(),
            },
        )
        .await?;
    }

    // Duplicate category ids collapse to first-occurrence order.
    let meal = meal_service::create_meal(
        &pool,
        &staff,
        MealPost {
            meal_id: 5,
            title: "Borscht".into(),
            price: 10.0,
            image_url: "https://example.com/img/borscht.png".into(),
            category_ids: vec![3, 1, 3, 2],
        },
    )
    .await?;
    assert_eq!(meal.category_ids, vec![3, 1, 2]);

    let fetched = meal_service::get_meal(&pool, 5).await?;
    assert_eq!(fetched.category_ids, vec![3, 1, 2]);

    meal_service::create_meal(
        &pool,
        &staff,
        MealPost {
            meal_id: 7,
            title: "Pierogi".into(),
            price: 4.0,
            image_url: "https://example.com/img/pierogi.png".into(),
            category_ids: vec![2],
        },
    )
    .await?;

    // The staff account has no profile, so it cannot order.
    let no_address = order_service::place_order(&pool, &staff, vec![5]).await;
    assert!(matches!(no_address, Err(AppError::BadRequest(_))));

    // An unknown meal id aborts the whole order and leaves no row behind.
    let unknown = order_service::place_order(&pool, &customer, vec![5, 99]).await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));
    assert!(order_service::order_history(&pool).await?.is_empty());

    // Duplicates count once per occurrence and survive in stored order.
    let order = order_service::place_order(&pool, &customer, vec![5, 5, 7]).await?;
    assert_eq!(order.meals_ids, vec![5, 5, 7]);
    assert_eq!(order.price, 24.0);
    assert_eq!(order.status, ORDER_STATUS_IN_PROGRESS);
    assert_eq!(order.address, "12 Elm Street");

    let incomplete = order_service::incomplete_orders(&pool).await?;
    assert!(incomplete.iter().any(|o| o.order_id == order.order_id));

    // Only staff may complete orders, and nothing changes on a refusal.
    let forbidden = order_service::mark_ready(&pool, &customer, order.order_id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    let missing = order_service::mark_ready(&pool, &staff, -1).await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let completed = order_service::mark_ready(&pool, &staff, order.order_id).await?;
    assert_eq!(completed.status, ORDER_STATUS_COMPLETE);

    let incomplete = order_service::incomplete_orders(&pool).await?;
    assert!(incomplete.iter().all(|o| o.order_id != order.order_id));

    let history = order_service::order_history(&pool).await?;
    let entry = history
        .iter()
        .find(|o| o.order_id == order.order_id)
        .expect("order in history");
    assert_eq!(entry.status, ORDER_STATUS_COMPLETE);
    assert_eq!(entry.meals_ids, vec![5, 5, 7]);

    // Account deletion removes the profile with it.
    profile_service::delete_account(&pool, "diner@example.com").await?;
    let gone = profile_service::get_profile(&pool, "diner@example.com").await;
    assert!(matches!(gone, Err(AppError::BadRequest(_))));
    let signin_gone = auth_service::signin(
        &pool,
        &tokens,
        SigninRequest {
            email: "diner@example.com".into(),
            password: "dinner1".into(),
        },
    )
    .await;
    assert!(matches!(signin_gone, Err(AppError::Forbidden(_))));

    Ok(())
}

async fn setup_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE orders, meal_categories, meals, categories, profiles, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}
