use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{SigninRequest, SignupRequest, TokenResponse},
        categories::{CategoryDto, CategoryPost},
        meals::{MealDto, MealPost},
        orders::OrderDto,
        profile::{ProfileDto, ProfileUserRequest},
    },
    response::StatusResponse,
    routes::{auth, categories, health, meals, orders, profile},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::signin,
        auth::validate,
        profile::get_me,
        profile::put_me,
        profile::delete_me,
        categories::get_categories,
        categories::create_category,
        meals::get_meals,
        meals::create_meal,
        orders::place_order,
        orders::mark_ready,
        orders::order_history,
        orders::order_incomplete
    ),
    components(
        schemas(
            SignupRequest,
            SigninRequest,
            TokenResponse,
            StatusResponse,
            ProfileUserRequest,
            ProfileDto,
            CategoryPost,
            CategoryDto,
            MealPost,
            MealDto,
            OrderDto,
            health::HealthStatus
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, signin, and token validation"),
        (name = "Profile", description = "Caller's own profile"),
        (name = "Categories", description = "Meal categories"),
        (name = "Meals", description = "Meal catalog"),
        (name = "Orders", description = "Order placement and fulfillment"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
