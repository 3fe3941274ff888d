pub mod auth_service;
pub mod category_service;
pub mod meal_service;
pub mod order_service;
pub mod profile_service;
