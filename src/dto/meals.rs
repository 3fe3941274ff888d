use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPost {
    pub meal_id: i32,
    pub title: String,
    pub price: f32,
    pub image_url: String,
    pub category_ids: Vec<i32>,
}

/// `category_ids` come back ordered by their stored position.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealDto {
    pub meal_id: i32,
    pub title: String,
    pub price: f32,
    pub image_url: String,
    pub category_ids: Vec<i32>,
}
