use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The category id is supplied by the client, not generated.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPost {
    pub category_id: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub category_id: i32,
    pub title: String,
    pub description: String,
}
