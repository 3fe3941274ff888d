use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: i32,
    pub user_email: String,
    /// Request order, duplicates included.
    pub meals_ids: Vec<i32>,
    /// Sum of the snapshot meal prices at placement time.
    pub price: f32,
    pub address: String,
    pub status: String,
}
