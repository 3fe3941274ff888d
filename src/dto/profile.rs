use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `PUT /me`; the email must match the caller's token.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUserRequest {
    pub name: String,
    pub user_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub name: String,
    pub user_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}
