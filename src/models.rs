use sqlx::FromRow;

pub const ORDER_STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const ORDER_STATUS_COMPLETE: &str = "COMPLETE";

#[derive(Debug, FromRow)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub user_type: String,
    pub password: String,
}

#[derive(Debug, FromRow)]
pub struct Profile {
    pub user_id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, FromRow)]
pub struct Category {
    pub category_id: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, FromRow)]
pub struct Meal {
    pub meal_id: i32,
    pub title: String,
    pub price: f32,
    pub image_url: String,
}

#[derive(Debug, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_email: String,
    pub meals_ids: String,
    pub price: f32,
    pub address: String,
    pub status: String,
}

impl Order {
    /// Decode the stored comma-separated meal-id list. Fragments that do
    /// not parse as integers are skipped.
    pub fn meal_id_list(&self) -> Vec<i32> {
        decode_meal_ids(&self.meals_ids)
    }
}

pub fn decode_meal_ids(csv: &str) -> Vec<i32> {
    csv.split(',')
        .filter_map(|part| part.parse().ok())
        .collect()
}

pub fn encode_meal_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_preserves_order_and_duplicates() {
        assert_eq!(decode_meal_ids("5,5,7"), vec![5, 5, 7]);
    }

    #[test]
    fn decode_skips_non_numeric_fragments() {
        assert_eq!(decode_meal_ids("5,abc,7"), vec![5, 7]);
        assert_eq!(decode_meal_ids(""), Vec::<i32>::new());
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let ids = vec![3, 1, 3, 2];
        assert_eq!(decode_meal_ids(&encode_meal_ids(&ids)), ids);
    }
}
