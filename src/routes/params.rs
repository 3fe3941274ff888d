use serde::Deserialize;

/// Optional `?id=` filter shared by the catalog listings. A value that
/// does not parse as an integer counts as absent, so the full list is
/// returned.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn parsed(&self) -> Option<i32> {
        self.id.as_deref().and_then(|raw| raw.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_id_counts_as_absent() {
        let query = IdQuery {
            id: Some("abc".to_string()),
        };
        assert_eq!(query.parsed(), None);
        assert_eq!(IdQuery { id: None }.parsed(), None);
        assert_eq!(
            IdQuery {
                id: Some("42".to_string())
            }
            .parsed(),
            Some(42)
        );
    }
}
