use serde::{Deserialize, Deserializer, Serialize};

/// Create / update body for a book.
///
/// `isbn` is accepted either as a JSON string or a JSON number; it is kept as
/// a string of digits so leading zeros survive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookData {
    /// Only meaningful on update, where it must match the id in the path.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, deserialize_with = "isbn_from_string_or_number")]
    pub isbn: String,
    #[serde(default)]
    pub discount: Option<f64>,
}

/// Read-only projection returned by `GET /api/books/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    pub id: i64,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub price: f64,
    pub isbn: String,
    pub discount_percent: f64,
    pub discounted_price: f64,
    pub sell_count: i64,
}

fn isbn_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s.trim().to_string(),
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_accepts_number() {
        let b: BookData =
            serde_json::from_str(r#"{"title":"t","author":"a","price":1.0,"isbn":1234567890}"#)
                .unwrap();
        assert_eq!(b.isbn, "1234567890");
    }

    #[test]
    fn isbn_string_is_trimmed() {
        let b: BookData = serde_json::from_str(r#"{"isbn":" 0123456789 "}"#).unwrap();
        assert_eq!(b.isbn, "0123456789");
    }

    #[test]
    fn missing_fields_default() {
        let b: BookData = serde_json::from_str("{}").unwrap();
        assert!(b.title.is_empty());
        assert_eq!(b.price, 0.0);
        assert!(b.discount.is_none());
        assert!(b.id.is_none());
    }
}
