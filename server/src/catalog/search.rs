use crate::database::books::Book;
use crate::error::{ApiError, ApiResult};
use crate::messages;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// ---------------------------------------------------------------------------
// Keyword search
// ---------------------------------------------------------------------------

/// Whitespace-separated keywords. A book matches when every keyword occurs
/// in its title, author or ISBN, ignoring case.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    keywords: Vec<String>,
}

impl SearchQuery {
    /// `Ok(None)` means no filter: blank or missing input returns the whole catalog.
    pub fn parse(raw: Option<&str>) -> ApiResult<Option<Self>> {
        let raw = raw.unwrap_or("").trim();
        if raw.is_empty() {
            return Ok(None);
        }

        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        {
            return Err(ApiError::validation(messages::KEYWORD_INVALID));
        }

        Ok(Some(Self {
            keywords: raw.split_whitespace().map(str::to_lowercase).collect(),
        }))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.keywords.iter().all(|k| {
            contains_ci(&book.title, k) || contains_ci(&book.author, k) || book.isbn.contains(k.as_str())
        })
    }
}

// ---------------------------------------------------------------------------
// Field search
// ---------------------------------------------------------------------------

/// Per-field substring filters; absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedSearch {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
}

impl AdvancedSearch {
    pub fn new(title: Option<&str>, author: Option<&str>, isbn: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            title: clean(title),
            author: clean(author),
            isbn: clean(isbn),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.isbn.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.title.as_deref().is_none_or(|t| contains_ci(&book.title, t))
            && self.author.as_deref().is_none_or(|a| contains_ci(&book.author, a))
            && self.isbn.as_deref().is_none_or(|i| book.isbn.contains(i))
    }
}

// ---------------------------------------------------------------------------
// Price range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Missing means ascending; anything other than asc/desc is rejected.
    pub fn parse(raw: Option<&str>) -> ApiResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Asc),
            Some(o) if o.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            Some(o) if o.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            Some(_) => Err(ApiError::validation(messages::INVALID_ORDER)),
        }
    }
}

/// Inclusive `[min, max]` price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> ApiResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ApiError::validation(messages::PRICE_NOT_A_NUMBER));
        }
        if min < 0.0 || max < 0.0 {
            return Err(ApiError::validation(messages::PRICE_NEGATIVE));
        }
        if min > max {
            return Err(ApiError::validation(messages::PRICE_RANGE_INVERTED));
        }
        Ok(Self { min, max })
    }

    /// Build from raw query-string values; both bounds are required.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> ApiResult<Self> {
        let (Some(min), Some(max)) = (
            min.map(str::trim).filter(|s| !s.is_empty()),
            max.map(str::trim).filter(|s| !s.is_empty()),
        ) else {
            return Err(ApiError::validation(messages::PRICE_RANGE_REQUIRED));
        };

        let number = |s: &str| {
            s.parse::<f64>()
                .map_err(|_| ApiError::validation(messages::PRICE_NOT_A_NUMBER))
        };
        Self::new(number(min)?, number(max)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, isbn: &str) -> Book {
        Book {
            id: 1,
            title: title.into(),
            author: author.into(),
            price: 10.0,
            isbn: isbn.into(),
            discount: None,
            sell_count: 0,
            created_by: None,
            created_at: 0,
        }
    }

    #[test]
    fn blank_query_is_no_filter() {
        assert_eq!(SearchQuery::parse(None).unwrap(), None);
        assert_eq!(SearchQuery::parse(Some("   ")).unwrap(), None);
    }

    #[test]
    fn punctuation_is_rejected() {
        assert!(matches!(
            SearchQuery::parse(Some("harry; drop")),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn every_keyword_must_match_somewhere() {
        let q = SearchQuery::parse(Some("Harry  potter")).unwrap().unwrap();
        assert_eq!(q.keywords(), &["harry", "potter"]);
        assert!(q.matches(&book("Harry Potter and the Stone", "J. K. Rowling", "1111111111")));
        assert!(q.matches(&book("Potter's Field", "Harry Smith", "2222222222")));
        assert!(!q.matches(&book("Harry Hole", "Jo Nesbo", "3333333333")));
    }

    #[test]
    fn keyword_can_match_isbn() {
        let q = SearchQuery::parse(Some("97801")).unwrap().unwrap();
        assert!(q.matches(&book("X", "Y", "9780140449136")));
    }

    #[test]
    fn advanced_search_ands_fields() {
        let b = book("The Hobbit", "J. R. R. Tolkien", "9780261103344");
        assert!(AdvancedSearch::new(Some("hobbit"), Some("tolkien"), None).matches(&b));
        assert!(!AdvancedSearch::new(Some("hobbit"), Some("lewis"), None).matches(&b));
        assert!(AdvancedSearch::new(None, None, Some("0261")).matches(&b));
        assert!(AdvancedSearch::new(Some(" "), None, None).is_empty());
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse(None).unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("DESC")).unwrap(), SortOrder::Desc);
        assert!(SortOrder::parse(Some("sideways")).is_err());
    }

    #[test]
    fn price_range_rules() {
        assert!(PriceRange::new(5.0, 10.0).is_ok());
        assert!(PriceRange::new(5.0, 5.0).is_ok());
        assert!(matches!(PriceRange::new(10.0, 5.0), Err(ApiError::Validation(_))));
        assert!(PriceRange::new(-1.0, 5.0).is_err());
        assert!(PriceRange::parse(Some("5"), None).is_err());
        assert!(PriceRange::parse(Some("five"), Some("10")).is_err());
        assert!(PriceRange::parse(Some("NaN"), Some("10")).is_err());
        assert_eq!(
            PriceRange::parse(Some("1.5"), Some("3")).unwrap(),
            PriceRange { min: 1.5, max: 3.0 }
        );
    }
}
