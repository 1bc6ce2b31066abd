use bookstore_shared::types::BookData;

use crate::error::{ApiError, ApiResult};
use crate::messages;

pub const MAX_TEXT_LEN: usize = 100;

/// Field checks for create and update. The first failure is reported.
pub fn validate_book(book: &BookData) -> ApiResult<()> {
    let title = book.title.trim();
    let author = book.author.trim();

    if title.is_empty() || author.is_empty() {
        return Err(ApiError::validation(messages::BOOK_FIELDS_REQUIRED));
    }
    if !book.price.is_finite() || book.price <= 0.0 {
        return Err(ApiError::validation(messages::PRICE_NOT_POSITIVE));
    }

    validate_isbn(&book.isbn)?;

    if let Some(discount) = book.discount {
        if discount.is_nan() || discount <= 0.0 || discount > book.price {
            return Err(ApiError::validation(messages::INVALID_DISCOUNT));
        }
    }

    if title.chars().count() > MAX_TEXT_LEN || author.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::validation(messages::FIELD_TOO_LONG));
    }

    Ok(())
}

/// 10 to 13 ASCII digits.
pub fn validate_isbn(isbn: &str) -> ApiResult<()> {
    if !(10..=13).contains(&isbn.len()) {
        return Err(ApiError::validation(messages::ISBN_LENGTH));
    }
    if !isbn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::validation(messages::ISBN_DIGITS));
    }
    Ok(())
}

/// Delete takes the ISBN from the path and requires a positive integer.
pub fn parse_delete_isbn(raw: &str) -> ApiResult<String> {
    let raw = raw.trim();
    match raw.parse::<u64>() {
        Ok(n) if n > 0 && raw.bytes().all(|b| b.is_ascii_digit()) => Ok(raw.to_string()),
        _ => Err(ApiError::validation(messages::DELETE_ISBN_INVALID)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BookData {
        BookData {
            id: None,
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            price: 20.0,
            isbn: "1234567890".into(),
            discount: Some(5.0),
        }
    }

    fn message(r: ApiResult<()>) -> String {
        match r {
            Err(ApiError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_book_passes() {
        assert!(validate_book(&valid()).is_ok());
        assert!(validate_book(&BookData { discount: None, ..valid() }).is_ok());
        assert!(validate_book(&BookData { discount: Some(20.0), ..valid() }).is_ok());
    }

    #[test]
    fn rule_order() {
        let b = BookData { title: " ".into(), price: -1.0, ..valid() };
        assert_eq!(message(validate_book(&b)), messages::BOOK_FIELDS_REQUIRED);

        let b = BookData { price: 0.0, isbn: "x".into(), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::PRICE_NOT_POSITIVE);

        let b = BookData { isbn: "123".into(), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::ISBN_LENGTH);

        let b = BookData { isbn: "12345abcde".into(), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::ISBN_DIGITS);

        let b = BookData { discount: Some(0.0), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::INVALID_DISCOUNT);

        let b = BookData { discount: Some(20.5), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::INVALID_DISCOUNT);

        let b = BookData { title: "x".repeat(101), ..valid() };
        assert_eq!(message(validate_book(&b)), messages::FIELD_TOO_LONG);
    }

    #[test]
    fn nan_price_is_rejected() {
        let b = BookData { price: f64::NAN, ..valid() };
        assert!(validate_book(&b).is_err());
    }

    #[test]
    fn isbn_length_bounds() {
        assert!(validate_isbn("1234567890").is_ok());
        assert!(validate_isbn("1234567890123").is_ok());
        assert!(validate_isbn("123456789").is_err());
        assert!(validate_isbn("12345678901234").is_err());
    }

    #[test]
    fn delete_isbn_must_be_positive_integer() {
        assert_eq!(parse_delete_isbn("1234567890").unwrap(), "1234567890");
        for raw in ["0", "-5", "abc", "+12", "invalidIsbn", ""] {
            match parse_delete_isbn(raw) {
                Err(ApiError::Validation(m)) => assert_eq!(m, messages::DELETE_ISBN_INVALID),
                other => panic!("{raw:?} gave {other:?}"),
            }
        }
    }
}
