use bookstore_shared::types::{BookData, BookView, BooksCountByUser};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::catalog::pricing::book_view;
use crate::catalog::search::{AdvancedSearch, PriceRange, SearchQuery, SortOrder};
use crate::catalog::validation::{parse_delete_isbn, validate_book};
use crate::database::books::{self, Book};
use crate::database::{is_unique_violation, users};
use crate::error::{ApiError, ApiResult};
use crate::messages;

pub async fn list_books(db: &SqlitePool) -> ApiResult<Vec<Book>> {
    Ok(books::list_books(db).await?)
}

/// Fetch a book for display. Every view counts as a sale for the discount curve.
pub async fn get_book(db: &SqlitePool, id: i64) -> ApiResult<BookView> {
    let book = books::increment_sell_count(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(messages::BOOK_NOT_FOUND))?;
    Ok(book_view(&book))
}

pub async fn create_book(db: &SqlitePool, data: &BookData, created_by: i64) -> ApiResult<Book> {
    validate_book(data)?;

    if books::isbn_taken(db, &data.isbn, None).await? {
        warn!("Create rejected, ISBN {} already in catalog", data.isbn);
        return Err(ApiError::conflict(messages::ISBN_EXISTS));
    }

    let book = books::insert_book(db, data, Some(created_by))
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(messages::ISBN_EXISTS)
            } else {
                e.into()
            }
        })?;

    info!("Book created: {} (ID: {}, by user {})", book.title, book.id, created_by);
    Ok(book)
}

/// Replace a book's fields. A book may keep its own ISBN.
pub async fn update_book(db: &SqlitePool, id: i64, data: &BookData) -> ApiResult<Book> {
    if data.id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::validation(messages::ID_MISMATCH));
    }

    validate_book(data)?;

    if books::find_book(db, id).await?.is_none() {
        return Err(ApiError::not_found(messages::BOOK_NOT_FOUND));
    }

    if books::isbn_taken(db, &data.isbn, Some(id)).await? {
        warn!("Update of book {} rejected, ISBN {} taken", id, data.isbn);
        return Err(ApiError::conflict(messages::ISBN_TAKEN_ON_UPDATE));
    }

    let book = books::replace_book(db, id, data)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(messages::ISBN_TAKEN_ON_UPDATE)
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| ApiError::not_found(messages::BOOK_NOT_FOUND))?;

    info!("Book updated: {} (ID: {})", book.title, book.id);
    Ok(book)
}

pub async fn delete_book(db: &SqlitePool, raw_isbn: &str) -> ApiResult<()> {
    let isbn = parse_delete_isbn(raw_isbn)?;

    if !books::delete_by_isbn(db, &isbn).await? {
        return Err(ApiError::not_found(messages::BOOK_NOT_FOUND));
    }

    info!("Book deleted: ISBN {}", isbn);
    Ok(())
}

/// Keyword search; a blank query returns the whole catalog.
pub async fn search(db: &SqlitePool, raw_query: Option<&str>) -> ApiResult<Vec<Book>> {
    let query = SearchQuery::parse(raw_query)?;
    let all = books::list_books(db).await?;

    Ok(match query {
        Some(q) => all.into_iter().filter(|b| q.matches(b)).collect(),
        None => all,
    })
}

pub async fn advanced_search(db: &SqlitePool, filter: &AdvancedSearch) -> ApiResult<Vec<Book>> {
    Ok(books::list_books(db)
        .await?
        .into_iter()
        .filter(|b| filter.matches(b))
        .collect())
}

pub async fn price_range(
    db: &SqlitePool,
    range: PriceRange,
    order: SortOrder,
) -> ApiResult<Vec<Book>> {
    Ok(books::books_in_price_range(db, range.min, range.max, order == SortOrder::Desc).await?)
}

pub async fn books_count_by_user(db: &SqlitePool) -> ApiResult<Vec<BooksCountByUser>> {
    Ok(books::books_count_by_user(db).await?)
}

pub async fn books_by_user(db: &SqlitePool, user_id: i64) -> ApiResult<Vec<Book>> {
    if users::find_by_id(db, user_id).await?.is_none() {
        return Err(ApiError::not_found(messages::USER_NOT_FOUND));
    }
    Ok(books::books_by_user(db, user_id).await?)
}
