use bookstore_shared::types::{BookData, BooksCountByUser};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::database::utils::get_timestamp;

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
    pub discount: Option<f64>,
    pub sell_count: i64,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

const BOOK_COLUMNS: &str =
    "id, title, author, price, isbn, discount, sell_count, created_by, created_at";

pub async fn list_books(db: &SqlitePool) -> sqlx::Result<Vec<Book>> {
    sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
        .fetch_all(db)
        .await
}

pub async fn find_book(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Book>> {
    sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Whether `isbn` is used by any book other than `exclude_id`.
pub async fn isbn_taken(db: &SqlitePool, isbn: &str, exclude_id: Option<i64>) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE isbn = ? AND id != ?")
        .bind(isbn)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(db)
        .await?;
    Ok(count > 0)
}

pub async fn insert_book(
    db: &SqlitePool,
    book: &BookData,
    created_by: Option<i64>,
) -> sqlx::Result<Book> {
    sqlx::query_as::<_, Book>(&format!(
        "INSERT INTO books (title, author, price, isbn, discount, sell_count, created_by, created_at)
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)
         RETURNING {}",
        BOOK_COLUMNS
    ))
    .bind(book.title.trim())
    .bind(book.author.trim())
    .bind(book.price)
    .bind(&book.isbn)
    .bind(book.discount)
    .bind(created_by)
    .bind(get_timestamp())
    .fetch_one(db)
    .await
}

/// Overwrite the editable fields of a book in one statement.
/// Returns `None` when the book does not exist.
pub async fn replace_book(db: &SqlitePool, id: i64, book: &BookData) -> sqlx::Result<Option<Book>> {
    sqlx::query_as::<_, Book>(&format!(
        "UPDATE books
         SET title = ?, author = ?, price = ?, isbn = ?, discount = ?
         WHERE id = ?
         RETURNING {}",
        BOOK_COLUMNS
    ))
    .bind(book.title.trim())
    .bind(book.author.trim())
    .bind(book.price)
    .bind(&book.isbn)
    .bind(book.discount)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Record a view of the book and return the updated row.
pub async fn increment_sell_count(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Book>> {
    sqlx::query_as::<_, Book>(&format!(
        "UPDATE books SET sell_count = sell_count + 1 WHERE id = ? RETURNING {}",
        BOOK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Returns false when no book carries this ISBN.
pub async fn delete_by_isbn(db: &SqlitePool, isbn: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
        .bind(isbn)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Inclusive price filter, ordered by price then id.
pub async fn books_in_price_range(
    db: &SqlitePool,
    min: f64,
    max: f64,
    descending: bool,
) -> sqlx::Result<Vec<Book>> {
    let order = if descending { "DESC" } else { "ASC" };
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {} FROM books WHERE price >= ? AND price <= ? ORDER BY price {}, id ASC",
        BOOK_COLUMNS, order
    ))
    .bind(min)
    .bind(max)
    .fetch_all(db)
    .await
}

pub async fn books_by_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Book>> {
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {} FROM books WHERE created_by = ? ORDER BY id",
        BOOK_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Book totals per user, including users who created none.
pub async fn books_count_by_user(db: &SqlitePool) -> sqlx::Result<Vec<BooksCountByUser>> {
    let rows: Vec<(i64, String, i64)> = sqlx::query_as(
        "SELECT u.id, u.username, COUNT(b.id)
         FROM users u
         LEFT JOIN books b ON b.created_by = u.id
         GROUP BY u.id, u.username
         ORDER BY u.id",
    )
    .fetch_all(db)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(user_id, username, book_count)| BooksCountByUser {
            user_id,
            username,
            book_count,
        })
        .collect())
}
