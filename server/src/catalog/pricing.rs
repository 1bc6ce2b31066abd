use bookstore_shared::types::BookView;

use crate::database::books::Book;

/// Highest discount the sales curve can reach, in percent.
pub const MAX_DISCOUNT_PERCENT: f64 = 50.0;

/// Sales beyond this many start raising the discount.
const CURVE_THRESHOLD: i64 = 3;
const CURVE_STEP_PERCENT: f64 = 5.0;

/// Effective discount: `base + 5 * (sell_count - 3)`, never below `base`,
/// then capped at 50.
pub fn discount_percent(base: f64, sell_count: i64) -> f64 {
    let curve = base + CURVE_STEP_PERCENT * (sell_count - CURVE_THRESHOLD) as f64;
    curve.max(base).min(MAX_DISCOUNT_PERCENT)
}

pub fn discounted_price(price: f64, percent: f64) -> f64 {
    price * (1.0 - percent / 100.0)
}

/// First word and the rest, e.g. `"J. R. R. Tolkien"` -> `("J.", "R. R. Tolkien")`.
pub fn split_author(author: &str) -> (String, String) {
    let author = author.trim();
    match author.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (author.to_string(), String::new()),
    }
}

pub fn book_view(book: &Book) -> BookView {
    let (first_name, last_name) = split_author(&book.author);
    let percent = discount_percent(book.discount.unwrap_or(0.0), book.sell_count);

    BookView {
        id: book.id,
        title: book.title.clone(),
        first_name,
        last_name,
        price: book.price,
        isbn: book.isbn.clone(),
        discount_percent: percent,
        discounted_price: discounted_price(book.price, percent),
        sell_count: book.sell_count,
    }
}
