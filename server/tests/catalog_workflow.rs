mod common;

use bookstore::auth::workflow as auth;
use bookstore::catalog::{AdvancedSearch, PriceRange, SortOrder, workflow};
use bookstore::error::ApiError;
use bookstore::messages;
use bookstore_shared::types::BookData;

use common::*;

fn book(title: &str, author: &str, price: f64, isbn: &str) -> BookData {
    BookData {
        id: None,
        title: title.to_string(),
        author: author.to_string(),
        price,
        isbn: isbn.to_string(),
        discount: None,
    }
}

#[tokio::test]
async fn create_then_get_applies_discount_curve() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;

    let created = workflow::create_book(
        &state.db,
        &BookData {
            discount: Some(10.0),
            ..book("Dune", "Frank Herbert", 20.0, "9780441013593")
        },
        owner,
    )
    .await
    .unwrap();
    assert_eq!(created.created_by, Some(owner));
    assert_eq!(created.sell_count, 0);

    // Views 1..=3 stay at the base discount.
    for _ in 0..3 {
        let view = workflow::get_book(&state.db, created.id).await.unwrap();
        assert_eq!(view.discount_percent, 10.0);
    }

    let mut view = workflow::get_book(&state.db, created.id).await.unwrap();
    for _ in 0..6 {
        view = workflow::get_book(&state.db, created.id).await.unwrap();
    }
    assert_eq!(view.sell_count, 10);
    assert_eq!(view.discount_percent, 45.0);
    assert!((view.discounted_price - 11.0).abs() < 1e-9);
    assert_eq!(view.first_name, "Frank");
    assert_eq!(view.last_name, "Herbert");

    for _ in 0..10 {
        view = workflow::get_book(&state.db, created.id).await.unwrap();
    }
    assert_eq!(view.sell_count, 20);
    assert_eq!(view.discount_percent, 50.0);
}

#[tokio::test]
async fn get_missing_book_is_not_found() {
    let state = test_state().await;
    let result = workflow::get_book(&state.db, 42).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn duplicate_isbn_rejected_on_create() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    workflow::create_book(&state.db, &book("A", "X Y", 5.0, "1234567890"), owner)
        .await
        .unwrap();

    let dup = workflow::create_book(&state.db, &book("B", "Z W", 6.0, "1234567890"), owner).await;
    assert!(matches!(dup, Err(ApiError::Conflict(_))));
    assert_eq!(dup.unwrap_err().to_message(), messages::ISBN_EXISTS);
}

#[tokio::test]
async fn validation_runs_before_uniqueness() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    workflow::create_book(&state.db, &book("A", "X", 5.0, "1234567890"), owner)
        .await
        .unwrap();

    let bad_price = workflow::create_book(&state.db, &book("B", "Y", 0.0, "1234567890"), owner).await;
    assert!(matches!(bad_price, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn update_rules() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    let a = workflow::create_book(&state.db, &book("A", "X", 5.0, "1111111111"), owner)
        .await
        .unwrap();
    workflow::create_book(&state.db, &book("B", "Y", 6.0, "2222222222"), owner)
        .await
        .unwrap();

    // Keeping its own ISBN is fine.
    let renamed = workflow::update_book(
        &state.db,
        a.id,
        &BookData {
            id: Some(a.id),
            ..book("A2", "X", 7.5, "1111111111")
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.title, "A2");
    assert_eq!(renamed.price, 7.5);

    let taken = workflow::update_book(&state.db, a.id, &book("A", "X", 5.0, "2222222222")).await;
    assert!(matches!(taken, Err(ApiError::Conflict(_))));
    assert_eq!(taken.unwrap_err().to_message(), messages::ISBN_TAKEN_ON_UPDATE);

    let mismatch = workflow::update_book(
        &state.db,
        a.id,
        &BookData {
            id: Some(a.id + 100),
            ..book("A", "X", 5.0, "1111111111")
        },
    )
    .await;
    assert_eq!(mismatch.unwrap_err().to_message(), messages::ID_MISMATCH);

    let missing = workflow::update_book(&state.db, 999, &book("A", "X", 5.0, "3333333333")).await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn delete_by_isbn() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    workflow::create_book(&state.db, &book("A", "X", 5.0, "1111111111"), owner)
        .await
        .unwrap();

    let invalid = workflow::delete_book(&state.db, "invalidIsbn").await.unwrap_err();
    assert!(matches!(invalid, ApiError::Validation(_)));
    assert_eq!(invalid.to_message(), messages::DELETE_ISBN_INVALID);
    assert_eq!(invalid.status(), hyper::StatusCode::BAD_REQUEST);
    workflow::delete_book(&state.db, "1111111111").await.unwrap();
    assert!(matches!(
        workflow::delete_book(&state.db, "1111111111").await,
        Err(ApiError::NotFound(_))
    ));
    assert!(workflow::list_books(&state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn keyword_search_requires_every_word() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    for (title, author, isbn) in [
        ("Harry Potter and the Philosopher's Stone", "J. K. Rowling", "1111111111"),
        ("Harry Hole", "Jo Nesbo", "2222222222"),
        ("The Potter's Wheel", "Jane Doe", "3333333333"),
    ] {
        workflow::create_book(&state.db, &book(title, author, 10.0, isbn), owner)
            .await
            .unwrap();
    }

    let found = workflow::search(&state.db, Some("harry potter")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].title.starts_with("Harry Potter"));

    assert_eq!(workflow::search(&state.db, None).await.unwrap().len(), 3);
    assert_eq!(workflow::search(&state.db, Some("rowling")).await.unwrap().len(), 1);

    let bad = workflow::search(&state.db, Some("harry's")).await;
    assert_eq!(bad.unwrap_err().to_message(), messages::KEYWORD_INVALID);
}

#[tokio::test]
async fn advanced_search_ands_fields() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    workflow::create_book(&state.db, &book("The Hobbit", "J. R. R. Tolkien", 10.0, "9780261103344"), owner)
        .await
        .unwrap();
    workflow::create_book(&state.db, &book("The Silmarillion", "J. R. R. Tolkien", 12.0, "9780261102736"), owner)
        .await
        .unwrap();

    let both = AdvancedSearch::new(None, Some("tolkien"), None);
    assert_eq!(workflow::advanced_search(&state.db, &both).await.unwrap().len(), 2);

    let one = AdvancedSearch::new(Some("hobbit"), Some("tolkien"), None);
    assert_eq!(workflow::advanced_search(&state.db, &one).await.unwrap().len(), 1);

    let none = AdvancedSearch::new(Some("hobbit"), None, Some("2736"));
    assert!(workflow::advanced_search(&state.db, &none).await.unwrap().is_empty());
}

#[tokio::test]
async fn price_range_filters_and_orders() {
    let state = test_state().await;
    let owner = register_user(&state, "alice").await;
    for (title, price, isbn) in [("A", 3.0, "1111111111"), ("B", 7.0, "2222222222"), ("C", 12.0, "3333333333")] {
        workflow::create_book(&state.db, &book(title, "X", price, isbn), owner)
            .await
            .unwrap();
    }

    let desc = workflow::price_range(&state.db, PriceRange::new(3.0, 7.0).unwrap(), SortOrder::Desc)
        .await
        .unwrap();
    let titles: Vec<_> = desc.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);

    assert!(matches!(PriceRange::new(10.0, 5.0), Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn books_per_user() {
    let state = test_state().await;
    let (admin_id, _) = bootstrap_admin(&state, "root").await;
    let alice = register_user(&state, "alice").await;
    workflow::create_book(&state.db, &book("A", "X", 5.0, "1111111111"), alice)
        .await
        .unwrap();
    workflow::create_book(&state.db, &book("B", "X", 5.0, "2222222222"), alice)
        .await
        .unwrap();

    let counts = workflow::books_count_by_user(&state.db).await.unwrap();
    let alice_count = counts.iter().find(|c| c.user_id == alice).unwrap();
    assert_eq!(alice_count.book_count, 2);
    assert_eq!(counts.iter().find(|c| c.user_id == admin_id).unwrap().book_count, 0);

    assert_eq!(workflow::books_by_user(&state.db, alice).await.unwrap().len(), 2);
    assert!(matches!(
        workflow::books_by_user(&state.db, 999).await,
        Err(ApiError::NotFound(_))
    ));

    // Books outlive their creator.
    auth::delete_user(&state, admin_id, alice).await.unwrap();
    let remaining = workflow::list_books(&state.db).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|b| b.created_by.is_none()));
}
