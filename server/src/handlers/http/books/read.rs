use anyhow::Result;
use hyper::StatusCode;
use tracing::{debug, info};

use crate::AppState;
use crate::catalog::{AdvancedSearch, PriceRange, SortOrder, workflow};
use crate::handlers::http::utils::*;
use crate::messages;

/// GET /api/books
pub async fn handle_list_books(_req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    info!("Processing book list request");
    deliver_list(workflow::list_books(&state.db).await, messages::NO_BOOKS)
}

/// GET /api/books/:id
pub async fn handle_get_book(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    let id = match path_id(&req, 3) {
        Ok(id) => id,
        Err(e) => return deliver_api_error(&e),
    };
    info!("Processing book get request for ID {}", id);

    deliver_result(workflow::get_book(&state.db, id).await, StatusCode::OK)
}

/// GET /api/books/search?query=
pub async fn handle_search(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    let params = query_params(&req);
    let query = params.get("query").map(String::as_str);
    debug!("Book search query: {:?}", query);

    deliver_list(workflow::search(&state.db, query).await, messages::NO_RECORDS)
}

/// GET /api/books/advancedsearch?title=&author=&isbn=
pub async fn handle_advanced_search(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    let params = query_params(&req);
    let filter = AdvancedSearch::new(
        params.get("title").map(String::as_str),
        params.get("author").map(String::as_str),
        params.get("isbn").map(String::as_str),
    );
    debug!("Advanced search filter: {:?}", filter);

    deliver_list(
        workflow::advanced_search(&state.db, &filter).await,
        messages::NO_RECORDS,
    )
}

/// GET /api/books/sortbyrange?minPrice=&maxPrice=&order=
pub async fn handle_sort_by_range(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    let params = query_params(&req);

    let parsed = PriceRange::parse(
        params.get("minPrice").map(String::as_str),
        params.get("maxPrice").map(String::as_str),
    )
    .and_then(|range| Ok((range, SortOrder::parse(params.get("order").map(String::as_str))?)));

    let (range, order) = match parsed {
        Ok(p) => p,
        Err(e) => return deliver_api_error(&e),
    };
    info!("Processing price range request {:?} {:?}", range, order);

    deliver_list(
        workflow::price_range(&state.db, range, order).await,
        messages::NO_RECORDS,
    )
}
