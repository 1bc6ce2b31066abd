use anyhow::Result;
use bookstore_shared::types::BookData;
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::AuthContext;
use crate::catalog::workflow;
use crate::handlers::http::utils::*;
use crate::messages;

/// POST /api/books
pub async fn handle_create_book(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    info!("Processing book create request from user ID {}", ctx.user_id);

    let data: BookData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    deliver_result(
        workflow::create_book(&state.db, &data, ctx.user_id).await,
        StatusCode::CREATED,
    )
}

/// PUT /api/books/:id
pub async fn handle_update_book(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    let id = match path_id(&req, 3) {
        Ok(id) => id,
        Err(e) => return deliver_api_error(&e),
    };
    info!("Processing book update request for ID {} from user ID {}", id, ctx.user_id);

    let data: BookData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    deliver_result(workflow::update_book(&state.db, id, &data).await, StatusCode::OK)
}

/// DELETE /api/books/:isbn
pub async fn handle_delete_book(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    let isbn = path_param(&req, 3).unwrap_or_default();
    info!("Processing book delete request for ISBN {} from user ID {}", isbn, ctx.user_id);

    match workflow::delete_book(&state.db, &isbn).await {
        Ok(()) => deliver_message(messages::BOOK_DELETED, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}
