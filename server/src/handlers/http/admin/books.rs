use anyhow::Result;
use hyper::StatusCode;

use crate::AppState;
use crate::catalog::workflow;
use crate::handlers::http::utils::*;

/// GET /api/admin/books-count-by-user
pub async fn handle_books_count_by_user(_req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    deliver_result(workflow::books_count_by_user(&state.db).await, StatusCode::OK)
}

/// GET /api/admin/books-by-user/:userId
pub async fn handle_books_by_user(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    let result = match path_id(&req, 4) {
        Ok(user_id) => workflow::books_by_user(&state.db, user_id).await,
        Err(e) => Err(e),
    };
    deliver_result(result, StatusCode::OK)
}
