use anyhow::Result;
use bookstore_shared::types::{ChangePasswordData, UpdateDetailsData};
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::{AuthContext, workflow};
use crate::handlers::http::utils::*;
use crate::messages;

/// PUT /api/auth/update-details
pub async fn handle_update_details(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    info!("Processing update-details request for user ID {}", ctx.user_id);

    let data: UpdateDetailsData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    match workflow::update_details(&state, ctx.user_id, &data).await {
        Ok(()) => deliver_message(messages::DETAILS_UPDATED, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}

/// PUT /api/auth/update-password: the caller must log in again afterwards.
pub async fn handle_update_password(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    info!("Processing update-password request for user ID {}", ctx.user_id);

    let data: ChangePasswordData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    match workflow::update_password(&state, ctx.user_id, &ctx.token, &data).await {
        Ok(()) => deliver_message(messages::PASSWORD_UPDATED, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}
