use anyhow::Result;
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::{AuthContext, workflow};
use crate::handlers::http::utils::*;
use crate::messages;

/// POST /api/auth/logout: revokes the token the request was made with.
pub async fn handle_logout(_req: ApiRequest, state: AppState, ctx: AuthContext) -> Result<ApiResponse> {
    info!("Processing logout request for user ID {}", ctx.user_id);

    match workflow::logout(&state, &ctx.token).await {
        Ok(()) => deliver_message(messages::LOGGED_OUT, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}
