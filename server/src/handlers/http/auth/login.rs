use anyhow::Result;
use bookstore_shared::types::{LoginData, TokenResponse};
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::workflow;
use crate::handlers::http::utils::*;

/// POST /api/auth/login
pub async fn handle_login(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    info!("Processing login request");

    let data: LoginData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    let result = workflow::login(&state, &data)
        .await
        .map(|signed| TokenResponse {
            token: signed.token,
            expires_in: state.tokens.validity_secs(),
        });

    deliver_result(result, StatusCode::OK)
}
