use anyhow::Result;
use bookstore_shared::types::{RegistrationData, RegistrationResponse};
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::workflow;
use crate::handlers::http::utils::*;
use crate::messages;

/// POST /api/auth/register
pub async fn handle_register(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    info!("Processing register request");

    let data: RegistrationData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    match workflow::register(&state, &data).await {
        Ok(user_id) => deliver_serialized_json(
            &RegistrationResponse {
                user_id,
                username: data.username.trim().to_string(),
                message: messages::REGISTERED.to_string(),
            },
            StatusCode::CREATED,
        ),
        Err(e) => deliver_api_error(&e),
    }
}
