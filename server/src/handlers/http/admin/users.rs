use anyhow::Result;
use bookstore_shared::types::{DeactivateData, RegistrationData, RegistrationResponse};
use hyper::StatusCode;
use tracing::info;

use crate::AppState;
use crate::auth::{AuthContext, workflow};
use crate::handlers::http::utils::*;
use crate::messages;

/// POST /api/admin/register
///
/// Open while no admin exists. After that a valid admin token is required,
/// so the bearer token is checked here rather than by the router.
pub async fn handle_register_admin(req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    info!("Processing admin register request");

    let caller = match get_bearer_token(&req) {
        Some(token) => match workflow::authenticate(&state, &token) {
            Ok(claims) => Some(claims),
            Err(e) => return deliver_api_error(&e),
        },
        None => None,
    };

    let data: RegistrationData = match read_json(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };

    match workflow::register_admin(&state, &data, caller.as_ref()).await {
        Ok(user_id) => deliver_serialized_json(
            &RegistrationResponse {
                user_id,
                username: data.username.trim().to_string(),
                message: messages::ADMIN_REGISTERED.to_string(),
            },
            StatusCode::CREATED,
        ),
        Err(e) => deliver_api_error(&e),
    }
}

/// GET /api/admin/loggedinusers
pub async fn handle_logged_in_users(_req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    deliver_result(workflow::logged_in_users(&state).await, StatusCode::OK)
}

/// GET /api/admin/registered-users
pub async fn handle_registered_users(_req: ApiRequest, state: AppState) -> Result<ApiResponse> {
    deliver_result(workflow::registered_users(&state).await, StatusCode::OK)
}

/// POST /api/admin/deactivate-user/:userId, body `{"active": bool}`, empty means deactivate.
pub async fn handle_deactivate_user(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    let user_id = match path_id(&req, 4) {
        Ok(id) => id,
        Err(e) => return deliver_api_error(&e),
    };
    let data: DeactivateData = match read_json_or_default(&req) {
        Ok(data) => data,
        Err(e) => return deliver_api_error(&e),
    };
    info!(
        "Processing set-active({}) for user ID {} by admin {}",
        data.active, user_id, ctx.user_id
    );

    match workflow::set_user_active(&state, ctx.user_id, user_id, data.active).await {
        Ok(()) if data.active => deliver_message(messages::USER_ACTIVATED, StatusCode::OK),
        Ok(()) => deliver_message(messages::USER_DEACTIVATED, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}

/// DELETE /api/admin/users/:userId
pub async fn handle_delete_user(
    req: ApiRequest,
    state: AppState,
    ctx: AuthContext,
) -> Result<ApiResponse> {
    let user_id = match path_id(&req, 4) {
        Ok(id) => id,
        Err(e) => return deliver_api_error(&e),
    };
    info!("Processing delete for user ID {} by admin {}", user_id, ctx.user_id);

    match workflow::delete_user(&state, ctx.user_id, user_id).await {
        Ok(()) => deliver_message(messages::USER_DELETED, StatusCode::OK),
        Err(e) => deliver_api_error(&e),
    }
}
