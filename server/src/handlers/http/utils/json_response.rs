use std::convert::Infallible;

use anyhow::{Context, Result, anyhow};
use bookstore_shared::types::{ErrorResponse, MessageResponse};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::{Response, StatusCode, header};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ApiResult, INTERNAL_ERROR_MESSAGE};
use crate::handlers::http::utils::ApiResponse;

pub fn full<T: Into<Bytes>>(chunk: T) -> BoxBody<Bytes, Infallible> {
    Full::new(chunk.into()).boxed()
}

/// Serialize any `Serialize` type and deliver it as a JSON response.
pub fn deliver_serialized_json<T: Serialize>(data: &T, status: StatusCode) -> Result<ApiResponse> {
    let json = serde_json::to_string(data).context("Failed to serialize response")?;

    debug!("Delivering serialized JSON response, size: {} bytes", json.len());

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(full(json))
        .map_err(|e| anyhow!("Failed to build JSON response: {}", e))
}

/// Delivers a JSON error response with the specified error code, message, and status.
pub fn deliver_error_json(error_code: &str, message: &str, status: StatusCode) -> Result<ApiResponse> {
    debug!(
        "Delivering error JSON: {} - {} ({})",
        status.as_u16(),
        error_code,
        message
    );
    deliver_serialized_json(&ErrorResponse::new(error_code, message), status)
}

/// `{ "message": ... }` with the given status.
pub fn deliver_message(message: &str, status: StatusCode) -> Result<ApiResponse> {
    deliver_serialized_json(&MessageResponse::new(message), status)
}

/// Map a workflow error onto its status and error envelope.
/// Internal errors are logged here and reach the client only as a generic message.
pub fn deliver_api_error(err: &ApiError) -> Result<ApiResponse> {
    match err {
        ApiError::Internal(e) => error!("Internal error: {:#}", e),
        other => warn!("Request rejected ({}): {}", other.to_code(), other),
    }
    deliver_error_json(err.to_code(), &err.to_message(), err.status())
}

/// Deliver `Ok` as JSON with `status`, `Err` through [`deliver_api_error`].
pub fn deliver_result<T: Serialize>(result: ApiResult<T>, status: StatusCode) -> Result<ApiResponse> {
    match result {
        Ok(data) => deliver_serialized_json(&data, status),
        Err(e) => deliver_api_error(&e),
    }
}

/// Like [`deliver_result`], but an empty list is answered with 404 and `empty_message`.
pub fn deliver_list<T: Serialize>(result: ApiResult<Vec<T>>, empty_message: &str) -> Result<ApiResponse> {
    match result {
        Ok(items) if items.is_empty() => {
            deliver_error_json("NOT_FOUND", empty_message, StatusCode::NOT_FOUND)
        }
        other => deliver_result(other, StatusCode::OK),
    }
}

/// Last-resort 500 that cannot fail to build.
pub fn internal_error_response() -> ApiResponse {
    let body = serde_json::to_string(&ErrorResponse::new("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE))
        .unwrap_or_default();
    let mut response = Response::new(full(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: ApiResponse) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn api_error_uses_error_envelope() {
        let resp = deliver_api_error(&ApiError::not_found("Book not found.")).unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Book not found.");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let resp = deliver_api_error(&ApiError::Internal(anyhow!("secret path"))).unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let resp = deliver_list::<u8>(Ok(vec![]), "nothing").unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = deliver_list(Ok(vec![1u8]), "nothing").unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn fallback_500_has_json_content_type() {
        let resp = internal_error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    }
}
