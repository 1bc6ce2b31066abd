use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::handlers::http::utils::ApiRequest;
use crate::messages;

pub const INVALID_JSON: &str = "Request body must be valid JSON.";

/// Parse the body as JSON.
pub fn read_json<T: DeserializeOwned>(req: &ApiRequest) -> ApiResult<T> {
    serde_json::from_slice(req.body()).map_err(|e| {
        debug!("Rejected JSON body: {}", e);
        ApiError::validation(INVALID_JSON)
    })
}

/// Parse the body as JSON, treating an empty body as `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(req: &ApiRequest) -> ApiResult<T> {
    if req.body().iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    read_json(req)
}

/// Decoded query-string parameters. Later duplicates win.
pub fn query_params(req: &ApiRequest) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Path segment at `index`, where index 1 is the first segment after the leading `/`.
pub fn path_param(req: &ApiRequest, index: usize) -> Option<String> {
    req.uri()
        .path()
        .split('/')
        .nth(index)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Path segment at `index` parsed as a row id.
pub fn path_id(req: &ApiRequest, index: usize) -> ApiResult<i64> {
    path_param(req, index)
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| ApiError::validation(messages::INVALID_ID))
}
