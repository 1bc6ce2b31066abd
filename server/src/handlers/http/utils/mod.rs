pub mod headers;
pub mod json_response;
pub mod request;

pub use headers::*;
pub use json_response::*;
pub use request::*;

use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::{Request, Response};

/// A request whose body has already been collected.
pub type ApiRequest = Request<Bytes>;

pub type ApiResponse = Response<BoxBody<Bytes, Infallible>>;
