// responses/files.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};

/// Raw bytes with their content type, e.g. an uploaded image.
pub fn bytes_response(bytes: Vec<u8>, content_type: &str, cache_control: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", cache_control)
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}

pub fn stylesheet_response(css: &'static str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/css; charset=utf-8")
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(css.to_string()))
        .map_err(|_| ServerError::InternalError)
}
