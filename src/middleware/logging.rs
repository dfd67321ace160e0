use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::ErrorContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The id assigned by [`logging_middleware`], or `"unknown"` outside it.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}

pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let header_value = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = header_value.clone() {
        request.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Request started"
    );

    let mut response = next.run(request).await;
    let status = response.status();

    if let Some(context) = response.extensions().get::<ErrorContext>() {
        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = context.error_code,
                status_code = %status,
                error_message = %context.detail,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = context.error_code,
                status_code = %status,
                error_message = %context.detail,
                "Request rejected"
            );
        }
    }

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );

    response
}
