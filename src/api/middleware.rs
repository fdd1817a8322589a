//! Request middleware: logging and content-type validation.
//!
//! Both wrap the book routes uniformly; there is no per-route opt-out.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Log method and remote address for every request before dispatch.
pub async fn log_requests(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    // ConnectInfo is absent when the router is driven without a socket,
    // e.g. in tests.
    let remote = connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        %remote,
        "received request"
    );

    next.run(request).await
}

/// Reject any request whose media type is not exactly `application/json`
/// with 415; a missing or unparseable Content-Type header yields 400.
pub async fn require_json(request: Request, next: Next) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let media_type: mime::Mime = match content_type.parse() {
        Ok(media_type) => media_type,
        Err(err) => return AppError::BadRequest(err.to_string()).into_response(),
    };

    if media_type.essence_str() != mime::APPLICATION_JSON.essence_str() {
        return AppError::UnsupportedMediaType(
            "invalid Content-Type, need application/json".to_string(),
        )
        .into_response();
    }

    next.run(request).await
}
