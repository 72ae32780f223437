use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::Value;

use crate::error::AppError;
use crate::handlers;
use crate::store::MessageStore;

/// Dispatch one invocation: log the request, parse the body, route by
/// method and path, and map any domain error to the response envelope.
/// Domain errors never fail the invocation itself.
///
/// The body is parsed before routing, so a malformed body is a 400 even on
/// an unknown route.
pub async fn dispatch(event: Request, store: &dyn MessageStore) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();
    let raw_body: &[u8] = event.body().as_ref();

    tracing::info!(
        method = %method,
        path = %path,
        body = %String::from_utf8_lossy(raw_body),
        "inbound request"
    );

    // Empty or absent body parses to an empty mapping.
    let body: Value = if raw_body.is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice(raw_body) {
            Ok(value) => value,
            Err(e) => return Ok(AppError::from(e).into_response()),
        }
    };

    let result = if method == Method::POST && path == "/Getmessages" {
        handlers::get_messages(store, &body).await
    } else if method == Method::POST && path == "/messages" {
        handlers::post_message(store, &body).await
    } else {
        Err(AppError::NotFound)
    };

    Ok(result.unwrap_or_else(AppError::into_response))
}
