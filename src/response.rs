use lambda_http::http::{header, StatusCode};
use lambda_http::{Body, Response};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Build the uniform response envelope: serialized JSON body,
/// `Content-Type: application/json` and `Access-Control-Allow-Origin: *`
/// on every response. Every operation goes through this function.
pub fn build_response<T: Serialize>(status: StatusCode, body: &T) -> AppResult<Response<Body>> {
    let json = serde_json::to_string(body).map_err(|e| AppError::Response(e.to_string()))?;

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(json))
        .map_err(|e| AppError::Response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_json_and_cors_headers() {
        let response = build_response(StatusCode::OK, &json!({"ok": true})).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert_eq!(response.body().as_ref(), br#"{"ok":true}"#);
    }
}
