// ============================================================================
// Operation handlers
// ============================================================================
//
// The two operations of the service: paginated retrieval of a channel's
// messages, and insertion of a new message. Each is a single stateless
// request/response cycle against the store gateway.
//
// ============================================================================

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::message::Message;
use crate::response::build_response;
use crate::store::MessageStore;

const MISSING_CHANNEL_ID: &str = "Missing channel_id";
const MISSING_MESSAGE_FIELDS: &str = "Missing author, content, or channel_id";

/// A required field counts as missing when it is absent, not a string, or
/// an empty string.
fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// POST /Getmessages
///
/// Returns one page (at most [`crate::config::PAGE_SIZE`] items) of the
/// channel's messages, newest first. `last_evaluated_key` in the body is an
/// opaque token from a previous call; `null` or `{}` means first page.
pub async fn get_messages(store: &dyn MessageStore, body: &Value) -> AppResult<Response<Body>> {
    let channel_id = required_str(body, "channel_id")
        .ok_or_else(|| AppError::Validation(MISSING_CHANNEL_ID.to_string()))?;

    let exclusive_start_key = body
        .get("last_evaluated_key")
        .filter(|v| !v.is_null())
        .filter(|v| v.as_object().map_or(true, |m| !m.is_empty()))
        .cloned();

    let page = store.query_page(channel_id, exclusive_start_key).await?;

    tracing::debug!(
        channel_id,
        count = page.items.len(),
        has_more = page.last_evaluated_key.is_some(),
        "fetched message page"
    );

    build_response(
        StatusCode::OK,
        &json!({
            "items": page.items,
            "last_evaluated_key": page.last_evaluated_key,
        }),
    )
}

/// POST /messages
///
/// Stores a new message for the channel. The timestamp sort key is
/// generated server-side; the full stored record is returned.
pub async fn post_message(store: &dyn MessageStore, body: &Value) -> AppResult<Response<Body>> {
    let author = required_str(body, "author");
    let content = required_str(body, "content");
    let channel_id = required_str(body, "channel_id");

    let (Some(author), Some(content), Some(channel_id)) = (author, content, channel_id) else {
        return Err(AppError::Validation(MISSING_MESSAGE_FIELDS.to_string()));
    };

    let message = Message::new(channel_id, author, content);
    store.put_message(&message).await?;

    tracing::info!(
        channel_id = %message.channel_id,
        timestamp = %message.timestamp_utc_iso8601,
        "stored message"
    );

    build_response(StatusCode::CREATED, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::store::MessagePage;

    /// Store that must not be reached; validation rejects first.
    struct UnreachableStore;

    #[async_trait]
    impl MessageStore for UnreachableStore {
        async fn query_page(&self, _: &str, _: Option<Value>) -> AppResult<MessagePage> {
            panic!("store must not be reached")
        }

        async fn put_message(&self, _: &Message) -> AppResult<()> {
            panic!("store must not be reached")
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_rejects_missing_channel_id() {
        for body in [json!({}), json!({"channel_id": ""}), json!({"channel_id": 7})] {
            let err = get_messages(&UnreachableStore, &body).await.unwrap_err();
            assert_eq!(validation_message(err), "Missing channel_id");
        }
    }

    #[tokio::test]
    async fn insert_rejects_any_missing_field() {
        for body in [
            json!({}),
            json!({"author": "alice", "content": "hi"}),
            json!({"author": "alice", "channel_id": "c1"}),
            json!({"content": "hi", "channel_id": "c1"}),
            json!({"author": "", "content": "hi", "channel_id": "c1"}),
        ] {
            let err = post_message(&UnreachableStore, &body).await.unwrap_err();
            assert_eq!(
                validation_message(err),
                "Missing author, content, or channel_id"
            );
        }
    }
}
