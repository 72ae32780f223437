// ============================================================================
// Message Store Gateway
// ============================================================================
//
// The system consumes exactly two primitives of the table store: a
// descending, limited query by channel with a pagination token, and a
// single-item unconditional put. The `MessageStore` trait captures that
// surface so tests can substitute an in-memory store.
//
// ============================================================================

pub mod attr;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use crate::config::{Config, PAGE_SIZE};
use crate::error::{AppError, AppResult};
use crate::message::Message;

/// One page of a descending query, with the opaque continuation token the
/// store returned (absent on the final page).
#[derive(Debug, Clone)]
pub struct MessagePage {
    pub items: Vec<Value>,
    pub last_evaluated_key: Option<Value>,
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fetch up to [`PAGE_SIZE`] messages for a channel, newest first,
    /// resuming after `exclusive_start_key` when one is supplied.
    async fn query_page(
        &self,
        channel_id: &str,
        exclusive_start_key: Option<Value>,
    ) -> AppResult<MessagePage>;

    /// Write a single message. No overwrite check, no conditional write.
    async fn put_message(&self, message: &Message) -> AppResult<()>;
}

/// DynamoDB-backed message store. The client is process-lifetime state,
/// constructed once in `main` and shared across invocations.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Build the store from the ambient SDK configuration, applying the
    /// endpoint override when one is configured.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &Config) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            table_name: config.table_name.clone(),
        }
    }

    /// Create from a pre-built client (for testing against local endpoints).
    pub fn from_client(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl MessageStore for DynamoStore {
    async fn query_page(
        &self,
        channel_id: &str,
        exclusive_start_key: Option<Value>,
    ) -> AppResult<MessagePage> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("channel_id = :channel_id")
            .expression_attribute_values(":channel_id", AttributeValue::S(channel_id.to_string()))
            .limit(PAGE_SIZE)
            .scan_index_forward(false);

        if let Some(token) = exclusive_start_key {
            request = request.set_exclusive_start_key(Some(attr::key_from_json(&token)?));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, channel_id, "DynamoDB query failed");
            AppError::Store(store_error_message(&e))
        })?;

        let items = response
            .items()
            .iter()
            .map(attr::item_to_json)
            .collect::<AppResult<Vec<Value>>>()?;

        let last_evaluated_key = response
            .last_evaluated_key()
            .filter(|key| !key.is_empty())
            .map(attr::item_to_json)
            .transpose()?;

        Ok(MessagePage {
            items,
            last_evaluated_key,
        })
    }

    async fn put_message(&self, message: &Message) -> AppResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("channel_id", AttributeValue::S(message.channel_id.clone()))
            .item(
                "timestamp_utc_iso8601",
                AttributeValue::S(message.timestamp_utc_iso8601.clone()),
            )
            .item("author", AttributeValue::S(message.author.clone()))
            .item("content", AttributeValue::S(message.content.clone()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, channel_id = %message.channel_id, "DynamoDB put_item failed");
                AppError::Store(store_error_message(&e))
            })?;

        Ok(())
    }
}

/// Extract the message forwarded to the caller: the service error's own
/// message when the store rejected the call, the transport description
/// otherwise.
fn store_error_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: std::error::Error,
{
    match err {
        SdkError::ServiceError(context) => context.err().to_string(),
        other => other.to_string(),
    }
}
