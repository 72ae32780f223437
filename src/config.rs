use anyhow::Result;

/// Number of messages returned per page by the list operation.
///
/// This is a behavioral contract (callers page in steps of 10), not a
/// tuning knob, so it is a constant rather than configuration.
pub const PAGE_SIZE: i32 = 10;

const DEFAULT_TABLE_NAME: &str = "dynamodb-all-messages";

/// Service configuration, loaded from environment variables with defaults.
#[derive(Clone, Debug)]
pub struct Config {
    /// DynamoDB table holding all messages, keyed by channel_id +
    /// timestamp_utc_iso8601.
    pub table_name: String,

    /// Optional endpoint override for local development
    /// (LocalStack / dynamodb-local).
    pub endpoint: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            table_name: std::env::var("TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            endpoint: std::env::var("DYNAMODB_ENDPOINT").ok(),
        })
    }
}
