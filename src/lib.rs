// ============================================================================
// Channel Messages API
// ============================================================================
//
// Lambda request handler exposing two operations over a DynamoDB table:
// paginated retrieval of messages for a channel, and insertion of a new
// message with a server-generated timestamp.
//
// ============================================================================

pub mod config;
pub mod error;
pub mod handlers;
pub mod message;
pub mod response;
pub mod routes;
pub mod store;
