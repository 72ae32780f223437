use std::sync::Arc;

use lambda_http::{run, service_fn, Error, Request};
use tracing_subscriber::EnvFilter;

use channel_messages::config::Config;
use channel_messages::routes;
use channel_messages::store::DynamoStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // The execution environment stamps log lines itself.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .init();

    let config = Config::from_env()?;
    tracing::info!(table_name = %config.table_name, "starting message handler");

    // One store client per process, reused across invocations.
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = Arc::new(DynamoStore::new(&sdk_config, &config));

    run(service_fn(move |event: Request| {
        let store = Arc::clone(&store);
        async move { routes::dispatch(event, store.as_ref()).await }
    }))
    .await
}
