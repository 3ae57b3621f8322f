//! Tracing subscriber setup for the proxy.

use tracing::Subscriber;
use tracing_subscriber::fmt;

const LOG_ENV: &str = "RUSTORE_PROXY_LOG";
const LOG_JSON_ENV: &str = "RUSTORE_PROXY_LOG_JSON";
const DEFAULT_FILTER: &str = "rustore_proxy=info,rustore_client=info,tower_http=warn";

pub fn setup_logging() {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    let json = std::env::var(LOG_JSON_ENV).is_ok_and(|v| v == "1" || v == "true");
    let subscriber: Box<dyn Subscriber + Send + Sync> = if json {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(builder.finish())
    };

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
