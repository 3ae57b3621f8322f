//! Startup errors for the proxy binary.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ProxyError {
    #[error("IO error: {0}")]
    #[diagnostic(code(rustore_proxy::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    #[diagnostic(
        code(rustore_proxy::config),
        help("Check the rustore-proxy.toml syntax and field names")
    )]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(code(rustore_proxy::client))]
    Client(#[from] rustore_client::ClientError),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
