//! Async client for the RuStore app-store backend.
//!
//! This crate wraps the undocumented `backapi.rustore.ru` HTTP API with a
//! stable data model. Operations: search (suggestion-based and
//! paginated), metadata lookup, download-link resolution, and bulk
//! update-checking. Each operation is a single outbound request plus a
//! normalization of the backend's heterogeneous JSON payloads.
//!
//! # Example
//!
//! ```no_run
//! use rustore_client::{Abi, App, RuStoreClient};
//!
//! async fn latest_apk_link() -> rustore_client::Result<Option<String>> {
//!     let client = RuStoreClient::new()?;
//!
//!     let results = client.suggest("Дзен").await?;
//!     let Some(summary) = results.into_iter().next() else {
//!         return Ok(None);
//!     };
//!
//!     let mut app = App::from_summary(summary);
//!     app.info(&client).await?;
//!
//!     let links = app.download_links(&client, &[Abi::Arm64V8a]).await?;
//!     Ok(links.into_iter().next())
//! }
//! ```

pub mod abi;
pub mod app;
pub mod client;
mod envelope;
pub mod error;
pub mod models;

pub use abi::Abi;
pub use app::App;
pub use client::{ClientConfig, RuStoreClient, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use models::{AppDetails, AppMeta, AppSummary, AppVersionInfo, Screenshot, SearchPage};
