//! Handle for a single store app.

use crate::{
    abi::Abi,
    client::RuStoreClient,
    error::{ClientError, Result},
    models::{AppDetails, AppSummary},
};

/// A package handle carrying the one piece of state the backend forces
/// on callers: the internal app ID, which only the overview endpoint
/// reveals and which the download-link endpoint requires.
///
/// The handle starts unresolved; [`App::info`] resolves and caches the
/// ID. All methods delegate to the corresponding [`RuStoreClient`]
/// operation, threading the cached ID explicitly.
#[derive(Debug, Clone)]
pub struct App {
    pub name: String,
    pub package_name: String,
    pub icon_url: String,
    app_id: Option<i64>,
}

impl App {
    /// Builds an unresolved handle from a search result.
    pub fn from_summary(summary: AppSummary) -> Self {
        Self {
            name: summary.name,
            package_name: summary.package_name,
            icon_url: summary.icon_url,
            app_id: None,
        }
    }

    /// Builds an unresolved handle from a bare package identifier.
    pub fn from_package(package_name: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            package_name: package_name.into(),
            icon_url: String::new(),
            app_id: None,
        }
    }

    /// The cached store identifier, once an info lookup has resolved it.
    pub fn app_id(&self) -> Option<i64> {
        self.app_id
    }

    /// Fetches the overview metadata and caches the resolved app ID on
    /// the handle.
    pub async fn info(&mut self, client: &RuStoreClient) -> Result<AppDetails> {
        let details = client.app_info(&self.package_name).await?;
        self.app_id = Some(details.app_id);
        Ok(details)
    }

    /// Resolves download links for the requested architectures.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::AppIdUnresolved`] when [`App::info`]
    /// has not run on this handle; the backend cannot resolve links
    /// without the app ID.
    pub async fn download_links(
        &self,
        client: &RuStoreClient,
        abis: &[Abi],
    ) -> Result<Vec<String>> {
        let app_id = self
            .app_id
            .ok_or_else(|| ClientError::AppIdUnresolved(self.package_name.clone()))?;
        client.download_links(app_id, abis).await
    }
}

impl From<AppSummary> for App {
    fn from(summary: AppSummary) -> Self {
        Self::from_summary(summary)
    }
}
