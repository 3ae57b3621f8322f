//! HTTP client for the RuStore backend.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::{
    abi::Abi,
    envelope::ApiEnvelope,
    error::{ClientError, Result},
    models::{
        AppDetails, AppSummary, AppVersionInfo, RawAppRecord, RawBatchContent, RawDownloadLinks,
        RawOverallInfo, RawSearchPage, RawSuggestList, SearchPage,
    },
};

/// Production backend host.
pub const DEFAULT_BASE_URL: &str = "https://backapi.rustore.ru";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Characters escaped when a package identifier is placed in a URL path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?');

/// Settings for building a [`RuStoreClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// User agent header sent on every request.
    pub user_agent: String,
    /// Per-request timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds a client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the base URL is not an
    /// absolute URL with a host.
    pub fn build(&self) -> Result<RuStoreClient> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?;
        if parsed.host().is_none() {
            return Err(ClientError::InvalidUrl(self.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(RuStoreClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }
}

/// Asynchronous client for the RuStore backend.
///
/// Each operation issues exactly one outbound request and suspends until
/// the response arrives. The client holds no mutable state; concurrent
/// calls are independent. Cancellation is dropping the returned future.
#[derive(Clone, Debug)]
pub struct RuStoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl RuStoreClient {
    /// Creates a client against the production backend.
    pub fn new() -> Result<Self> {
        ClientConfig::default().build()
    }

    /// Creates a client against a different base URL, keeping the
    /// remaining defaults.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        }
        .build()
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches via the suggestion endpoint.
    ///
    /// Records without a package identifier are filtered out; they name
    /// things that cannot be looked up or downloaded.
    pub async fn suggest(&self, query: &str) -> Result<Vec<AppSummary>> {
        let list: RawSuggestList = self
            .get_json("/search/suggest", &[("query", query)])
            .await?;
        Ok(list
            .suggests
            .into_iter()
            .filter_map(RawAppRecord::into_summary)
            .collect())
    }

    /// Searches via the paginated listing endpoint.
    ///
    /// `page` is zero-based; `page_size` is passed through unchanged.
    pub async fn search(&self, query: &str, page: u32, page_size: u32) -> Result<SearchPage> {
        let page = page.to_string();
        let page_size = page_size.to_string();
        let raw: RawSearchPage = self
            .get_json(
                "/applicationData/apps",
                &[
                    ("query", query),
                    ("pageNumber", &page),
                    ("pageSize", &page_size),
                ],
            )
            .await?;
        Ok(raw.into_page())
    }

    /// Fetches the overview metadata for a package.
    pub async fn app_info(&self, package_name: &str) -> Result<AppDetails> {
        let pkg = utf8_percent_encode(package_name, PATH_SEGMENT);
        let raw: RawOverallInfo = self
            .get_json(&format!("/applicationData/overallInfo/{pkg}"), &[])
            .await?;
        Ok(raw.into_details())
    }

    /// Resolves download links for an app by its store identifier.
    ///
    /// The backend returns one URL per architecture variant it can
    /// resolve, in its own order; variants it cannot resolve are dropped
    /// from the reply rather than reported as errors.
    pub async fn download_links(&self, app_id: i64, abis: &[Abi]) -> Result<Vec<String>> {
        let raw: RawDownloadLinks = self
            .post_json(
                "/applicationData/v2/download-link",
                &json!({ "appId": app_id, "supportedAbis": abis }),
            )
            .await?;
        Ok(raw.download_urls.into_iter().map(|u| u.url).collect())
    }

    /// Reports the latest known version for each package.
    ///
    /// Version code 0 is submitted for every package, which makes the
    /// backend treat each one as outdated and report its latest version.
    /// An empty input yields an empty reply without touching the network.
    pub async fn check_updates<S: AsRef<str>>(&self, packages: &[S]) -> Result<Vec<AppVersionInfo>> {
        if packages.is_empty() {
            return Ok(Vec::new());
        }

        let content: Vec<AppVersionInfo> = packages
            .iter()
            .map(|pkg| AppVersionInfo {
                package_name: pkg.as_ref().to_string(),
                version_code: 0,
            })
            .collect();
        let raw: RawBatchContent = self
            .post_json("/applicationData/newApps", &json!({ "content": content }))
            .await?;
        Ok(raw.content)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let mut req = self.http.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        Self::decode(req.send().await?).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        Self::decode(self.http.post(&url).json(body).send().await?).await
    }

    /// Decodes the response envelope, regardless of the HTTP status line.
    ///
    /// The backend reports failures through the envelope's `code` field
    /// and is not consistent about the accompanying HTTP status, so the
    /// body is parsed first and the status line is only consulted when
    /// no envelope can be read out of it.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        match serde_json::from_slice::<ApiEnvelope<T>>(&bytes) {
            Ok(envelope) => envelope.into_body(),
            Err(_) if !status.is_success() => Err(ClientError::Upstream {
                code: status.as_u16().to_string(),
                message: status.canonical_reason().map(String::from),
            }),
            Err(err) => Err(ClientError::Json(err)),
        }
    }
}
