//! App metadata structures.
//!
//! The backend returns differently shaped records depending on the
//! endpoint and the app's state: suggest rows carry the display name in
//! `text`, listing rows and the overview payload in `appName`, and most
//! fields may be absent outright. The raw record types in this module
//! absorb those quirks and normalize into the stable public model.

use serde::{Deserialize, Deserializer, Serialize};

fn empty_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSummary {
    pub name: String,
    pub package_name: String,
    pub icon_url: String,
}

/// Descriptive metadata from the overview endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMeta {
    pub full_name: String,
    pub company: String,
    pub short_description: String,
    pub full_description: String,
    pub age_rating: String,
}

/// A store screenshot, ordered as the backend lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub orientation: String,
}

/// Everything the overview endpoint reports about an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetails {
    /// Internal store identifier, required for download-link resolution.
    pub app_id: i64,
    pub meta: AppMeta,
    pub version_code: i64,
    pub version_name: Option<String>,
    pub downloads: i64,
    pub screenshots: Vec<Screenshot>,
}

/// Latest known version of a package, as reported by the batch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersionInfo {
    pub package_name: String,
    pub version_code: i64,
}

/// One page of paginated search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub apps: Vec<AppSummary>,
    pub total: u64,
}

/// Raw app record as returned by the suggest and listing endpoints.
///
/// Suggest rows name the app in `text`, listing rows in `appName`; when
/// both are present `text` wins. Records without a package identifier
/// are not addressable and get filtered out of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAppRecord {
    #[serde(default, deserialize_with = "empty_is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub app_name: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub icon_url: Option<String>,
}

impl RawAppRecord {
    /// Normalizes into an [`AppSummary`], or `None` when the record has
    /// no package identifier.
    pub(crate) fn into_summary(self) -> Option<AppSummary> {
        let package_name = self.package_name?;
        Some(AppSummary {
            name: self.text.or(self.app_name).unwrap_or_default(),
            package_name,
            icon_url: self.icon_url.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSuggestList {
    #[serde(default)]
    pub suggests: Vec<RawAppRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSearchPage {
    #[serde(default)]
    pub content: Vec<RawAppRecord>,
    #[serde(default)]
    pub total_elements: u64,
}

impl RawSearchPage {
    pub(crate) fn into_page(self) -> SearchPage {
        SearchPage {
            apps: self
                .content
                .into_iter()
                .filter_map(RawAppRecord::into_summary)
                .collect(),
            total: self.total_elements,
        }
    }
}

/// Raw overview payload from `/applicationData/overallInfo/{pkg}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOverallInfo {
    pub app_id: i64,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub app_name: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub full_description: Option<String>,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub age_legal: Option<String>,
    #[serde(default)]
    pub version_code: i64,
    #[serde(default, deserialize_with = "empty_is_none")]
    pub version_name: Option<String>,
    #[serde(default)]
    pub downloads: i64,
    #[serde(default)]
    pub file_urls: Vec<Screenshot>,
}

impl RawOverallInfo {
    pub(crate) fn into_details(self) -> AppDetails {
        AppDetails {
            app_id: self.app_id,
            meta: AppMeta {
                full_name: self.app_name.unwrap_or_default(),
                company: self.company_name.unwrap_or_default(),
                short_description: self.short_description.unwrap_or_default(),
                full_description: self.full_description.unwrap_or_default(),
                age_rating: self.age_legal.unwrap_or_default(),
            },
            version_code: self.version_code,
            version_name: self.version_name,
            downloads: self.downloads,
            screenshots: self.file_urls,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDownloadUrl {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDownloadLinks {
    #[serde(default)]
    pub download_urls: Vec<RawDownloadUrl>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBatchContent {
    #[serde(default)]
    pub content: Vec<AppVersionInfo>,
}
