//! Local REST routes mirroring the adapter operations.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use rustore_client::{Abi, RuStoreClient};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::response::{success, GatewayError, ValidationError};

pub fn router(client: RuStoreClient) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/info", get(info))
        .route("/apk", get(apk))
        .route("/updates", get(updates))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(client)
}

/// Pulls a required parameter out, treating empty values as absent.
fn require(value: Option<String>, name: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(name))
}

fn parse_number<T: FromStr>(raw: &str, name: &'static str) -> Result<T, ValidationError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|err: T::Err| ValidationError::Invalid {
        name,
        reason: err.to_string(),
    })
}

fn parse_abis(raw: &str) -> Result<Vec<Abi>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            Abi::from_str(token).map_err(|err| ValidationError::Invalid {
                name: "abis",
                reason: err.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    page: Option<String>,
    count: Option<String>,
}

/// Suggestion search by default; the presence of `page` switches to the
/// paginated listing, with `count` as the page size.
async fn search(
    State(client): State<RuStoreClient>,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError> {
    let query = require(params.query, "query")?;

    match params.page {
        Some(page) => {
            let page: u32 = parse_number(&page, "page")?;
            let count: u32 = params
                .count
                .as_deref()
                .map(|raw| parse_number(raw, "count"))
                .transpose()?
                .unwrap_or(10);
            Ok(success(client.search(&query, page, count).await?))
        }
        None => Ok(success(client.suggest(&query).await?)),
    }
}

#[derive(Debug, Deserialize)]
struct InfoParams {
    pkg: Option<String>,
}

async fn info(
    State(client): State<RuStoreClient>,
    Query(params): Query<InfoParams>,
) -> Result<Response, GatewayError> {
    let pkg = require(params.pkg, "package name")?;
    Ok(success(client.app_info(&pkg).await?))
}

#[derive(Debug, Deserialize)]
struct ApkParams {
    id: Option<String>,
    abis: Option<String>,
}

async fn apk(
    State(client): State<RuStoreClient>,
    Query(params): Query<ApkParams>,
) -> Result<Response, GatewayError> {
    let id: i64 = parse_number(&require(params.id, "package id")?, "id")?;
    let abis = parse_abis(&require(params.abis, "abis")?)?;
    Ok(success(client.download_links(id, &abis).await?))
}

#[derive(Debug, Deserialize)]
struct UpdatesParams {
    pkgs: Option<String>,
}

async fn updates(
    State(client): State<RuStoreClient>,
    Query(params): Query<UpdatesParams>,
) -> Result<Response, GatewayError> {
    let pkgs = require(params.pkgs, "pkgs")?;
    let packages: Vec<&str> = pkgs
        .split(',')
        .map(str::trim)
        .filter(|pkg| !pkg.is_empty())
        .collect();
    Ok(success(client.check_updates(&packages).await?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use httpmock::prelude::*;
    use tower::util::ServiceExt;

    use super::*;

    fn router_for(server: &MockServer) -> Router {
        router(RuStoreClient::with_base_url(server.base_url()).unwrap())
    }

    async fn request(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_without_query_is_rejected() {
        let server = MockServer::start();

        let (status, json) = request(router_for(&server), "/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "error": "no query given"})
        );

        // An empty value counts as absent.
        let (status, _) = request(router_for(&server), "/search?query=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_returns_suggestions() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET)
                .path("/search/suggest")
                .query_param("query", "zen");
            then.status(200).json_body(serde_json::json!({
                "code": "OK",
                "body": {
                    "suggests": [
                        {"text": "Zen", "packageName": "ru.zen.android", "iconUrl": "https://img/zen.png"},
                        {"text": "zen news"}
                    ]
                }
            }));
        });

        let (status, json) = request(router_for(&server), "/search?query=zen").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "status": "ok",
                "data": [
                    {"name": "Zen", "packageName": "ru.zen.android", "iconUrl": "https://img/zen.png"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_search_with_page_uses_the_listing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/applicationData/apps")
                .query_param("query", "zen")
                .query_param("pageNumber", "0")
                .query_param("pageSize", "10");
            then.status(200).json_body(serde_json::json!({
                "code": "OK",
                "body": {"content": [], "totalElements": 0}
            }));
        });

        let (status, json) = request(router_for(&server), "/search?query=zen&page=0").await;

        mock.assert();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "data": {"apps": [], "total": 0}})
        );
    }

    #[tokio::test]
    async fn test_search_with_bad_page_is_rejected() {
        let server = MockServer::start();
        let (status, json) = request(router_for(&server), "/search?query=zen&page=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_info_without_pkg_is_rejected() {
        let server = MockServer::start();
        let (status, json) = request(router_for(&server), "/info").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "error": "no package name given"})
        );
    }

    #[tokio::test]
    async fn test_info_returns_details() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/applicationData/overallInfo/ru.zen.android");
            then.status(200).json_body(serde_json::json!({
                "code": "OK",
                "body": {"appId": 123456, "appName": "Zen", "versionCode": 420, "downloads": 5}
            }));
        });

        let (status, json) = request(router_for(&server), "/info?pkg=ru.zen.android").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["data"]["appId"], 123456);
        assert_eq!(json["data"]["meta"]["fullName"], "Zen");
    }

    #[tokio::test]
    async fn test_apk_validates_parameters() {
        let server = MockServer::start();

        let (status, json) = request(router_for(&server), "/apk?abis=arm64-v8a").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "no package id given");

        let (status, json) = request(router_for(&server), "/apk?id=123456").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "no abis given");

        let (status, json) = request(router_for(&server), "/apk?id=123456&abis=mips").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid abis: Unknown ABI token: mips");

        let (status, _) = request(router_for(&server), "/apk?id=abc&abis=arm64-v8a").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apk_returns_links() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST)
                .path("/applicationData/v2/download-link")
                .json_body(serde_json::json!({
                    "appId": 123456,
                    "supportedAbis": ["arm64-v8a", "x86_64"]
                }));
            then.status(200).json_body(serde_json::json!({
                "code": "OK",
                "body": {"downloadUrls": [{"url": "https://dl.example/zen.apk"}]}
            }));
        });

        let (status, json) =
            request(router_for(&server), "/apk?id=123456&abis=arm64-v8a,x86_64").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "data": ["https://dl.example/zen.apk"]})
        );
    }

    #[tokio::test]
    async fn test_updates_round_trip() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/applicationData/newApps");
            then.status(200).json_body(serde_json::json!({
                "code": "OK",
                "body": {
                    "content": [{"packageName": "ru.zen.android", "versionCode": 420}]
                }
            }));
        });

        let (status, json) =
            request(router_for(&server), "/updates?pkgs=ru.zen.android").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "status": "ok",
                "data": [{"packageName": "ru.zen.android", "versionCode": 420}]
            })
        );
    }

    #[tokio::test]
    async fn test_updates_without_pkgs_is_rejected() {
        let server = MockServer::start();
        let (status, json) = request(router_for(&server), "/updates").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "no pkgs given");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_masked() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/applicationData/overallInfo/com.missing.app");
            then.status(200).json_body(serde_json::json!({
                "code": "NOT_FOUND",
                "message": "application not found"
            }));
        });

        let (status, json) = request(router_for(&server), "/info?pkg=com.missing.app").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "error": "server error"})
        );
    }
}
