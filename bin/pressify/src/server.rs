//! Read-only JSON server over the content gateway.
//!
//! Exposes the gateway's read operations as JSON endpoints plus the sitemap.
//! The error taxonomy maps onto status codes: invalid input is 400, a
//! confirmed absence is 404, and any upstream fetch failure is 502 with a
//! terse body (the full diagnostic goes to tracing, not to the client).

use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::eyre::Result;
use pressify_core::{Category, Config, Post, StaticPage, Tag};
use pressify_gateway::{ContentGateway, GatewayError, PostFilter, PostPage};
use pressify_sitemap::{SitemapBuilder, SitemapError};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContentGateway>,
    pub config: Arc<Config>,
}

/// Errors surfaced by the JSON handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Unusable request input.
    BadRequest(String),
    /// The CMS confirmed the record does not exist.
    NotFound,
    /// The fetch failed; retrying later may succeed.
    Upstream(GatewayError),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidRequest(message) => Self::BadRequest(message),
            other => Self::Upstream(other),
        }
    }
}

impl From<SitemapError> for ApiError {
    fn from(err: SitemapError) -> Self {
        match err {
            SitemapError::Gateway(inner) => inner.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not found" })),
            )
                .into_response(),
            Self::Upstream(err) => {
                error!(error = %err, transient = err.is_transient(), "upstream fetch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "upstream fetch failed" })),
                )
                    .into_response()
            }
        }
    }
}

/// Query parameters for the post listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<usize>,
    per_page: Option<usize>,
    /// Comma-separated category ids.
    category: Option<String>,
    search: Option<String>,
}

/// Query parameters for the recent-posts shortcut.
#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    limit: Option<usize>,
}

fn parse_category_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("invalid category id: {part}")))
        })
        .collect()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PostPage>, ApiError> {
    let filter = PostFilter {
        page: params.page.unwrap_or(1),
        per_page: params.per_page.unwrap_or(state.config.content.per_page),
        category_ids: params
            .category
            .as_deref()
            .map(parse_category_ids)
            .transpose()?
            .unwrap_or_default(),
        search: params.search,
    };

    Ok(Json(state.gateway.posts(&filter).await?))
}

async fn get_post(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Json<Post>, ApiError> {
    state
        .gateway
        .post_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn get_post_by_id(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<i64>,
) -> Result<Json<Post>, ApiError> {
    state
        .gateway
        .post_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn recent_posts(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let limit = params.limit.unwrap_or(state.config.content.recent_limit);
    Ok(Json(state.gateway.recent_posts(limit).await?))
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.gateway.categories().await?))
}

async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    Ok(Json(state.gateway.tags().await?))
}

async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<StaticPage>>, ApiError> {
    Ok(Json(state.gateway.pages().await?))
}

async fn get_page(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Json<StaticPage>, ApiError> {
    state
        .gateway
        .page_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn sitemap_xml(State(state): State<AppState>) -> Result<Response, ApiError> {
    let builder = SitemapBuilder::new(&state.gateway, &state.config);
    let xml = builder.generate().await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

/// Create the JSON API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/posts", get(list_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/posts/id/{id}", get(get_post_by_id))
        .route("/recent", get(recent_posts))
        .route("/categories", get(list_categories))
        .route("/tags", get(list_tags))
        .route("/pages", get(list_pages))
        .route("/pages/{slug}", get(get_page))
        .route("/sitemap.xml", get(sitemap_xml))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn run(config: Config, bind_override: Option<String>) -> Result<()> {
    let bind = bind_override.unwrap_or_else(|| config.serve.bind.clone());
    let gateway = ContentGateway::new(&config)?;
    let state = AppState {
        gateway: Arc::new(gateway),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(%bind, "serving content API");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use pressify_core::{CacheConfig, CmsConfig, ContentConfig, ServeConfig, SiteConfig, SitemapConfig};
    use pressify_gateway::GraphqlClient;
    use tower::util::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_state(graphql_url: String) -> AppState {
        let config = Config {
            site: SiteConfig {
                title: "Test".to_string(),
                base_url: "https://example.com".to_string(),
                description: None,
            },
            cms: CmsConfig {
                graphql_url,
                rest_url: None,
                basic_auth_user: None,
                basic_auth_password: None,
                allow_insecure_tls: false,
                timeout_secs: 5,
                user_agent: "pressify-test".to_string(),
            },
            content: ContentConfig::default(),
            cache: CacheConfig::default(),
            serve: ServeConfig::default(),
            sitemap: SitemapConfig::default(),
        };
        let client = GraphqlClient::new(&config.cms).expect("client");
        AppState {
            gateway: Arc::new(ContentGateway::from_client(client)),
            config: Arc::new(config),
        }
    }

    async fn send(state: AppState, uri: &str) -> StatusCode {
        let router = create_router(state);
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        response.status()
    }

    #[tokio::test]
    async fn test_healthz() {
        let state = test_state("http://127.0.0.1:9/graphql".to_string());
        assert_eq!(send(state, "/healthz").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_post_is_404() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "post": null } })),
            )
            .mount(&server)
            .await;

        let state = test_state(format!("{}/graphql", server.uri()));
        assert_eq!(send(state, "/posts/nonexistent").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = test_state(format!("{}/graphql", server.uri()));
        assert_eq!(send(state, "/posts").await, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unreachable_cms_is_502() {
        let state = test_state("http://127.0.0.1:9/graphql".to_string());
        assert_eq!(send(state, "/categories").await, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_bad_category_param_is_400() {
        let state = test_state("http://127.0.0.1:9/graphql".to_string());
        assert_eq!(
            send(state, "/posts?category=food").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_listing_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("GetPosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "posts": {
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "nodes": []
                } }
            })))
            .mount(&server)
            .await;

        let state = test_state(format!("{}/graphql", server.uri()));
        assert_eq!(send(state, "/posts?page=1&per_page=5").await, StatusCode::OK);
    }

    #[test]
    fn test_parse_category_ids() {
        assert_eq!(parse_category_ids("7").expect("parse"), vec![7]);
        assert_eq!(parse_category_ids("7,9, 11").expect("parse"), vec![7, 9, 11]);
        assert!(parse_category_ids("").expect("parse").is_empty());
        assert!(parse_category_ids("food").is_err());
    }
}
