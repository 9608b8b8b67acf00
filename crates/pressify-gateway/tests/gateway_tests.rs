//! End-to-end gateway tests against a stub CMS.
//!
//! A wiremock server stands in for the CMS GraphQL endpoint so every
//! operation can be exercised offline: filters, cursor pagination, absence
//! versus failure, credentials and the lossy fallback layer.

use pressify_core::{CacheConfig, CmsConfig, Config, ContentConfig, SiteConfig};
use pressify_gateway::{ContentGateway, GatewayError, GraphqlClient, PostFilter};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cms_config(graphql_url: String) -> CmsConfig {
    CmsConfig {
        graphql_url,
        rest_url: None,
        basic_auth_user: None,
        basic_auth_password: None,
        allow_insecure_tls: false,
        timeout_secs: 5,
        user_agent: "pressify-test".to_string(),
    }
}

fn gateway_for(server: &MockServer) -> ContentGateway {
    let client =
        GraphqlClient::new(&cms_config(format!("{}/graphql", server.uri()))).expect("client");
    ContentGateway::from_client(client)
}

/// Gateway pointed at a port nothing listens on.
fn unreachable_gateway() -> ContentGateway {
    let client = GraphqlClient::new(&cms_config(
        "http://127.0.0.1:9/graphql".to_string(),
    ))
    .expect("client");
    ContentGateway::from_client(client)
}

fn post_node(database_id: i64, slug: &str, category_slugs: &[&str], tag_slugs: &[&str]) -> Value {
    json!({
        "id": format!("cG9zdDo{database_id}"),
        "databaseId": database_id,
        "date": "2024-05-01T10:00:00",
        "modified": "2024-05-02T08:30:00",
        "slug": slug,
        "status": "publish",
        "title": format!("Post {slug}"),
        "content": "<p>Body</p>",
        "excerpt": "<p>Excerpt</p>",
        "author": { "node": { "id": "dXNlcjox", "name": "Ada", "avatar": { "url": "https://cdn/a.png" } } },
        "featuredImage": null,
        "categories": {
            "nodes": category_slugs.iter().enumerate().map(|(i, s)| json!({
                "id": format!("dGVybTo{i}"),
                "databaseId": 100 + i as i64,
                "name": s,
                "slug": s
            })).collect::<Vec<_>>()
        },
        "tags": {
            "nodes": tag_slugs.iter().enumerate().map(|(i, s)| json!({
                "id": format!("dGFnOn{i}="),
                "name": s,
                "slug": s
            })).collect::<Vec<_>>()
        }
    })
}

fn posts_body(nodes: Vec<Value>, has_next_page: bool) -> Value {
    json!({
        "data": {
            "posts": {
                "pageInfo": { "hasNextPage": has_next_page, "endCursor": "abc" },
                "nodes": nodes
            }
        }
    })
}

#[tokio::test]
async fn posts_returns_all_on_one_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![
                post_node(1, "one", &[], &[]),
                post_node(2, "two", &[], &[]),
                post_node(3, "three", &[], &[]),
            ],
            false,
        )))
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .posts(&PostFilter::default())
        .await
        .expect("posts");

    assert_eq!(page.posts.len(), 3);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next_page);
    assert_eq!(page.posts[0].slug, "one");
}

#[tokio::test]
async fn posts_page_two_sends_derived_cursor() {
    let server = MockServer::start().await;

    // Page 1: no cursor.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPosts"))
        .and(body_partial_json(json!({ "variables": { "first": 2, "after": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(1, "one", &[], &[]), post_node(2, "two", &[], &[])],
            true,
        )))
        .mount(&server)
        .await;

    // Page 2 of size 2: cursor encodes arrayconnection:1.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPosts"))
        .and(body_partial_json(
            json!({ "variables": { "first": 2, "after": "YXJyYXljb25uZWN0aW9uOjE=" } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(3, "three", &[], &[])],
            false,
        )))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let first = gateway
        .posts(&PostFilter {
            page: 1,
            per_page: 2,
            ..PostFilter::default()
        })
        .await
        .expect("page 1");
    assert_eq!(first.posts.len(), 2);
    assert!(first.has_next_page);

    let second = gateway
        .posts(&PostFilter {
            page: 2,
            per_page: 2,
            ..PostFilter::default()
        })
        .await
        .expect("page 2");
    assert_eq!(second.posts.len(), 1);
    assert_eq!(second.posts[0].slug, "three");
    assert!(!second.has_next_page);
}

#[tokio::test]
async fn posts_passes_category_filter_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "categoryIn": [7] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(1, "in-category", &["food"], &[])],
            false,
        )))
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .posts(&PostFilter {
            category_ids: vec![7],
            ..PostFilter::default()
        })
        .await
        .expect("posts");

    assert_eq!(page.posts.len(), 1);
    assert!(page.posts[0].categories.iter().any(|c| c.slug == "food"));
}

#[tokio::test]
async fn posts_omits_category_filter_when_unset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(
            json!({ "variables": { "categoryIn": null, "search": null } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(vec![], false)))
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .posts(&PostFilter::default())
        .await
        .expect("posts");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn posts_passes_search_string_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "search": "sleep" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(4, "sleep-guide", &[], &["sleep"])],
            false,
        )))
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .posts(&PostFilter {
            search: Some("sleep".to_string()),
            ..PostFilter::default()
        })
        .await
        .expect("posts");

    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].slug, "sleep-guide");
}

#[tokio::test]
async fn post_taxonomy_slugs_survive_listing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(1, "round-trip", &["a", "b"], &["x"])],
            false,
        )))
        .mount(&server)
        .await;

    let page = gateway_for(&server)
        .posts(&PostFilter::default())
        .await
        .expect("posts");

    let post = &page.posts[0];
    let category_slugs: Vec<&str> = post.categories.iter().map(|c| c.slug.as_str()).collect();
    let tag_slugs: Vec<&str> = post.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(category_slugs, vec!["a", "b"]);
    assert_eq!(tag_slugs, vec!["x"]);
}

#[tokio::test]
async fn post_by_slug_returns_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPostBySlug"))
        .and(body_partial_json(json!({ "variables": { "slug": "hello" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "post": post_node(1, "hello", &[], &[]) } })),
        )
        .mount(&server)
        .await;

    let post = gateway_for(&server)
        .post_by_slug("hello")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(post.database_id, 1);
    assert_eq!(post.author.expect("author").name, "Ada");
}

#[tokio::test]
async fn post_by_slug_nonexistent_is_confirmed_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "post": null } })))
        .mount(&server)
        .await;

    let result = gateway_for(&server).post_by_slug("nonexistent").await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn post_by_empty_slug_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and fail the test differently.
    let result = gateway_for(&server).post_by_slug("  ").await;
    assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
    assert!(server.received_requests().await.expect("requests").is_empty());
}

#[tokio::test]
async fn post_by_id_sends_stringified_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPostById"))
        .and(body_partial_json(json!({ "variables": { "id": "42" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "post": post_node(42, "by-id", &[], &[]) } })),
        )
        .mount(&server)
        .await;

    let post = gateway_for(&server)
        .post_by_id(42)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(post.slug, "by-id");
}

#[tokio::test]
async fn recent_posts_is_first_page_with_small_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "first": 5, "after": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(
            vec![post_node(1, "newest", &[], &[])],
            true,
        )))
        .mount(&server)
        .await;

    let posts = gateway_for(&server).recent_posts(5).await.expect("recent");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "newest");
}

#[tokio::test]
async fn categories_and_tags_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "categories": { "nodes": [
                { "id": "dGVybTox", "databaseId": 7, "count": 3, "description": "Food posts", "name": "Food", "slug": "food" }
            ] } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetTags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "tags": { "nodes": [
                { "id": "dGVybToy", "databaseId": 9, "count": null, "description": null, "name": "Sleep", "slug": "sleep" }
            ] } }
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let categories = gateway.categories().await.expect("categories");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "food");
    assert_eq!(categories[0].count, 3);

    let tags = gateway.tags().await.expect("tags");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].slug, "sleep");
    assert_eq!(tags[0].count, 0);
}

#[tokio::test]
async fn page_by_slug_and_pages_listing() {
    let server = MockServer::start().await;
    let page_node = json!({
        "id": "cGFnZTox",
        "databaseId": 10,
        "date": "2024-04-01T09:00:00",
        "modified": "2024-04-10T09:00:00",
        "slug": "about",
        "status": "publish",
        "title": "About",
        "content": "<p>About us</p>",
        "featuredImage": null
    });

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPageBySlug"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "page": page_node.clone() } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetPages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "pages": { "nodes": [page_node] } } })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let page = gateway
        .page_by_slug("about")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(page.title, "About");

    let pages = gateway.pages().await.expect("pages");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].slug, "about");
}

#[tokio::test]
async fn graphql_errors_surface_as_graphql_variant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [ { "message": "Cannot query field \"bogus\"" } ]
        })))
        .mount(&server)
        .await;

    let result = gateway_for(&server).categories().await;
    match result {
        Err(GatewayError::GraphQl { messages }) => {
            assert!(messages[0].contains("bogus"));
        }
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = gateway_for(&server).tags().await;
    match result {
        Err(err @ GatewayError::Status { .. }) => assert!(err.is_transient()),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_errs_on_every_operation() {
    let gateway = unreachable_gateway();

    assert!(matches!(
        gateway.posts(&PostFilter::default()).await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.post_by_slug("x").await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.post_by_id(1).await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.categories().await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.tags().await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.page_by_slug("x").await,
        Err(GatewayError::Transport(_))
    ));
    assert!(matches!(
        gateway.pages().await,
        Err(GatewayError::Transport(_))
    ));
}

#[tokio::test]
async fn lossy_layer_collapses_failures_to_empty() {
    let gateway = unreachable_gateway();

    let page = gateway.posts_or_empty(&PostFilter::default()).await;
    assert!(page.posts.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);

    assert!(gateway.post_by_slug_or_none("x").await.is_none());
    assert!(gateway.post_by_id_or_none(1).await.is_none());
    assert!(gateway.recent_posts_or_empty(5).await.is_empty());
    assert!(gateway.categories_or_empty().await.is_empty());
    assert!(gateway.tags_or_empty().await.is_empty());
    assert!(gateway.page_by_slug_or_none("x").await.is_none());
    assert!(gateway.pages_or_empty().await.is_empty());
}

#[tokio::test]
async fn basic_auth_header_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(vec![], false)))
        .expect(1)
        .mount(&server)
        .await;

    let mut cms = cms_config(format!("{}/graphql", server.uri()));
    cms.basic_auth_user = Some("user".to_string());
    cms.basic_auth_password = Some("pass".to_string());
    let gateway = ContentGateway::from_client(GraphqlClient::new(&cms).expect("client"));

    gateway.posts(&PostFilter::default()).await.expect("posts");
}

#[tokio::test]
async fn memo_cache_deduplicates_identical_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("GetCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "categories": { "nodes": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        site: SiteConfig {
            title: "Test".to_string(),
            base_url: "https://example.com".to_string(),
            description: None,
        },
        cms: cms_config(format!("{}/graphql", server.uri())),
        content: ContentConfig::default(),
        cache: CacheConfig {
            enabled: true,
            ttl_secs: 60,
        },
        serve: Default::default(),
        sitemap: Default::default(),
    };
    let gateway = ContentGateway::new(&config).expect("gateway");

    gateway.categories().await.expect("first call");
    gateway.categories().await.expect("second call");
    // The mock's expect(1) verifies on drop that only one request went out.
}
