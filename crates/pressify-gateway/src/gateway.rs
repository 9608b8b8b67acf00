//! The content gateway.
//!
//! Translates typed read intents into GraphQL queries, executes them against
//! the configured CMS endpoint and reshapes the responses into the core
//! content types. Each operation is one outbound request (unless the memo
//! cache is enabled and fresh); there is no retry and no shared mutable
//! state, so a gateway can be shared freely across concurrent tasks.
//!
//! Two API surfaces:
//!
//! - strict methods return `Result`, with `Ok(None)` / `Ok(vec![])` meaning
//!   the CMS confirmed the absence and `Err` meaning the fetch failed;
//! - `_or_empty` / `_or_none` methods collapse failures into the empty
//!   representation after logging, for render paths that must not fail.

use std::time::Duration;

use pressify_core::{Category, Config, Post, StaticPage, Tag};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::client::GraphqlClient;
use crate::error::{GatewayError, Result};
use crate::memo::MemoCache;
use crate::pagination::{PostFilter, PostPage, page_cursor};
use crate::query;
use crate::wire;

/// Implicit cap on taxonomy listings.
const TAXONOMY_LIMIT: usize = 100;

/// Implicit cap on the static-page listing.
const STATIC_PAGE_LIMIT: usize = 100;

/// Typed read access to the CMS content.
#[derive(Debug)]
pub struct ContentGateway {
    client: GraphqlClient,
    memo: Option<MemoCache>,
}

impl ContentGateway {
    /// Build a gateway from the full configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = GraphqlClient::new(&config.cms)?;
        let memo = config
            .cache
            .enabled
            .then(|| MemoCache::new(Duration::from_secs(config.cache.ttl_secs)));
        Ok(Self { client, memo })
    }

    /// Build a gateway directly from a client, without memoization.
    pub fn from_client(client: GraphqlClient) -> Self {
        Self { client, memo: None }
    }

    async fn request(&self, query: &str, variables: Value) -> Result<Value> {
        if let Some(memo) = &self.memo {
            let key = MemoCache::key(query, &variables);
            if let Some(hit) = memo.get(&key) {
                return Ok(hit);
            }
            let data = self.client.execute(query, variables).await?;
            memo.insert(key, data.clone());
            return Ok(data);
        }
        self.client.execute(query, variables).await
    }

    /// List published posts, newest first.
    ///
    /// Category and search filters are applied when present in the filter.
    /// See [`PostPage`] for the semantics of the returned totals.
    pub async fn posts(&self, filter: &PostFilter) -> Result<PostPage> {
        let filter = filter.normalized();

        let category_in = (!filter.category_ids.is_empty()).then_some(&filter.category_ids);
        let variables = json!({
            "first": filter.per_page,
            "after": page_cursor(filter.page, filter.per_page),
            "categoryIn": category_in,
            "search": filter.search,
        });

        let data = self.request(query::POSTS, variables).await?;
        let parsed: wire::PostsData = serde_json::from_value(data)?;

        let has_next_page = parsed
            .posts
            .page_info
            .map(|info| info.has_next_page)
            .unwrap_or(false);
        let posts: Vec<Post> = parsed.posts.nodes.into_iter().map(Into::into).collect();

        debug!(
            page = filter.page,
            per_page = filter.per_page,
            fetched = posts.len(),
            has_next_page,
            "listed posts"
        );

        Ok(PostPage::from_posts(posts, filter.per_page, has_next_page))
    }

    /// Fetch one post by slug. `Ok(None)` means the CMS has no such post.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(GatewayError::invalid_request("slug must not be empty"));
        }

        let data = self
            .request(query::POST_BY_SLUG, json!({ "slug": slug }))
            .await?;
        let parsed: wire::PostData = serde_json::from_value(data)?;
        Ok(parsed.post.map(Into::into))
    }

    /// Fetch one post by numeric CMS id.
    pub async fn post_by_id(&self, id: i64) -> Result<Option<Post>> {
        // The upstream ID scalar wants a string even for DATABASE_ID lookups.
        let data = self
            .request(query::POST_BY_ID, json!({ "id": id.to_string() }))
            .await?;
        let parsed: wire::PostData = serde_json::from_value(data)?;
        Ok(parsed.post.map(Into::into))
    }

    /// The `limit` most recently published posts.
    ///
    /// This is a shortcut over [`ContentGateway::posts`] with page 1 and a
    /// small page size; nothing here measures popularity.
    pub async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let filter = PostFilter {
            per_page: limit,
            ..PostFilter::default()
        };
        Ok(self.posts(&filter).await?.posts)
    }

    /// List categories that have at least one published post.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let data = self
            .request(query::CATEGORIES, json!({ "first": TAXONOMY_LIMIT }))
            .await?;
        let parsed: wire::CategoriesData = serde_json::from_value(data)?;
        Ok(parsed.categories.nodes.into_iter().map(Into::into).collect())
    }

    /// List tags that have at least one published post.
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        let data = self
            .request(query::TAGS, json!({ "first": TAXONOMY_LIMIT }))
            .await?;
        let parsed: wire::TagsData = serde_json::from_value(data)?;
        Ok(parsed.tags.nodes.into_iter().map(Into::into).collect())
    }

    /// Fetch one static page by slug.
    pub async fn page_by_slug(&self, slug: &str) -> Result<Option<StaticPage>> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(GatewayError::invalid_request("slug must not be empty"));
        }

        let data = self
            .request(query::PAGE_BY_SLUG, json!({ "slug": slug }))
            .await?;
        let parsed: wire::PageData = serde_json::from_value(data)?;
        Ok(parsed.page.map(Into::into))
    }

    /// List published static pages.
    pub async fn pages(&self) -> Result<Vec<StaticPage>> {
        let data = self
            .request(query::PAGES, json!({ "first": STATIC_PAGE_LIMIT }))
            .await?;
        let parsed: wire::PagesData = serde_json::from_value(data)?;
        Ok(parsed.pages.nodes.into_iter().map(Into::into).collect())
    }

    // Lossy conveniences: collapse any failure into the empty representation
    // after logging the diagnostic. "No data" from these methods covers both
    // "not found" and "fetch failed".

    /// [`ContentGateway::posts`], collapsing failures into an empty page.
    pub async fn posts_or_empty(&self, filter: &PostFilter) -> PostPage {
        self.posts(filter).await.unwrap_or_else(|e| {
            warn!(error = %e, "listing posts failed; returning empty page");
            PostPage::empty()
        })
    }

    /// [`ContentGateway::post_by_slug`], collapsing failures into `None`.
    pub async fn post_by_slug_or_none(&self, slug: &str) -> Option<Post> {
        self.post_by_slug(slug).await.unwrap_or_else(|e| {
            warn!(slug, error = %e, "fetching post by slug failed");
            None
        })
    }

    /// [`ContentGateway::post_by_id`], collapsing failures into `None`.
    pub async fn post_by_id_or_none(&self, id: i64) -> Option<Post> {
        self.post_by_id(id).await.unwrap_or_else(|e| {
            warn!(id, error = %e, "fetching post by id failed");
            None
        })
    }

    /// [`ContentGateway::recent_posts`], collapsing failures into an empty list.
    pub async fn recent_posts_or_empty(&self, limit: usize) -> Vec<Post> {
        self.recent_posts(limit).await.unwrap_or_else(|e| {
            warn!(limit, error = %e, "fetching recent posts failed");
            Vec::new()
        })
    }

    /// [`ContentGateway::categories`], collapsing failures into an empty list.
    pub async fn categories_or_empty(&self) -> Vec<Category> {
        self.categories().await.unwrap_or_else(|e| {
            warn!(error = %e, "listing categories failed");
            Vec::new()
        })
    }

    /// [`ContentGateway::tags`], collapsing failures into an empty list.
    pub async fn tags_or_empty(&self) -> Vec<Tag> {
        self.tags().await.unwrap_or_else(|e| {
            warn!(error = %e, "listing tags failed");
            Vec::new()
        })
    }

    /// [`ContentGateway::page_by_slug`], collapsing failures into `None`.
    pub async fn page_by_slug_or_none(&self, slug: &str) -> Option<StaticPage> {
        self.page_by_slug(slug).await.unwrap_or_else(|e| {
            warn!(slug, error = %e, "fetching page by slug failed");
            None
        })
    }

    /// [`ContentGateway::pages`], collapsing failures into an empty list.
    pub async fn pages_or_empty(&self) -> Vec<StaticPage> {
        self.pages().await.unwrap_or_else(|e| {
            warn!(error = %e, "listing pages failed");
            Vec::new()
        })
    }
}
