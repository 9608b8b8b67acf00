//! Wire shapes of the CMS GraphQL responses.
//!
//! The GraphQL schema wraps related records in `node` / `nodes` envelopes and
//! nests image dimensions under `mediaDetails`. These types mirror that shape
//! exactly for deserialization and flatten into the core content types, which
//! is the "response shaping" half of the gateway's contract.

use chrono::NaiveDateTime;
use pressify_core::{Author, Category, CategoryRef, FeaturedImage, Post, StaticPage, Tag, TagRef};
use serde::Deserialize;

/// `{ "nodes": [...] }` connection envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// `{ "node": {...} }` single-record envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct NodeWrap<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfoNode {
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvatarNode {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorNode {
    pub id: String,
    pub name: String,
    pub avatar: Option<AvatarNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaDetailsNode {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageNode {
    pub source_url: String,
    pub alt_text: Option<String>,
    pub media_details: Option<MediaDetailsNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryRefNode {
    pub id: String,
    pub database_id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagRefNode {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostNode {
    pub id: String,
    pub database_id: i64,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub status: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<NodeWrap<AuthorNode>>,
    pub featured_image: Option<NodeWrap<ImageNode>>,
    #[serde(default)]
    pub categories: Option<NodeList<CategoryRefNode>>,
    #[serde(default)]
    pub tags: Option<NodeList<TagRefNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryNode {
    pub id: String,
    pub database_id: i64,
    pub count: Option<u64>,
    pub description: Option<String>,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageNode {
    pub id: String,
    pub database_id: i64,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub status: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<NodeWrap<ImageNode>>,
}

// Top-level `data` shapes, one per query document.

#[derive(Debug, Deserialize)]
pub(crate) struct PostsData {
    pub posts: PostsConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostsConnection {
    #[serde(default)]
    pub page_info: Option<PageInfoNode>,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<PostNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostData {
    pub post: Option<PostNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesData {
    #[serde(default)]
    pub categories: NodeList<CategoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsData {
    #[serde(default)]
    pub tags: NodeList<CategoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageData {
    pub page: Option<PageNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PagesData {
    #[serde(default)]
    pub pages: NodeList<PageNode>,
}

impl From<ImageNode> for FeaturedImage {
    fn from(node: ImageNode) -> Self {
        let (width, height) = node
            .media_details
            .map(|d| (d.width, d.height))
            .unwrap_or((None, None));
        Self {
            source_url: node.source_url,
            alt_text: node.alt_text.unwrap_or_default(),
            width,
            height,
        }
    }
}

impl From<AuthorNode> for Author {
    fn from(node: AuthorNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            avatar_url: node.avatar.and_then(|a| a.url),
        }
    }
}

impl From<CategoryRefNode> for CategoryRef {
    fn from(node: CategoryRefNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            name: node.name,
            slug: node.slug,
        }
    }
}

impl From<TagRefNode> for TagRef {
    fn from(node: TagRefNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            slug: node.slug,
        }
    }
}

impl From<PostNode> for Post {
    fn from(node: PostNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            date: node.date,
            modified: node.modified,
            slug: node.slug,
            status: node.status.unwrap_or_default(),
            title: node.title.unwrap_or_default(),
            content: node.content.unwrap_or_default(),
            excerpt: node.excerpt.unwrap_or_default(),
            author: node.author.map(|a| a.node.into()),
            featured_image: node.featured_image.map(|i| i.node.into()),
            categories: node
                .categories
                .unwrap_or_default()
                .nodes
                .into_iter()
                .map(Into::into)
                .collect(),
            tags: node
                .tags
                .unwrap_or_default()
                .nodes
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<CategoryNode> for Category {
    fn from(node: CategoryNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            count: node.count.unwrap_or(0),
            description: node.description.unwrap_or_default(),
            name: node.name,
            slug: node.slug,
        }
    }
}

impl From<CategoryNode> for Tag {
    fn from(node: CategoryNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            count: node.count.unwrap_or(0),
            description: node.description.unwrap_or_default(),
            name: node.name,
            slug: node.slug,
        }
    }
}

impl From<PageNode> for StaticPage {
    fn from(node: PageNode) -> Self {
        Self {
            id: node.id,
            database_id: node.database_id,
            date: node.date,
            modified: node.modified,
            slug: node.slug,
            status: node.status.unwrap_or_default(),
            title: node.title.unwrap_or_default(),
            content: node.content.unwrap_or_default(),
            featured_image: node.featured_image.map(|i| i.node.into()),
        }
    }
}
