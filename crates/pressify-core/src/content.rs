//! Content types projected out of the CMS.
//!
//! All of these are read-only projections: they are created, edited and
//! deleted in the upstream CMS and only fetched and reshaped here. Slugs are
//! unique within each type and stable for the lifetime of the content.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque CMS identifier.
    pub id: String,

    /// Numeric CMS identifier, usable for lookups.
    pub database_id: i64,

    /// Publish timestamp. CMS timestamps carry no offset.
    pub date: NaiveDateTime,

    /// Last-modified timestamp.
    pub modified: NaiveDateTime,

    /// URL key, unique among posts.
    pub slug: String,

    /// Publication status (e.g., "publish").
    pub status: String,

    /// Post title (may contain HTML entities).
    pub title: String,

    /// Rendered HTML body.
    pub content: String,

    /// Rendered HTML excerpt.
    pub excerpt: String,

    /// Post author, when the CMS exposes one.
    pub author: Option<Author>,

    /// Featured image, when one is set.
    pub featured_image: Option<FeaturedImage>,

    /// Categories attached to this post. May be empty.
    pub categories: Vec<CategoryRef>,

    /// Tags attached to this post. May be empty.
    pub tags: Vec<TagRef>,
}

impl Post {
    /// Site-local path for this post.
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

/// Post author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Opaque CMS identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Featured image descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedImage {
    /// Image URL.
    pub source_url: String,

    /// Alternative text. Empty when the CMS has none.
    pub alt_text: String,

    /// Pixel width, when known.
    pub width: Option<u32>,

    /// Pixel height, when known.
    pub height: Option<u32>,
}

/// Category reference attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub database_id: i64,
    pub name: String,
    pub slug: String,
}

/// Tag reference attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A category taxonomy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque CMS identifier.
    pub id: String,

    /// Numeric CMS identifier.
    pub database_id: i64,

    /// Number of published posts in this category.
    pub count: u64,

    /// Category description. Empty when the CMS has none.
    pub description: String,

    /// Display name.
    pub name: String,

    /// URL key, unique among categories.
    pub slug: String,
}

impl Category {
    /// Site-local path for this category's listing.
    pub fn path(&self) -> String {
        format!("/category/{}", self.slug)
    }
}

/// A tag taxonomy entry. Structurally identical to [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub database_id: i64,
    pub count: u64,
    pub description: String,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Site-local path for this tag's listing.
    pub fn path(&self) -> String {
        format!("/tag/{}", self.slug)
    }
}

/// A static page. Unlike [`Post`] it carries no taxonomy and no excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub id: String,
    pub database_id: i64,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub status: String,
    pub title: String,
    pub content: String,
    pub featured_image: Option<FeaturedImage>,
}

impl StaticPage {
    /// Site-local path for this page. Static pages live at the site root.
    pub fn path(&self) -> String {
        format!("/{}", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: "cG9zdDox".to_string(),
            database_id: 1,
            date: "2024-05-01T10:00:00".parse().expect("parse date"),
            modified: "2024-05-02T08:30:00".parse().expect("parse date"),
            slug: "hello-world".to_string(),
            status: "publish".to_string(),
            title: "Hello World".to_string(),
            content: "<p>Hi</p>".to_string(),
            excerpt: "<p>Hi</p>".to_string(),
            author: None,
            featured_image: None,
            categories: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn test_post_path() {
        assert_eq!(sample_post().path(), "/posts/hello-world");
    }

    #[test]
    fn test_page_path() {
        let page = StaticPage {
            id: "cGFnZTox".to_string(),
            database_id: 2,
            date: "2024-05-01T10:00:00".parse().expect("parse date"),
            modified: "2024-05-01T10:00:00".parse().expect("parse date"),
            slug: "about".to_string(),
            status: "publish".to_string(),
            title: "About".to_string(),
            content: String::new(),
            featured_image: None,
        };
        assert_eq!(page.path(), "/about");
    }

    #[test]
    fn test_taxonomy_paths() {
        let category = Category {
            id: "dGVybTox".to_string(),
            database_id: 7,
            count: 3,
            description: String::new(),
            name: "Food".to_string(),
            slug: "food".to_string(),
        };
        let tag = Tag {
            id: "dGVybToy".to_string(),
            database_id: 8,
            count: 1,
            description: String::new(),
            name: "Sleep".to_string(),
            slug: "sleep".to_string(),
        };
        assert_eq!(category.path(), "/category/food");
        assert_eq!(tag.path(), "/tag/sleep");
    }

    #[test]
    fn test_post_serde_round_trip() {
        let post = sample_post();
        let json = serde_json::to_string(&post).expect("serialize");
        let back: Post = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(post, back);
    }
}
