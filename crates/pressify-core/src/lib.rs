//! Pressify Core Library
//!
//! Core types, configuration, and error handling shared by the Pressify
//! content gateway and tooling.

pub mod config;
pub mod content;
pub mod error;

pub use config::{
    CacheConfig, CmsConfig, Config, ContentConfig, ServeConfig, SiteConfig, SitemapConfig,
};
pub use content::{Author, Category, CategoryRef, FeaturedImage, Post, StaticPage, Tag, TagRef};
pub use error::{CoreError, Result};
