//! Pressify Sitemap
//!
//! Enumerates every published URL of the site through the content gateway
//! and renders sitemap-protocol XML.

pub mod crawl;
pub mod xml;

pub use crawl::{Result, SitemapBuilder, SitemapError};
pub use xml::{ChangeFreq, SitemapUrl, render};
