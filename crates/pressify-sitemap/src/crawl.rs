//! URL collection by crawling the content gateway.
//!
//! Posts are enumerated exhaustively: the crawl pages through the listing
//! until the CMS reports no further page or returns a short page. Any fetch
//! failure aborts the crawl rather than emitting a partial sitemap.

use pressify_core::Config;
use pressify_gateway::{ContentGateway, PostFilter};
use thiserror::Error;
use tracing::{debug, info};

use crate::xml::{ChangeFreq, SitemapUrl, render};

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A gateway fetch failed mid-crawl.
    #[error("sitemap crawl failed: {0}")]
    Gateway(#[from] pressify_gateway::GatewayError),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Collects every published URL of the site through the gateway.
#[derive(Debug)]
pub struct SitemapBuilder<'a> {
    gateway: &'a ContentGateway,
    config: &'a Config,
}

impl<'a> SitemapBuilder<'a> {
    /// Create a builder over a gateway and the site configuration.
    #[must_use]
    pub fn new(gateway: &'a ContentGateway, config: &'a Config) -> Self {
        Self { gateway, config }
    }

    /// Collect all site URLs, deduplicated, in discovery order.
    pub async fn collect(&self) -> Result<Vec<SitemapUrl>> {
        let mut urls = Vec::new();

        for path in &self.config.sitemap.static_paths {
            urls.push(SitemapUrl {
                loc: self.config.url_for(path),
                lastmod: None,
                changefreq: Some(ChangeFreq::Daily),
                priority: Some(0.8),
            });
        }

        for page in self.gateway.pages().await? {
            urls.push(SitemapUrl {
                loc: self.config.url_for(&page.path()),
                lastmod: Some(page.modified),
                changefreq: Some(ChangeFreq::Weekly),
                priority: Some(0.7),
            });
        }

        for post in self.all_posts().await? {
            urls.push(post);
        }

        for category in self.gateway.categories().await? {
            urls.push(SitemapUrl {
                loc: self.config.url_for(&category.path()),
                lastmod: None,
                changefreq: Some(ChangeFreq::Weekly),
                priority: Some(0.6),
            });
        }

        for tag in self.gateway.tags().await? {
            urls.push(SitemapUrl {
                loc: self.config.url_for(&tag.path()),
                lastmod: None,
                changefreq: Some(ChangeFreq::Weekly),
                priority: Some(0.6),
            });
        }

        let urls = dedupe(urls);
        info!(count = urls.len(), "collected sitemap URLs");
        Ok(urls)
    }

    /// Render the collected URLs as sitemap XML.
    pub async fn generate(&self) -> Result<String> {
        let urls = self.collect().await?;
        Ok(render(&urls))
    }

    /// Page through the post listing until the CMS runs out of posts.
    async fn all_posts(&self) -> Result<Vec<SitemapUrl>> {
        let per_page = self.config.sitemap.page_size;
        let mut urls = Vec::new();
        let mut page = 1;

        loop {
            let listing = self
                .gateway
                .posts(&PostFilter {
                    page,
                    per_page,
                    ..PostFilter::default()
                })
                .await?;

            debug!(page, fetched = listing.posts.len(), "sitemap crawl page");

            let fetched = listing.posts.len();
            for post in listing.posts {
                urls.push(SitemapUrl {
                    loc: self.config.url_for(&post.path()),
                    lastmod: Some(post.modified),
                    changefreq: Some(ChangeFreq::Weekly),
                    priority: Some(0.9),
                });
            }

            // A short page means the sequence is exhausted even when the CMS
            // omits pageInfo.
            if fetched < per_page || !listing.has_next_page {
                break;
            }
            page += 1;
        }

        Ok(urls)
    }
}

/// Drop duplicate locations, keeping the first entry but upgrading its
/// lastmod when a later duplicate is newer.
fn dedupe(urls: Vec<SitemapUrl>) -> Vec<SitemapUrl> {
    let mut out: Vec<SitemapUrl> = Vec::with_capacity(urls.len());
    let mut index = std::collections::HashMap::new();

    for url in urls {
        match index.get(&url.loc) {
            None => {
                index.insert(url.loc.clone(), out.len());
                out.push(url);
            }
            Some(&i) => {
                let existing: &mut SitemapUrl = &mut out[i];
                if let Some(newer) = url.lastmod
                    && existing.lastmod.is_none_or(|current| newer > current)
                {
                    existing.lastmod = Some(newer);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(loc: &str, lastmod: Option<&str>) -> SitemapUrl {
        SitemapUrl {
            loc: loc.to_string(),
            lastmod: lastmod.map(|d| d.parse().expect("parse date")),
            changefreq: None,
            priority: None,
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_order() {
        let urls = vec![
            entry("https://example.com/a", None),
            entry("https://example.com/b", None),
            entry("https://example.com/a", None),
        ];

        let deduped = dedupe(urls);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].loc, "https://example.com/a");
        assert_eq!(deduped[1].loc, "https://example.com/b");
    }

    #[test]
    fn test_dedupe_keeps_newest_lastmod() {
        let urls = vec![
            entry("https://example.com/a", Some("2024-01-01T00:00:00")),
            entry("https://example.com/a", Some("2024-06-01T00:00:00")),
            entry("https://example.com/a", Some("2024-03-01T00:00:00")),
        ];

        let deduped = dedupe(urls);

        assert_eq!(deduped.len(), 1);
        assert_eq!(
            deduped[0].lastmod,
            Some("2024-06-01T00:00:00".parse().expect("parse date"))
        );
    }

    #[test]
    fn test_dedupe_fills_missing_lastmod() {
        let urls = vec![
            entry("https://example.com/a", None),
            entry("https://example.com/a", Some("2024-06-01T00:00:00")),
        ];

        let deduped = dedupe(urls);

        assert_eq!(
            deduped[0].lastmod,
            Some("2024-06-01T00:00:00".parse().expect("parse date"))
        );
    }
}
