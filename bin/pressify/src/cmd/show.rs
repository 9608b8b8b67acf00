//! Show command - fetch one post or page by slug

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use pressify_core::Config;
use pressify_gateway::ContentGateway;

/// Content kind addressable by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Post,
    Page,
}

/// Run the show command.
///
/// A missing slug is a confirmed absence and exits nonzero with a message;
/// a fetch failure propagates as an error.
pub async fn run(config_path: &Path, slug: &str, kind: Kind, json: bool) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    let gateway = ContentGateway::new(&config)?;

    match kind {
        Kind::Post => match gateway.post_by_slug(slug).await? {
            Some(post) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&post)?);
                } else {
                    println!("{}", post.title);
                    println!("  slug:       {}", post.slug);
                    println!("  id:         {}", post.database_id);
                    println!("  published:  {}", post.date.format("%Y-%m-%d %H:%M"));
                    println!("  modified:   {}", post.modified.format("%Y-%m-%d %H:%M"));
                    if let Some(author) = &post.author {
                        println!("  author:     {}", author.name);
                    }
                    if !post.categories.is_empty() {
                        let slugs: Vec<&str> =
                            post.categories.iter().map(|c| c.slug.as_str()).collect();
                        println!("  categories: {}", slugs.join(", "));
                    }
                    if !post.tags.is_empty() {
                        let slugs: Vec<&str> = post.tags.iter().map(|t| t.slug.as_str()).collect();
                        println!("  tags:       {}", slugs.join(", "));
                    }
                }
            }
            None => bail!("no published post with slug \"{slug}\""),
        },
        Kind::Page => match gateway.page_by_slug(slug).await? {
            Some(page) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&page)?);
                } else {
                    println!("{}", page.title);
                    println!("  slug:      {}", page.slug);
                    println!("  id:        {}", page.database_id);
                    println!("  modified:  {}", page.modified.format("%Y-%m-%d %H:%M"));
                }
            }
            None => bail!("no published page with slug \"{slug}\""),
        },
    }

    Ok(())
}
