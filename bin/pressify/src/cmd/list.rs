//! List command - print a page of the post listing

use std::path::Path;

use color_eyre::eyre::Result;
use pressify_core::Config;
use pressify_gateway::{ContentGateway, PostFilter};

/// Arguments for the list command.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub page: usize,
    pub per_page: Option<usize>,
    pub categories: Vec<i64>,
    pub search: Option<String>,
    pub json: bool,
}

/// Run the list command.
pub async fn run(config_path: &Path, args: ListArgs) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    let gateway = ContentGateway::new(&config)?;

    let filter = PostFilter {
        page: args.page,
        per_page: args.per_page.unwrap_or(config.content.per_page),
        category_ids: args.categories,
        search: args.search,
    };

    let listing = gateway.posts(&filter).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.posts.is_empty() {
        println!("No posts on page {}.", filter.page);
        return Ok(());
    }

    println!(
        "{} post(s) on page {} (more pages: {})",
        listing.total,
        filter.page,
        if listing.has_next_page { "yes" } else { "no" }
    );
    println!();
    for post in &listing.posts {
        let categories: Vec<&str> = post.categories.iter().map(|c| c.slug.as_str()).collect();
        println!(
            "  {}  {:<32}  {}",
            post.date.format("%Y-%m-%d"),
            post.slug,
            if categories.is_empty() {
                String::new()
            } else {
                format!("[{}]", categories.join(", "))
            }
        );
    }

    Ok(())
}
