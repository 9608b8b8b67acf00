//! Sitemap command - crawl the CMS and emit sitemap XML

use std::path::Path;

use color_eyre::eyre::Result;
use pressify_core::Config;
use pressify_gateway::ContentGateway;
use pressify_sitemap::SitemapBuilder;

/// Run the sitemap command, writing to `output` or stdout.
pub async fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    let gateway = ContentGateway::new(&config)?;

    let builder = SitemapBuilder::new(&gateway, &config);
    let urls = builder.collect().await?;
    let xml = pressify_sitemap::render(&urls);

    match output {
        Some(path) => {
            std::fs::write(path, &xml)?;
            println!("Wrote sitemap with {} URL(s) to {}", urls.len(), path.display());
        }
        None => print!("{xml}"),
    }

    Ok(())
}
