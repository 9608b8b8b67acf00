//! Pressify CLI
//!
//! Operational front door for a headless-CMS-backed site: check the CMS
//! connection, list and inspect content, generate the sitemap, seed sample
//! content and serve the read-only JSON API.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Pressify.
#[derive(Parser)]
#[command(
    name = "pressify",
    version,
    about = "Headless-CMS content gateway tooling"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Content kinds addressable by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ShowKind {
    /// Blog post
    Post,
    /// Static page
    Page,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration and probe the CMS connection
    Check {
        /// Skip the network probe and only validate the configuration
        #[arg(long)]
        offline: bool,
    },
    /// List published posts
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Page size (defaults to content.per_page from the configuration)
        #[arg(long)]
        per_page: Option<usize>,
        /// Restrict to a category id (repeatable)
        #[arg(long = "category")]
        categories: Vec<i64>,
        /// Free-text search string
        #[arg(short, long)]
        search: Option<String>,
        /// Print the raw listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one post or page by slug
    Show {
        /// Slug to look up
        slug: String,
        /// Content kind to look up
        #[arg(short, long, value_enum, default_value_t = ShowKind::Post)]
        kind: ShowKind,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate the sitemap XML by crawling the CMS
    Sitemap {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Insert sample content into the CMS over its REST API
    Seed {
        /// Report what would be created without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Serve the read-only JSON API
    Serve {
        /// Bind address (defaults to serve.bind from the configuration)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    pressify::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { offline } => {
            pressify::cmd::check::run(&cli.config, offline).await?;
        }
        Commands::List {
            page,
            per_page,
            categories,
            search,
            json,
        } => {
            let args = pressify::cmd::list::ListArgs {
                page,
                per_page,
                categories,
                search,
                json,
            };
            pressify::cmd::list::run(&cli.config, args).await?;
        }
        Commands::Show { slug, kind, json } => {
            let kind = match kind {
                ShowKind::Post => pressify::cmd::show::Kind::Post,
                ShowKind::Page => pressify::cmd::show::Kind::Page,
            };
            pressify::cmd::show::run(&cli.config, &slug, kind, json).await?;
        }
        Commands::Sitemap { output } => {
            pressify::cmd::sitemap::run(&cli.config, output.as_deref()).await?;
        }
        Commands::Seed { dry_run } => {
            pressify::cmd::seed::run(&cli.config, dry_run).await?;
        }
        Commands::Serve { bind } => {
            pressify::cmd::serve::run(&cli.config, bind).await?;
        }
    }

    Ok(())
}
