//! Pressify CLI Library
//!
//! Operational tooling around the Pressify content gateway: configuration
//! checks, listing and lookup commands, sitemap generation, content seeding
//! and the read-only JSON server.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, list, show, sitemap, seed)
//! - [`server`] - Read-only JSON server over the content gateway

pub mod cmd;
pub mod server;

// Re-export the central types for convenience
pub use pressify_core::Config;
pub use pressify_gateway::{ContentGateway, PostFilter, PostPage};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
