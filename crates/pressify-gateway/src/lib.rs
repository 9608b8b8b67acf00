//! Pressify Content Gateway
//!
//! Typed read access to a headless WordPress CMS over its GraphQL API:
//! query construction, page-number-to-cursor pagination, credential headers
//! and response shaping into the core content types.
//!
//! # Example
//!
//! ```no_run
//! use pressify_core::Config;
//! use pressify_gateway::{ContentGateway, PostFilter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_with_env(std::path::Path::new("config.toml"))?;
//! let gateway = ContentGateway::new(&config)?;
//!
//! let page = gateway.posts(&PostFilter::default()).await?;
//! for post in &page.posts {
//!     println!("{} {}", post.date, post.slug);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod gateway;
pub mod memo;
pub mod pagination;
pub mod query;
mod wire;

pub use client::GraphqlClient;
pub use error::{GatewayError, Result};
pub use gateway::ContentGateway;
pub use memo::MemoCache;
pub use pagination::{DEFAULT_PAGE_SIZE, PostFilter, PostPage, page_cursor};
