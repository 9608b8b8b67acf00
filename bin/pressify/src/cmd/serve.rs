//! Serve command - run the read-only JSON server

use std::path::Path;

use color_eyre::eyre::Result;
use pressify_core::Config;

use crate::server;

/// Run the serve command.
pub async fn run(config_path: &Path, bind: Option<String>) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    server::run(config, bind).await
}
