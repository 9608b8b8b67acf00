//! Check command - validate configuration and probe the CMS

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use pressify_core::Config;
use pressify_gateway::{ContentGateway, PostFilter};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and, unless `offline` is set, issues one
/// request per read operation family against the CMS.
pub async fn run(config_path: &Path, offline: bool) -> Result<()> {
    tracing::info!(?config_path, offline, "checking configuration and CMS");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref config) = config {
        check_config_values(config, &mut result);

        if offline {
            println!("\nSkipping CMS probe (--offline)");
        } else {
            println!("\nProbing CMS at {}...", config.cms.graphql_url);
            probe_cms(config, &mut result).await;
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Check failed with {} error(s)", result.errors.len());
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check configuration values for common operational issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.cms.allow_insecure_tls {
        result.add_warning(
            "cms.allow_insecure_tls is enabled; use only for non-production diagnostics",
        );
    }

    if config.cms.basic_auth_user.is_some() != config.cms.basic_auth_password.is_some() {
        result.add_warning(
            "only one of cms.basic_auth_user / cms.basic_auth_password is set; \
             requests will go out unauthenticated",
        );
    }

    if config.cms.rest_url.is_none() {
        result.add_warning("cms.rest_url is not set; the seed command will be unavailable");
    }

    println!("  ✓ Configuration values checked");
}

/// Issue one request per read operation family and report what came back.
async fn probe_cms(config: &Config, result: &mut ValidationResult) {
    let gateway = match ContentGateway::new(config) {
        Ok(g) => g,
        Err(e) => {
            result.add_error(format!("Failed to build gateway: {e}"));
            println!("  ✗ Gateway construction failed: {e}");
            return;
        }
    };

    match gateway.posts(&PostFilter::default()).await {
        Ok(page) => println!(
            "  ✓ Posts reachable ({} on first page, more: {})",
            page.total, page.has_next_page
        ),
        Err(e) => {
            result.add_error(format!("Posts listing failed: {e}"));
            println!("  ✗ Posts listing failed: {e}");
        }
    }

    match gateway.categories().await {
        Ok(categories) => println!("  ✓ Categories reachable ({})", categories.len()),
        Err(e) => {
            result.add_error(format!("Categories listing failed: {e}"));
            println!("  ✗ Categories listing failed: {e}");
        }
    }

    match gateway.tags().await {
        Ok(tags) => println!("  ✓ Tags reachable ({})", tags.len()),
        Err(e) => {
            result.add_error(format!("Tags listing failed: {e}"));
            println!("  ✗ Tags listing failed: {e}");
        }
    }

    match gateway.pages().await {
        Ok(pages) => println!("  ✓ Pages reachable ({})", pages.len()),
        Err(e) => {
            result.add_error(format!("Pages listing failed: {e}"));
            println!("  ✗ Pages listing failed: {e}");
        }
    }
}
