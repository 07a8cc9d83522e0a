//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: loaded config plus a client and a runtime to drive it
//! - Output helpers: `print_success`, `print_error`, `print_warning`, `print_info`

use crate::api::ApiClient;
use crate::config::Config;
use anyhow::{Context, Result};
use std::future::Future;
use tokio::runtime::Runtime;

/// Shared context for CLI commands.
pub struct CliContext {
    pub config: Config,
    pub client: ApiClient,
    runtime: Runtime,
}

impl CliContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::with_timeout(config.api_base_url.clone(), config.request_timeout())
            .context("Failed to build HTTP client")?;
        let runtime = Runtime::new().context("Failed to start async runtime")?;
        Ok(Self {
            config,
            client,
            runtime,
        })
    }

    /// Run a client call to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
