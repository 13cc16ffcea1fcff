use anyhow::{Context, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("smartbuy/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for recommendation requests
pub fn create_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}
