use anyhow::{Context, Result};

/// Open a URL in the user's default browser
///
/// # Arguments
/// * `url` - The URL to open (a phone's price link)
///
/// # Errors
/// Returns error if the URL is not http(s) or the browser cannot be opened
pub fn open_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("Refusing to open non-web URL: {}", url);
    }
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
