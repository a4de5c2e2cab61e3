use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use indicatif::ProgressBar;
use log::{debug, warn};
use reqwest::Client;

use crate::share::ShareReference;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetch the share's listing page HTML.
///
/// One GET against the share page; if that fails (network error or non-2xx),
/// one more against the index.php route some installs still need. Nothing
/// beyond that single fallback. The caller gets the complete body or an
/// error, never a partial page.
pub async fn fetch_share_page(reference: &ShareReference) -> Result<String> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading {}", reference.share_page_url()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let page = match get_page(&client, &reference.share_page_url()).await {
        Ok(html) => Ok(html),
        Err(err) => {
            warn!("share page request failed, trying index.php route: {err:#}");
            spinner.set_message("Retrying via index.php route");
            get_page(&client, &reference.fallback_page_url()).await
        }
    };

    spinner.finish_and_clear();
    page
}

async fn get_page(client: &Client, url: &str) -> Result<String> {
    debug!("GET {url}");
    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(anyhow!("request failed: HTTP {} for {}", resp.status(), url));
    }

    let body = resp.text().await?;
    debug!("received {} bytes from {url}", body.len());
    Ok(body)
}

/// Read previously saved page HTML from a file, or from stdin when the path
/// is `-`. Covers shares whose listing only renders in a real browser: save
/// the page there, point --html-file at it.
pub fn read_html_from(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("failed to read HTML from stdin")?;
        return Ok(html);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read HTML from {}", path.display()))
}
