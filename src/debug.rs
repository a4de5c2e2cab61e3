use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

// Debug artifacts: the raw page HTML and the resolved file list, written
// verbatim so extraction problems can be inspected after the fact. Both are
// disposable, hence the cache dir rather than the config dir.

fn debug_dir() -> Result<PathBuf> {
    let mut dir = dirs::cache_dir().context("could not determine the cache directory")?;
    dir.push("nextlist");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create debug directory {}", dir.display()))?;
    Ok(dir)
}

/// Persist the fetched page HTML as-is.
pub fn save_html(html: &str) -> Result<PathBuf> {
    let path = debug_dir()?.join("last_page.html");
    fs::write(&path, html)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Persist the extracted file list, numbered, with a count up top.
pub fn save_file_list(files: &[String]) -> Result<PathBuf> {
    let path = debug_dir()?.join("found_files.txt");

    let mut content = format!("Found video files: {}\n\n", files.len());
    for (i, filename) in files.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", i + 1, filename));
    }

    fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
