use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};

use crate::extractor;

// How many files to print before switching to "... and N more".
const MAX_LISTED: usize = 10;

// Ask for a required piece of text.
pub fn prompt_input(prompt: &str) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .interact()
        .context("failed to read input")?;

    Ok(input.trim().to_string())
}

// Ask for text that may be left empty (e.g. the subfolder).
pub fn prompt_optional(prompt: &str) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact()
        .context("failed to read input")?;

    Ok(input.trim().to_string())
}

// Ask for text with a prefilled default.
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact()
        .context("failed to read input")?;

    Ok(input.trim().to_string())
}

// Yes/no question.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .context("failed to read confirmation")
}

// Print a numbered file list, capped so a 400-episode share does not flood
// the terminal.
pub fn display_file_list(files: &[String]) {
    if files.is_empty() {
        return;
    }

    let pad = if files.len() < 100 { 2 } else { 3 };
    for (i, filename) in files.iter().take(MAX_LISTED).enumerate() {
        println!("  {:0pad$}. {}", i + 1, filename, pad = pad);
    }

    if files.len() > MAX_LISTED {
        println!("  ... and {} more files", files.len() - MAX_LISTED);
    }

    println!("  Total: {} video files", files.len());
}

/// Manual fallback when the page yielded nothing: the user types filenames
/// one by one, an empty line finishes. Names without a recognized video
/// extension get `.mkv` appended, the most common case on Nextcloud shares.
pub fn prompt_manual_files() -> Result<Vec<String>> {
    println!("Enter video filenames one per line, empty line to finish.");

    let mut files = Vec::new();
    loop {
        let mut filename = prompt_optional(&format!("File {}", files.len() + 1))?;
        if filename.is_empty() {
            break;
        }

        if !extractor::has_video_extension(&filename) {
            filename.push_str(".mkv");
            println!("No video extension given, using {filename}");
        }

        files.push(filename);
    }

    Ok(files)
}
