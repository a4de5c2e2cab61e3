use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;

mod debug;
mod error;
mod extractor;
mod fetcher;
mod history;
mod link;
mod player;
mod playlist;
mod share;
mod ui;

use error::Error;
use history::{RunEntry, RunHistory};
use share::ShareReference;

const DEFAULT_PLAYLIST: &str = "nextcloud_playlist.m3u";

#[derive(Parser)]
#[command(name = "nextlist", version, about = "Create M3U playlists from Nextcloud shared folders")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Nextcloud share URL
    url: Option<String>,

    /// Subfolder inside the share (e.g. "Season 1")
    #[arg(short, long)]
    path: Option<String>,

    /// Playlist file to write
    #[arg(short, long)]
    output: Option<String>,

    /// Read the share page HTML from a file instead of fetching it ("-" for stdin)
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Open the playlist in a media player when done
    #[arg(long)]
    play: bool,

    /// Prefer VLC over mpv for playback
    #[arg(short, long)]
    vlc: bool,

    /// Reuse the most recent share from history
    #[arg(short = 'c', long)]
    continue_last: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recently used shares
    History,

    /// Delete the share history
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::History) => return show_history(),
        Some(Commands::Clear) => return clear_history(),
        None => {}
    }

    // Work out which share we are looking at.
    let reference = resolve_share(&cli)?;
    println!("Share token: {}", reference.token);
    println!("Base URL: {}", reference.base_url);

    // Get the listing page HTML, from the network or from a saved file.
    let html = match &cli.html_file {
        Some(html_file) => fetcher::read_html_from(html_file)?,
        None => fetcher::fetch_share_page(&reference).await.context(
            "could not fetch the share page (save it in a browser and pass --html-file)",
        )?,
    };

    match debug::save_html(&html) {
        Ok(saved) => log::debug!("page HTML saved to {}", saved.display()),
        Err(err) => warn!("could not save page HTML: {err:#}"),
    }

    // Find the videos, falling back to manual entry on an empty page.
    let video_files = gather_video_files(&html)?;
    println!("Found {} video file(s):", video_files.len());
    ui::display_file_list(&video_files);

    match debug::save_file_list(&video_files) {
        Ok(saved) => log::debug!("file list saved to {}", saved.display()),
        Err(err) => warn!("could not save file list: {err:#}"),
    }

    // Write the playlist.
    let output = resolve_output_name(&cli)?;
    let destination = PathBuf::from(&output);
    playlist::write_playlist(&destination, &video_files, |filename| {
        link::direct_link(&reference, filename)
    })
    .with_context(|| format!("failed to write playlist {output}"))?;

    println!("Playlist created: {output} ({} videos)", video_files.len());

    if let Err(err) = record_run(&reference, &output, video_files.len()) {
        warn!("could not update history: {err:#}");
    }

    print_player_notes(&reference);

    if cli.play {
        player::open_playlist(&destination, cli.vlc)?;
    }

    Ok(())
}

// Resolve the share from history, a CLI argument or a prompt. When the URL
// has no recognizable token the user can type one; an empty token is never
// used silently.
fn resolve_share(cli: &Cli) -> Result<ShareReference> {
    if cli.continue_last {
        let history = RunHistory::load()?;
        if let Some(last) = history.latest() {
            let location = if last.path.is_empty() { "share root" } else { last.path.as_str() };
            println!("Continuing with {} ({})", last.base_url, location);
            return Ok(ShareReference::new(
                last.base_url.clone(),
                last.token.clone(),
                last.path.clone(),
            ));
        }
        println!("History is empty, asking for a share URL instead.");
    }

    let share_url = match &cli.url {
        Some(url) => url.clone(),
        None => ui::prompt_input("Nextcloud share URL")?,
    };

    let mut reference = match share::resolve(&share_url) {
        Ok(reference) => reference,
        Err(Error::TokenNotFound) => {
            println!("Could not find a share token in that URL.");
            let token = ui::prompt_input("Share token")?;
            ShareReference::new(share::base_url_of(&share_url)?, token, String::new())
        }
        Err(err) => return Err(err.into()),
    };

    reference.path = match &cli.path {
        Some(path) => path.clone(),
        None => ui::prompt_optional("Subfolder inside the share (empty for the root)")?,
    };

    Ok(reference)
}

// Extract video files from the page, offering manual entry when the page
// yields nothing. Still nothing afterwards ends the run.
fn gather_video_files(html: &str) -> Result<Vec<String>> {
    let mut video_files = extractor::extract_video_files(html);

    if video_files.is_empty() {
        println!("No video files found in the page.");
        if ui::confirm("Enter the file list manually?", true)? {
            video_files = ui::prompt_manual_files()?;
        }
    }

    if video_files.is_empty() {
        return Err(Error::NoVideosFound.into());
    }

    Ok(video_files)
}

fn resolve_output_name(cli: &Cli) -> Result<String> {
    let mut output = match &cli.output {
        Some(output) => output.clone(),
        None => ui::prompt_with_default("Playlist filename", DEFAULT_PLAYLIST)?,
    };

    if output.trim().is_empty() {
        output = DEFAULT_PLAYLIST.to_string();
    } else if !output.to_lowercase().ends_with(".m3u") {
        output.push_str(".m3u");
        println!("Using playlist filename {output}");
    }

    Ok(output)
}

fn record_run(reference: &ShareReference, output: &str, video_count: usize) -> Result<()> {
    let mut history = RunHistory::load()?;
    history.record(RunEntry {
        base_url: reference.base_url.clone(),
        token: reference.token.clone(),
        path: reference.path.clone(),
        playlist: output.to_string(),
        video_count,
        timestamp: history::get_current_timestamp()?,
    });
    history.save()
}

fn print_player_notes(reference: &ShareReference) {
    println!();
    println!("Done! The playlist can be opened in VLC or mpv.");
    println!("If the player asks for credentials:");
    println!("  Username: {}", reference.token);
    println!("  Password: the share password, if the share has one");
}

fn show_history() -> Result<()> {
    let history = RunHistory::load()?;

    if history.entries.is_empty() {
        println!("No shares in history yet.");
        return Ok(());
    }

    let mut entries = history.entries.clone();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    for entry in &entries {
        let location = if entry.path.is_empty() {
            String::new()
        } else {
            format!(" /{}", entry.path)
        };
        println!(
            "{}/s/{}{} -> {} ({} videos)",
            entry.base_url, entry.token, location, entry.playlist, entry.video_count
        );
    }

    Ok(())
}

fn clear_history() -> Result<()> {
    let mut history = RunHistory::load()?;
    history.clear()?;
    println!("History cleared.");
    Ok(())
}
