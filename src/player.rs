use std::path::Path;
use std::process::Command;

use anyhow::{Result, anyhow};
use log::debug;

/// Open the finished playlist in a local media player.
///
/// mpv is the default, VLC the alternative (`prefer_vlc`); whichever is
/// asked for falls back to the other. The player inherits the terminal and
/// we wait for it to exit.
pub fn open_playlist(playlist: &Path, prefer_vlc: bool) -> Result<()> {
    let order: [&str; 2] = if prefer_vlc { ["vlc", "mpv"] } else { ["mpv", "vlc"] };

    for player in order {
        let Some(binary) = find_program(player) else {
            println!("{player} not found, trying the next player...");
            continue;
        };

        debug!("launching {binary}");
        let status = match player {
            "vlc" => Command::new(&binary)
                .args(["--no-video-title-show"])
                .arg(playlist)
                .spawn()
                .and_then(|mut child| child.wait()),
            _ => Command::new(&binary)
                .arg(format!("--playlist={}", playlist.display()))
                .spawn()
                .and_then(|mut child| child.wait()),
        };

        match status {
            Ok(_) => return Ok(()),
            Err(err) => println!("Failed to run {player}: {err}"),
        }
    }

    Err(anyhow!(
        "no usable media player found, open {} manually",
        playlist.display()
    ))
}

// Locate a player binary: `which` first, then the usual install paths.
fn find_program(name: &str) -> Option<String> {
    if let Ok(output) = Command::new("which").arg(name).output() {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let path = path.trim();
                if !path.is_empty() {
                    return Some(path.to_string());
                }
            }
        }
    }

    for dir in ["/usr/bin", "/usr/local/bin", "/bin"] {
        let candidate = format!("{dir}/{name}");
        if Path::new(&candidate).exists() {
            return Some(candidate);
        }
    }

    None
}
