use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// History of shares this tool was run against, so a share can be replayed
// without digging the URL out again. Only run metadata is stored, never the
// folder contents.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RunHistory {
    pub entries: Vec<RunEntry>,
}

// One recorded run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEntry {
    pub base_url: String,
    pub token: String,
    pub path: String,
    pub playlist: String,
    pub video_count: usize,
    pub timestamp: u64,
}

const MAX_ENTRIES: usize = 50;

impl RunHistory {
    // Load the history file, or start fresh when there is none yet.
    pub fn load() -> Result<Self> {
        let history_path = get_history_path()?;

        if !history_path.exists() {
            return Ok(RunHistory::default());
        }

        let mut file = File::open(&history_path)
            .context("failed to open history file")?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .context("failed to read history file")?;

        if contents.trim().is_empty() {
            return Ok(RunHistory::default());
        }

        serde_json::from_str(&contents).context("failed to parse history file")
    }

    pub fn save(&self) -> Result<()> {
        let history_path = get_history_path()?;

        if let Some(parent) = history_path.parent() {
            fs::create_dir_all(parent)
                .context("failed to create history directory")?;
        }

        let json = serde_json::to_string_pretty(self)
            .context("failed to serialize history")?;

        let mut file = File::create(&history_path)
            .context("failed to open history file for writing")?;

        file.write_all(json.as_bytes())
            .context("failed to write history file")?;

        Ok(())
    }

    // Add a run, replacing any earlier run of the same share and subfolder.
    // Oldest entries fall off past the cap. Does not save; the caller
    // decides when to persist.
    pub fn record(&mut self, entry: RunEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| {
            e.base_url == entry.base_url && e.token == entry.token && e.path == entry.path
        }) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }

        if self.entries.len() > MAX_ENTRIES {
            self.entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            self.entries.truncate(MAX_ENTRIES);
        }
    }

    pub fn latest(&self) -> Option<&RunEntry> {
        self.entries.iter().max_by_key(|entry| entry.timestamp)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }
}

fn get_history_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .context("could not determine the config directory")?;

    path.push("nextlist");
    path.push("history.json");

    Ok(path)
}

pub fn get_current_timestamp() -> Result<u64> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("failed to read system time")?;

    Ok(since_epoch.as_secs())
}
