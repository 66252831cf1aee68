//! Argument parsing and command execution for the `audiobind` binary.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use audiobind_core::{
    apply_command, host, set_static_command, ApplyArgs, BindingEngine, CommandSource, Config,
    ItemStack, NotificationSink, PermissionOracle, CONTAINER_SIZE,
};
use audiobind_filebin::FilebinClient;
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

/// Bind uploaded sounds to music discs and goat horns stored as JSON items
#[derive(Parser, Debug)]
#[command(name = "audiobind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the download URL of an uploaded sound
    Resolve {
        /// Sound id
        sound: Uuid,
    },

    /// Download an uploaded sound to a file
    Download {
        /// Sound id
        sound: Uuid,

        /// Where to write the audio file
        out: PathBuf,
    },

    /// Bind a sound to an item, or to every slot of a shulker box
    Apply {
        /// Item JSON file, rewritten in place
        item: PathBuf,

        /// Sound id
        sound: Uuid,

        /// Audible range in blocks
        #[arg(long, value_parser = parse_range)]
        range: Option<f32>,

        /// Name shown under the item
        #[arg(long)]
        name: Option<String>,
    },

    /// Turn static playback on or off for a bound item
    SetStatic {
        /// Item JSON file, rewritten in place
        item: PathBuf,

        /// Defaults to true
        enabled: Option<bool>,
    },
}

/// Same lower bound as the in-game argument.
fn parse_range(raw: &str) -> Result<f32, String> {
    let range: f32 = raw
        .parse()
        .map_err(|e| format!("invalid range '{raw}': {e}"))?;
    if range >= 1.0 {
        Ok(range)
    } else {
        Err(format!("range must be at least 1, got {raw}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Command source for an operator editing an item file. Holds every
/// permission and collects the messages it is sent.
pub struct ConsoleSource {
    hand: ItemStack,
    pub notices: Vec<Notice>,
}

impl ConsoleSource {
    pub fn new(hand: ItemStack) -> Self {
        Self {
            hand,
            notices: Vec::new(),
        }
    }

    pub fn into_item(self) -> ItemStack {
        self.hand
    }
}

impl PermissionOracle for ConsoleSource {
    fn has_permission(&self, _node: &str) -> bool {
        true
    }
}

impl NotificationSink for ConsoleSource {
    fn send_success(&mut self, message: &str) {
        self.notices.push(Notice::Success(message.to_string()));
    }

    fn send_failure(&mut self, message: &str) {
        self.notices.push(Notice::Failure(message.to_string()));
    }
}

impl CommandSource for ConsoleSource {
    fn main_hand_mut(&mut self) -> &mut ItemStack {
        &mut self.hand
    }
}

async fn read_item(path: &Path) -> anyhow::Result<ItemStack> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let item: ItemStack = serde_json::from_str(&content)
        .with_context(|| format!("invalid item in {}", path.display()))?;

    let stored = host::stored_slot_count(&item);
    if stored > CONTAINER_SIZE {
        bail!(
            "{} holds {stored} slots, a shulker box has {CONTAINER_SIZE}",
            path.display()
        );
    }
    Ok(item)
}

async fn write_item(path: &Path, item: &ItemStack) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(item)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Run a command, returning the lines to print on success.
///
/// Item files are only rewritten when the command succeeds.
pub async fn run(command: Command, config: &Config) -> anyhow::Result<Vec<Notice>> {
    match command {
        Command::Resolve { sound } => {
            let client = FilebinClient::from_config(config)?;
            let asset = client.resolve(sound).await?;
            Ok(vec![Notice::Success(asset.url)])
        }
        Command::Download { sound, out } => {
            let client = FilebinClient::from_config(config)?;
            let (asset, data) = client.download(sound).await?;
            tokio::fs::write(&out, &data)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(url = %asset.url, out = %out.display(), bytes = data.len(), "sound saved");
            Ok(vec![Notice::Success(format!(
                "Saved {} ({} bytes) to {}",
                asset.filename,
                data.len(),
                out.display()
            ))])
        }
        Command::Apply {
            item,
            sound,
            range,
            name,
        } => {
            let mut args = ApplyArgs::new(sound);
            if let Some(range) = range {
                args = args.with_range(range);
            }
            if let Some(name) = name {
                args = args.with_custom_name(name);
            }
            let engine = BindingEngine::new(config.clone());
            let mut source = ConsoleSource::new(read_item(&item).await?);
            let result = apply_command(&mut source, &engine, &args);
            finish(source, result.map(|_| ()), &item).await
        }
        Command::SetStatic { item, enabled } => {
            let engine = BindingEngine::new(config.clone());
            let mut source = ConsoleSource::new(read_item(&item).await?);
            let result = set_static_command(&mut source, &engine, enabled);
            finish(source, result.map(|_| ()), &item).await
        }
    }
}

async fn finish(
    source: ConsoleSource,
    result: Result<(), audiobind_core::BindError>,
    path: &Path,
) -> anyhow::Result<Vec<Notice>> {
    let notices = source.notices.clone();
    match result {
        Ok(()) => {
            write_item(path, &source.into_item()).await?;
            Ok(notices)
        }
        Err(e) => {
            let message = notices
                .iter()
                .find_map(|n| match n {
                    Notice::Failure(m) => Some(m.clone()),
                    Notice::Success(_) => None,
                })
                .unwrap_or_else(|| e.to_string());
            Err(anyhow::Error::new(e).context(message))
        }
    }
}
