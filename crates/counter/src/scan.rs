//! Walking channel directories into conversations.
//!
//! Each directory under `messages/` is one channel. A channel counts only when
//! it has both a `channel.json` and a `messages.json`; anything else in the
//! folder (the `index.json`, stray files, half-exported channels) is ignored.
//!
//! Guild channels are grouped by guild id into a single
//! [`Conversation::Guild`]; every other channel becomes a
//! [`Conversation::Direct`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::mappings::read_json;
use crate::{
    Channel, ChannelId, Conversation, CounterError, DataRoot, GuildId, MessageCount,
    NameMappings,
};

const MESSAGES_FILE: &str = "messages.json";
const CHANNEL_FILE: &str = "channel.json";

// ---------------------------------------------------------------------------
// Progress port
// ---------------------------------------------------------------------------

/// Receives progress notifications while a scan runs.
///
/// The CLI implements this with a terminal spinner; library callers and tests
/// use [`NoProgress`].
pub trait ScanProgress {
    /// Called after each channel has been counted.
    fn channel_scanned(&self, _channel: &ChannelId, _messages: MessageCount) {}

    /// Called once the scan has visited every channel directory.
    fn finished(&self) {}
}

/// A [`ScanProgress`] that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ScanProgress for NoProgress {}

// ---------------------------------------------------------------------------
// Scan results
// ---------------------------------------------------------------------------

/// Everything a scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Direct conversations in directory order, then guilds ordered by id.
    pub conversations: Vec<Conversation>,
    /// Channels that were counted.
    pub channels: usize,
    /// Channel directories skipped because their JSON could not be read.
    pub skipped: usize,
}

impl Scan {
    /// Total messages across all conversations.
    pub fn total_messages(&self) -> MessageCount {
        self.conversations.iter().map(Conversation::message_count).sum()
    }
}

#[derive(Debug)]
struct GuildTally {
    name: String,
    message_count: MessageCount,
    channels: Vec<Channel>,
}

enum ChannelOwner {
    Direct,
    Guild(GuildId),
}

struct CountedChannel {
    owner: ChannelOwner,
    name: Option<String>,
    messages: MessageCount,
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Counts the messages of every channel under `root`'s `messages/` folder.
///
/// # Errors
///
/// - [`CounterError::MissingMessagesFolder`] if `messages/` does not exist.
/// - [`CounterError::Io`] if the folder cannot be listed.
///
/// Unreadable or malformed channel files, and channel directories whose name
/// is not valid UTF-8, do not fail the scan; the channel is skipped with a
/// warning and counted in [`Scan::skipped`].
#[instrument(level = "info", skip_all, fields(root = %root.path().display()))]
pub fn scan_conversations(
    root: &DataRoot,
    mappings: &NameMappings,
    progress: &dyn ScanProgress,
) -> Result<Scan, CounterError> {
    let messages_dir = root.messages_dir();
    if !messages_dir.is_dir() {
        return Err(CounterError::MissingMessagesFolder(root.path().to_path_buf()));
    }

    let mut scan = Scan::default();
    let mut guilds: BTreeMap<GuildId, GuildTally> = BTreeMap::new();

    for dir in channel_directories(&messages_dir)? {
        let messages_file = dir.join(MESSAGES_FILE);
        let channel_file = dir.join(CHANNEL_FILE);
        if !(messages_file.is_file() && channel_file.is_file()) {
            debug!(dir = %dir.display(), "no channel export, skipping directory");
            continue;
        }
        let channel_id = match channel_id_from_path(&dir) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "skipping channel");
                scan.skipped += 1;
                continue;
            }
        };

        let counted = match count_channel(&channel_file, &messages_file) {
            Ok(counted) => counted,
            Err(e) => {
                warn!(channel = %channel_id, error = %e, "skipping unreadable channel");
                scan.skipped += 1;
                continue;
            }
        };
        debug!(channel = %channel_id, messages = %counted.messages, "counted channel");
        scan.channels += 1;
        progress.channel_scanned(&channel_id, counted.messages);

        match counted.owner {
            ChannelOwner::Guild(guild_id) => {
                let tally = guilds.entry(guild_id).or_insert_with_key(|id| GuildTally {
                    name: mappings
                        .guild_name(id)
                        .map_or_else(|| format!("Guild {id}"), str::to_string),
                    message_count: MessageCount::default(),
                    channels: Vec::new(),
                });
                tally.message_count += counted.messages;
                tally.channels.push(Channel {
                    name: counted.name.unwrap_or_else(|| channel_id.to_string()),
                    message_count: counted.messages,
                });
            }
            ChannelOwner::Direct => {
                let name = mappings
                    .channel_name(&channel_id)
                    .map_or_else(|| format!("Conversation {channel_id}"), str::to_string);
                scan.conversations.push(Conversation::Direct {
                    name,
                    message_count: counted.messages,
                });
            }
        }
    }

    progress.finished();

    scan.conversations.extend(guilds.into_values().map(|g| Conversation::Guild {
        name: g.name,
        message_count: g.message_count,
        channels: g.channels,
    }));

    info!(
        conversations = scan.conversations.len(),
        channels = scan.channels,
        skipped = scan.skipped,
        messages = %scan.total_messages(),
        "scan complete"
    );
    Ok(scan)
}

/// Subdirectories of `messages/`, sorted by name so output is reproducible.
fn channel_directories(messages_dir: &Path) -> Result<Vec<PathBuf>, CounterError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(messages_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn channel_id_from_path(dir: &Path) -> Result<ChannelId, CounterError> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .and_then(ChannelId::new)
        .ok_or_else(|| CounterError::InvalidChannelDirectory(dir.to_path_buf()))
}

fn count_channel(
    channel_file: &Path,
    messages_file: &Path,
) -> Result<CountedChannel, CounterError> {
    let info: Value = read_json(channel_file)?;
    // Elements are never inspected, so skip building them.
    let messages: Vec<IgnoredAny> = read_json(messages_file)?;

    let owner = match info.get("guild") {
        Some(guild) => ChannelOwner::Guild(
            guild
                .get("id")
                .and_then(Value::as_str)
                .and_then(GuildId::new)
                .unwrap_or_else(GuildId::unknown),
        ),
        None => ChannelOwner::Direct,
    };
    let name = info.get("name").and_then(Value::as_str).map(str::to_string);

    Ok(CountedChannel {
        owner,
        name,
        messages: MessageCount::new(messages.len()),
    })
}
