//! Display-name lookups.
//!
//! Channel directories and `channel.json` files only carry snowflakes for
//! private conversations and guilds. The package ships two indexes that map
//! those snowflakes to human-readable names:
//!
//! - `messages/index.json` — bare channel id → conversation name
//!   (e.g. `"Direct Message with alice#0001"`);
//! - `servers/index.json` — guild id → guild name.
//!
//! Either index may be absent; lookups then fall back to placeholder names.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{ChannelId, CounterError, DataRoot, GuildId};

const INDEX_FILE: &str = "index.json";

/// Name indexes loaded from a data package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMappings {
    /// Bare channel id → conversation name, if `messages/index.json` exists.
    pub channels: Option<HashMap<String, String>>,
    /// Guild id → guild name, if `servers/index.json` exists.
    pub guilds: Option<HashMap<String, String>>,
}

impl NameMappings {
    /// Looks up the conversation name for a channel directory.
    pub fn channel_name(&self, id: &ChannelId) -> Option<&str> {
        self.channels
            .as_ref()
            .and_then(|m| m.get(id.mapping_key()))
            .map(String::as_str)
    }

    /// Looks up the guild name for a guild id.
    pub fn guild_name(&self, id: &GuildId) -> Option<&str> {
        self.guilds
            .as_ref()
            .and_then(|m| m.get(id.as_str()))
            .map(String::as_str)
    }
}

/// Loads both name indexes from `root`.
///
/// # Errors
///
/// Returns [`CounterError::Json`] if an index exists but is not a JSON object
/// of string values, or [`CounterError::Io`] if it cannot be opened.
#[instrument(level = "debug", skip_all, fields(root = %root.path().display()))]
pub fn load_mappings(root: &DataRoot) -> Result<NameMappings, CounterError> {
    let channels = load_mapping(&root.messages_dir().join(INDEX_FILE))?;
    let guilds = load_mapping(&root.servers_dir().join(INDEX_FILE))?;
    debug!(
        channels = channels.as_ref().map_or(0, HashMap::len),
        guilds = guilds.as_ref().map_or(0, HashMap::len),
        "loaded name mappings"
    );
    Ok(NameMappings { channels, guilds })
}

fn load_mapping(path: &Path) -> Result<Option<HashMap<String, String>>, CounterError> {
    if path.exists() {
        read_json(path).map(Some)
    } else {
        debug!(path = %path.display(), "name index not present");
        Ok(None)
    }
}

/// Reads and deserialises a JSON file, tagging parse errors with its path.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CounterError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| CounterError::json(path, e))
}
