//! Value types produced by a scan.
//!
//! Unlike the identifiers in [`crate::identifiers`], these carry the counts
//! that the report sorts and filters on.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Number of messages in a channel or conversation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MessageCount(usize);

impl MessageCount {
    /// Creates a [`MessageCount`] from a raw integer.
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for MessageCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for MessageCount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for MessageCount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for MessageCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, c| acc + c)
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// A single text channel inside a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name from `channel.json`, or the directory name when absent.
    pub name: String,
    /// Messages exported for this channel.
    pub message_count: MessageCount,
}

/// One entry of the report: either a private conversation or a whole guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversation {
    /// A direct message or group DM.
    Direct {
        /// Name from `messages/index.json`, or `Conversation <channel id>`.
        name: String,
        /// Messages exported for the conversation.
        message_count: MessageCount,
    },
    /// A guild, aggregating every exported channel that belongs to it.
    Guild {
        /// Name from `servers/index.json`, or `Guild <guild id>`.
        name: String,
        /// Sum of `channels[*].message_count`.
        message_count: MessageCount,
        /// Channels in scan order.
        channels: Vec<Channel>,
    },
}

impl Conversation {
    /// Total messages in this conversation.
    pub fn message_count(&self) -> MessageCount {
        match self {
            Conversation::Direct { message_count, .. }
            | Conversation::Guild { message_count, .. } => *message_count,
        }
    }

    /// Display name of this conversation.
    pub fn name(&self) -> &str {
        match self {
            Conversation::Direct { name, .. } | Conversation::Guild { name, .. } => name,
        }
    }

    /// Which filter bucket this conversation falls into.
    pub fn kind(&self) -> ConversationKind {
        match self {
            Conversation::Direct { .. } => ConversationKind::Dm,
            Conversation::Guild { .. } => ConversationKind::Guild,
        }
    }
}

/// Conversation type filter accepted on the command line and in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    /// Direct messages and group DMs.
    Dm,
    /// Guild (server) channels.
    Guild,
}

impl ConversationKind {
    /// The lowercase name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationKind::Dm => "dm",
            ConversationKind::Guild => "guild",
        }
    }
}

impl std::fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
