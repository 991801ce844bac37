//! Newtype identifiers.
//!
//! Channel directories and guilds are both keyed by Discord snowflakes stored
//! as strings. Wrapping them separately prevents looking a channel up in the
//! guild mapping (or the reverse) even though both are `String` under the hood.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a channel by its directory name under `messages/`.
    ///
    /// Recent packages prefix the snowflake with `c` (`c1234567890`); older
    /// ones use the bare number.
    ChannelId
}

string_id! {
    /// Identifies a guild by the `guild.id` field of a `channel.json`.
    GuildId
}

impl ChannelId {
    /// Returns the key used for this channel in `messages/index.json`.
    ///
    /// The index is keyed by the bare snowflake, so every leading `c` is
    /// stripped from the directory name.
    pub fn mapping_key(&self) -> &str {
        self.0.trim_start_matches('c')
    }
}

impl GuildId {
    /// Placeholder used when a `channel.json` names a guild without an id.
    pub const UNKNOWN: &'static str = "Unknown";

    /// Returns the placeholder identifier for guilds without an id.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }
}
