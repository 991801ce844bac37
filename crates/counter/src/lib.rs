//! Domain library for counting messages in a Discord data package.
//!
//! A data package is the folder (or ZIP archive) Discord hands out on a
//! personal data request. Its `messages/` folder holds one directory per
//! channel, each containing a `channel.json` description and a
//! `messages.json` array. This crate turns that layout into ranked
//! [`Conversation`] summaries.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** Filesystem access is limited to
//! reading the data package. Terminal concerns (spinners, colours, argument
//! parsing) belong to the `cli` crate, which plugs into [`ScanProgress`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ChannelId`, `GuildId`) |
//! | [`types`] | Value types (`MessageCount`, `Channel`, `Conversation`) |
//! | [`errors`] | The crate error type |
//! | [`data_root`] | Locating (and optionally extracting) the package root |
//! | [`mappings`] | Display-name lookups from the `index.json` files |
//! | [`scan`] | Walking channel directories into conversations |
//! | [`report`] | Filtering, ordering, and rendering conversations |
//!
//! ## Features
//!
//! - `zip` — accept a `.zip` data package; it is extracted into a temporary
//!   directory that lives as long as the returned [`DataRoot`].

pub mod data_root;
pub mod errors;
pub mod identifiers;
pub mod mappings;
pub mod report;
pub mod scan;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by the CLI.
pub use data_root::{prepare_data_root, DataRoot};
pub use errors::CounterError;
pub use identifiers::{ChannelId, GuildId};
pub use mappings::{load_mappings, NameMappings};
pub use report::{render_json, render_tree, select, ReportOptions};
pub use scan::{scan_conversations, NoProgress, Scan, ScanProgress};
pub use types::{Channel, Conversation, ConversationKind, MessageCount};
