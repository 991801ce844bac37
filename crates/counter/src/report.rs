//! Filtering, ordering, and rendering conversations.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::{Channel, Conversation, ConversationKind, CounterError};

/// Default for [`ReportOptions::min_messages`].
pub const DEFAULT_MIN_MESSAGES: usize = 1;

/// Which conversations to show, and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Keep at most this many conversations after sorting.
    pub limit: Option<usize>,
    /// Keep only conversations of this kind.
    pub kind: Option<ConversationKind>,
    /// Drop conversations with fewer messages than this.
    pub min_messages: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            limit: None,
            kind: None,
            min_messages: DEFAULT_MIN_MESSAGES,
        }
    }
}

/// Orders by message count descending, then by name.
fn by_count_then_name(a_count: usize, a_name: &str, b_count: usize, b_name: &str) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a_name.cmp(b_name))
}

/// Applies `options` to `conversations`: filter, sort, then truncate.
pub fn select(conversations: Vec<Conversation>, options: &ReportOptions) -> Vec<Conversation> {
    let mut selected: Vec<Conversation> = conversations
        .into_iter()
        .filter(|c| c.message_count().as_usize() >= options.min_messages)
        .filter(|c| options.kind.is_none_or(|kind| c.kind() == kind))
        .collect();

    selected.sort_by(|a, b| {
        by_count_then_name(
            a.message_count().as_usize(),
            a.name(),
            b.message_count().as_usize(),
            b.name(),
        )
    });

    if let Some(limit) = options.limit {
        selected.truncate(limit);
    }
    selected
}

/// Renders the text tree printed by the CLI.
///
/// ```text
/// Rustaceans [7 messages]
///     ├── general [5 messages]
///     └── random [2 messages]
///
/// Direct Message with alice [3 messages]
/// ```
pub fn render_tree(conversations: &[Conversation]) -> String {
    let mut out = String::new();
    for conversation in conversations {
        let _ = writeln!(
            out,
            "{} [{} messages]",
            conversation.name(),
            conversation.message_count()
        );
        if let Conversation::Guild { channels, .. } = conversation {
            let mut sorted: Vec<&Channel> = channels.iter().collect();
            sorted.sort_by(|a, b| {
                by_count_then_name(
                    a.message_count.as_usize(),
                    &a.name,
                    b.message_count.as_usize(),
                    &b.name,
                )
            });
            for (i, channel) in sorted.iter().enumerate() {
                let connector = if i + 1 == sorted.len() { "└──" } else { "├──" };
                let _ = writeln!(
                    out,
                    "    {} {} [{} messages]",
                    connector, channel.name, channel.message_count
                );
            }
            out.push('\n');
        }
    }
    out
}

/// Renders conversations as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`CounterError::Serialize`] if serialisation fails.
pub fn render_json(conversations: &[Conversation]) -> Result<String, CounterError> {
    serde_json::to_string_pretty(conversations).map_err(CounterError::Serialize)
}
