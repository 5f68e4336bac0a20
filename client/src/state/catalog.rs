//! Session list helpers for the history panel: search, tags, relative time.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::BTreeSet;

use crate::state::session::Session;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// History panel filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Case-insensitive substring over prompt and name.
    pub query: String,
    /// Only sessions carrying this tag.
    pub tag: Option<String>,
}

impl SessionFilter {
    #[must_use]
    pub fn matches(&self, session: &Session) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_ok = query.is_empty()
            || session.prompt.to_lowercase().contains(&query)
            || session.name.as_deref().is_some_and(|name| name.to_lowercase().contains(&query));
        let tag_ok = self.tag.as_ref().is_none_or(|tag| session.tags.contains(tag));
        text_ok && tag_ok
    }
}

/// Sessions passing `filter`, newest first, paired with their list index.
#[must_use]
pub fn filter_sessions<'a>(sessions: &'a [Session], filter: &SessionFilter) -> Vec<(usize, &'a Session)> {
    sessions.iter().enumerate().rev().filter(|(_, s)| filter.matches(s)).collect()
}

/// Every tag used by any session, sorted.
#[must_use]
pub fn all_tags(sessions: &[Session]) -> BTreeSet<String> {
    sessions.iter().flat_map(|s| s.tags.iter().cloned()).collect()
}

/// Parse a comma-separated tag field: trimmed, non-empty, deduplicated.
#[must_use]
pub fn parse_tags(input: &str) -> BTreeSet<String> {
    input.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned).collect()
}

/// Inverse of [`parse_tags`] for pre-filling the edit field.
#[must_use]
pub fn format_tags(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Short "time ago" label.
#[must_use]
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let elapsed = (now_ms - timestamp_ms).max(0);
    if elapsed < MINUTE_MS {
        "Just now".to_owned()
    } else if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h ago", elapsed / HOUR_MS)
    } else {
        format!("{}d ago", elapsed / DAY_MS)
    }
}
