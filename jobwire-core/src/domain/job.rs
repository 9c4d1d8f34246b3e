//! Job domain types

use serde::{Deserialize, Serialize};

/// How many characters of the description survive into the announcement.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// One job listing as announced into chat
///
/// Transient; exists only within a single fetch cycle. The `location`
/// field holds a single token: the innermost element of the API's
/// hierarchical area list (see the DTO conversion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
}

impl JobRecord {
    /// Truncated description shown in the announcement.
    ///
    /// Counts characters rather than bytes so multi-byte text never splits
    /// a code point. The ellipsis is appended even when nothing was
    /// trimmed; that matches the announcement format readers already see.
    pub fn description_preview(&self) -> String {
        let mut preview: String = self
            .description
            .chars()
            .take(DESCRIPTION_PREVIEW_CHARS)
            .collect();
        preview.push_str("...");
        preview
    }

    /// Render the fixed announcement block for this listing.
    pub fn render(&self) -> String {
        format!(
            "**{}** at **{}**\n📍 {}\n{}\n[Apply here]({})\n",
            self.title,
            self.company,
            self.location,
            self.description_preview(),
            self.url
        )
    }
}
