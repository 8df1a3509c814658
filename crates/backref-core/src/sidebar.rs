//! Sidebar render model
//!
//! What the editor panel shows: a count-sensitive heading and one row per
//! linking entry with a deep link into the web app.

use crate::error::BackrefResult;
use crate::host::Host;
use crate::incoming::LinkItem;
use crate::session::Backref;
use serde::Serialize;
use std::fmt;

/// Deep link to an entry in the web app
#[must_use]
pub fn entry_href(base_url: &str, space_id: &str, entry_id: &str) -> String {
    format!(
        "{}/spaces/{space_id}/entries/{entry_id}",
        base_url.trim_end_matches('/')
    )
}

/// Heading for `count` incoming links
#[must_use]
pub fn incoming_links_message(count: usize) -> String {
    match count {
        0 => "No other entries link to this entry.".to_owned(),
        1 => "There is one other entry that links to this entry:".to_owned(),
        n => format!("There are {n} other entries that link to this entry:"),
    }
}

/// Row of the incoming-links list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarRow {
    /// Linking entry id
    pub id: String,
    /// Title shown as link text
    pub title: String,
    /// Deep link to the entry
    pub href: String,
}

/// Incoming-links panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarModel {
    rows: Vec<SidebarRow>,
}

impl SidebarModel {
    /// Build rows from list items
    #[must_use]
    pub fn new(items: Vec<LinkItem>, base_url: &str) -> Self {
        let rows = items
            .into_iter()
            .map(|item| SidebarRow {
                href: entry_href(base_url, &item.space, &item.id),
                id: item.id,
                title: item.title,
            })
            .collect();
        Self { rows }
    }

    /// Heading text
    #[must_use]
    pub fn message(&self) -> String {
        incoming_links_message(self.rows.len())
    }

    /// Rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no entry links here
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop the row for `entry_id`, returning it
    pub fn remove_row(&mut self, entry_id: &str) -> Option<SidebarRow> {
        let idx = self.rows.iter().position(|row| row.id == entry_id)?;
        Some(self.rows.remove(idx))
    }
}

impl fmt::Display for SidebarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message())?;
        for row in &self.rows {
            writeln!(f, "  {} <{}>", row.title, row.href)?;
        }
        Ok(())
    }
}

impl<H: Host> Backref<H> {
    /// Sidebar for the current entry
    pub async fn sidebar(&self) -> BackrefResult<SidebarModel> {
        let items = self.incoming_link_items().await?;
        Ok(SidebarModel::new(items, &self.config.app_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<LinkItem> {
        (0..n)
            .map(|i| LinkItem {
                id: format!("e{i}"),
                title: format!("Entry {i}"),
                space: "sp".into(),
            })
            .collect()
    }

    #[test]
    fn message_boundaries() {
        assert_eq!(incoming_links_message(0), "No other entries link to this entry.");
        assert_eq!(
            incoming_links_message(1),
            "There is one other entry that links to this entry:"
        );
        assert_eq!(
            incoming_links_message(2),
            "There are 2 other entries that link to this entry:"
        );
        assert_eq!(
            incoming_links_message(17),
            "There are 17 other entries that link to this entry:"
        );
    }

    #[test]
    fn href_format() {
        assert_eq!(
            entry_href("https://app.contentful.com/", "sp", "e1"),
            "https://app.contentful.com/spaces/sp/entries/e1"
        );
    }

    #[test]
    fn rows_and_optimistic_removal() {
        let mut model = SidebarModel::new(items(2), "https://app.example");
        assert_eq!(model.rows()[0].href, "https://app.example/spaces/sp/entries/e0");
        assert_eq!(model.message(), "There are 2 other entries that link to this entry:");

        let removed = model.remove_row("e0").unwrap();
        assert_eq!(removed.title, "Entry 0");
        assert_eq!(model.message(), "There is one other entry that links to this entry:");
        assert!(model.remove_row("e0").is_none());

        model.remove_row("e1");
        assert!(model.is_empty());
        assert_eq!(model.to_string(), "No other entries link to this entry.\n");
    }

    #[test]
    fn display_lists_rows() {
        let model = SidebarModel::new(items(1), "https://app.example");
        assert_eq!(
            model.to_string(),
            "There is one other entry that links to this entry:\n  Entry 0 <https://app.example/spaces/sp/entries/e0>\n"
        );
    }
}
