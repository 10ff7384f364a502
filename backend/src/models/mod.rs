//! Domain models for the gallery.
//!
//! - [`GalleryItem`] - One parsed manifest row, ready for rendering
//! - [`SkippedRow`] - A manifest row that was dropped, with the reason
//! - [`ParseOutcome`] - Items plus skipped rows for one parse
//! - [`ContactAddress`] - Contact email assembled at request time

use serde::{Deserialize, Serialize};

// =============================================================================
// Gallery Item
// =============================================================================

/// One artwork entry from the manifest.
///
/// `name` is the file stem used to build image paths; `display_name` is the
/// presentation text with HTML entities substituted and must never be used
/// for paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Subdirectory under the art root
    pub folder: String,
    /// Base filename without extension
    pub name: String,
    /// `name` after the display rules
    pub display_name: String,
    /// Space-separated filter tokens
    pub tags: String,
}

impl GalleryItem {
    /// Full-size image path, e.g. `art/abstract/Dream10.jpg`.
    pub fn image_path(&self, art_root: &str) -> String {
        format!("{}/{}/{}.jpg", art_root, self.folder, self.name)
    }

    /// Thumbnail path, e.g. `art/abstract/thumb/Dream10.jpg`.
    pub fn thumbnail_path(&self, art_root: &str) -> String {
        format!("{}/{}/thumb/{}.jpg", art_root, self.folder, self.name)
    }

    /// Filter tokens, in manifest order.
    pub fn tag_tokens(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }
}

// =============================================================================
// Parse Outcome
// =============================================================================

/// A manifest row that produced no item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based line number (the header is line 1)
    pub line: usize,
    /// Raw line text
    pub content: String,
    /// Why the row was dropped
    pub reason: String,
    /// Number of fields the tokenizer found
    pub field_count: usize,
}

/// Result of parsing a whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    /// Items in input order
    pub items: Vec<GalleryItem>,
    /// Rows dropped along the way
    pub skipped: Vec<SkippedRow>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Parsed: {} items, {} skipped",
            self.items.len(),
            self.skipped.len()
        )
    }
}

// =============================================================================
// Contact
// =============================================================================

/// Contact email kept as separate parts so it is never written out whole
/// in static markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub username: String,
    pub domain: String,
}

impl ContactAddress {
    pub fn new(username: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            domain: domain.into(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}@{}", self.username, self.domain)
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> GalleryItem {
        GalleryItem {
            folder: "abstract".into(),
            name: "Dream10".into(),
            display_name: "Dream&pound;10".into(),
            tags: "painting  large".into(),
        }
    }

    #[test]
    fn test_paths_use_raw_name() {
        let item = item();
        assert_eq!(item.image_path("art"), "art/abstract/Dream10.jpg");
        assert_eq!(item.thumbnail_path("art"), "art/abstract/thumb/Dream10.jpg");
    }

    #[test]
    fn test_tag_tokens_split_on_whitespace() {
        let item = item();
        let tags: Vec<&str> = item.tag_tokens().collect();
        assert_eq!(tags, vec!["painting", "large"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(item()).unwrap();
        assert_eq!(json["displayName"], "Dream&pound;10");
        assert_eq!(json["folder"], "abstract");
        assert!(json.get("display_name").is_none());
    }

    #[test]
    fn test_contact_address() {
        let contact = ContactAddress::new("sarah", "sarart.uk");
        assert_eq!(contact.address(), "sarah@sarart.uk");
        assert_eq!(contact.mailto(), "mailto:sarah@sarart.uk");
    }

    #[test]
    fn test_summary() {
        let outcome = ParseOutcome {
            items: vec![item()],
            skipped: Vec::new(),
        };
        assert_eq!(outcome.summary(), "Parsed: 1 items, 0 skipped");
        assert!(!outcome.is_empty());
    }
}
