//! REST API types for the gallery page.
//!
//! The page script builds its markup straight from [`GalleryResponse`]:
//! paths are precomputed so the browser never has to know the art layout.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{GalleryItem, ParseOutcome, SkippedRow};

/// Response for `GET /api/gallery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    /// "ready", "warning" (rows skipped) or "empty"
    pub status: String,

    /// Items in manifest order
    pub items: Vec<GalleryEntry>,

    pub metadata: GalleryMetadata,
}

/// One item plus the paths the renderer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    #[serde(flatten)]
    pub item: GalleryItem,
    pub image_path: String,
    pub thumbnail_path: String,
    /// Filter class tokens
    pub tag_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryMetadata {
    pub total_items: usize,
    pub skipped_rows: Vec<SkippedRow>,
    /// Distinct tags, sorted; one filter button each
    pub tags: Vec<String>,
}

impl GalleryEntry {
    pub fn new(item: GalleryItem, art_root: &str) -> Self {
        Self {
            image_path: item.image_path(art_root),
            thumbnail_path: item.thumbnail_path(art_root),
            tag_list: item.tag_tokens().map(str::to_string).collect(),
            item,
        }
    }
}

impl GalleryResponse {
    pub fn from_outcome(outcome: ParseOutcome, art_root: &str) -> Self {
        let status = if outcome.items.is_empty() {
            "empty"
        } else if !outcome.skipped.is_empty() {
            "warning"
        } else {
            "ready"
        };

        let tags: BTreeSet<String> = outcome
            .items
            .iter()
            .flat_map(|item| item.tag_tokens().map(str::to_string))
            .collect();

        let items: Vec<GalleryEntry> = outcome
            .items
            .into_iter()
            .map(|item| GalleryEntry::new(item, art_root))
            .collect();

        GalleryResponse {
            status: status.to_string(),
            metadata: GalleryMetadata {
                total_items: items.len(),
                skipped_rows: outcome.skipped,
                tags: tags.into_iter().collect(),
            },
            items,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_manifest_detailed;

    #[test]
    fn test_gallery_response_shape() {
        let outcome = parse_manifest_detailed(
            "folder,name,tags\nabstract,Dream10,painting large\nlandscapes,Field,painting small",
        );
        let response = GalleryResponse::from_outcome(outcome, "art");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["items"][0]["name"], "Dream10");
        assert_eq!(json["items"][0]["displayName"], "Dream&pound;10");
        assert_eq!(json["items"][0]["imagePath"], "art/abstract/Dream10.jpg");
        assert_eq!(json["items"][0]["thumbnailPath"], "art/abstract/thumb/Dream10.jpg");
        assert_eq!(json["items"][1]["tagList"][1], "small");
        assert_eq!(json["metadata"]["totalItems"], 2);
        assert_eq!(
            json["metadata"]["tags"],
            json!(["large", "painting", "small"])
        );
    }

    #[test]
    fn test_status_warning_when_rows_skipped() {
        let outcome = parse_manifest_detailed("h\na,b,c\nbroken");
        let response = GalleryResponse::from_outcome(outcome, "art");
        assert_eq!(response.status, "warning");
        assert_eq!(response.metadata.skipped_rows.len(), 1);
    }

    #[test]
    fn test_status_empty() {
        let response = GalleryResponse::from_outcome(ParseOutcome::default(), "art");
        assert_eq!(response.status, "empty");
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_error_response() {
        let err = error_response("boom");
        assert_eq!(err["status"], "error");
        assert_eq!(err["error"], "boom");
    }
}
