//! Gallery manifest parser.
//!
//! The manifest is a small CSV file (`art/images.csv`): a header line that is
//! never read, then one `folder,name,tags` row per artwork. Parsing is total:
//! rows with fewer than three fields are skipped with a warning and the rest
//! of the file is still used.
//!
//! ```text
//! text ──▶ lines ──▶ tokenize_row ──▶ build_item ──▶ Vec<GalleryItem>
//!                                          │
//!                                          └──▶ SkippedRow (+ warning)
//! ```

pub mod record;
pub mod tokenizer;

use std::path::Path;

use crate::api::logs::{LogBroadcaster, LogEntry, LogLevel, LOG_BROADCASTER};
use crate::error::{ManifestError, ManifestResult};
use crate::models::{GalleryItem, ParseOutcome, SkippedRow};

pub use record::{build_item, RowRejection, REQUIRED_FIELDS};
pub use tokenizer::tokenize_row;

/// Parse manifest text into gallery items.
///
/// # Example
/// ```
/// use gallery::parse_manifest;
///
/// let csv = "folder,name,tags\nabstract,Study12,painting";
/// let items = parse_manifest(csv);
///
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].display_name, "Study&pound;12");
/// ```
pub fn parse_manifest(text: &str) -> Vec<GalleryItem> {
    parse_manifest_detailed(text).items
}

/// Parse manifest text, keeping the skipped rows alongside the items.
///
/// Skipped rows are reported on the global log broadcaster (stderr + SSE).
pub fn parse_manifest_detailed(text: &str) -> ParseOutcome {
    parse_manifest_logged(text, &LOG_BROADCASTER)
}

/// Same as [`parse_manifest_detailed`], reporting skipped rows to `logs`.
pub fn parse_manifest_logged(text: &str, logs: &LogBroadcaster) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let text = text.trim();
    if text.is_empty() {
        return outcome;
    }

    // Line 1 is the header.
    for (idx, row) in text.split('\n').enumerate().skip(1) {
        let line = idx + 1;
        let fields = tokenize_row(row);

        match build_item(&fields) {
            Ok(item) => outcome.items.push(item),
            Err(rejection) => {
                logs.log(LogEntry::new(
                    LogLevel::Warning,
                    format!("Skipping row {} due to incorrect format: \"{}\"", line, row),
                ));
                outcome.skipped.push(SkippedRow {
                    line,
                    content: row.to_string(),
                    reason: rejection.to_string(),
                    field_count: fields.len(),
                });
            }
        }
    }

    outcome
}

// =============================================================================
// Loading from disk
// =============================================================================

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading UTF-8 BOM is dropped
/// so it cannot end up in the (ignored) header.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ManifestResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // WHATWG maps the Latin-1 labels to windows-1252, which agrees with
        // ISO-8859-1 over 0xA0-0xFF (ISO-8859-15 does not).
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(ManifestError::Encoding(format!(
                        "invalid {} byte sequence",
                        enc.name()
                    )));
                }
                text.into_owned()
            }
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Parse manifest bytes with encoding auto-detection.
pub fn parse_manifest_bytes(bytes: &[u8]) -> ManifestResult<ParseOutcome> {
    // Valid UTF-8 is taken as is; chardet guesses badly on short files.
    let encoding = match std::str::from_utf8(bytes) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => detect_encoding(bytes),
    };
    let text = decode_content(bytes, &encoding)?;
    Ok(parse_manifest_detailed(&text))
}

/// Read and parse a manifest file.
///
/// Only reading can fail; once the text is in memory the parse is total.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> ManifestResult<ParseOutcome> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_manifest_bytes(&bytes)
}
