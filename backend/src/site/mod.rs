//! Site extras: the "last updated" date file.
//!
//! The page shows the content of `art/lastmodified.txt` verbatim (trimmed).
//! `gallery stamp` writes today's date there after the art folder changes.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{SiteError, SiteResult};

/// Format used when stamping, e.g. `16 October 2026`.
pub const DATE_FORMAT: &str = "%-d %B %Y";

/// Read the displayed date, trimmed.
pub fn read_last_modified(path: &Path) -> SiteResult<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SiteError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Write `date` to the file, replacing its content. Returns the text written.
pub fn write_last_modified(path: &Path, date: NaiveDate) -> SiteResult<String> {
    let text = format_date(date);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", text))?;
    Ok(text)
}
