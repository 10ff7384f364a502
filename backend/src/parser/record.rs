//! Record builder: tokenized fields → [`GalleryItem`].

use crate::models::GalleryItem;
use crate::transform::display_name;

/// Fields a row needs: folder, name, tags.
pub const REQUIRED_FIELDS: usize = 3;

/// Why a row produced no item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    TooFewFields { found: usize },
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::TooFewFields { found } => write!(
                f,
                "expected at least {} fields, found {}",
                REQUIRED_FIELDS, found
            ),
        }
    }
}

/// Trim, drop every `"` left in the value, trim again.
fn clean(field: &str) -> String {
    field.trim().replace('"', "").trim().to_string()
}

/// Build an item from the raw fields of one row.
///
/// Fields past the third are ignored. `name` keeps the cleaned value;
/// only `display_name` carries the display rules.
pub fn build_item(fields: &[String]) -> Result<GalleryItem, RowRejection> {
    let [folder, name, tags, ..] = fields else {
        return Err(RowRejection::TooFewFields { found: fields.len() });
    };

    let name = clean(name);
    Ok(GalleryItem {
        folder: clean(folder),
        display_name: display_name(&name),
        name,
        tags: clean(tags),
    })
}
