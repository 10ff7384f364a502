//! Manifest builder: `images.txt` → `images.csv`.
//!
//! The source listing is a headerless CSV of `folder,name,<anything>` rows.
//! The builder regenerates the third column as the filter tags and writes
//! the manifest the gallery reads:
//!
//! - name ends with a digit (priced work) → `"<folder> forsale"`
//! - otherwise → `"<folder> sold"`
//!
//! Output always has a `folder,name,tags` header and every field quoted. It is
//! written to a sibling temp file first and renamed over the target.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::{BuildError, BuildResult};

/// Header written to every manifest.
pub const MANIFEST_HEADER: [&str; 3] = ["folder", "name", "tags"];

/// Options for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Source listing
    pub input: PathBuf,
    /// Manifest to (over)write
    pub output: PathBuf,
    /// Delete the source listing after a successful build
    pub remove_input: bool,
}

/// What a build did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub kept: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

/// Tags for a listing row: availability follows from a trailing price digit.
pub fn derive_tags(folder: &str, name: &str) -> String {
    let status = if name.ends_with(|c: char| c.is_ascii_digit()) {
        "forsale"
    } else {
        "sold"
    };
    format!("{} {}", folder, status)
}

/// Empty lines outside quoted fields.
///
/// The `csv` reader drops these without yielding a record; the listing format
/// treats each one as a malformed (zero-field) row. A line ending with an odd
/// number of `"` leaves a quoted field open across the line break.
fn count_blank_lines(text: &str) -> usize {
    let mut in_quotes = false;
    let mut blank = 0;

    for line in text.lines() {
        if !in_quotes && line.is_empty() {
            blank += 1;
        }
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }

    blank
}

/// Read the listing, keeping rows with exactly three fields.
fn read_listing(input: &Path) -> BuildResult<(Vec<[String; 3]>, usize)> {
    let text = fs::read_to_string(input)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = count_blank_lines(&text);
    for _ in 0..skipped {
        log_warning("Skipping malformed row: []");
    }

    for record in reader.records() {
        let record = record?;
        if record.len() != 3 {
            skipped += 1;
            log_warning(format!("Skipping malformed row: {:?}", record.iter().collect::<Vec<_>>()));
            continue;
        }

        let folder = record[0].to_string();
        let name = record[1].to_string();
        let tags = derive_tags(&folder, &name);
        rows.push([folder, name, tags]);
    }

    Ok((rows, skipped))
}

/// Temp path next to `output`, so the final rename stays on one filesystem.
fn temp_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("images");
    output.with_file_name(format!("{}_temp.csv", stem))
}

fn write_manifest(path: &Path, rows: &[[String; 3]]) -> BuildResult<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;

    writer.write_record(MANIFEST_HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Build the manifest from the source listing.
pub fn build_manifest(options: &BuildOptions) -> BuildResult<BuildReport> {
    if !options.input.exists() {
        return Err(BuildError::MissingInput(options.input.clone()));
    }

    log_info(format!("Reading data from {}...", options.input.display()));
    let (rows, skipped) = read_listing(&options.input)?;
    log_success(format!("Found {} valid rows", rows.len()));

    let temp = temp_path(&options.output);
    if let Err(e) = write_manifest(&temp, &rows) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    // Rename over an existing manifest; Windows refuses otherwise.
    if options.output.exists() {
        fs::remove_file(&options.output)?;
    }
    fs::rename(&temp, &options.output)?;

    if options.remove_input && options.input != options.output {
        fs::remove_file(&options.input)?;
    }

    log_success(format!("{} has been created", options.output.display()));

    Ok(BuildReport {
        kept: rows.len(),
        skipped,
        output: options.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_manifest;
    use tempfile::tempdir;

    fn options(dir: &Path) -> BuildOptions {
        BuildOptions {
            input: dir.join("images.txt"),
            output: dir.join("images.csv"),
            remove_input: false,
        }
    }

    #[test]
    fn test_derive_tags() {
        assert_eq!(derive_tags("abstract", "Dream10"), "abstract forsale");
        assert_eq!(derive_tags("abstract", "Dream"), "abstract sold");
        assert_eq!(derive_tags("abstract", ""), "abstract sold");
    }

    #[test]
    fn test_build_writes_quoted_manifest() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        fs::write(
            &opts.input,
            "abstract,Dream10,abstract\n\"landscapes\",\"Field, wide\",x\n",
        )
        .unwrap();

        let report = build_manifest(&opts).unwrap();
        assert_eq!(report.kept, 2);
        assert_eq!(report.skipped, 0);

        let written = fs::read_to_string(&opts.output).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some(r#""folder","name","tags""#));
        assert_eq!(lines.next(), Some(r#""abstract","Dream10","abstract forsale""#));
        assert_eq!(lines.next(), Some(r#""landscapes","Field, wide","landscapes sold""#));

        assert!(opts.input.exists());
        assert!(!dir.path().join("images_temp.csv").exists());
    }

    #[test]
    fn test_build_skips_malformed_rows() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        fs::write(&opts.input, "a,b\na,b,c\na,b,c,d\n").unwrap();

        let report = build_manifest(&opts).unwrap();
        assert_eq!(report.kept, 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_built_manifest_parses() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        fs::write(&opts.input, "abstract,Study12,x\nabstract,Box 10x5cm,x\n").unwrap();
        build_manifest(&opts).unwrap();

        let items = parse_manifest(&fs::read_to_string(&opts.output).unwrap());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name, "Study&pound;12");
        assert_eq!(items[0].tags, "abstract forsale");
        assert_eq!(items[1].display_name, "Box 10&times;5cm");
        assert_eq!(items[1].tags, "abstract sold");
    }

    #[test]
    fn test_build_replaces_existing_and_removes_input() {
        let dir = tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.remove_input = true;
        fs::write(&opts.output, "stale").unwrap();
        fs::write(&opts.input, "a,b1,c\n").unwrap();

        build_manifest(&opts).unwrap();

        assert!(!opts.input.exists());
        let written = fs::read_to_string(&opts.output).unwrap();
        assert!(written.contains("\"a forsale\""));
    }

    #[test]
    fn test_blank_lines_count_as_skipped() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        fs::write(&opts.input, "a,b1,c\n\nd,e,f\r\n\r\n").unwrap();

        let report = build_manifest(&opts).unwrap();
        assert_eq!(report.kept, 2);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_blank_line_inside_quotes_is_data() {
        assert_eq!(count_blank_lines("a,\"multi\n\nline\",c\n\n"), 1);
        assert_eq!(count_blank_lines("a,\"\"\"quoted\"\"\",c\n\n"), 1);
        assert_eq!(count_blank_lines("a,b,c\n"), 0);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let result = build_manifest(&options(dir.path()));
        assert!(matches!(result, Err(BuildError::MissingInput(_))));
    }
}
