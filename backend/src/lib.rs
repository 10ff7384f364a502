//! # Gallery - manifest tooling for the portfolio site
//!
//! The portfolio gallery is driven by a small CSV manifest
//! (`art/images.csv`). This crate parses it into render-ready records,
//! builds it from the plain image listing, and serves the site locally.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ images.txt  │────▶│  Manifest   │────▶│ images.csv  │────▶│   Parser    │
//! │  (listing)  │     │  (builder)  │     │ (manifest)  │     │ (+ display) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    ▼
//!                                                             GalleryItem[] ──▶ /api/gallery
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use gallery::parse_manifest;
//!
//! let items = parse_manifest("folder,name,tags\nabstract,Dream10,painting large");
//! assert_eq!(items[0].display_name, "Dream&pound;10");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Domain models (GalleryItem, SkippedRow, ContactAddress)
//! - [`parser`] - Manifest tokenizer, record builder and document parser
//! - [`transform`] - Display-name rules
//! - [`manifest`] - Manifest builder
//! - [`site`] - Last-modified date file
//! - [`config`] - Site configuration
//! - [`api`] - HTTP server and log broadcaster

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod transform;

// Site tooling
pub mod manifest;
pub mod site;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{BuildError, ManifestError, ServerError, SiteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ContactAddress, GalleryItem, ParseOutcome, SkippedRow};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    build_item,
    load_manifest,
    parse_manifest,
    parse_manifest_bytes,
    parse_manifest_detailed,
    parse_manifest_logged,
    tokenize_row,
    RowRejection,
};

pub use transform::display_name;

// =============================================================================
// Re-exports - Site tooling
// =============================================================================

pub use config::SiteConfig;
pub use manifest::{build_manifest, BuildOptions, BuildReport};
pub use site::{read_last_modified, write_last_modified};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
