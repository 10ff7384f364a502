//! Site configuration.
//!
//! Defaults match the layout of the portfolio site: everything the gallery
//! reads lives under `<site root>/art/`. Any value can be overridden from the
//! environment (a `.env` file is loaded first if present).
//!
//! | Variable                 | Default     |
//! |--------------------------|-------------|
//! | `GALLERY_SITE_ROOT`      | `.`         |
//! | `GALLERY_ART_DIR`        | `art`       |
//! | `GALLERY_CONTACT_USER`   | `sarah`     |
//! | `GALLERY_CONTACT_DOMAIN` | `sarart.uk` |

use std::env;
use std::path::PathBuf;

use crate::models::ContactAddress;

/// Default HTTP port for `gallery serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Art directory, relative to the site root.
pub const ART_DIR: &str = "art";

/// Manifest read by the gallery.
pub const MANIFEST_FILE: &str = "images.csv";

/// Plain listing the manifest is built from.
pub const MANIFEST_SOURCE_FILE: &str = "images.txt";

/// Text file holding the "last updated" date.
pub const LAST_MODIFIED_FILE: &str = "lastmodified.txt";

pub const DEFAULT_CONTACT_USER: &str = "sarah";
pub const DEFAULT_CONTACT_DOMAIN: &str = "sarart.uk";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory served as the web root
    pub site_root: PathBuf,
    /// Art directory name, relative to `site_root` and to page URLs
    pub art_dir: String,
    /// Contact address shown on the page
    pub contact: ContactAddress,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            art_dir: ART_DIR.to_string(),
            contact: ContactAddress::new(DEFAULT_CONTACT_USER, DEFAULT_CONTACT_DOMAIN),
        }
    }
}

impl SiteConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        // Try loading .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            site_root: get("GALLERY_SITE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.site_root),
            art_dir: get("GALLERY_ART_DIR")
                .map(|dir| dir.trim_matches('/').to_string())
                .unwrap_or(defaults.art_dir),
            contact: ContactAddress::new(
                get("GALLERY_CONTACT_USER").unwrap_or(defaults.contact.username),
                get("GALLERY_CONTACT_DOMAIN").unwrap_or(defaults.contact.domain),
            ),
        }
    }

    /// Override the site root (CLI flag).
    pub fn with_site_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.site_root = root.into();
        self
    }

    pub fn art_path(&self) -> PathBuf {
        self.site_root.join(&self.art_dir)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.art_path().join(MANIFEST_FILE)
    }

    pub fn manifest_source_path(&self) -> PathBuf {
        self.art_path().join(MANIFEST_SOURCE_FILE)
    }

    pub fn last_modified_path(&self) -> PathBuf {
        self.art_path().join(LAST_MODIFIED_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.manifest_path(), PathBuf::from("./art/images.csv"));
        assert_eq!(config.contact.address(), "sarah@sarart.uk");
    }

    #[test]
    fn test_env_overrides() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("GALLERY_SITE_ROOT", "/srv/site"),
            ("GALLERY_ART_DIR", "/gallery/"),
            ("GALLERY_CONTACT_USER", "studio"),
        ]));

        assert_eq!(config.art_dir, "gallery");
        assert_eq!(
            config.last_modified_path(),
            PathBuf::from("/srv/site/gallery/lastmodified.txt")
        );
        assert_eq!(config.contact.address(), "studio@sarart.uk");
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = SiteConfig::from_lookup(lookup(&[("GALLERY_ART_DIR", "  ")]));
        assert_eq!(config.art_dir, ART_DIR);
    }

    #[test]
    fn test_with_site_root() {
        let config = SiteConfig::default().with_site_root("public");
        assert_eq!(
            config.manifest_source_path(),
            PathBuf::from("public/art/images.txt")
        );
    }
}
