//! Content-Type resolution for artifacts.
//!
//! Lookups go through three layers: the custom extension map registered at
//! construction, the standard table shipped with `mime_guess`, and finally a
//! suffix table matched against the end of the whole path.

use std::collections::HashMap;
use std::path::Path;

use crate::constants::{MIME_MAP, SUFFIX_OVERRIDES};
use crate::s3::{PublishError, Result};

/// Maps file paths to MIME types
#[derive(Debug, Clone)]
pub struct MimeResolver {
    custom: HashMap<String, String>,
    suffixes: Vec<(String, String)>,
}

impl Default for MimeResolver {
    fn default() -> Self {
        Self::new(MIME_MAP.iter().copied(), SUFFIX_OVERRIDES.iter().copied())
    }
}

impl MimeResolver {
    /// Build a resolver from extension mappings (with or without the leading
    /// dot) and suffix overrides
    pub fn new<'a, C, S>(custom: C, suffixes: S) -> Self
    where
        C: IntoIterator<Item = (&'a str, &'a str)>,
        S: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let custom = custom
            .into_iter()
            .map(|(ext, mime)| (ext.trim_start_matches('.').to_lowercase(), mime.to_string()))
            .collect();
        let suffixes = suffixes
            .into_iter()
            .map(|(suffix, mime)| (suffix.to_string(), mime.to_string()))
            .collect();

        Self { custom, suffixes }
    }

    /// Resolve the MIME type for `path`
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MimeType`] when no table knows the path.
    pub fn resolve(&self, path: &Path) -> Result<String> {
        if let Some(mime) = self.guess(path) {
            return Ok(mime);
        }

        let full = path.to_string_lossy();
        self.suffixes
            .iter()
            .find(|(suffix, _)| full.ends_with(suffix.as_str()))
            .map(|(_, mime)| mime.clone())
            .ok_or_else(|| PublishError::MimeType {
                path: full.to_string(),
            })
    }

    fn guess(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;

        if let Some(mime) = self.custom.get(&ext.to_lowercase()) {
            return Some(mime.clone());
        }

        mime_guess::from_ext(ext).first_raw().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_standard_types() {
        let resolver = MimeResolver::default();
        assert_eq!(
            resolver.resolve(&PathBuf::from("artifact.json")).unwrap(),
            "application/json"
        );
        assert_eq!(
            resolver.resolve(&PathBuf::from("dir/index.html")).unwrap(),
            "text/html"
        );
        assert_eq!(
            resolver.resolve(&PathBuf::from("notes.txt")).unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_resolve_custom_map() {
        let resolver = MimeResolver::default();
        assert_eq!(
            resolver
                .resolve(&PathBuf::from("glean-core-1.0.pom"))
                .unwrap(),
            "application/xml"
        );
        assert_eq!(
            resolver.resolve(&PathBuf::from("lib.aar.md5")).unwrap(),
            "text/plain"
        );
        assert_eq!(
            resolver.resolve(&PathBuf::from("LIB.SHA1")).unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_resolve_suffix_overrides() {
        let resolver = MimeResolver::default();
        for path in ["artifact.sha256", "artifact.sha512", "glean-1.0.module"] {
            assert_eq!(
                resolver.resolve(&PathBuf::from(path)).unwrap(),
                "text/plain",
                "{path}"
            );
        }
    }

    #[test]
    fn test_resolve_unknown() {
        let resolver = MimeResolver::default();
        let err = resolver
            .resolve(&PathBuf::from("artifact.xyz123"))
            .unwrap_err();
        assert!(matches!(err, PublishError::MimeType { ref path } if path == "artifact.xyz123"));
        assert!(err.to_string().contains("artifact.xyz123"));

        assert!(resolver.resolve(&PathBuf::from("no_extension")).is_err());
    }

    #[test]
    fn test_custom_map_wins_over_standard() {
        let resolver = MimeResolver::new([(".json", "text/plain")], Vec::<(&str, &str)>::new());
        assert_eq!(
            resolver.resolve(&PathBuf::from("a.json")).unwrap(),
            "text/plain"
        );
        // no suffix table injected
        assert!(resolver.resolve(&PathBuf::from("a.sha256")).is_err());
    }
}
