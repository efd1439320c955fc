//! Request path normalization.
//!
//! Traversal segments are dropped rather than resolved, so no input can
//! climb above the storage root.

use std::path::PathBuf;

use crate::config::StaticConfig;

/// Maps untrusted request paths onto files below a storage root.
#[derive(Debug, Clone)]
pub struct PathSanitizer {
    root: PathBuf,
    index_document: String,
    max_len: usize,
}

impl PathSanitizer {
    /// `max_len` bounds the joined segments (the part after `<root>/`).
    pub fn new(root: impl Into<PathBuf>, index_document: impl Into<String>, max_len: usize) -> Self {
        Self {
            root: root.into(),
            index_document: index_document.into(),
            max_len,
        }
    }

    pub fn from_config(cfg: &StaticConfig) -> Self {
        Self::new(&cfg.root, &cfg.index_document, cfg.max_path_len)
    }

    /// Normalizes `request_path` into `<root>/<segments>`.
    ///
    /// - `""` and `"/"` map to the index document.
    /// - empty segments (`//`) and literal `..` segments are discarded.
    /// - once the joined segments would exceed the length bound, that segment
    ///   and everything after it is dropped without error.
    /// - if nothing survives, the index document is used.
    ///
    /// # Example
    ///
    /// ```
    /// # use beacon::static_files::PathSanitizer;
    /// let sanitizer = PathSanitizer::new("/spiffs", "index.html", 255);
    /// assert_eq!(sanitizer.sanitize("/a//b/../c").to_str(), Some("/spiffs/a/b/c"));
    /// assert_eq!(sanitizer.sanitize("/../../").to_str(), Some("/spiffs/index.html"));
    /// ```
    pub fn sanitize(&self, request_path: &str) -> PathBuf {
        if request_path.is_empty() || request_path == "/" {
            return self.root.join(&self.index_document);
        }

        let rest = request_path.strip_prefix('/').unwrap_or(request_path);
        let mut joined = String::with_capacity(rest.len().min(self.max_len));

        for segment in rest.split('/') {
            if segment.is_empty() || segment == ".." {
                continue;
            }

            let sep = usize::from(!joined.is_empty());
            if joined.len() + sep + segment.len() > self.max_len {
                break;
            }

            if sep == 1 {
                joined.push('/');
            }
            joined.push_str(segment);
        }

        if joined.is_empty() {
            self.root.join(&self.index_document)
        } else {
            self.root.join(joined)
        }
    }
}
