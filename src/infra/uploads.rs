//! Uploaded-image storage.
//!
//! Images land in a fixed directory tree, one subdirectory per entity
//! type, keyed by a sanitised filename. A re-upload under the same name
//! overwrites the previous file (last write wins).

use std::path::PathBuf;

use tokio::fs;

use crate::errors::{AppError, AppResult};

/// Filesystem store for uploaded entity images
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist `bytes` under `<root>/<kind>/<sanitised filename>` and
    /// return the stored filename.
    ///
    /// Returns a validation error when the filename sanitises to nothing
    /// (e.g. it was all path separators).
    pub async fn save(&self, kind: &str, filename: &str, bytes: &[u8]) -> AppResult<String> {
        let safe = sanitize_filename(filename);
        if safe.is_empty() {
            return Err(AppError::validation("Invalid image filename"));
        }

        let dir = self.root.join(kind);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {}", e)))?;

        let path = dir.join(&safe);
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store image: {}", e)))?;

        tracing::debug!(kind = kind, file = %safe, "Image stored");
        Ok(safe)
    }
}

/// Reduce an arbitrary client filename to a safe single path component.
///
/// Path separators and parent references are stripped; anything outside
/// `[A-Za-z0-9._-]` becomes an underscore.
pub fn sanitize_filename(name: &str) -> String {
    // Take the last path component the client sent, then whitelist.
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/shirt.png"), "shirt.png");
        assert_eq!(sanitize_filename("c:\\x\\shirt.png"), "shirt.png");
    }

    #[test]
    fn sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my shirt (1).png"), "my_shirt__1_.png");
        assert_eq!(sanitize_filename("héllo.jpg"), "h_llo.jpg");
    }

    #[test]
    fn sanitize_rejects_empty_results() {
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename("///"), "");
    }
}
