//! Destination-root discovery by marker file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use armature_core::application::{
    ports::{Filesystem, RootLocator},
    STORAGE_FILE,
};

/// Walks up from a start directory to the nearest ancestor containing the
/// project marker file (the persisted record), falling back to the start
/// directory when no ancestor carries one.
pub struct MarkerRootLocator {
    fs: Arc<dyn Filesystem>,
    marker: String,
}

impl MarkerRootLocator {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            fs,
            marker: STORAGE_FILE.into(),
        }
    }

    /// Use a custom marker file name.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

impl RootLocator for MarkerRootLocator {
    fn locate(&self, start: &Path) -> PathBuf {
        for dir in start.ancestors() {
            if self.fs.exists(&dir.join(&self.marker)) {
                debug!(root = %dir.display(), "project marker found");
                return dir.to_path_buf();
            }
        }
        start.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    #[test]
    fn finds_the_nearest_marked_ancestor() {
        let fs = Arc::new(MemoryFilesystem::new());
        fs.seed("/projects/app/.armaturerc.json", "{}");

        let locator = MarkerRootLocator::new(fs);
        assert_eq!(
            locator.locate(Path::new("/projects/app/src/deep")),
            PathBuf::from("/projects/app")
        );
    }

    #[test]
    fn prefers_the_closest_marker() {
        let fs = Arc::new(MemoryFilesystem::new());
        fs.seed("/outer/.armaturerc.json", "{}");
        fs.seed("/outer/inner/.armaturerc.json", "{}");

        let locator = MarkerRootLocator::new(fs);
        assert_eq!(
            locator.locate(Path::new("/outer/inner/src")),
            PathBuf::from("/outer/inner")
        );
    }

    #[test]
    fn falls_back_to_the_start_directory() {
        let fs = Arc::new(MemoryFilesystem::new());
        let locator = MarkerRootLocator::new(fs);

        assert_eq!(
            locator.locate(Path::new("/nowhere/special")),
            PathBuf::from("/nowhere/special")
        );
    }

    #[test]
    fn custom_marker_name_is_honored() {
        let fs = Arc::new(MemoryFilesystem::new());
        fs.seed("/repo/.project-root", "");

        let locator = MarkerRootLocator::new(fs).with_marker(".project-root");
        assert_eq!(
            locator.locate(Path::new("/repo/crates/x")),
            PathBuf::from("/repo")
        );
    }
}
