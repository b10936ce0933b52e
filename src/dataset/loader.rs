//! Labeled-Image Directory Scanner
//!
//! Walks a `root/<label>/<file>` tree and records every regular file as a
//! sample labeled with the name of its immediate parent directory. No
//! extension filtering is applied; a non-image file surfaces as a decode
//! error at batch-fetch time, not at scan time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::dataset::vocab::LabelVocabulary;
use crate::utils::error::{Error, Result};

/// A single image sample with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSample {
    /// Path to the image file
    pub path: PathBuf,
    /// Label string (the file's immediate parent directory name)
    pub label: String,
}

impl ImageSample {
    /// Create a new image sample
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// A scanned labeled-image directory
///
/// Holds the flat sample list, the shared label vocabulary derived from it,
/// and the root directory's own name as a display title.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    root_dir: PathBuf,
    title: String,
    samples: Vec<ImageSample>,
    vocabulary: Arc<LabelVocabulary>,
}

impl ImageFolder {
    /// Scan a directory tree into a flat sample list
    ///
    /// The directory should be structured as:
    /// ```text
    /// root_dir/
    /// ├── cat/
    /// │   ├── image1.jpg
    /// │   └── image2.jpg
    /// ├── dog/
    /// │   └── ...
    /// └── ...
    /// ```
    ///
    /// Files are enumerated in sorted order so repeated scans of the same
    /// tree produce the same sample sequence. An empty directory yields an
    /// empty sample list and an empty vocabulary.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root_dir = root.as_ref().to_path_buf();
        if !root_dir.is_dir() {
            return Err(Error::PathNotFound(root_dir));
        }

        info!("Scanning labeled image directory: {:?}", root_dir);

        let mut samples = Vec::new();
        for entry in WalkDir::new(&root_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let label = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            samples.push(ImageSample { path, label });
        }

        let vocabulary = Arc::new(LabelVocabulary::from_labels(
            samples.iter().map(|s| s.label.clone()),
        ));

        let title = root_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(
            "Scanned {} samples across {} classes",
            samples.len(),
            vocabulary.len()
        );
        debug!("Classes: {:?}", vocabulary.names());

        Ok(Self {
            root_dir,
            title,
            samples,
            vocabulary,
        })
    }

    /// Get the number of samples in the folder
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the folder contains no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the number of classes
    pub fn num_classes(&self) -> usize {
        self.vocabulary.len()
    }

    /// Root directory the scan started from
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The root directory's own name, for display and logging
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All scanned samples in enumeration order
    pub fn samples(&self) -> &[ImageSample] {
        &self.samples
    }

    /// The shared label vocabulary
    pub fn vocabulary(&self) -> &Arc<LabelVocabulary> {
        &self.vocabulary
    }

    /// Consume the folder, returning its sample list
    pub fn into_samples(self) -> Vec<ImageSample> {
        self.samples
    }

    /// Get statistics about the scanned folder
    pub fn stats(&self) -> FolderStats {
        let mut class_counts = vec![0usize; self.vocabulary.len()];
        for sample in &self.samples {
            if let Some(idx) = self.vocabulary.index_of(&sample.label) {
                class_counts[idx] += 1;
            }
        }

        FolderStats {
            title: self.title.clone(),
            total_samples: self.samples.len(),
            num_classes: self.vocabulary.len(),
            class_names: self.vocabulary.names().to_vec(),
            class_counts,
        }
    }
}

/// Statistics about a scanned folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderStats {
    pub title: String,
    pub total_samples: usize,
    pub num_classes: usize,
    pub class_names: Vec<String>,
    pub class_counts: Vec<usize>,
}

impl std::fmt::Display for FolderStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset '{}':", self.title)?;
        writeln!(f, "  Total samples: {}", self.total_samples)?;
        writeln!(f, "  Number of classes: {}", self.num_classes)?;
        for (name, count) in self.class_names.iter().zip(&self.class_counts) {
            writeln!(f, "    {}: {}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree(root: &Path, files: &[(&str, &str)]) {
        for (dir, name) in files {
            let class_dir = root.join(dir);
            fs::create_dir_all(&class_dir).unwrap();
            fs::write(class_dir.join(name), b"stub").unwrap();
        }
    }

    #[test]
    fn test_scan_missing_root() {
        let result = ImageFolder::scan("/does/not/exist");
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_scan_collects_samples_and_sorted_vocabulary() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("farm");
        make_tree(&root, &[("dog", "c.jpg"), ("cat", "b.jpg"), ("cat", "a.jpg")]);

        let folder = ImageFolder::scan(&root).unwrap();

        assert_eq!(folder.len(), 3);
        assert_eq!(folder.num_classes(), 2);
        assert_eq!(folder.title(), "farm");
        assert_eq!(folder.vocabulary().names(), &["cat", "dog"]);

        // Sorted enumeration: cat/a, cat/b, dog/c
        let labels: Vec<&str> = folder.samples().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["cat", "cat", "dog"]);
        assert_eq!(
            folder.samples()[0].path.file_name().unwrap(),
            "a.jpg"
        );
    }

    #[test]
    fn test_label_is_immediate_parent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("farm");
        make_tree(&root, &[("cat/close_up", "d.jpg")]);
        fs::write(root.join("stray.jpg"), b"stub").unwrap();

        let folder = ImageFolder::scan(&root).unwrap();

        let mut labels: Vec<&str> = folder.samples().iter().map(|s| s.label.as_str()).collect();
        labels.sort();
        // A nested file is labeled by its direct parent; a file at the root
        // is labeled by the root directory itself.
        assert_eq!(labels, vec!["close_up", "farm"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let folder = ImageFolder::scan(temp_dir.path()).unwrap();

        assert!(folder.is_empty());
        assert_eq!(folder.num_classes(), 0);
        assert!(folder.vocabulary().is_empty());
    }

    #[test]
    fn test_non_image_files_are_scanned() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        make_tree(&root, &[("cat", "notes.txt")]);

        // No extension filtering: the text file becomes a sample and will
        // fail later, at decode time.
        let folder = ImageFolder::scan(&root).unwrap();
        assert_eq!(folder.len(), 1);
    }

    #[test]
    fn test_stats() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("farm");
        make_tree(&root, &[("cat", "a.jpg"), ("cat", "b.jpg"), ("dog", "c.jpg")]);

        let stats = ImageFolder::scan(&root).unwrap().stats();

        assert_eq!(stats.total_samples, 3);
        assert_eq!(stats.num_classes, 2);
        assert_eq!(stats.class_counts, vec![2, 1]);

        let rendered = stats.to_string();
        assert!(rendered.contains("cat: 2"));
        assert!(rendered.contains("dog: 1"));
    }
}
