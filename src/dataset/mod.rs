//! Dataset module for labeled-image directory handling
//!
//! This module provides functionality for:
//! - Scanning a `root/<label>/<file>` directory tree into a sample list
//! - Splitting the samples into train/test/validation views
//! - Lazily loading resized image batches with integer-encoded labels

pub mod loader;
pub mod split;
pub mod view;
pub mod vocab;

// Re-export main types for convenience
pub use loader::{FolderStats, ImageFolder, ImageSample};
pub use split::{DatasetSplits, SplitConfig, SplitStats};
pub use view::{BatchedDataset, ImageBatch};
pub use vocab::LabelVocabulary;

/// Default square image side length in pixels
pub const DEFAULT_IMAGE_SIZE: u32 = 256;

/// Default number of samples per batch
pub const DEFAULT_BATCH_SIZE: usize = 32;
