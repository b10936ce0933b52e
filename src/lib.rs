//! # imagefold
//!
//! Lazy batch loading for labeled-image directory datasets.
//!
//! The crate scans a directory tree of the form `root/<label>/<file>`,
//! splits the discovered samples into train/test/validation sets sharing one
//! label vocabulary, and serves resized image batches with integer-encoded
//! labels on demand to a training loop.
//!
//! ## Modules
//!
//! - `dataset`: directory scanning, split construction, and batched views
//! - `utils`: error types and logging setup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imagefold::{DatasetSplits, SplitConfig};
//!
//! let splits = DatasetSplits::from_directory("data/flowers", 256, 32, SplitConfig::default())?;
//! for index in 0..splits.train.batch_count() {
//!     let batch = splits.train.get_batch(index)?;
//!     // feed batch.images / batch.labels to the model
//! }
//! ```
//!
//! Batches are decoded from disk on every access; the views hold no pixel
//! data between calls.

pub mod dataset;
pub mod utils;

// Re-export commonly used items for convenience
pub use dataset::loader::{FolderStats, ImageFolder, ImageSample};
pub use dataset::split::{DatasetSplits, SplitConfig, SplitStats};
pub use dataset::view::{BatchedDataset, ImageBatch};
pub use dataset::vocab::LabelVocabulary;
pub use utils::error::{Error, Result};
pub use utils::logging::{init_default_logging, init_logging, LogConfig, LogLevel};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
