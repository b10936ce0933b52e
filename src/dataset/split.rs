//! Train/Test/Validation Split Construction
//!
//! Partitions a scanned folder into three disjoint batched views sharing one
//! label vocabulary. The split is seeded and reproducible: the same
//! directory and the same config always produce the same assignment.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::loader::{ImageFolder, ImageSample};
use crate::dataset::view::BatchedDataset;
use crate::dataset::vocab::LabelVocabulary;
use crate::utils::error::{Error, Result};

/// Configuration for dataset splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of samples assigned to the training set; the remainder is
    /// halved between test and validation
    pub train_fraction: f64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Keep class proportions across splits
    pub stratified: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.80,
            seed: 42,
            stratified: true,
        }
    }
}

impl SplitConfig {
    /// Create a new split configuration
    pub fn new(train_fraction: f64, seed: u64) -> Result<Self> {
        if train_fraction <= 0.0 || train_fraction >= 1.0 {
            return Err(Error::Config(
                "train fraction must be between 0.0 and 1.0 exclusive".to_string(),
            ));
        }

        Ok(Self {
            train_fraction,
            seed,
            stratified: true,
        })
    }

    /// Disable or enable stratification
    pub fn with_stratified(mut self, stratified: bool) -> Self {
        self.stratified = stratified;
        self
    }
}

/// Three disjoint batched views over one scanned directory
#[derive(Debug, Clone)]
pub struct DatasetSplits {
    /// Training view (~80% of samples by default)
    pub train: BatchedDataset,
    /// Test view (~half the remainder)
    pub test: BatchedDataset,
    /// Validation view (~half the remainder)
    pub validation: BatchedDataset,
    /// The root directory's own name, for display and logging
    pub title: String,
    /// Vocabulary shared by all three views
    pub vocabulary: Arc<LabelVocabulary>,
}

impl DatasetSplits {
    /// Scan `root` and build train/test/validation views
    pub fn from_directory<P: AsRef<Path>>(
        root: P,
        image_size: u32,
        batch_size: usize,
        config: SplitConfig,
    ) -> Result<Self> {
        let folder = ImageFolder::scan(root)?;
        Self::from_folder(folder, image_size, batch_size, config)
    }

    /// Build train/test/validation views from an already scanned folder
    pub fn from_folder(
        folder: ImageFolder,
        image_size: u32,
        batch_size: usize,
        config: SplitConfig,
    ) -> Result<Self> {
        let vocabulary = Arc::clone(folder.vocabulary());
        let title = folder.title().to_string();
        let samples = folder.into_samples();

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let (train, test, validation) = if config.stratified {
            stratified_split(samples, &vocabulary, config.train_fraction, &mut rng)
        } else {
            random_split(samples, config.train_fraction, &mut rng)
        };

        info!(
            "Split '{}': {} train / {} test / {} validation",
            title,
            train.len(),
            test.len(),
            validation.len()
        );

        Ok(Self {
            train: BatchedDataset::new(train, Arc::clone(&vocabulary), image_size, batch_size)?,
            test: BatchedDataset::new(test, Arc::clone(&vocabulary), image_size, batch_size)?,
            validation: BatchedDataset::new(
                validation,
                Arc::clone(&vocabulary),
                image_size,
                batch_size,
            )?,
            title,
            vocabulary,
        })
    }

    /// Get statistics about the splits
    pub fn stats(&self) -> SplitStats {
        SplitStats {
            total_samples: self.train.len() + self.test.len() + self.validation.len(),
            train_size: self.train.len(),
            test_size: self.test.len(),
            validation_size: self.validation.len(),
            num_classes: self.vocabulary.len(),
        }
    }
}

/// Number of train samples and test samples for a group of size `n`; the
/// validation set takes what is left. Test receives the odd sample when the
/// holdout cannot be halved evenly.
fn partition_sizes(n: usize, train_fraction: f64) -> (usize, usize) {
    let n_train = ((n as f64 * train_fraction).round() as usize).min(n);
    let n_test = (n - n_train).div_ceil(2);
    (n_train, n_test)
}

/// Seeded shuffle and contiguous slicing over the whole sample list
fn random_split(
    mut samples: Vec<ImageSample>,
    train_fraction: f64,
    rng: &mut ChaCha8Rng,
) -> (Vec<ImageSample>, Vec<ImageSample>, Vec<ImageSample>) {
    samples.shuffle(rng);

    let (n_train, n_test) = partition_sizes(samples.len(), train_fraction);
    let mut rest = samples.split_off(n_train);
    let validation = rest.split_off(n_test);

    (samples, rest, validation)
}

/// Per-class partition with the same ratios, preserving class balance
///
/// Classes are visited in vocabulary order so the rng stream, and therefore
/// the assignment, is deterministic for a given seed.
fn stratified_split(
    samples: Vec<ImageSample>,
    vocabulary: &LabelVocabulary,
    train_fraction: f64,
    rng: &mut ChaCha8Rng,
) -> (Vec<ImageSample>, Vec<ImageSample>, Vec<ImageSample>) {
    let mut by_class: HashMap<String, Vec<ImageSample>> = HashMap::new();
    for sample in samples {
        by_class
            .entry(sample.label.clone())
            .or_default()
            .push(sample);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    let mut validation = Vec::new();

    for name in vocabulary.names() {
        let Some(mut class_samples) = by_class.remove(name) else {
            continue;
        };
        class_samples.shuffle(rng);

        let (n_train, n_test) = partition_sizes(class_samples.len(), train_fraction);
        let mut rest = class_samples.split_off(n_train);
        let validation_part = rest.split_off(n_test);

        train.extend(class_samples);
        test.extend(rest);
        validation.extend(validation_part);
    }

    // Mix classes within each split so batches are not class-contiguous.
    train.shuffle(rng);
    test.shuffle(rng);
    validation.shuffle(rng);

    (train, test, validation)
}

/// Statistics about dataset splits
#[derive(Debug, Clone)]
pub struct SplitStats {
    pub total_samples: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub validation_size: usize,
    pub num_classes: usize,
}

impl SplitStats {
    fn percent(&self, part: usize) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            100.0 * part as f64 / self.total_samples as f64
        }
    }
}

impl std::fmt::Display for SplitStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset Split Statistics:")?;
        writeln!(f, "  Total samples: {}", self.total_samples)?;
        writeln!(f, "  Number of classes: {}", self.num_classes)?;
        writeln!(
            f,
            "  Train: {} ({:.1}%)",
            self.train_size,
            self.percent(self.train_size)
        )?;
        writeln!(
            f,
            "  Test: {} ({:.1}%)",
            self.test_size,
            self.percent(self.test_size)
        )?;
        writeln!(
            f,
            "  Validation: {} ({:.1}%)",
            self.validation_size,
            self.percent(self.validation_size)
        )?;
        Ok(())
    }
}
