//! Batched Dataset View
//!
//! Presents a fixed sample collection as an indexable sequence of
//! (image-batch, label-batch) pairs. Images are decoded from disk on every
//! access; nothing is cached.

use std::sync::Arc;

use image::imageops::FilterType;
use image::ImageReader;
use ndarray::{Array1, Array4};

use crate::dataset::loader::ImageSample;
use crate::dataset::vocab::LabelVocabulary;
use crate::utils::error::{Error, Result};

/// One materialized batch: aligned image and label arrays
///
/// `images` has shape `(batch_len, image_size, image_size, 3)` holding pixel
/// intensities in `0.0..=255.0`; `labels` has shape `(batch_len,)` holding
/// vocabulary codes.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    pub images: Array4<f32>,
    pub labels: Array1<i64>,
}

/// An immutable, batch-indexable view over a fixed sample subset
///
/// The view owns its sample list and shares the label vocabulary with the
/// sibling splits. It is constructed once and never mutated; the only side
/// effect of any operation is the file reads performed by [`get_batch`].
///
/// [`get_batch`]: BatchedDataset::get_batch
#[derive(Debug, Clone)]
pub struct BatchedDataset {
    samples: Vec<ImageSample>,
    vocabulary: Arc<LabelVocabulary>,
    image_size: u32,
    batch_size: usize,
}

impl BatchedDataset {
    /// Create a view over the given samples
    ///
    /// Fails with a configuration error when `image_size` or `batch_size`
    /// is zero.
    pub fn new(
        samples: Vec<ImageSample>,
        vocabulary: Arc<LabelVocabulary>,
        image_size: u32,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config("batch size must be positive".to_string()));
        }
        if image_size == 0 {
            return Err(Error::Config("image size must be positive".to_string()));
        }

        Ok(Self {
            samples,
            vocabulary,
            image_size,
            batch_size,
        })
    }

    /// Number of batches: `ceil(len / batch_size)`
    ///
    /// The final batch may hold fewer than `batch_size` samples.
    pub fn batch_count(&self) -> usize {
        self.samples.len().div_ceil(self.batch_size)
    }

    /// Number of samples in this view
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the view contains no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Target square side length in pixels
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Configured batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The shared label vocabulary
    pub fn vocabulary(&self) -> &Arc<LabelVocabulary> {
        &self.vocabulary
    }

    /// Samples backing this view, in batch order
    pub fn samples(&self) -> &[ImageSample] {
        &self.samples
    }

    /// Load the batch at `index`
    ///
    /// Decodes every image in the slice `[index * batch_size,
    /// min(index * batch_size + batch_size, len))` from disk, converts it to
    /// RGB, and resizes it to `(image_size, image_size)` with bilinear
    /// interpolation. Labels are encoded through the vocabulary.
    ///
    /// A single unreadable file fails the whole batch; there is no
    /// skip-and-continue mode.
    pub fn get_batch(&self, index: usize) -> Result<ImageBatch> {
        let count = self.batch_count();
        if index >= count {
            return Err(Error::OutOfRange { index, count });
        }

        let begin = index * self.batch_size;
        let end = (begin + self.batch_size).min(self.samples.len());
        let batch = &self.samples[begin..end];

        let side = self.image_size as usize;
        let mut images = Array4::<f32>::zeros((batch.len(), side, side, 3));
        let mut labels = Array1::<i64>::zeros(batch.len());

        for (i, sample) in batch.iter().enumerate() {
            let rgb = self.decode_resized(sample)?;
            for (x, y, pixel) in rgb.enumerate_pixels() {
                let (x, y) = (x as usize, y as usize);
                images[[i, y, x, 0]] = pixel[0] as f32;
                images[[i, y, x, 1]] = pixel[1] as f32;
                images[[i, y, x, 2]] = pixel[2] as f32;
            }

            let code = self
                .vocabulary
                .index_of(&sample.label)
                .ok_or_else(|| Error::LabelNotFound(sample.label.clone()))?;
            labels[i] = code as i64;
        }

        Ok(ImageBatch { images, labels })
    }

    /// Label codes for every sample, in batch order
    ///
    /// Equivalent to concatenating the label component of every batch from
    /// `0` to `batch_count() - 1`, but derived from the sample list
    /// directly; no image is decoded.
    pub fn all_labels(&self) -> Result<Array1<i64>> {
        let codes = self
            .samples
            .iter()
            .map(|sample| {
                self.vocabulary
                    .index_of(&sample.label)
                    .map(|code| code as i64)
                    .ok_or_else(|| Error::LabelNotFound(sample.label.clone()))
            })
            .collect::<Result<Vec<i64>>>()?;

        Ok(Array1::from_vec(codes))
    }

    /// Per-class sample counts over the vocabulary
    pub fn class_distribution(&self) -> Result<Vec<usize>> {
        let mut counts = vec![0usize; self.vocabulary.len()];
        for code in self.all_labels()?.iter() {
            counts[*code as usize] += 1;
        }
        Ok(counts)
    }

    /// Decode one sample and resize it to the square target size
    fn decode_resized(&self, sample: &ImageSample) -> Result<image::RgbImage> {
        let img = ImageReader::open(&sample.path)
            .map_err(|e| Error::ImageDecode {
                path: sample.path.clone(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|e| Error::ImageDecode {
                path: sample.path.clone(),
                source: e,
            })?;

        Ok(img
            .resize_exact(self.image_size, self.image_size, FilterType::Triangle)
            .to_rgb8())
    }
}
