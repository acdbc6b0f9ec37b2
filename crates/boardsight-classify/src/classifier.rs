use std::borrow::Cow;

use boardsight_core::GrayImageView;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::library::ReferenceLibrary;
use crate::preprocess::{Preprocess, Preprocessing};
use crate::ssim::{mean_ssim, SsimParams};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid cell image ({width}x{height})")]
    InvalidImage { width: u32, height: u32 },
}

/// Best match for one cell.
///
/// `label` is `None` when the library is empty (score 0) or when the best
/// score falls below the classifier's acceptance threshold (score kept).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Option<String>,
    pub score: f32,
}

impl ClassificationResult {
    pub fn no_match() -> Self {
        Self {
            label: None,
            score: 0.0,
        }
    }
}

/// Strategy that names the piece in a cell image.
pub trait PieceClassifierStrategy {
    fn classify(
        &self,
        cell: &DynamicImage,
        library: &ReferenceLibrary,
    ) -> Result<ClassificationResult, ClassifyError>;
}

/// Nearest-reference classifier scored by mean SSIM.
pub struct SsimClassifier {
    preprocess: Box<dyn Preprocess>,
    params: SsimParams,
    min_score: Option<f32>,
}

impl SsimClassifier {
    pub fn new(preprocess: impl Preprocess + 'static) -> Self {
        Self {
            preprocess: Box::new(preprocess),
            params: SsimParams::default(),
            min_score: None,
        }
    }

    pub fn with_params(mut self, params: SsimParams) -> Self {
        self.params = params;
        self
    }

    /// Report matches scoring below `min_score` as unlabeled.
    pub fn with_min_score(mut self, min_score: Option<f32>) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn params(&self) -> &SsimParams {
        &self.params
    }

    /// Mean SSIM over planes between the preprocessed cell and one reference.
    fn score(
        &self,
        cell: &[GrayImage],
        reference: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Option<f64> {
        let resized = if reference.dimensions() == (width, height) {
            Cow::Borrowed(reference)
        } else {
            Cow::Owned(reference.resize_exact(width, height, FilterType::Triangle))
        };
        let mut processed = self.preprocess.apply(&resized);
        let (pw, ph) = cell[0].dimensions();
        if processed.dimensions() != (pw, ph) {
            processed = processed.resize_exact(pw, ph, FilterType::Triangle);
        }
        let planes = planes_as(&processed, cell.len());

        let mut total = 0.0;
        for (a, b) in cell.iter().zip(planes.iter()) {
            total += mean_ssim(&gray_view(a), &gray_view(b), &self.params)?;
        }
        Some(total / cell.len() as f64)
    }
}

impl Default for SsimClassifier {
    fn default() -> Self {
        Self::new(Preprocessing::Grayscale)
    }
}

impl PieceClassifierStrategy for SsimClassifier {
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, cell, library),
            fields(width = cell.width(), height = cell.height(), refs = library.len())
        )
    )]
    fn classify(
        &self,
        cell: &DynamicImage,
        library: &ReferenceLibrary,
    ) -> Result<ClassificationResult, ClassifyError> {
        let (width, height) = (cell.width(), cell.height());
        if width == 0 || height == 0 {
            return Err(ClassifyError::InvalidImage { width, height });
        }
        if library.is_empty() {
            return Ok(ClassificationResult::no_match());
        }

        let processed = self.preprocess.apply(cell);
        if processed.width() == 0 || processed.height() == 0 {
            return Err(ClassifyError::InvalidImage {
                width: processed.width(),
                height: processed.height(),
            });
        }
        let channels = if processed.color().channel_count() <= 2 { 1 } else { 3 };
        let cell_planes = planes_as(&processed, channels);

        let mut best: Option<(&str, f64)> = None;
        for entry in library.entries() {
            let Some(score) = self.score(&cell_planes, &entry.pixels, width, height) else {
                log::warn!("reference {:?} could not be scored", entry.label);
                continue;
            };
            log::trace!("{} -> {score:.4}", entry.label);
            // Strict comparison keeps the first of equal scores.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry.label.as_str(), score));
            }
        }

        let Some((label, score)) = best else {
            return Ok(ClassificationResult::no_match());
        };
        let score = score as f32;
        let accepted = self.min_score.map_or(true, |min| score >= min);
        Ok(ClassificationResult {
            label: accepted.then(|| label.to_string()),
            score,
        })
    }
}

/// Classify with the default grayscale SSIM classifier.
pub fn classify(
    cell: &DynamicImage,
    library: &ReferenceLibrary,
) -> Result<ClassificationResult, ClassifyError> {
    SsimClassifier::default().classify(cell, library)
}

fn gray_view(img: &GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Split into one luminance plane or three RGB planes.
fn planes_as(img: &DynamicImage, channels: usize) -> Vec<GrayImage> {
    if channels == 1 {
        return vec![img.to_luma8()];
    }
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    (0..3)
        .map(|c| GrayImage::from_fn(w, h, |x, y| image::Luma([rgb.get_pixel(x, y)[c]])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ReferenceImage;
    use approx::assert_abs_diff_eq;
    use image::{Rgb, RgbImage};

    fn pattern(seed: u32, w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            let v = ((x * (3 + seed) + y * (5 + 2 * seed) + seed * 31) % 256) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        }))
    }

    fn entry(label: &str, pixels: DynamicImage) -> ReferenceImage {
        ReferenceImage {
            label: label.to_string(),
            path: None,
            pixels,
        }
    }

    #[test]
    fn exact_duplicate_wins_with_top_score() {
        let cell = pattern(2, 40, 40);
        let lib = ReferenceLibrary::from_entries(vec![
            entry("wN", pattern(1, 40, 40)),
            entry("bQ", pattern(2, 40, 40)),
            entry("wK", pattern(3, 40, 40)),
        ]);
        let res = classify(&cell, &lib).unwrap();
        assert_eq!(res.label.as_deref(), Some("bQ"));
        assert_abs_diff_eq!(res.score, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn color_strategy_also_finds_duplicate() {
        let cell = pattern(4, 24, 30);
        let lib = ReferenceLibrary::from_entries(vec![
            entry("a", pattern(5, 24, 30)),
            entry("b", pattern(4, 24, 30)),
        ]);
        let res = SsimClassifier::new(Preprocessing::Color)
            .classify(&cell, &lib)
            .unwrap();
        assert_eq!(res.label.as_deref(), Some("b"));
        assert_abs_diff_eq!(res.score, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn ties_keep_the_first_entry() {
        let cell = pattern(7, 16, 16);
        let lib = ReferenceLibrary::from_entries(vec![
            entry("first", pattern(7, 16, 16)),
            entry("second", pattern(7, 16, 16)),
        ]);
        let res = classify(&cell, &lib).unwrap();
        assert_eq!(res.label.as_deref(), Some("first"));
    }

    #[test]
    fn references_are_resized_to_the_cell() {
        let big = DynamicImage::ImageLuma8(GrayImage::from_fn(64, 64, |x, _| {
            image::Luma([if x < 32 { 20 } else { 230 }])
        }));
        let flipped = DynamicImage::ImageLuma8(GrayImage::from_fn(64, 64, |x, _| {
            image::Luma([if x < 32 { 230 } else { 20 }])
        }));
        let cell = big.resize_exact(16, 16, FilterType::Triangle);
        let lib = ReferenceLibrary::from_entries(vec![entry("flip", flipped), entry("same", big)]);
        let res = classify(&cell, &lib).unwrap();
        assert_eq!(res.label.as_deref(), Some("same"));
        assert!(res.score > 0.9);
    }

    #[test]
    fn empty_library_is_not_an_error() {
        let res = classify(&pattern(1, 8, 8), &ReferenceLibrary::default()).unwrap();
        assert_eq!(res, ClassificationResult::no_match());
    }

    #[test]
    fn zero_size_cell_is_invalid() {
        let lib = ReferenceLibrary::from_entries(vec![entry("x", pattern(1, 8, 8))]);
        let err = classify(&DynamicImage::new_rgb8(0, 5), &lib).unwrap_err();
        assert_eq!(err, ClassifyError::InvalidImage { width: 0, height: 5 });
    }

    #[test]
    fn threshold_blanks_weak_matches() {
        let lib = ReferenceLibrary::from_entries(vec![entry("other", pattern(9, 20, 20))]);
        let res = SsimClassifier::default()
            .with_min_score(Some(0.99))
            .classify(&pattern(1, 20, 20), &lib)
            .unwrap();
        assert_eq!(res.label, None);
        assert!(res.score < 0.99);
    }
}
