use image::{DynamicImage, GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::threshold::otsu_threshold;

const SOBEL_GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Raster-to-raster transform applied identically to the cell and to each
/// reference before scoring.
///
/// The output channel layout decides how scoring proceeds: single-channel
/// output is scored as one plane, anything else as three RGB planes whose
/// scores are averaged. Alpha is always dropped.
pub trait Preprocess: Send + Sync {
    fn apply(&self, img: &DynamicImage) -> DynamicImage;
}

impl<F> Preprocess for F
where
    F: Fn(&DynamicImage) -> DynamicImage + Send + Sync,
{
    fn apply(&self, img: &DynamicImage) -> DynamicImage {
        self(img)
    }
}

/// Built-in preprocessing strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocessing {
    /// Single-channel luminance.
    #[default]
    Grayscale,
    /// RGB, alpha dropped.
    Color,
    /// Sobel gradient magnitude of the luminance.
    Edges,
    /// Luminance thresholded at its Otsu level to 0/255.
    Binarize,
}

impl Preprocess for Preprocessing {
    fn apply(&self, img: &DynamicImage) -> DynamicImage {
        match self {
            Preprocessing::Grayscale => DynamicImage::ImageLuma8(img.to_luma8()),
            Preprocessing::Color => DynamicImage::ImageRgb8(img.to_rgb8()),
            Preprocessing::Edges => DynamicImage::ImageLuma8(sobel_magnitude(&img.to_luma8())),
            Preprocessing::Binarize => DynamicImage::ImageLuma8(binarize(img.to_luma8())),
        }
    }
}

fn sobel_magnitude(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return gray.clone();
    }
    let at = |x: i64, y: i64| -> i32 {
        let cx = x.clamp(0, w as i64 - 1) as u32;
        let cy = y.clamp(0, h as i64 - 1) as u32;
        gray.get_pixel(cx, cy)[0] as i32
    };
    GrayImage::from_fn(w, h, |x, y| {
        let (mut gx, mut gy) = (0i32, 0i32);
        for (ky, (row_x, row_y)) in SOBEL_GX.iter().zip(SOBEL_GY.iter()).enumerate() {
            for kx in 0..3 {
                let v = at(x as i64 + kx as i64 - 1, y as i64 + ky as i64 - 1);
                gx += row_x[kx] * v;
                gy += row_y[kx] * v;
            }
        }
        let mag = ((gx * gx + gy * gy) as f32).sqrt();
        Luma([mag.min(255.0) as u8])
    })
}

fn binarize(mut gray: GrayImage) -> GrayImage {
    let t = otsu_threshold(gray.as_raw());
    for p in gray.pixels_mut() {
        p[0] = if p[0] > t { 255 } else { 0 };
    }
    gray
}
