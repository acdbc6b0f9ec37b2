//! Windowed structural similarity (SSIM).
//!
//! Local statistics are taken over every full `window × window` patch with a
//! uniform weight (sample covariance, i.e. divided by `n - 1`), and the final
//! score is the mean of the per-patch index. Window sums come from integral
//! images, so the cost is linear in the pixel count regardless of window size.

use boardsight_core::GrayImageView;
use serde::{Deserialize, Serialize};

/// SSIM constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SsimParams {
    /// Side of the square sliding window; forced odd and clipped to the image.
    pub window: usize,
    pub k1: f64,
    pub k2: f64,
    /// Dynamic range of pixel values.
    pub data_range: f64,
}

impl Default for SsimParams {
    fn default() -> Self {
        Self {
            window: 7,
            k1: 0.01,
            k2: 0.03,
            data_range: 255.0,
        }
    }
}

/// Summed-area table with a zero first row/column.
struct Integral {
    stride: usize,
    data: Vec<f64>,
}

impl Integral {
    fn build(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let stride = width + 1;
        let mut data = vec![0.0; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0.0;
            for x in 0..width {
                row_sum += f(x, y);
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }
        Self { stride, data }
    }

    #[inline]
    fn sum(&self, x: usize, y: usize, w: usize, h: usize) -> f64 {
        let s = self.stride;
        self.data[(y + h) * s + x + w] - self.data[y * s + x + w] - self.data[(y + h) * s + x]
            + self.data[y * s + x]
    }
}

/// Mean SSIM of two equally sized grayscale images, in `[-1, 1]`.
///
/// Returns `None` when sizes differ or an image is empty. When the smaller
/// image side is below 3 px the whole image is scored as a single window.
pub fn mean_ssim(a: &GrayImageView<'_>, b: &GrayImageView<'_>, params: &SsimParams) -> Option<f64> {
    if a.width != b.width || a.height != b.height || a.is_empty() {
        return None;
    }
    let (w, h) = (a.width, a.height);

    let mut win = params.window.min(w).min(h);
    if win % 2 == 0 {
        win = win.saturating_sub(1);
    }
    let (ww, wh) = if win < 3 { (w, h) } else { (win, win) };

    let fa = |x: usize, y: usize| a.get(x, y) as f64;
    let fb = |x: usize, y: usize| b.get(x, y) as f64;
    let s_a = Integral::build(w, h, fa);
    let s_b = Integral::build(w, h, fb);
    let s_aa = Integral::build(w, h, |x, y| fa(x, y) * fa(x, y));
    let s_bb = Integral::build(w, h, |x, y| fb(x, y) * fb(x, y));
    let s_ab = Integral::build(w, h, |x, y| fa(x, y) * fb(x, y));

    let n = (ww * wh) as f64;
    let cov_norm = if n > 1.0 { n / (n - 1.0) } else { 1.0 };
    let c1 = (params.k1 * params.data_range).powi(2);
    let c2 = (params.k2 * params.data_range).powi(2);

    let mut total = 0.0;
    let mut count = 0usize;
    for y in 0..=(h - wh) {
        for x in 0..=(w - ww) {
            let mu_a = s_a.sum(x, y, ww, wh) / n;
            let mu_b = s_b.sum(x, y, ww, wh) / n;
            let var_a = cov_norm * (s_aa.sum(x, y, ww, wh) / n - mu_a * mu_a);
            let var_b = cov_norm * (s_bb.sum(x, y, ww, wh) / n - mu_b * mu_b);
            let cov = cov_norm * (s_ab.sum(x, y, ww, wh) / n - mu_a * mu_b);

            let num = (2.0 * mu_a * mu_b + c1) * (2.0 * cov + c2);
            let den = (mu_a * mu_a + mu_b * mu_b + c1) * (var_a + var_b + c2);
            total += num / den;
            count += 1;
        }
    }

    Some((total / count as f64).clamp(-1.0, 1.0))
}
