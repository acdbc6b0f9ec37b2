//! Screen capture seam.

use std::path::Path;

use boardsight_core::{Point, Quad};
use image::DynamicImage;

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("capture region {rect} is outside the {width}x{height} screen image")]
    OutOfBounds { rect: Quad, width: u32, height: u32 },
    #[error("capture returned {got_w}x{got_h}, requested {want_w}x{want_h}")]
    SizeMismatch {
        want_w: u32,
        want_h: u32,
        got_w: u32,
        got_h: u32,
    },
    #[error("capture backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Returns the raster currently shown inside a screen rectangle.
///
/// Implementations must return exactly `rect.width() × rect.height()` pixels,
/// 8 bits per channel; alpha is allowed.
pub trait ImageSource {
    fn capture(&self, rect: &Quad) -> Result<DynamicImage, CaptureError>;
}

/// Capture through `source` and verify the raster size against `rect`.
pub fn capture_checked(source: &dyn ImageSource, rect: &Quad) -> Result<DynamicImage, CaptureError> {
    let img = source.capture(rect)?;
    let (want_w, want_h) = (rect.width() as u32, rect.height() as u32);
    if (img.width(), img.height()) != (want_w, want_h) {
        return Err(CaptureError::SizeMismatch {
            want_w,
            want_h,
            got_w: img.width(),
            got_h: img.height(),
        });
    }
    Ok(img)
}

/// Image source backed by a still screenshot.
///
/// `origin` is the screen coordinate of the screenshot's top-left pixel,
/// `(0, 0)` for a capture of the primary display.
#[derive(Clone, Debug)]
pub struct ScreenshotSource {
    image: DynamicImage,
    origin: Point,
}

impl ScreenshotSource {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            origin: Point::new(0, 0),
        }
    }

    /// Decode a screenshot file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        Ok(Self::new(image::open(path)?))
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

impl ImageSource for ScreenshotSource {
    fn capture(&self, rect: &Quad) -> Result<DynamicImage, CaptureError> {
        let (width, height) = (self.image.width(), self.image.height());
        let x = i64::from(rect.left()) - i64::from(self.origin.x);
        let y = i64::from(rect.top()) - i64::from(self.origin.y);
        let (w, h) = (i64::from(rect.width()), i64::from(rect.height()));
        if x < 0 || y < 0 || x + w > i64::from(width) || y + h > i64::from(height) {
            return Err(CaptureError::OutOfBounds {
                rect: *rect,
                width,
                height,
            });
        }
        Ok(self.image.crop_imm(x as u32, y as u32, w as u32, h as u32))
    }
}
