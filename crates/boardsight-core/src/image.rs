/// Borrowed row-major 8-bit single-channel image.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a buffer, returning `None` if its length does not match `width * height`.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::GrayImageView;

    #[test]
    fn rejects_mismatched_buffer() {
        let buf = [0u8; 11];
        assert!(GrayImageView::new(3, 4, &buf).is_none());
        let view = GrayImageView::new(3, 4, &[7u8; 12]).unwrap();
        assert_eq!(view.row(3), &[7, 7, 7]);
        assert_eq!(view.get(2, 1), 7);
    }
}
