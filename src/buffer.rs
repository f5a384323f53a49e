use image::{Rgb, RgbImage};
use log::trace;

use crate::error::{ConfigError, Error, Result};

const CHANNELS: usize = 3;

/// Square RGB raster, row-major with a stride of `size * 3` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Zero-filled buffer for a `canvas_size` square canvas. Reports an
    /// allocation failure instead of aborting.
    pub fn allocate(canvas_size: u32) -> Result<Self> {
        if canvas_size == 0 {
            return Err(ConfigError::CanvasSize.into());
        }
        let side = canvas_size as usize;
        let bytes = side
            .checked_mul(side)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::Allocation { bytes: usize::MAX })?;

        let mut raw: Vec<u8> = Vec::new();
        raw.try_reserve_exact(bytes)
            .map_err(|_| Error::Allocation { bytes })?;
        raw.resize(bytes, 0);

        let image = RgbImage::from_raw(canvas_size, canvas_size, raw)
            .ok_or(Error::Allocation { bytes })?;
        trace!("allocated {}x{} pixel buffer", canvas_size, canvas_size);
        Ok(Self { image })
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.size() as usize * CHANNELS
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * CHANNELS
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.size() && y < self.size()
    }

    /// Write without a bounds check; the caller keeps both coordinates below
    /// `size()`. An `x` past the edge lands in the following row, and a `y`
    /// past the last row panics on the slice index.
    #[inline]
    pub fn write_pixel(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        let i = self.offset(x, y);
        let raw: &mut [u8] = &mut self.image;
        raw[i..i + CHANNELS].copy_from_slice(&color.0);
    }

    pub fn try_write_pixel(&mut self, x: u32, y: u32, color: Rgb<u8>) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                size: self.size(),
            });
        }
        self.write_pixel(x, y, color);
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if self.contains(x, y) {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Bytes of row `y` from column `x1` to `x2`, both inclusive.
    pub fn row_span(&self, y: u32, x1: u32, x2: u32) -> &[u8] {
        let start = self.offset(x1, y);
        let end = self.offset(x2, y) + CHANNELS;
        &self.image.as_raw()[start..end]
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn clear(&mut self) {
        let raw: &mut [u8] = &mut self.image;
        raw.fill(0);
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Free the buffer now rather than at the end of the owning scope.
    pub fn release(self) {
        trace!("released {}x{} pixel buffer", self.size(), self.size());
    }
}
