use image::RgbImage;
use log::{debug, warn};

use crate::buffer::PixelBuffer;

/// Inclusive pixel rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Rect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Column `x` of a `size` square canvas.
    pub fn column(x: u32, size: u32) -> Self {
        Self::new(x, 0, x, size - 1)
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }

    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn fits(&self, size: u32) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 < size && self.y2 < size
    }
}

/// Copies finished parts of a pixel buffer to a display.
///
/// `present` reads exactly the pixels of `rect` and must not keep the buffer
/// beyond the call. Returning `false` asks the renderer to stop after the
/// current slice.
pub trait Presenter {
    fn present(&mut self, buffer: &PixelBuffer, rect: Rect) -> bool;
}

/// In-memory display texture. Presented rectangles are copied into it row by
/// row at the buffer's stride. The texture follows the buffer's size: when a
/// differently sized buffer is presented it is recreated, blank.
#[derive(Clone, Debug)]
pub struct Surface {
    texture: RgbImage,
    presents: usize,
    pixels_copied: u64,
}

impl Surface {
    pub fn new(size: u32) -> Self {
        Self {
            texture: RgbImage::new(size, size),
            presents: 0,
            pixels_copied: 0,
        }
    }

    pub fn texture(&self) -> &RgbImage {
        &self.texture
    }

    /// Number of rectangles presented so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn pixels_copied(&self) -> u64 {
        self.pixels_copied
    }
}

impl Presenter for Surface {
    fn present(&mut self, buffer: &PixelBuffer, rect: Rect) -> bool {
        if !rect.fits(buffer.size()) {
            warn!(
                "rectangle {:?} lies outside the {}x{} buffer, stopping",
                rect,
                buffer.size(),
                buffer.size()
            );
            return false;
        }
        if self.texture.width() != buffer.size() {
            debug!(
                "recreating surface texture at {}x{}",
                buffer.size(),
                buffer.size()
            );
            self.texture = RgbImage::new(buffer.size(), buffer.size());
        }
        let stride = self.texture.width() as usize * 3;
        let texture: &mut [u8] = &mut self.texture;
        for y in rect.y1..=rect.y2 {
            let span = buffer.row_span(y, rect.x1, rect.x2);
            let start = y as usize * stride + rect.x1 as usize * 3;
            texture[start..start + span.len()].copy_from_slice(span);
        }
        self.presents += 1;
        self.pixels_copied += rect.pixel_count();
        true
    }
}

#[cfg(test)]
mod test {
    use image::Rgb;

    use super::*;

    #[test]
    fn test_rect() {
        let r = Rect::column(3, 10);
        assert_eq!(r, Rect::new(3, 0, 3, 9));
        assert_eq!(r.width(), 1);
        assert_eq!(r.height(), 10);
        assert_eq!(r.pixel_count(), 10);
        assert_eq!(Rect::new(0, 0, 3, 3).pixel_count(), 16);
        assert!(r.fits(10));
        assert!(!r.fits(9));
        assert!(!Rect::new(2, 0, 1, 0).fits(10));
    }

    #[test]
    fn test_surface_copies_only_rect() {
        let mut buffer = PixelBuffer::allocate(4).unwrap();
        for x in 0..4 {
            for y in 0..4 {
                buffer.write_pixel(x, y, Rgb([x as u8 + 1, y as u8 + 1, 9]));
            }
        }
        let mut surface = Surface::new(4);
        assert!(surface.present(&buffer, Rect::new(1, 1, 2, 3)));
        assert_eq!(surface.presents(), 1);
        assert_eq!(surface.pixels_copied(), 6);
        for x in 0..4 {
            for y in 0..4 {
                let expected = if (1..=2).contains(&x) && (1..=3).contains(&y) {
                    Rgb([x as u8 + 1, y as u8 + 1, 9])
                } else {
                    Rgb([0, 0, 0])
                };
                assert_eq!(surface.texture().get_pixel(x, y), &expected);
            }
        }
    }

    #[test]
    fn test_surface_stops_on_rect_outside_buffer() {
        let buffer = PixelBuffer::allocate(4).unwrap();
        let mut surface = Surface::new(4);
        assert!(!surface.present(&buffer, Rect::new(0, 0, 4, 4)));
        assert_eq!(surface.presents(), 0);
        assert_eq!(surface.pixels_copied(), 0);
    }

    #[test]
    fn test_surface_follows_buffer_size() {
        let mut small = PixelBuffer::allocate(4).unwrap();
        small.write_pixel(0, 3, Rgb([1, 1, 1]));
        let mut surface = Surface::new(4);
        assert!(surface.present(&small, Rect::column(0, 4)));

        let mut large = PixelBuffer::allocate(9).unwrap();
        large.write_pixel(8, 8, Rgb([5, 6, 7]));
        assert!(surface.present(&large, Rect::column(8, 9)));
        assert_eq!(surface.texture().dimensions(), (9, 9));
        assert_eq!(surface.texture().get_pixel(8, 8), &Rgb([5, 6, 7]));
        // the recreated texture starts blank
        assert_eq!(surface.texture().get_pixel(0, 3), &Rgb([0, 0, 0]));
        assert_eq!(surface.presents(), 2);
    }
}
