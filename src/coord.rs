use num::complex::Complex64;

use crate::error::ConfigError;

/// Square window onto the complex plane.
///
/// The canvas is `canvas_size` pixels on each side. Pixel `(x, y)` samples the
/// point at its center, so `(0, 0)` is half a pixel right of `border_left` and
/// half a pixel below `border_top`. The imaginary axis points up, pixel rows go
/// down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub border_left: f64,
    pub border_top: f64,
    pub side_length: f64,
    pub canvas_size: u32,
}

impl Viewport {
    pub fn new(border_left: f64, border_top: f64, side_length: f64, canvas_size: u32) -> Self {
        Self {
            border_left,
            border_top,
            side_length,
            canvas_size,
        }
    }

    /// Viewport centered on `(re, im)`.
    pub fn centered(re: f64, im: f64, side_length: f64, canvas_size: u32) -> Self {
        let half = side_length / 2.0;
        Self::new(re - half, im + half, side_length, canvas_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size == 0 {
            return Err(ConfigError::CanvasSize);
        }
        if !self.border_left.is_finite() {
            return Err(ConfigError::NotFinite("border left"));
        }
        if !self.border_top.is_finite() {
            return Err(ConfigError::NotFinite("border top"));
        }
        if !(self.side_length.is_finite() && self.side_length > 0.0) {
            return Err(ConfigError::SideLength(self.side_length));
        }
        Ok(())
    }

    /// Width of one pixel in the complex plane.
    pub fn pixel_step(&self) -> f64 {
        self.side_length / self.canvas_size as f64
    }

    pub fn pixel_to_complex(&self, x: u32, y: u32) -> Complex64 {
        let step = self.pixel_step();
        Complex64::new(
            self.border_left + (x as f64 + 0.5) * step,
            self.border_top - (y as f64 + 0.5) * step,
        )
    }

    pub fn center(&self) -> Complex64 {
        let half = self.side_length / 2.0;
        Complex64::new(self.border_left + half, self.border_top - half)
    }

    /// Scale the side length by `factor` while keeping the point sampled by
    /// pixel `(x, y)` where it is. A factor below 1 zooms in.
    pub fn zoom_at(&mut self, x: u32, y: u32, factor: f64) {
        let anchor = self.pixel_to_complex(x, y);
        self.side_length *= factor;
        let step = self.pixel_step();
        self.border_left = anchor.re - (x as f64 + 0.5) * step;
        self.border_top = anchor.im + (y as f64 + 0.5) * step;
    }

    /// Move the view by whole pixels: afterwards pixel `(0, 0)` samples what
    /// pixel `(dx, dy)` sampled before.
    pub fn pan(&mut self, dx: i64, dy: i64) {
        let step = self.pixel_step();
        self.border_left += dx as f64 * step;
        self.border_top -= dy as f64 * step;
    }

    /// Same region of the plane at a different resolution.
    pub fn with_canvas_size(&self, canvas_size: u32) -> Self {
        Self {
            canvas_size,
            ..*self
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(-2.0, 2.0, 4.0, 500)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn test_origin_pixel() {
        let v = Viewport::new(-2.0, 2.0, 4.0, 100);
        assert!(close(v.pixel_to_complex(50, 50), Complex64::new(0.02, -0.02)));
        assert!(close(v.pixel_to_complex(0, 0), Complex64::new(-1.98, 1.98)));
        assert!(close(v.center(), Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_centered() {
        let v = Viewport::centered(-0.5, 0.25, 3.0, 300);
        assert_eq!(v.border_left, -2.0);
        assert_eq!(v.border_top, 1.75);
        assert!(close(v.center(), Complex64::new(-0.5, 0.25)));
    }

    #[test]
    fn test_validate() {
        assert!(Viewport::default().validate().is_ok());
        assert_eq!(
            Viewport::new(-2.0, 2.0, 4.0, 0).validate(),
            Err(ConfigError::CanvasSize)
        );
        assert_eq!(
            Viewport::new(-2.0, 2.0, 0.0, 10).validate(),
            Err(ConfigError::SideLength(0.0))
        );
        assert_eq!(
            Viewport::new(-2.0, 2.0, -1.0, 10).validate(),
            Err(ConfigError::SideLength(-1.0))
        );
        assert_eq!(
            Viewport::new(f64::NAN, 2.0, 4.0, 10).validate(),
            Err(ConfigError::NotFinite("border left"))
        );
    }

    #[test]
    fn test_zoom_keeps_anchor() {
        let mut v = Viewport::default();
        let before = v.pixel_to_complex(120, 310);
        v.zoom_at(120, 310, 0.25);
        assert_eq!(v.side_length, 1.0);
        assert!(close(v.pixel_to_complex(120, 310), before));
    }

    #[test]
    fn test_pan() {
        let mut v = Viewport::new(-2.0, 2.0, 4.0, 100);
        let target = v.pixel_to_complex(30, 40);
        v.pan(30, 40);
        assert!(close(v.pixel_to_complex(0, 0), target));
        v.pan(-30, -40);
        assert!(close(v.pixel_to_complex(0, 0), Complex64::new(-1.98, 1.98)));
    }

    #[test]
    fn test_with_canvas_size() {
        let v = Viewport::default().with_canvas_size(2000);
        assert_eq!(v.canvas_size, 2000);
        assert!(close(v.center(), Viewport::default().center()));
    }
}
