use num::complex::Complex64;

use crate::config::IterParams;
use crate::coord::Viewport;
use crate::error::Result;

/// Outcome of iterating a single sample point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeResult {
    pub did_escape: bool,
    /// Completed iterations of z ← z² + c.
    pub iterations: u32,
    /// Smoothed escape count. Only meaningful when `did_escape` is set.
    pub continuous_count: f64,
    /// |z|² after the last iteration.
    pub squared_magnitude: f64,
}

impl EscapeResult {
    pub fn interior(squared_magnitude: f64) -> Self {
        Self {
            did_escape: false,
            iterations: 0,
            continuous_count: 0.0,
            squared_magnitude,
        }
    }
}

/// Quadratic escape-time iteration over validated parameters.
#[derive(Copy, Clone, Debug)]
pub struct EscapeTimeSolver {
    params: IterParams,
}

impl EscapeTimeSolver {
    pub fn new(params: IterParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn solve(&self, c: Complex64) -> EscapeResult {
        let IterParams {
            start_re,
            start_im,
            cutoff,
            max_iterations,
        } = self.params;

        let mut re = start_re;
        let mut im = start_im;
        let mut re2 = re * re;
        let mut im2 = im * im;
        let mut squared_magnitude = re2 + im2;
        let mut iterations = 0;

        while squared_magnitude < cutoff && iterations < max_iterations {
            im = 2.0 * re * im + c.im;
            re = re2 - im2 + c.re;
            re2 = re * re;
            im2 = im * im;
            squared_magnitude = re2 + im2;
            iterations += 1;
        }

        if iterations == max_iterations {
            return EscapeResult {
                iterations,
                ..EscapeResult::interior(squared_magnitude)
            };
        }

        // ln(ln|z|) / ln 2 renormalises the integer count; cutoff > 1 keeps
        // ln|z| positive
        let continuous_count = iterations as f64
            - squared_magnitude.sqrt().ln().ln() / std::f64::consts::LN_2;
        EscapeResult {
            did_escape: true,
            iterations,
            continuous_count,
            squared_magnitude,
        }
    }

    pub fn estimate(&self, x: u32, y: u32, viewport: &Viewport) -> EscapeResult {
        self.solve(viewport.pixel_to_complex(x, y))
    }
}

/// Iterate the sample point of pixel `(x, y)`.
pub fn estimate(x: u32, y: u32, viewport: &Viewport, params: &IterParams) -> Result<EscapeResult> {
    viewport.validate()?;
    Ok(EscapeTimeSolver::new(*params)?.estimate(x, y, viewport))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{ConfigError, Error};

    fn solver(cutoff: f64, max_iterations: u32) -> EscapeTimeSolver {
        EscapeTimeSolver::new(IterParams::new(0.0, 0.0, cutoff, max_iterations)).unwrap()
    }

    #[test]
    fn test_origin_is_interior() {
        let viewport = Viewport::new(-2.0, 2.0, 4.0, 100);
        let params = IterParams::new(0.0, 0.0, 4.0, 100);
        let result = estimate(50, 50, &viewport, &params).unwrap();
        assert!(!result.did_escape);
        assert_eq!(result.iterations, 100);

        let result = solver(4.0, 100).solve(Complex64::new(0.0, 0.0));
        assert!(!result.did_escape);
        assert_eq!(result.squared_magnitude, 0.0);
    }

    #[test]
    fn test_immediate_escape() {
        let result = solver(4.0, 100).solve(Complex64::new(2.0, 2.0));
        assert!(result.did_escape);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.squared_magnitude, 8.0);
        let expected = 1.0 - 8f64.sqrt().ln().ln() / std::f64::consts::LN_2;
        assert!((result.continuous_count - expected).abs() < 1e-12);
    }

    #[test]
    fn test_start_outside_cutoff() {
        let params = IterParams::new(3.0, 0.0, 4.0, 100);
        let result = EscapeTimeSolver::new(params)
            .unwrap()
            .solve(Complex64::new(0.0, 0.0));
        assert!(result.did_escape);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.squared_magnitude, 9.0);
    }

    #[test]
    fn test_pixel_mapping() {
        // pixel (3, 1) of a 4x4 canvas over [-2, 2]² samples (1.5, 0.5)
        let viewport = Viewport::new(-2.0, 2.0, 4.0, 4);
        let s = solver(4.0, 50);
        assert_eq!(
            s.estimate(3, 1, &viewport),
            s.solve(Complex64::new(1.5, 0.5))
        );
    }

    #[test]
    fn test_escaped_counts_stable_under_more_iterations() {
        let viewport = Viewport::new(-2.0, 1.5, 3.0, 40);
        let low = solver(100.0, 30);
        let high = solver(100.0, 300);
        let mut newly_escaped = 0;
        for x in 0..40 {
            for y in 0..40 {
                let a = low.estimate(x, y, &viewport);
                let b = high.estimate(x, y, &viewport);
                if a.did_escape {
                    assert_eq!(a, b);
                } else if b.did_escape {
                    newly_escaped += 1;
                }
            }
        }
        assert!(newly_escaped > 0);
    }

    #[test]
    fn test_continuous_count_is_finite() {
        let s = solver(100.0, 200);
        let viewport = Viewport::default().with_canvas_size(64);
        for x in 0..64 {
            for y in 0..64 {
                let r = s.estimate(x, y, &viewport);
                if r.did_escape {
                    assert!(r.continuous_count.is_finite());
                    assert!(r.squared_magnitude >= 100.0);
                }
            }
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let viewport = Viewport::default();
        let params = IterParams::new(0.0, 0.0, 1.0, 100);
        match estimate(0, 0, &viewport, &params) {
            Err(Error::InvalidConfig(ConfigError::Cutoff(c))) => assert_eq!(c, 1.0),
            other => panic!("unexpected {:?}", other),
        }
        let viewport = Viewport::new(-2.0, 2.0, -4.0, 10);
        assert!(estimate(0, 0, &viewport, &IterParams::default()).is_err());
    }
}
