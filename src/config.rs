use log::warn;

use crate::coord::Viewport;
use crate::error::ConfigError;

/// Parameters of the escape-time iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterParams {
    /// Initial value of z, real part.
    pub start_re: f64,
    /// Initial value of z, imaginary part.
    pub start_im: f64,
    /// Escape threshold, compared against |z|².
    pub cutoff: f64,
    pub max_iterations: u32,
}

impl IterParams {
    pub fn new(start_re: f64, start_im: f64, cutoff: f64, max_iterations: u32) -> Self {
        Self {
            start_re,
            start_im,
            cutoff,
            max_iterations,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_re.is_finite() {
            return Err(ConfigError::NotFinite("start re"));
        }
        if !self.start_im.is_finite() {
            return Err(ConfigError::NotFinite("start im"));
        }
        // the smooth count takes ln(ln(|z|)) at escape, which needs |z| > 1
        if !(self.cutoff.is_finite() && self.cutoff > 1.0) {
            return Err(ConfigError::Cutoff(self.cutoff));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        Ok(())
    }

    pub fn with_max_iterations(&self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..*self
        }
    }
}

impl Default for IterParams {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 250)
    }
}

/// Where a session's frames go.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Target {
    /// Completed columns are handed to a presenter as they finish.
    #[default]
    Display,
    /// Nothing is presented; the buffer is only read after the render.
    OffScreen,
}

/// Everything a render needs, passed explicitly to every entry point.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct RenderConfig {
    pub viewport: Viewport,
    pub params: IterParams,
    pub target: Target,
}

impl RenderConfig {
    pub fn new(viewport: Viewport, params: IterParams, target: Target) -> Self {
        Self {
            viewport,
            params,
            target,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        self.params.validate()?;
        let IterParams {
            start_re, start_im, ..
        } = self.params;
        if start_re * start_re + start_im * start_im > 4.0 {
            warn!(
                "start point ({}, {}) lies outside the radius 2 disc, most of the plane will escape at once",
                start_re, start_im
            );
        }
        Ok(())
    }

    pub fn off_screen(&self) -> Self {
        Self {
            target: Target::OffScreen,
            ..*self
        }
    }
}

/// Iteration limits for a warm-up sequence of frames: `steps` increasing
/// values, the last of which is exactly `final_iterations`. Repeated values
/// are dropped, so short ramps to small limits yield fewer frames.
pub fn iteration_ramp(final_iterations: u32, steps: u32) -> Vec<u32> {
    if final_iterations == 0 {
        return vec![];
    }
    if steps == 0 {
        return vec![final_iterations];
    }
    let total = final_iterations as u64;
    let steps = steps as u64;
    let mut ramp: Vec<u32> = (1..=steps)
        .map(|i| ((total * i + steps - 1) / steps).max(1) as u32)
        .collect();
    ramp.dedup();
    ramp
}
