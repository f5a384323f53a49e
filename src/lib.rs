//! Escape-time rendering of the Mandelbrot set with smooth hue coloring.
//!
//! A [`Session`] owns one viewport, one set of iteration parameters and the
//! pixel buffer they render into. Sessions share nothing, so an on-screen
//! preview and an off-screen export can be alive at the same time.
use std::path::Path;

use log::debug;

use crate::buffer::PixelBuffer;
use crate::config::{IterParams, RenderConfig, Target};
use crate::coord::Viewport;
use crate::frame::RenderOutcome;
use crate::painter::Palette;
use crate::present::{Presenter, Rect};

pub mod bench;
pub mod buffer;
pub mod config;
pub mod coord;
pub mod error;
pub mod export;
pub mod frame;
pub mod painter;
pub mod present;
pub mod solver;

pub use crate::error::{ConfigError, Error, Result};

pub struct Session {
    viewport: Viewport,
    params: IterParams,
    target: Target,
    palette: Palette,
    buffer: PixelBuffer,
}

impl Session {
    /// Validate `config` and allocate the session's buffer.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let buffer = PixelBuffer::allocate(config.viewport.canvas_size)?;
        debug!(
            "new {:?} session, canvas {}",
            config.target, config.viewport.canvas_size
        );
        Ok(Self {
            viewport: config.viewport,
            params: config.params,
            target: config.target,
            palette: Palette::default(),
            buffer,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> RenderConfig {
        RenderConfig::new(self.viewport, self.params, self.target)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn params(&self) -> &IterParams {
        &self.params
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Render the current view. In display mode each finished column is
    /// handed to `presenter`, which may stop the render by returning `false`.
    /// Off-screen sessions never call the presenter.
    pub fn render<P>(&mut self, presenter: &mut P) -> Result<RenderOutcome>
    where
        P: Presenter + ?Sized,
    {
        match self.target {
            Target::Display => frame::render_with(
                &self.palette,
                &self.viewport,
                &self.params,
                &mut self.buffer,
                |buffer, x| presenter.present(buffer, Rect::column(x, buffer.size())),
            ),
            Target::OffScreen => self.render_offscreen(),
        }
    }

    /// Render the current view without presenting anything.
    pub fn render_offscreen(&mut self) -> Result<RenderOutcome> {
        frame::render_with(
            &self.palette,
            &self.viewport,
            &self.params,
            &mut self.buffer,
            |_, _| true,
        )
    }

    /// Replace the viewport. The buffer is reallocated if the canvas size
    /// changes and blanked otherwise. Takes effect on the next render.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        viewport.validate()?;
        if viewport.canvas_size != self.buffer.size() {
            self.buffer = PixelBuffer::allocate(viewport.canvas_size)?;
        } else {
            // the old frame belongs to the old view
            self.buffer.clear();
        }
        debug!(
            "viewport centered on {} with side {}, canvas {}",
            viewport.center(),
            viewport.side_length,
            viewport.canvas_size
        );
        self.viewport = viewport;
        Ok(())
    }

    pub fn set_params(&mut self, params: IterParams) -> Result<()> {
        RenderConfig::new(self.viewport, params, self.target).validate()?;
        self.params = params;
        Ok(())
    }

    pub fn zoom_at(&mut self, x: u32, y: u32, factor: f64) -> Result<()> {
        let mut viewport = self.viewport;
        viewport.zoom_at(x, y, factor);
        self.set_viewport(viewport)
    }

    pub fn pan(&mut self, dx: i64, dy: i64) -> Result<()> {
        let mut viewport = self.viewport;
        viewport.pan(dx, dy);
        self.set_viewport(viewport)
    }

    /// Change the canvas resolution, keeping the same region of the plane.
    pub fn resize(&mut self, canvas_size: u32) -> Result<()> {
        self.set_viewport(self.viewport.with_canvas_size(canvas_size))
    }

    /// Write the buffer as it currently is to a bitmap file.
    pub fn save<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        export::save_bitmap(&self.buffer, path)
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    pub fn release(self) {
        self.buffer.release();
    }
}
