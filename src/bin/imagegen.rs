use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use structopt::StructOpt;

use smoothbrot::buffer::PixelBuffer;
use smoothbrot::config::{iteration_ramp, IterParams, RenderConfig, Target};
use smoothbrot::coord::Viewport;
use smoothbrot::export;
use smoothbrot::painter::Palette;
use smoothbrot::present::{Presenter, Rect};
use smoothbrot::Session;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "smoothbrot-imagegen",
    about = "Render the Mandelbrot set to a 24-bit bitmap"
)]
struct Opt {
    /// Real part of the left edge of the view
    #[structopt(long, default_value = "-2.0", allow_hyphen_values = true)]
    border_left: f64,
    /// Imaginary part of the top edge of the view
    #[structopt(long, default_value = "2.0", allow_hyphen_values = true)]
    border_top: f64,
    /// Width and height of the view in the complex plane
    #[structopt(long, default_value = "4.0")]
    side_length: f64,
    /// Initial z, real part
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    start_re: f64,
    /// Initial z, imaginary part
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    start_im: f64,
    /// Escape threshold for |z|², must be greater than 1
    #[structopt(long, default_value = "100.0")]
    cutoff: f64,
    #[structopt(long, short = "i", default_value = "250")]
    max_iterations: u32,
    /// Image width and height in pixels
    #[structopt(long, short = "s", default_value = "500")]
    canvas_size: u32,
    /// Coloring: hue or grey
    #[structopt(long, default_value = "hue")]
    palette: Palette,
    /// Present columns as they finish instead of rendering off-screen
    #[structopt(long)]
    display: bool,
    /// In display mode, warm up with this many frames of increasing iterations
    #[structopt(long, default_value = "0")]
    ramp: u32,
    #[structopt(long, short = "o", parse(from_os_str), default_value = "fractal.bmp")]
    output: PathBuf,
}

impl Opt {
    fn config(&self) -> RenderConfig {
        RenderConfig::new(
            Viewport::new(
                self.border_left,
                self.border_top,
                self.side_length,
                self.canvas_size,
            ),
            IterParams::new(self.start_re, self.start_im, self.cutoff, self.max_iterations),
            if self.display {
                Target::Display
            } else {
                Target::OffScreen
            },
        )
    }
}

/// Stands in for a window: reports progress through the log.
struct ProgressLog {
    last_decile: u32,
}

impl Presenter for ProgressLog {
    fn present(&mut self, buffer: &PixelBuffer, rect: Rect) -> bool {
        let decile = (rect.x2 + 1) * 10 / buffer.size();
        if decile > self.last_decile {
            info!("{}% of columns presented", decile * 10);
            self.last_decile = decile;
        }
        true
    }
}

fn display(config: RenderConfig, palette: Palette, ramp: u32, output: &Path) -> Result<()> {
    let final_params = config.params;
    let mut session = Session::new(config)
        .context("invalid render configuration")?
        .with_palette(palette);

    for max_iterations in iteration_ramp(final_params.max_iterations, ramp) {
        session.set_params(final_params.with_max_iterations(max_iterations))?;
        info!("frame with {} iterations", max_iterations);
        session.render(&mut ProgressLog { last_decile: 0 })?;
    }
    if ramp == 0 {
        session.render(&mut ProgressLog { last_decile: 0 })?;
    }

    session
        .save(output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    let config = opt.config();

    if opt.display {
        display(config, opt.palette, opt.ramp, &opt.output)?;
    } else {
        let outcome = export::render_to_file(&config, opt.palette, &opt.output)
            .with_context(|| format!("failed to render {}", opt.output.display()))?;
        info!("{} pixels escaped", outcome.escaped);
    }
    Ok(())
}
