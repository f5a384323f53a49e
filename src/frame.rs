use std::time::Instant;

use log::{debug, info, trace};

use crate::buffer::PixelBuffer;
use crate::config::IterParams;
use crate::coord::Viewport;
use crate::error::{Error, Result};
use crate::painter::{Painter, SmoothHue};
use crate::solver::EscapeTimeSolver;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Columns fully written to the buffer.
    pub columns: u32,
    /// Whether every column was written.
    pub completed: bool,
    /// Pixels in the written columns whose sample point escaped.
    pub escaped: u64,
}

/// Render `viewport` into `buffer` with the smooth hue painter.
///
/// See [`render_with`].
pub fn render<F>(
    viewport: &Viewport,
    params: &IterParams,
    buffer: &mut PixelBuffer,
    on_column: F,
) -> Result<RenderOutcome>
where
    F: FnMut(&PixelBuffer, u32) -> bool,
{
    render_with(&SmoothHue, viewport, params, buffer, on_column)
}

/// Render `viewport` into `buffer`, one column at a time.
///
/// `on_column` is called with the buffer and the column index once every
/// pixel of that column is written. Returning `false` stops the render
/// after that column. The configuration is checked before the buffer is
/// touched.
pub fn render_with<P, F>(
    painter: &P,
    viewport: &Viewport,
    params: &IterParams,
    buffer: &mut PixelBuffer,
    mut on_column: F,
) -> Result<RenderOutcome>
where
    P: Painter + ?Sized,
    F: FnMut(&PixelBuffer, u32) -> bool,
{
    viewport.validate()?;
    let solver = EscapeTimeSolver::new(*params)?;
    let size = viewport.canvas_size;
    if buffer.size() != size {
        return Err(Error::BufferSize {
            buffer: buffer.size(),
            canvas: size,
        });
    }

    debug!(
        "rendering {}x{} from ({}, {}) side {} with {} iterations",
        size,
        size,
        viewport.border_left,
        viewport.border_top,
        viewport.side_length,
        params.max_iterations
    );
    let start = Instant::now();
    let mut escaped = 0;

    for x in 0..size {
        for y in 0..size {
            let result = solver.estimate(x, y, viewport);
            if result.did_escape {
                escaped += 1;
            }
            buffer.write_pixel(x, y, painter.color(&result, params.max_iterations));
        }
        trace!("column {} done", x);
        if !on_column(&*buffer, x) {
            let columns = x + 1;
            info!(
                "render stopped after {} of {} columns in {:?}",
                columns,
                size,
                start.elapsed()
            );
            return Ok(RenderOutcome {
                columns,
                completed: columns == size,
                escaped,
            });
        }
    }

    info!(
        "rendered {}x{} in {:?}, {} pixels escaped",
        size,
        size,
        start.elapsed(),
        escaped
    );
    Ok(RenderOutcome {
        columns: size,
        completed: true,
        escaped,
    })
}
