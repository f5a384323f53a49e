use std::path::Path;

use image::ImageFormat;
use log::info;

use crate::buffer::PixelBuffer;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::frame::RenderOutcome;
use crate::painter::Palette;
use crate::Session;

/// Write `buffer` as an uncompressed 24-bit bitmap.
pub fn save_bitmap<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    buffer.image().save_with_format(path, ImageFormat::Bmp)?;
    info!(
        "saved {}x{} bitmap to {}",
        buffer.size(),
        buffer.size(),
        path.display()
    );
    Ok(())
}

/// Render `config` off-screen, save it to `path` and free the buffer.
///
/// The session used here is independent of any other, so this can run while
/// a display session is open at a different resolution.
pub fn render_to_file<P: AsRef<Path>>(
    config: &RenderConfig,
    palette: Palette,
    path: P,
) -> Result<RenderOutcome> {
    let mut session = Session::new(config.off_screen())?.with_palette(palette);
    let outcome = session.render_offscreen()?;
    session.save(path)?;
    session.release();
    Ok(outcome)
}
