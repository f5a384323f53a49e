use image::Rgb;

use crate::solver::EscapeResult;

pub const INTERIOR: Rgb<u8> = Rgb([0, 0, 0]);

const ONE_THIRD: f64 = 1.0 / 3.0;

/// Convert hue, saturation and lightness to 8-bit RGB.
///
/// A saturation of zero gives black rather than a grey. The red channel is
/// sampled at `h + 1/3` and blue at `h - 1/3`; each phase is wrapped into
/// the unit interval at most once, so `h` is expected to lie within one
/// period of `[0, 1)`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb<u8> {
    if s == 0.0 {
        return INTERIOR;
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb([
        channel(hue_to_rgb(p, q, h + ONE_THIRD)),
        channel(hue_to_rgb(p, q, h)),
        channel(hue_to_rgb(p, q, h - ONE_THIRD)),
    ])
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    } else if t >= 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

pub trait Painter {
    /// Color of a point that escaped after `count` (smoothed) iterations.
    fn escape_color(&self, count: f64, max_iterations: u32) -> Rgb<u8>;

    fn color(&self, result: &EscapeResult, max_iterations: u32) -> Rgb<u8> {
        if result.did_escape {
            self.escape_color(result.continuous_count, max_iterations)
        } else {
            INTERIOR
        }
    }
}

/// Hue proportional to the escape count, fully saturated.
#[derive(Copy, Clone, Debug, Default)]
pub struct SmoothHue;

impl Painter for SmoothHue {
    fn escape_color(&self, count: f64, max_iterations: u32) -> Rgb<u8> {
        hsl_to_rgb(count / max_iterations as f64, 1.0, 0.5)
    }
}

/// White for points that escape at once, darkening towards the limit.
#[derive(Copy, Clone, Debug, Default)]
pub struct Greyscale;

impl Painter for Greyscale {
    fn escape_color(&self, count: f64, max_iterations: u32) -> Rgb<u8> {
        let frac = (count / max_iterations as f64).clamp(0.0, 1.0);
        let v = 255 - (frac * 255.0).round() as u8;
        Rgb([v, v, v])
    }
}

/// Painter chosen at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Hue,
    Grey,
}

impl Painter for Palette {
    fn escape_color(&self, count: f64, max_iterations: u32) -> Rgb<u8> {
        match self {
            Palette::Hue => SmoothHue.escape_color(count, max_iterations),
            Palette::Grey => Greyscale.escape_color(count, max_iterations),
        }
    }
}

impl std::str::FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hue" => Ok(Palette::Hue),
            "grey" | "gray" => Ok(Palette::Grey),
            other => Err(format!("unknown palette '{}', expected hue or grey", other)),
        }
    }
}
