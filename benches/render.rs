use smoothbrot::bench::{Benchmark, BenchmarkReport};
use smoothbrot::config::{IterParams, RenderConfig, Target};
use smoothbrot::coord::Viewport;
use smoothbrot::painter::Palette;
use smoothbrot::present::Surface;
use smoothbrot::Session;

const REPEATS: usize = 5;

fn config(size: u32, target: Target) -> RenderConfig {
    RenderConfig::new(
        Viewport::default().with_canvas_size(size),
        IterParams::default(),
        target,
    )
}

fn benchmark_offscreen(size: u32, palette: Palette) -> Benchmark {
    let name = format!("render-offscreen-{}-{:?}", size, palette);
    let f = move || {
        let mut session = Session::new(config(size, Target::OffScreen))
            .expect("valid config")
            .with_palette(palette);
        session.render_offscreen().expect("render");
    };
    Benchmark::iter(&name, REPEATS, f)
}

fn benchmark_display(size: u32) -> Benchmark {
    let name = format!("render-display-{}", size);
    let f = move || {
        let mut session = Session::new(config(size, Target::Display)).expect("valid config");
        let mut surface = Surface::new(size);
        session.render(&mut surface).expect("render");
    };
    Benchmark::iter(&name, REPEATS, f)
}

fn main() {
    BenchmarkReport::with_benches(&[
        benchmark_offscreen(250, Palette::Hue),
        benchmark_offscreen(500, Palette::Hue),
        benchmark_offscreen(1000, Palette::Hue),
        benchmark_offscreen(500, Palette::Grey),
        benchmark_display(250),
        benchmark_display(500),
        benchmark_display(1000),
    ])
    .report("render");
}
