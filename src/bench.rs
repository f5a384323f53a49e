//! Minimal timing harness used by the `benches/` targets.
use std::fs;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n.max(1),
        }
    }

    pub fn once<F: Fn() + 'static>(name: &str, f: F) -> Self {
        Self::iter(name, 1, f)
    }

    pub fn run(&self) -> Timing {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        Timing {
            name: self.name.clone(),
            iterations: self.iterations,
            total: start.elapsed(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Timing {
    pub name: String,
    pub iterations: usize,
    pub total: Duration,
}

impl Timing {
    pub fn per_call(&self) -> Duration {
        self.total / self.iterations as u32
    }
}

#[derive(Default)]
pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    timings: Vec<Timing>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: &[Benchmark]) -> Self {
        Self {
            benches: benches.to_vec(),
            timings: vec![],
        }
    }

    pub fn add_bench(&mut self, bench: Benchmark) {
        self.benches.push(bench);
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            self.timings.push(bench.run());
            print!(".");
            let _ = stdout().flush();
        }
        println!("\n");
    }

    pub fn timings(&self) -> &[Timing] {
        &self.timings
    }

    pub fn show(&self) {
        for t in &self.timings {
            println!(
                "{}\n  per call: {}μs\n  total: {}ms\n",
                t.name,
                t.per_call().as_micros(),
                t.total.as_millis()
            );
        }
    }

    pub fn write_csv(&self, filename: &str) -> io::Result<()> {
        let mut csv = String::from("benchmark,per_call_us,iterations,total_ms\n");
        for t in &self.timings {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                t.name,
                t.per_call().as_micros(),
                t.iterations,
                t.total.as_millis()
            ));
        }
        fs::write(filename, csv)
    }

    /// Run everything, print the timings and write them to `bench-<name>.csv`.
    pub fn report(&mut self, name: &str) {
        self.run();
        self.show();
        let filename = format!("bench-{}.csv", name);
        if let Err(e) = self.write_csv(&filename) {
            eprintln!("could not write {}: {}", filename, e);
        }
    }
}
