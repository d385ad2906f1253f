use std::fmt;
use std::time::Instant;

use crate::error::Result;
use crate::simulation::engine::Simulation;
use crate::simulation::forces::{Acceleration, DirectGravity, TiledGravity};
use crate::simulation::params::SimulationConfig;
use crate::simulation::rng::XorShift64Star;
use crate::simulation::scenario::{initialize, Scenario};

/// Task name shared with the sibling benchmarks' result lines
pub const TASK: &str = "nbody_sym";

/// Outcome of one timed run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    pub task: &'static str,
    pub n: usize,
    pub elapsed_ns: u128, // step loop only
    pub energy: f64,      // total energy after the last step
    pub pairs: u64,       // pair interactions inside the step loop
}

impl BenchResult {
    /// Line emitted when the particle arrays could not be allocated
    pub fn failure_line(n: usize) -> String {
        format!("TASK={TASK},N={n},TIME_NS=0,ENERGY=0.0")
    }
}

/// `TASK=nbody_sym,N=<n>,TIME_NS=<ns>,ENERGY=<e>` with 9 fractional digits
impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TASK={},N={},TIME_NS={},ENERGY={:.9}",
            self.task, self.n, self.elapsed_ns, self.energy
        )
    }
}

/// Seeded cloud run
pub fn run_benchmark(config: &SimulationConfig) -> Result<BenchResult> {
    run_scenario(Scenario::random(config.clone()))
}

/// Initialize, prime, time only the step loop, then measure the energy
pub fn run_scenario(scenario: Scenario) -> Result<BenchResult> {
    let steps = scenario.config.steps;
    let mut sim = Simulation::new(scenario)?;
    sim.prime();

    let t0 = Instant::now();
    let pairs = sim.run(steps);
    let elapsed_ns = t0.elapsed().as_nanos();

    let report = sim.energy();
    log::info!(
        "N = {}, {} steps in {} ns, KE = {:.9}, PE = {:.9}",
        sim.system().len(),
        steps,
        elapsed_ns,
        report.kinetic,
        report.potential
    );

    Ok(BenchResult {
        task: TASK,
        n: sim.system().len(),
        elapsed_ns,
        energy: report.total,
        pairs,
    })
}

/// One kernel evaluation timed at a given tile size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTiming {
    pub n: usize,
    pub tile: usize,
    pub ms: f64,
}

/// Time the tiled kernel for each tile size on the same seeded cloud.
/// Prints `N,tile,ms` rows, paste into a spreadsheet to graph.
pub fn bench_tile_sizes(config: &SimulationConfig, tiles: &[usize]) -> Result<Vec<TileTiming>> {
    let template = initialize(config.n as i64, &mut XorShift64Star::new(config.seed))?;
    let mut rows = Vec::with_capacity(tiles.len());

    println!("N,tile,ms");
    for &tile in tiles {
        let kernel = TiledGravity {
            g: config.g,
            eps2: config.eps2,
            tile,
        };
        let mut sys = template.clone();

        // Warm up
        kernel.acceleration(&mut sys);

        let t0 = Instant::now();
        kernel.acceleration(&mut sys);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{},{:.6}", config.n, tile, ms);
        rows.push(TileTiming {
            n: config.n,
            tile,
            ms,
        });
    }
    Ok(rows)
}

/// Tiled against direct kernel time for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelTiming {
    pub n: usize,
    pub tiled_ms: f64,
    pub direct_ms: f64,
}

/// Compare the production kernel with the reference oracle across sizes
pub fn bench_kernels(config: &SimulationConfig, ns: &[usize]) -> Result<Vec<KernelTiming>> {
    let tiled = TiledGravity {
        g: config.g,
        eps2: config.eps2,
        tile: config.tile,
    };
    let direct = DirectGravity {
        g: config.g,
        eps2: config.eps2,
    };
    let mut rows = Vec::with_capacity(ns.len());

    println!("N,tiled_ms,direct_ms");
    for &n in ns {
        let template = initialize(n as i64, &mut XorShift64Star::new(config.seed))?;

        let mut sys = template.clone();
        let t0 = Instant::now();
        tiled.acceleration(&mut sys);
        let tiled_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let mut sys = template;
        let t1 = Instant::now();
        direct.acceleration(&mut sys);
        let direct_ms = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, tiled_ms, direct_ms);
        rows.push(KernelTiming {
            n,
            tiled_ms,
            direct_ms,
        });
    }
    Ok(rows)
}
