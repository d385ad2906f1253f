use nbsym::{bench_kernels, bench_tile_sizes, run_scenario, BenchResult};
use nbsym::{IntegratorConfig, KernelConfig, Scenario, ScenarioConfig, SimulationConfig, DEFAULT_SEED};
use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Tiled symmetric N-body gravity benchmark")]
struct Args {
    /// Number of particles
    #[arg(default_value_t = 4096, allow_negative_numbers = true)]
    n: i64,

    /// Number of timed integration steps
    #[arg(default_value_t = 10)]
    steps: usize,

    /// Time step
    #[arg(default_value_t = 1e-3)]
    dt: f64,

    /// Gravitational constant
    #[arg(long, default_value_t = 1.0)]
    g: f64,

    /// Softening added to squared separations
    #[arg(long, default_value_t = 1e-9)]
    eps2: f64,

    /// Tile size for the force kernel (performance only)
    #[arg(long, default_value_t = 64)]
    tile: usize,

    /// xorshift64* seed for the initial cloud
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = KernelConfig::Tiled)]
    kernel: KernelConfig,

    #[arg(long, value_enum, default_value_t = IntegratorConfig::Verlet)]
    integrator: IntegratorConfig,

    /// Scenario YAML; replaces the parameters above when given
    #[arg(short = 'f', long)]
    config: Option<PathBuf>,

    /// Print kernel time per tile size instead of running the benchmark
    #[arg(long)]
    sweep: bool,

    /// Print tiled vs direct kernel time for a range of N
    #[arg(long)]
    compare: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    if let Some(path) = &args.config {
        let cfg = ScenarioConfig::load(path)?;
        return Scenario::build_scenario(&cfg)
            .with_context(|| format!("invalid scenario {}", path.display()));
    }

    let config = SimulationConfig::new(args.n, args.steps, args.dt)
        .and_then(|c| {
            c.with_gravity(args.g)
                .with_softening(args.eps2)
                .with_tile(args.tile)
                .with_seed(args.seed)
                .with_kernel(args.kernel)
                .with_integrator(args.integrator)
                .validated()
        })
        .context("invalid configuration")?;
    Ok(Scenario::random(config))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let scenario = load_scenario(&args)?;

    if args.sweep {
        bench_tile_sizes(&scenario.config, &[8, 16, 32, 64, 128, 256, 512])?;
        return Ok(());
    }
    if args.compare {
        bench_kernels(&scenario.config, &[256, 512, 1024, 2048, 4096])?;
        return Ok(());
    }

    let n = scenario.particle_count();
    match run_scenario(scenario) {
        Ok(result) => {
            println!("{result}");
            Ok(())
        }
        Err(e) if e.is_allocation() => {
            log::error!("nbody_sym: {e}");
            println!("{}", BenchResult::failure_line(n));
            Err(anyhow::Error::from(e).context("allocation failed"))
        }
        Err(e) => Err(e.into()),
    }
}
