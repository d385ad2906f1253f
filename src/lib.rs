pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, NVec3, ParticleSystem};
pub use simulation::rng::{XorShift64Star, DEFAULT_SEED};
pub use simulation::params::SimulationConfig;
pub use simulation::forces::{Acceleration, DirectGravity, TiledGravity};
pub use simulation::integrator::{forward_euler_step, verlet_step, Stepper};
pub use simulation::diagnostics::{energy, relative_drift, total_momentum, EnergyReport};
pub use simulation::scenario::{initialize, InitialState, Scenario};
pub use simulation::engine::Simulation;
pub use configuration::config::{IntegratorConfig, KernelConfig, ScenarioConfig};
pub use benchmark::benchmark::{bench_kernels, bench_tile_sizes, run_benchmark, run_scenario, BenchResult};
pub use error::SimError;
