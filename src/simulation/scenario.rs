//! Build the initial particle system for a run
//!
//! A `Scenario` pairs the validated runtime configuration with the source of
//! the initial state: either the seeded unit-cube cloud used by the
//! benchmark, or an explicit list of bodies from a scenario file.

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::params::{particle_count, SimulationConfig};
use crate::simulation::rng::XorShift64Star;
use crate::simulation::states::{Body, ParticleSystem};

/// Where the initial positions and velocities come from
#[derive(Debug, Clone, PartialEq)]
pub enum InitialState {
    /// Draw `config.n` particles from the seeded generator
    Random,
    /// Use these bodies as given
    Bodies(Vec<Body>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub initial: InitialState,
}

impl Scenario {
    pub fn random(config: SimulationConfig) -> Self {
        Self {
            config,
            initial: InitialState::Random,
        }
    }

    pub fn with_bodies(config: SimulationConfig, bodies: Vec<Body>) -> Self {
        let config = SimulationConfig {
            n: bodies.len(),
            ..config
        };
        Self {
            config,
            initial: InitialState::Bodies(bodies),
        }
    }

    /// Runtime scenario from a parsed scenario file
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        let config = cfg.simulation_config()?;
        Ok(match cfg.bodies()? {
            Some(bodies) => Self::with_bodies(config, bodies),
            None => Self::random(config),
        })
    }

    pub fn particle_count(&self) -> usize {
        match &self.initial {
            InitialState::Random => self.config.n,
            InitialState::Bodies(bodies) => bodies.len(),
        }
    }

    /// Materialize the particle system. Only the random cloud draws from `rng`.
    pub fn build_system(&self, rng: &mut XorShift64Star) -> Result<ParticleSystem> {
        match &self.initial {
            InitialState::Random => initialize(self.config.n as i64, rng),
            InitialState::Bodies(bodies) => ParticleSystem::from_bodies(bodies),
        }
    }
}

/// Seeded unit-cube cloud: position in [0,1)^3, velocity components in
/// [-5e-4, 5e-4), zero acceleration, unit mass. Draw order per particle is
/// x, y, z, vx, vy, vz.
pub fn initialize(n: i64, rng: &mut XorShift64Star) -> Result<ParticleSystem> {
    let n = particle_count(n)?;
    let mut sys = ParticleSystem::with_len(n)?;
    for i in 0..n {
        sys.px[i] = rng.uniform01();
        sys.py[i] = rng.uniform01();
        sys.pz[i] = rng.uniform01();
        sys.vx[i] = (rng.uniform01() - 0.5) * 1e-3;
        sys.vy[i] = (rng.uniform01() - 0.5) * 1e-3;
        sys.vz[i] = (rng.uniform01() - 0.5) * 1e-3;
    }
    Ok(sys)
}
