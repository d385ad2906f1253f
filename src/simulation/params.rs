//! Numerical and physical parameters for a run
//!
//! `SimulationConfig` is immutable once a run starts. Construction goes
//! through `new` (which rejects a negative particle count) and the builder
//! methods, and `validated` checks the rest before anything is allocated.

use crate::configuration::config::{IntegratorConfig, KernelConfig};
use crate::error::{Result, SimError};
use crate::simulation::rng::DEFAULT_SEED;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub n: usize,     // particle count
    pub steps: usize, // steps in the timed loop
    pub dt: f64,      // time step
    pub g: f64,       // gravitational constant
    pub eps2: f64,    // softening
    pub tile: usize,  // tile size, performance only
    pub seed: u64,    // xorshift64* seed
    pub kernel: KernelConfig,
    pub integrator: IntegratorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n: 4096,
            steps: 10,
            dt: 1e-3,
            g: 1.0,
            eps2: 1e-9,
            tile: 64,
            seed: DEFAULT_SEED,
            kernel: KernelConfig::Tiled,
            integrator: IntegratorConfig::Verlet,
        }
    }
}

impl SimulationConfig {
    pub fn new(n: i64, steps: usize, dt: f64) -> Result<Self> {
        Ok(Self {
            n: particle_count(n)?,
            steps,
            dt,
            ..Self::default()
        })
    }

    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    pub fn with_softening(mut self, eps2: f64) -> Self {
        self.eps2 = eps2;
        self
    }

    pub fn with_tile(mut self, tile: usize) -> Self {
        self.tile = tile;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_kernel(mut self, kernel: KernelConfig) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorConfig) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if self.tile == 0 {
            return Err(SimError::InvalidTileSize(self.tile));
        }
        if !(self.eps2.is_finite() && self.eps2 >= 0.0) {
            return Err(SimError::InvalidSoftening(self.eps2));
        }
        if !self.g.is_finite() {
            return Err(SimError::InvalidGravitationalConstant(self.g));
        }
        if self.seed == 0 {
            return Err(SimError::InvalidSeed);
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// Convert a signed count, rejecting negatives
pub fn particle_count(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| SimError::InvalidParticleCount(n))
}
