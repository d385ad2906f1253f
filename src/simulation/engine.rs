//! Simulation context for one run
//!
//! Owns the configuration, the generator state, the particle system, the
//! force kernel and the stepper. Nothing here is global, so independent runs
//! can live side by side (tests rely on this).

use super::diagnostics::{self, EnergyReport};
use super::forces::{build_kernel, Acceleration};
use super::integrator::Stepper;
use super::params::SimulationConfig;
use super::rng::XorShift64Star;
use super::scenario::Scenario;
use super::states::ParticleSystem;
use crate::error::Result;

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    rng: XorShift64Star,
    system: ParticleSystem,
    forces: Box<dyn Acceleration>,
    stepper: Stepper,
    primed: bool,
}

impl Simulation {
    /// Validate, then allocate everything the run needs up front
    pub fn new(scenario: Scenario) -> Result<Self> {
        let config = scenario.config.clone().validated()?;
        let mut rng = XorShift64Star::new(config.seed);
        let system = scenario.build_system(&mut rng)?;
        let forces = build_kernel(&config);
        let stepper = Stepper::new(config.integrator, config.dt, system.len())?;

        log::info!(
            "simulation ready: N = {}, steps = {}, dt = {}, kernel = {}, integrator = {:?}, tile = {}",
            system.len(),
            config.steps,
            config.dt,
            forces.name(),
            config.integrator,
            config.tile
        );
        if !system.has_uniform_mass() {
            log::debug!("non-uniform masses, per-particle mass applied in both kernels");
        }

        Ok(Self {
            config,
            rng,
            system,
            forces,
            stepper,
            primed: false,
        })
    }

    /// Seeded random cloud
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        Self::new(Scenario::random(config))
    }

    /// Swap the force kernel, e.g. to run the oracle on the same state
    pub fn with_kernel(mut self, forces: Box<dyn Acceleration>) -> Self {
        self.forces = forces;
        self.primed = false;
        self
    }

    /// Acceleration at the current positions. Must precede the first step.
    pub fn prime(&mut self) -> u64 {
        self.primed = true;
        self.forces.acceleration(&mut self.system)
    }

    pub fn step(&mut self) -> u64 {
        if !self.primed {
            self.prime();
        }
        self.stepper.step(&mut self.system, self.forces.as_ref())
    }

    /// Advance `steps` iterations, returning the pair interactions evaluated
    pub fn run(&mut self, steps: usize) -> u64 {
        if !self.primed {
            self.prime();
        }
        let mut pairs = 0;
        for _ in 0..steps {
            pairs += self.stepper.step(&mut self.system, self.forces.as_ref());
        }
        pairs
    }

    pub fn energy(&self) -> EnergyReport {
        diagnostics::energy(&self.system, self.config.g, self.config.eps2)
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generator state after initialization
    pub fn rng(&self) -> &XorShift64Star {
        &self.rng
    }

    pub fn kernel_name(&self) -> &'static str {
        self.forces.name()
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }
}
