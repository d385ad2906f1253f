//! Configuration types for loading benchmark scenarios from YAML.
//!
//! A scenario file mirrors the runtime split used by the engine:
//!
//! - [`EngineConfig`]     – kernel, integrator and tile size
//! - [`ParametersConfig`] – particle count, steps and physical constants
//! - [`BodyConfig`]       – optional explicit initial state per body
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every field is optional; anything missing falls back to the benchmark
//! defaults (N = 4096, 10 steps, dt = 1e-3, G = 1, eps2 = 1e-9, tile 64).
//!
//! ```yaml
//! engine:
//!   kernel: "tiled"        # or "direct" (reference oracle)
//!   integrator: "verlet"   # or "euler" (non-reference, for comparison)
//!   tile: 64
//!
//! parameters:
//!   n: 4096                # ignored when bodies are listed
//!   steps: 10
//!   dt: 1.0e-3
//!   G: 1.0
//!   eps2: 1.0e-9
//!   seed: 123456789
//!
//! bodies:                  # omit to draw the unit-cube cloud from the seed
//!   - x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 1.0
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{Body, NVec3};

/// Force kernel used by the engine
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KernelConfig {
    #[default]
    #[serde(rename = "tiled")] // Tiled, symmetric (i < j) accumulation with scratch tile buffers
    Tiled,
    #[serde(rename = "direct")] // Every ordered pair, no symmetry, no tiling. Correctness oracle
    Direct,
}

/// Time integrator used by the engine
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "verlet")] // Velocity-Verlet, averages old and new acceleration
    Verlet,
    #[serde(rename = "euler")] // Velocity from the new acceleration only. Not the reference rule
    #[value(name = "euler")]
    ForwardEuler,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub kernel: KernelConfig,
    #[serde(default)]
    pub integrator: IntegratorConfig,
    pub tile: Option<usize>, // performance only
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    pub n: Option<i64>,       // particle count, signed so a negative value is reported
    pub steps: Option<usize>, // integration steps inside the timed region
    pub dt: Option<f64>,      // time step
    #[serde(rename = "G")]
    pub g: Option<f64>, // gravitational constant
    pub eps2: Option<f64>, // softening
    pub seed: Option<u64>, // xorshift64* seed
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    #[serde(default)]
    pub v: Vec<f64>, // initial velocity, at rest when omitted
    #[serde(default = "unit_mass")]
    pub m: f64,
}

fn unit_mass() -> f64 {
    1.0
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Validated runtime configuration; explicit bodies decide N
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let defaults = SimulationConfig::default();
        let p = &self.parameters;

        let n = if self.bodies.is_empty() {
            p.n.unwrap_or(defaults.n as i64)
        } else {
            if let Some(n) = p.n {
                if n != self.bodies.len() as i64 {
                    log::warn!(
                        "parameters.n = {} ignored, scenario lists {} bodies",
                        n,
                        self.bodies.len()
                    );
                }
            }
            self.bodies.len() as i64
        };

        SimulationConfig::new(
            n,
            p.steps.unwrap_or(defaults.steps),
            p.dt.unwrap_or(defaults.dt),
        )?
        .with_gravity(p.g.unwrap_or(defaults.g))
        .with_softening(p.eps2.unwrap_or(defaults.eps2))
        .with_tile(self.engine.tile.unwrap_or(defaults.tile))
        .with_seed(p.seed.unwrap_or(defaults.seed))
        .with_kernel(self.engine.kernel)
        .with_integrator(self.engine.integrator)
        .validated()
    }

    /// Explicit bodies as runtime `Body` values, `None` for a seeded cloud
    pub fn bodies(&self) -> Result<Option<Vec<Body>>> {
        if self.bodies.is_empty() {
            return Ok(None);
        }
        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(index, bc)| {
                let x = vec3(&bc.x).ok_or_else(|| SimError::InvalidBody {
                    index,
                    reason: format!("x needs 3 components, got {}", bc.x.len()),
                })?;
                let v = if bc.v.is_empty() {
                    NVec3::zeros()
                } else {
                    vec3(&bc.v).ok_or_else(|| SimError::InvalidBody {
                        index,
                        reason: format!("v needs 3 components, got {}", bc.v.len()),
                    })?
                };
                Ok(Body { x, v, m: bc.m })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(bodies))
    }
}

fn vec3(c: &[f64]) -> Option<NVec3> {
    match c {
        [x, y, z] => Some(NVec3::new(*x, *y, *z)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
        let sim = cfg.simulation_config().unwrap();
        assert_eq!(sim, SimulationConfig::default());
        assert!(cfg.bodies().unwrap().is_none());
    }

    #[test]
    fn parses_engine_and_parameters() {
        let yaml = r#"
engine:
  kernel: "direct"
  integrator: "euler"
  tile: 16
parameters:
  n: 100
  steps: 3
  dt: 1.0e-4
  G: 0.5
  eps2: 1.0e-6
  seed: 7
"#;
        let sim = ScenarioConfig::from_yaml_str(yaml)
            .unwrap()
            .simulation_config()
            .unwrap();
        assert_eq!(sim.n, 100);
        assert_eq!(sim.steps, 3);
        assert_eq!(sim.dt, 1.0e-4);
        assert_eq!(sim.g, 0.5);
        assert_eq!(sim.eps2, 1.0e-6);
        assert_eq!(sim.tile, 16);
        assert_eq!(sim.seed, 7);
        assert_eq!(sim.kernel, KernelConfig::Direct);
        assert_eq!(sim.integrator, IntegratorConfig::ForwardEuler);
    }

    #[test]
    fn bodies_set_particle_count() {
        let yaml = r#"
parameters:
  n: 5
bodies:
  - x: [0.0, 0.0, 0.0]
  - x: [1.0, 0.0, 0.0]
    v: [0.0, 0.1, 0.0]
    m: 2.0
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.simulation_config().unwrap().n, 2);
        let bodies = cfg.bodies().unwrap().unwrap();
        assert_eq!(bodies[0].m, 1.0);
        assert_eq!(bodies[0].v, NVec3::zeros());
        assert_eq!(bodies[1].x, NVec3::new(1.0, 0.0, 0.0));
        assert_eq!(bodies[1].m, 2.0);
    }

    #[test]
    fn short_position_is_rejected() {
        let yaml = "bodies:\n  - x: [0.0, 1.0]\n";
        let err = ScenarioConfig::from_yaml_str(yaml)
            .unwrap()
            .bodies()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidBody { index: 0, .. }));
    }

    #[test]
    fn negative_count_is_rejected() {
        let yaml = "parameters:\n  n: -3\n";
        let err = ScenarioConfig::from_yaml_str(yaml)
            .unwrap()
            .simulation_config()
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidParticleCount(-3)));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = ScenarioConfig::from_yaml_str("parameters:\n  theta: 0.5\n").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }
}
