//! Core state types for the N-body simulation.
//!
//! `ParticleSystem` stores every per-particle quantity as its own `Vec<f64>`
//! (structure of arrays) so the force kernel streams through contiguous
//! coordinates. That layout stays inside the crate: callers read and build
//! particles through `NVec3` accessors and the `Body` type.

use nalgebra::Vector3;

use crate::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

/// A single particle as seen from outside the system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass
}

impl Body {
    pub fn at_rest(x: NVec3, m: f64) -> Self {
        Self { x, v: NVec3::zeros(), m }
    }
}

/// Particle state, all arrays of equal length N, allocated once
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    pub(crate) px: Vec<f64>,
    pub(crate) py: Vec<f64>,
    pub(crate) pz: Vec<f64>,
    pub(crate) vx: Vec<f64>,
    pub(crate) vy: Vec<f64>,
    pub(crate) vz: Vec<f64>,
    pub(crate) ax: Vec<f64>,
    pub(crate) ay: Vec<f64>,
    pub(crate) az: Vec<f64>,
    pub(crate) mass: Vec<f64>,
    pub(crate) t: f64, // simulated time
}

impl ParticleSystem {
    /// N particles at the origin, at rest, unit mass
    pub fn with_len(n: usize) -> Result<Self> {
        Ok(Self {
            px: filled(n, 0.0)?,
            py: filled(n, 0.0)?,
            pz: filled(n, 0.0)?,
            vx: filled(n, 0.0)?,
            vy: filled(n, 0.0)?,
            vz: filled(n, 0.0)?,
            ax: filled(n, 0.0)?,
            ay: filled(n, 0.0)?,
            az: filled(n, 0.0)?,
            mass: filled(n, 1.0)?,
            t: 0.0,
        })
    }

    /// Build a system from explicit bodies; accelerations start at zero
    pub fn from_bodies(bodies: &[Body]) -> Result<Self> {
        let mut sys = Self::with_len(bodies.len())?;
        for (i, b) in bodies.iter().enumerate() {
            if !(b.m.is_finite() && b.m > 0.0) {
                return Err(SimError::InvalidBody {
                    index: i,
                    reason: format!("mass must be positive and finite, got {}", b.m),
                });
            }
            if !(b.x.iter().all(|c| c.is_finite()) && b.v.iter().all(|c| c.is_finite())) {
                return Err(SimError::InvalidBody {
                    index: i,
                    reason: "position and velocity must be finite".to_string(),
                });
            }
            sys.set_position(i, b.x);
            sys.set_velocity(i, b.v);
            sys.mass[i] = b.m;
        }
        Ok(sys)
    }

    pub fn len(&self) -> usize {
        self.px.len()
    }

    pub fn is_empty(&self) -> bool {
        self.px.is_empty()
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn position(&self, i: usize) -> NVec3 {
        NVec3::new(self.px[i], self.py[i], self.pz[i])
    }

    pub fn velocity(&self, i: usize) -> NVec3 {
        NVec3::new(self.vx[i], self.vy[i], self.vz[i])
    }

    pub fn acceleration(&self, i: usize) -> NVec3 {
        NVec3::new(self.ax[i], self.ay[i], self.az[i])
    }

    pub fn mass(&self, i: usize) -> f64 {
        self.mass[i]
    }

    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    pub fn body(&self, i: usize) -> Body {
        Body {
            x: self.position(i),
            v: self.velocity(i),
            m: self.mass[i],
        }
    }

    /// True when every particle carries the same mass
    pub fn has_uniform_mass(&self) -> bool {
        match self.mass.first() {
            Some(&m0) => self.mass.iter().all(|&m| m == m0),
            None => true,
        }
    }

    pub(crate) fn set_position(&mut self, i: usize, x: NVec3) {
        self.px[i] = x.x;
        self.py[i] = x.y;
        self.pz[i] = x.z;
    }

    pub(crate) fn set_velocity(&mut self, i: usize, v: NVec3) {
        self.vx[i] = v.x;
        self.vy[i] = v.y;
        self.vz[i] = v.z;
    }

    pub(crate) fn zero_accelerations(&mut self) {
        self.ax.fill(0.0);
        self.ay.fill(0.0);
        self.az.fill(0.0);
    }
}

/// Fallible `vec![value; n]`, so a huge N reports instead of aborting
pub(crate) fn filled(n: usize, value: f64) -> Result<Vec<f64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|source| SimError::Allocation { n, source })?;
    v.resize(n, value);
    Ok(v)
}
