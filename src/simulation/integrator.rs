//! Fixed-step time integrators for the N-body system
//!
//! Velocity–Verlet is the reference rule. The forward-Euler velocity update
//! (`v += a_new * dt`) appeared in one of the benchmark's variants; it is
//! kept only so its worse energy behaviour can be measured, and is never
//! picked unless a run asks for it explicitly.
//!
//! Both steppers expect the system's acceleration arrays to already hold the
//! acceleration at the current positions (see `Simulation::prime`).

use std::mem;

use super::forces::Acceleration;
use super::states::{filled, ParticleSystem};
use crate::configuration::config::IntegratorConfig;
use crate::error::Result;

/// Acceleration from the previous step, allocated once per run
#[derive(Debug, Clone)]
pub struct PreviousAccel {
    ax: Vec<f64>,
    ay: Vec<f64>,
    az: Vec<f64>,
}

impl PreviousAccel {
    pub fn with_len(n: usize) -> Result<Self> {
        Ok(Self {
            ax: filled(n, 0.0)?,
            ay: filled(n, 0.0)?,
            az: filled(n, 0.0)?,
        })
    }

    /// Move the system's current acceleration in here. The system's arrays
    /// end up holding stale values that the next force evaluation overwrites.
    fn take_from(&mut self, sys: &mut ParticleSystem) {
        mem::swap(&mut self.ax, &mut sys.ax);
        mem::swap(&mut self.ay, &mut sys.ay);
        mem::swap(&mut self.az, &mut sys.az);
    }
}

/// Drift: x += v dt + 1/2 a_old dt^2
fn drift(sys: &mut ParticleSystem, dt: f64) {
    let ParticleSystem {
        px,
        py,
        pz,
        vx,
        vy,
        vz,
        ax,
        ay,
        az,
        ..
    } = sys;
    for ((x, v), a) in px.iter_mut().zip(vx.iter()).zip(ax.iter()) {
        *x += v * dt + 0.5 * a * dt * dt;
    }
    for ((y, v), a) in py.iter_mut().zip(vy.iter()).zip(ay.iter()) {
        *y += v * dt + 0.5 * a * dt * dt;
    }
    for ((z, v), a) in pz.iter_mut().zip(vz.iter()).zip(az.iter()) {
        *z += v * dt + 0.5 * a * dt * dt;
    }
}

/// Advance one step with velocity–Verlet.
/// Returns the pair interactions evaluated by the force kernel.
pub fn verlet_step(
    sys: &mut ParticleSystem,
    forces: &dyn Acceleration,
    old: &mut PreviousAccel,
    dt: f64,
) -> u64 {
    let half_dt = 0.5 * dt;

    // x_n+1 from x_n, v_n, a_n
    drift(sys, dt);

    // a_n+1 at the new positions, a_n kept aside
    old.take_from(sys);
    let pairs = forces.acceleration(sys);

    // v_n+1 = v_n + dt/2 (a_n + a_n+1)
    let ParticleSystem {
        vx, vy, vz, ax, ay, az, ..
    } = sys;
    for ((v, a_old), a_new) in vx.iter_mut().zip(&old.ax).zip(ax.iter()) {
        *v += half_dt * (a_old + a_new);
    }
    for ((v, a_old), a_new) in vy.iter_mut().zip(&old.ay).zip(ay.iter()) {
        *v += half_dt * (a_old + a_new);
    }
    for ((v, a_old), a_new) in vz.iter_mut().zip(&old.az).zip(az.iter()) {
        *v += half_dt * (a_old + a_new);
    }

    sys.t += dt;
    pairs
}

/// Advance one step with the forward-Euler velocity update.
/// Positions use the same drift as Verlet; velocities only see a_n+1.
pub fn forward_euler_step(
    sys: &mut ParticleSystem,
    forces: &dyn Acceleration,
    old: &mut PreviousAccel,
    dt: f64,
) -> u64 {
    drift(sys, dt);
    old.take_from(sys);
    let pairs = forces.acceleration(sys);

    let ParticleSystem {
        vx, vy, vz, ax, ay, az, ..
    } = sys;
    for (v, a) in vx.iter_mut().zip(ax.iter()) {
        *v += a * dt;
    }
    for (v, a) in vy.iter_mut().zip(ay.iter()) {
        *v += a * dt;
    }
    for (v, a) in vz.iter_mut().zip(az.iter()) {
        *v += a * dt;
    }

    sys.t += dt;
    pairs
}

/// Integrator bound to a method, a step size and its own scratch
#[derive(Debug, Clone)]
pub struct Stepper {
    method: IntegratorConfig,
    dt: f64,
    old: PreviousAccel,
}

impl Stepper {
    pub fn new(method: IntegratorConfig, dt: f64, n: usize) -> Result<Self> {
        if method == IntegratorConfig::ForwardEuler {
            log::warn!("forward-Euler velocity update selected; this is not the reference integrator");
        }
        Ok(Self {
            method,
            dt,
            old: PreviousAccel::with_len(n)?,
        })
    }

    pub fn method(&self) -> IntegratorConfig {
        self.method
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn step(&mut self, sys: &mut ParticleSystem, forces: &dyn Acceleration) -> u64 {
        match self.method {
            IntegratorConfig::Verlet => verlet_step(sys, forces, &mut self.old, self.dt),
            IntegratorConfig::ForwardEuler => {
                forward_euler_step(sys, forces, &mut self.old, self.dt)
            }
        }
    }
}
