//! Energy and momentum diagnostics
//!
//! These run outside the timed region. The potential uses the same softened
//! distance as the force law so that a conserving integrator conserves this
//! total energy too.

use super::states::{NVec3, ParticleSystem};

/// Snapshot of the system's energy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// KE = sum 1/2 m |v|^2
pub fn kinetic_energy(sys: &ParticleSystem) -> f64 {
    let mut ke = 0.0;
    for i in 0..sys.len() {
        let v2 = sys.vx[i] * sys.vx[i] + sys.vy[i] * sys.vy[i] + sys.vz[i] * sys.vz[i];
        ke += 0.5 * sys.mass[i] * v2;
    }
    ke
}

/// PE = sum over i < j of -G m_i m_j / sqrt(|r_ij|^2 + eps2). O(N^2).
pub fn potential_energy(sys: &ParticleSystem, g: f64, eps2: f64) -> f64 {
    let n = sys.len();
    let mut pe = 0.0;
    for i in 0..n {
        let (xi, yi, zi, mi) = (sys.px[i], sys.py[i], sys.pz[i], sys.mass[i]);
        for j in (i + 1)..n {
            let rx = sys.px[j] - xi;
            let ry = sys.py[j] - yi;
            let rz = sys.pz[j] - zi;
            let r = (rx * rx + ry * ry + rz * rz + eps2).sqrt();
            pe += -g * mi * sys.mass[j] / r;
        }
    }
    pe
}

pub fn energy(sys: &ParticleSystem, g: f64, eps2: f64) -> EnergyReport {
    let kinetic = kinetic_energy(sys);
    let potential = potential_energy(sys, g, eps2);
    EnergyReport {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Sum of m v over all particles
pub fn total_momentum(sys: &ParticleSystem) -> NVec3 {
    (0..sys.len()).fold(NVec3::zeros(), |p, i| p + sys.velocity(i) * sys.mass[i])
}

/// |e1 - e0| / |e0|, or the absolute change when e0 is zero
pub fn relative_drift(e0: f64, e1: f64) -> f64 {
    let diff = (e1 - e0).abs();
    if e0 == 0.0 {
        diff
    } else {
        diff / e0.abs()
    }
}
