//! Gravitational acceleration kernels
//!
//! Two implementations of [`Acceleration`]:
//!
//! - [`TiledGravity`]: production kernel. Visits each unordered pair once and
//!   applies Newton's third law, walking the index range in tiles so the
//!   inner loops stay inside a cache-sized window.
//! - [`DirectGravity`]: reference oracle. Every particle sums over every
//!   other particle with no symmetry and no tiling.
//!
//! Both use the softened law `a_i = G * m_j * r / (|r|^2 + eps2)^(3/2)` with
//! `r = x_j - x_i`, so they agree to rounding.

use crate::configuration::config::KernelConfig;
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{NVec3, ParticleSystem};

/// A source of accelerations for every particle in a [`ParticleSystem`]
pub trait Acceleration: std::fmt::Debug {
    /// Overwrite the system's accelerations with the value at the current
    /// positions. Returns the number of pair interactions evaluated.
    fn acceleration(&self, sys: &mut ParticleSystem) -> u64;

    fn name(&self) -> &'static str;
}

/// Kernel selected by the run configuration
pub fn build_kernel(cfg: &SimulationConfig) -> Box<dyn Acceleration> {
    match cfg.kernel {
        KernelConfig::Tiled => Box::new(TiledGravity {
            g: cfg.g,
            eps2: cfg.eps2,
            tile: cfg.tile,
        }),
        KernelConfig::Direct => Box::new(DirectGravity {
            g: cfg.g,
            eps2: cfg.eps2,
        }),
    }
}

/// Read-only view of the positions and masses while accelerations are
/// borrowed mutably
struct Sources<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
    m: &'a [f64],
}

/// Per-block accumulators for one off-diagonal tile pair
struct TileScratch {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl TileScratch {
    fn with_capacity(tile: usize) -> Self {
        Self {
            x: Vec::with_capacity(tile),
            y: Vec::with_capacity(tile),
            z: Vec::with_capacity(tile),
        }
    }

    /// Zeroed accumulators for a block of `len` particles
    fn reset(&mut self, len: usize) {
        for buf in [&mut self.x, &mut self.y, &mut self.z] {
            buf.clear();
            buf.resize(len, 0.0);
        }
    }

    /// Add the block's totals into the global slice starting at `start`
    fn flush_into(&self, ax: &mut [f64], ay: &mut [f64], az: &mut [f64], start: usize) {
        let end = start + self.x.len();
        for (a, s) in ax[start..end].iter_mut().zip(&self.x) {
            *a += s;
        }
        for (a, s) in ay[start..end].iter_mut().zip(&self.y) {
            *a += s;
        }
        for (a, s) in az[start..end].iter_mut().zip(&self.z) {
            *a += s;
        }
    }
}

/// Tiled Newtonian gravity over unordered pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiledGravity {
    pub g: f64,
    pub eps2: f64,
    pub tile: usize,
}

impl TiledGravity {
    /// `G / (|r|^2 + eps2)^(3/2)` for separation `(rx, ry, rz)`
    #[inline(always)]
    fn coupling(&self, rx: f64, ry: f64, rz: f64) -> f64 {
        let r2 = rx * rx + ry * ry + rz * rz + self.eps2;
        let inv = 1.0 / (r2 * r2 * r2).sqrt();
        self.g * inv
    }

    /// Pairs inside one tile, written straight to the global arrays.
    /// The tile owns indices `i0..i1` exclusively during this pass.
    fn diagonal_tile(
        &self,
        src: &Sources<'_>,
        ax: &mut [f64],
        ay: &mut [f64],
        az: &mut [f64],
        i0: usize,
        i1: usize,
    ) -> u64 {
        for i in i0..i1 {
            let (xi, yi, zi, mi) = (src.x[i], src.y[i], src.z[i], src.m[i]);
            for j in (i + 1)..i1 {
                let rx = src.x[j] - xi;
                let ry = src.y[j] - yi;
                let rz = src.z[j] - zi;
                let s = self.coupling(rx, ry, rz);
                let (fx, fy, fz) = (rx * s, ry * s, rz * s);
                let mj = src.m[j];
                ax[i] += fx * mj;
                ay[i] += fy * mj;
                az[i] += fz * mj;
                ax[j] -= fx * mi;
                ay[j] -= fy * mi;
                az[j] -= fz * mi;
            }
        }
        let t = (i1 - i0) as u64;
        t * t.saturating_sub(1) / 2
    }

    /// All cross pairs between block `i0..i1` and the later block `j0..j1`,
    /// accumulated into the scratch buffers only
    fn cross_tiles(
        &self,
        src: &Sources<'_>,
        (i0, i1): (usize, usize),
        (j0, j1): (usize, usize),
        si: &mut TileScratch,
        sj: &mut TileScratch,
    ) -> u64 {
        si.reset(i1 - i0);
        sj.reset(j1 - j0);
        for (ii, i) in (i0..i1).enumerate() {
            let (xi, yi, zi, mi) = (src.x[i], src.y[i], src.z[i], src.m[i]);
            let (mut axi, mut ayi, mut azi) = (0.0, 0.0, 0.0);
            for (jj, j) in (j0..j1).enumerate() {
                let rx = src.x[j] - xi;
                let ry = src.y[j] - yi;
                let rz = src.z[j] - zi;
                let s = self.coupling(rx, ry, rz);
                let (fx, fy, fz) = (rx * s, ry * s, rz * s);
                let mj = src.m[j];
                axi += fx * mj;
                ayi += fy * mj;
                azi += fz * mj;
                sj.x[jj] -= fx * mi;
                sj.y[jj] -= fy * mi;
                sj.z[jj] -= fz * mi;
            }
            si.x[ii] = axi;
            si.y[ii] = ayi;
            si.z[ii] = azi;
        }
        ((i1 - i0) * (j1 - j0)) as u64
    }
}

impl Acceleration for TiledGravity {
    fn acceleration(&self, sys: &mut ParticleSystem) -> u64 {
        sys.zero_accelerations();
        let n = sys.len();
        if n < 2 {
            return 0;
        }
        let tile = self.tile.max(1);

        let ParticleSystem {
            px,
            py,
            pz,
            ax,
            ay,
            az,
            mass,
            ..
        } = sys;
        let src = Sources {
            x: px.as_slice(),
            y: py.as_slice(),
            z: pz.as_slice(),
            m: mass.as_slice(),
        };
        let mut si = TileScratch::with_capacity(tile);
        let mut sj = TileScratch::with_capacity(tile);

        let mut pairs = 0;
        for i0 in (0..n).step_by(tile) {
            let i1 = (i0 + tile).min(n);
            pairs += self.diagonal_tile(&src, ax, ay, az, i0, i1);

            for j0 in (i1..n).step_by(tile) {
                let j1 = (j0 + tile).min(n);
                pairs += self.cross_tiles(&src, (i0, i1), (j0, j1), &mut si, &mut sj);
                si.flush_into(ax, ay, az, i0);
                sj.flush_into(ax, ay, az, j0);
            }
        }
        pairs
    }

    fn name(&self) -> &'static str {
        "tiled"
    }
}

/// Direct all-ordered-pairs Newtonian gravity, the correctness oracle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    pub g: f64,
    pub eps2: f64,
}

impl Acceleration for DirectGravity {
    fn acceleration(&self, sys: &mut ParticleSystem) -> u64 {
        let n = sys.len();
        for i in 0..n {
            let xi = sys.position(i);
            let mut a = NVec3::zeros();
            for j in 0..n {
                if i == j {
                    continue;
                }
                let r = sys.position(j) - xi;
                let r2 = r.dot(&r) + self.eps2;
                let inv = 1.0 / (r2 * r2 * r2).sqrt();
                a += r * (self.g * sys.mass[j] * inv);
            }
            sys.ax[i] = a.x;
            sys.ay[i] = a.y;
            sys.az[i] = a.z;
        }
        (n as u64) * (n as u64).saturating_sub(1)
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
