pub mod rng;
pub mod states;
pub mod params;
pub mod scenario;
pub mod forces;
pub mod integrator;
pub mod diagnostics;
pub mod engine;
