//! Low-thrust trajectory legs propagated with adaptive-order Taylor series.
//!
//! The workspace crates are re-exported here so front-ends (the `leg` CLI,
//! notebooks, optimizers) depend on a single library.

pub mod scenario;

pub use leg_config as config;
pub use leg_core::{constants, epoch, vector};
pub use leg_lowthrust as lowthrust;
pub use leg_propulsion as propulsion;
pub use leg_taylor as taylor;

pub use leg_lowthrust::{Leg, LegError, LegNode, LegSetup, Spacecraft, SpacecraftState, Throttle};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
