//! Low-thrust trajectory legs built from constant-thrust segments.
//!
//! A [`Leg`] is propagated with the Taylor integrator from `leg_taylor` in
//! Sundmann pseudo-time and exposes the equality and inequality constraints an
//! external optimizer needs to make it dynamically feasible.

mod error;
mod leg;
mod state;
mod throttle;

pub use error::LegError;
pub use leg::{Leg, LegNode, LegSetup};
pub use state::SpacecraftState;
pub use throttle::Throttle;

pub use leg_propulsion::Spacecraft;
