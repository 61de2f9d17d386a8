//! Adaptive-order Taylor-series propagation of thrusted two-body motion.
//!
//! Taylor coefficients are generated order by order through automatic
//! differentiation recurrences (Cauchy products and the fractional power
//! rule). Order and step size are then chosen from the coefficient decay as in
//! À. Jorba and M. Zou, "A software package for the numerical integration of
//! ODEs by means of high-order Taylor methods" (2005).
//!
//! Two dynamics are provided:
//! - [`TwoBodyJ2`]: physical time, optional J2 zonal perturbation;
//! - [`Sundmann`]: pseudo-time `s` with `dt = c r^alpha ds`, carrying the real
//!   elapsed time as an extra state variable.

pub mod engine;
pub mod j2;
pub mod propagator;
pub mod series;
pub mod sundmann;
pub mod system;

mod error;

pub use engine::{MIN_COEFFICIENT_NORM, MIN_ORDER, StepControl, taylor_step};
pub use error::IntegrationError;
pub use j2::{J2Terms, TwoBodyJ2};
pub use propagator::{
    PropagationReport, PropagatorSettings, TaylorPropagator, propagate_taylor,
    propagate_taylor_j2, propagate_taylor_s, required_order,
};
pub use sundmann::{Sundmann, SundmannTerms};
pub use system::{TaylorSystem, Workspace};
