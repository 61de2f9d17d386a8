//! Interval propagation driving the step engine with adaptive order.

use leg_core::vector::Vector3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::{MIN_ORDER, StepControl, taylor_step};
use crate::error::IntegrationError;
use crate::j2::TwoBodyJ2;
use crate::sundmann::Sundmann;
use crate::system::{TaylorSystem, Workspace};

/// Tolerance and budget settings for [`TaylorPropagator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagatorSettings {
    /// Base-10 logarithm of the absolute tolerance.
    pub log10_abs_tolerance: i32,
    /// Base-10 logarithm of the relative tolerance.
    pub log10_rel_tolerance: i32,
    pub max_iterations: usize,
    pub max_order: usize,
}

impl Default for PropagatorSettings {
    fn default() -> Self {
        Self {
            log10_abs_tolerance: -10,
            log10_rel_tolerance: -10,
            max_iterations: 100_000,
            max_order: 3_000,
        }
    }
}

impl PropagatorSettings {
    /// Same exponent for the absolute and relative tolerance.
    pub fn with_tolerance(log10_tolerance: i32) -> Self {
        Self {
            log10_abs_tolerance: log10_tolerance,
            log10_rel_tolerance: log10_tolerance,
            ..Self::default()
        }
    }

    pub fn abs_tolerance(&self) -> f64 {
        10f64.powi(self.log10_abs_tolerance)
    }

    pub fn rel_tolerance(&self) -> f64 {
        10f64.powi(self.log10_rel_tolerance)
    }
}

/// Summary of a completed propagation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    pub steps: usize,
    /// Highest series order used by any step.
    pub order: usize,
}

/// Series order needed to reach tolerance `eps`, never below [`MIN_ORDER`].
pub fn required_order(eps: f64) -> usize {
    let order = (-0.5 * eps.ln() + 1.0).ceil();
    if order.is_finite() && order > MIN_ORDER as f64 {
        order as usize
    } else {
        MIN_ORDER
    }
}

/// Covers a whole interval of the independent variable with adaptive Taylor steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaylorPropagator {
    settings: PropagatorSettings,
}

impl TaylorPropagator {
    pub fn new(settings: PropagatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PropagatorSettings {
        &self.settings
    }

    /// Propagates `state` by `span` (negative spans go backwards).
    pub fn propagate<S, const N: usize>(
        &self,
        system: &S,
        state: &mut [f64; N],
        span: f64,
    ) -> Result<PropagationReport, IntegrationError>
    where
        S: TaylorSystem<N>,
    {
        let mut workspace = Workspace::new();
        self.propagate_with(system, state, span, &mut workspace)
    }

    /// Like [`propagate`](Self::propagate) but reuses caller-owned tables.
    ///
    /// On error `state` holds the last successfully reached point.
    pub fn propagate_with<S, const N: usize>(
        &self,
        system: &S,
        state: &mut [f64; N],
        span: f64,
        workspace: &mut Workspace<N, S::Terms>,
    ) -> Result<PropagationReport, IntegrationError>
    where
        S: TaylorSystem<N>,
    {
        let mut report = PropagationReport::default();
        if span == 0.0 {
            return Ok(report);
        }

        let abs_tol = self.settings.abs_tolerance();
        let rel_tol = self.settings.rel_tolerance();
        let mut remaining = span;

        for _ in 0..self.settings.max_iterations {
            let control = StepControl {
                xm: system.magnitude(state),
                abs_tol,
                rel_tol,
            };
            let eps = if control.absolute() { abs_tol } else { rel_tol };
            let order = required_order(eps);
            if order > self.settings.max_order {
                return Err(IntegrationError::OrderTooHigh {
                    order,
                    max_order: self.settings.max_order,
                });
            }

            let taken = taylor_step(system, state, remaining, order, &control, workspace);
            report.steps += 1;
            report.order = report.order.max(order);

            if taken.abs() >= remaining.abs() {
                trace!(span, steps = report.steps, order = report.order, "taylor propagation complete");
                return Ok(report);
            }
            remaining -= taken;
        }

        Err(IntegrationError::IterationLimit {
            max_iterations: self.settings.max_iterations,
            remaining,
        })
    }
}

/// Propagates `[r, v, m]` for a time `dt` under constant thrust in a pure
/// Keplerian field.
pub fn propagate_taylor(
    state: &mut [f64; 7],
    mu: f64,
    veff: f64,
    thrust: Vector3,
    dt: f64,
    settings: &PropagatorSettings,
) -> Result<PropagationReport, IntegrationError> {
    propagate_taylor_j2(state, &TwoBodyJ2::keplerian(mu, veff, thrust), dt, settings)
}

/// Propagates `[r, v, m]` for a time `dt` under [`TwoBodyJ2`] dynamics.
pub fn propagate_taylor_j2(
    state: &mut [f64; 7],
    dynamics: &TwoBodyJ2,
    dt: f64,
    settings: &PropagatorSettings,
) -> Result<PropagationReport, IntegrationError> {
    TaylorPropagator::new(*settings).propagate(dynamics, state, dt)
}

/// Propagates `[r, v, m]` for a pseudo-time `ds` under [`Sundmann`] dynamics,
/// adding the real time elapsed to `elapsed`.
pub fn propagate_taylor_s(
    state: &mut [f64; 7],
    elapsed: &mut f64,
    dynamics: &Sundmann,
    ds: f64,
    settings: &PropagatorSettings,
) -> Result<PropagationReport, IntegrationError> {
    let mut extended = [0.0; 8];
    extended[..7].copy_from_slice(state);
    extended[7] = *elapsed;
    let report = TaylorPropagator::new(*settings).propagate(dynamics, &mut extended, ds)?;
    state.copy_from_slice(&extended[..7]);
    *elapsed = extended[7];
    Ok(report)
}
