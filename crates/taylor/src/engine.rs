//! One adaptive Taylor step following Jorba & Zou's step-size control.

use std::f64::consts::E;

use leg_core::vector::inf_norm;

use crate::system::{TaylorSystem, Workspace};

/// Floor applied to coefficient norms before the step-size formula. A vanishing
/// high-order coefficient then yields a huge radius that is clamped to `h`.
pub const MIN_COEFFICIENT_NORM: f64 = 1e-300;

/// Tolerances and state magnitude driving the step-size choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepControl {
    /// Infinity norm of the state at the start of the step.
    pub xm: f64,
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl StepControl {
    /// Whether the absolute tolerance governs for this state magnitude.
    pub fn absolute(&self) -> bool {
        self.rel_tol * self.xm < self.abs_tol
    }
}

/// Lowest order the step-size formula accepts.
pub const MIN_ORDER: usize = 2;

/// Performs one Taylor step of the given order towards `h` and returns the
/// signed step taken.
///
/// Orders below [`MIN_ORDER`] are raised to it. `workspace` is resized for the
/// order, `state` is advanced in place and the step never overshoots `h`.
pub fn taylor_step<S, const N: usize>(
    system: &S,
    state: &mut [f64; N],
    h: f64,
    order: usize,
    control: &StepControl,
    workspace: &mut Workspace<N, S::Terms>,
) -> f64
where
    S: TaylorSystem<N>,
{
    let order = order.max(MIN_ORDER);
    workspace.reset(order);

    workspace.coeffs[0] = *state;
    for n in 0..order {
        system.expand(n, &mut workspace.coeffs, &mut workspace.terms);
    }

    let rho = optimal_step(&workspace.coeffs, control);
    let mut step = if h < 0.0 { -rho } else { rho };
    if step.abs() > h.abs() {
        step = h;
    }

    // Horner evaluation of the truncated series.
    for (k, value) in state.iter_mut().enumerate() {
        *value = workspace
            .coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * step + c[k]);
    }
    step
}

/// Unsigned step size from the two highest-order coefficient norms, divided by
/// Jorba's safety factor `e^2`. Needs at least `MIN_ORDER + 1` coefficients.
fn optimal_step<const N: usize>(coeffs: &[[f64; N]], control: &StepControl) -> f64 {
    debug_assert!(coeffs.len() > MIN_ORDER);
    let order = coeffs.len() - 1;
    let last = inf_norm(&coeffs[order]).max(MIN_COEFFICIENT_NORM);
    let previous = inf_norm(&coeffs[order - 1]).max(MIN_COEFFICIENT_NORM);
    let scale = if control.absolute() { 1.0 } else { control.xm };

    let n = order as f64;
    let rho = (scale / last)
        .powf(1.0 / n)
        .min((scale / previous).powf(1.0 / (n - 1.0)));
    rho / (E * E)
}
