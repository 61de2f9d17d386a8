//! Dynamics abstraction consumed by the step engine, plus the reusable tables.

use leg_core::vector::inf_norm;

/// An autonomous ODE whose Taylor coefficients can be generated order by order.
///
/// `N` is the number of propagated variables. Each order keeps one `Terms`
/// record with the intermediate nonlinear expressions of that order.
pub trait TaylorSystem<const N: usize> {
    /// Per-order auxiliary record.
    type Terms: Copy + Default;

    /// Fills `terms[n]` and `coeffs[n + 1]` from orders `0..=n`.
    fn expand(&self, n: usize, coeffs: &mut [[f64; N]], terms: &mut [Self::Terms]);

    /// Magnitude `xm` used to pick between the absolute and relative tolerance.
    fn magnitude(&self, state: &[f64; N]) -> f64 {
        inf_norm(state)
    }
}

/// Order-indexed coefficient and auxiliary tables, reused across steps.
#[derive(Debug, Clone)]
pub struct Workspace<const N: usize, T> {
    pub(crate) coeffs: Vec<[f64; N]>,
    pub(crate) terms: Vec<T>,
}

impl<const N: usize, T: Copy + Default> Workspace<N, T> {
    pub fn new() -> Self {
        Self {
            coeffs: Vec::new(),
            terms: Vec::new(),
        }
    }

    /// Resizes both tables for a series of the given order and zeroes them.
    pub fn reset(&mut self, order: usize) {
        self.coeffs.clear();
        self.coeffs.resize(order + 1, [0.0; N]);
        self.terms.clear();
        self.terms.resize(order, T::default());
    }

    /// Series order the tables are currently sized for.
    pub fn order(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficients generated by the last step, order 0 first.
    pub fn coefficients(&self) -> &[[f64; N]] {
        &self.coeffs
    }
}

impl<const N: usize, T: Copy + Default> Default for Workspace<N, T> {
    fn default() -> Self {
        Self::new()
    }
}
