//! Thrusted two-body dynamics in the Sundmann pseudo-time `s`, `dt = c r^alpha ds`.
//!
//! State layout: `[x, y, z, vx, vy, vz, m, t]`; the last entry accumulates the
//! real elapsed time.

use leg_core::vector::{Vector3, inf_norm, norm};
use serde::{Deserialize, Serialize};

use crate::series::{cauchy, power};
use crate::system::TaylorSystem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sundmann {
    pub mu: f64,
    pub veff: f64,
    pub thrust: Vector3,
    /// Scale of the time transformation.
    pub c: f64,
    /// Radius exponent of the time transformation.
    pub alpha: f64,
}

/// Intermediate expressions of one series order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SundmannTerms {
    pub r2: f64,
    /// `r^alpha`, built from `(r^2)^(alpha / 2)`.
    pub r_alpha: f64,
    /// `dt/ds = c r^alpha`.
    pub dtds: f64,
    pub inv_r3: f64,
    pub inv_m: f64,
    /// Time-domain acceleration `-mu r / r^3 + T / m`.
    pub accel: Vector3,
}

impl TaylorSystem<8> for Sundmann {
    type Terms = SundmannTerms;

    fn expand(&self, n: usize, x: &mut [[f64; 8]], u: &mut [SundmannTerms]) {
        let r2: f64 = (0..3).map(|k| cauchy(n, |j| x[j][k], |j| x[j][k])).sum();
        u[n].r2 = r2;

        let r_alpha = power(n, 0.5 * self.alpha, |j| u[j].r2, |j| u[j].r_alpha);
        u[n].r_alpha = r_alpha;
        u[n].dtds = self.c * r_alpha;

        let inv_r3 = power(n, -1.5, |j| u[j].r2, |j| u[j].inv_r3);
        u[n].inv_r3 = inv_r3;
        let inv_m = power(n, -1.0, |j| x[j][6], |j| u[j].inv_m);
        u[n].inv_m = inv_m;

        let mut accel = [0.0; 3];
        for (k, a) in accel.iter_mut().enumerate() {
            *a = -self.mu * cauchy(n, |j| x[j][k], |j| u[j].inv_r3) + inv_m * self.thrust[k];
        }
        u[n].accel = accel;

        let mut rates = [0.0; 8];
        for k in 0..3 {
            rates[k] = cauchy(n, |j| u[j].dtds, |j| x[j][k + 3]);
            rates[k + 3] = cauchy(n, |j| u[j].dtds, |j| u[j].accel[k]);
        }
        rates[6] = -norm(&self.thrust) / self.veff * u[n].dtds;
        rates[7] = u[n].dtds;

        let next = 1.0 / (n + 1) as f64;
        for (out, rate) in x[n + 1].iter_mut().zip(rates) {
            *out = rate * next;
        }
    }

    /// Elapsed time grows without bound and is left out of the tolerance switch.
    fn magnitude(&self, state: &[f64; 8]) -> f64 {
        inf_norm(&state[..7])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::Workspace;

    #[test]
    fn first_order_rates_are_scaled_by_dt_ds() {
        let system = Sundmann {
            mu: 1.0,
            veff: 2.0,
            thrust: [0.0, 0.2, 0.0],
            c: 3.0,
            alpha: 2.0,
        };
        let mut ws: Workspace<8, SundmannTerms> = Workspace::new();
        ws.reset(2);
        ws.coeffs[0] = [2.0, 0.0, 0.0, 0.0, 0.5, 0.0, 1.0, 0.0];
        for n in 0..2 {
            system.expand(n, &mut ws.coeffs, &mut ws.terms);
        }
        let dtds = 3.0 * 4.0;
        let c1 = ws.coefficients()[1];
        assert!((c1[1] - dtds * 0.5).abs() < 1e-14);
        assert!((c1[3] - dtds * (-0.25)).abs() < 1e-14);
        assert!((c1[4] - dtds * 0.2).abs() < 1e-14);
        assert!((c1[6] - dtds * (-0.1)).abs() < 1e-14);
        assert!((c1[7] - dtds).abs() < 1e-14);
    }
}
