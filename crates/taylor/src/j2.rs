//! Thrusted two-body dynamics in physical time with an optional J2 zonal term.
//!
//! State layout: `[x, y, z, vx, vy, vz, m]`.

use leg_core::vector::{Vector3, norm};
use serde::{Deserialize, Serialize};

use crate::series::{cauchy, constant, power};
use crate::system::TaylorSystem;

/// Parameters of the time-domain equations of motion.
///
/// ```text
/// r'' = -mu r / |r|^3 · (J2 corrections) + T / m
/// m'  = -|T| / veff
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoBodyJ2 {
    /// Central body gravitational parameter.
    pub mu: f64,
    /// Effective exhaust velocity (Isp · g0).
    pub veff: f64,
    /// Inertially constant thrust vector.
    pub thrust: Vector3,
    /// J2 times the squared reference radius; zero disables the zonal term.
    pub j2rg2: f64,
}

impl TwoBodyJ2 {
    /// Unperturbed Keplerian motion with constant thrust.
    pub fn keplerian(mu: f64, veff: f64, thrust: Vector3) -> Self {
        Self {
            mu,
            veff,
            thrust,
            j2rg2: 0.0,
        }
    }

    pub fn with_j2(mut self, j2rg2: f64) -> Self {
        self.j2rg2 = j2rg2;
        self
    }
}

/// Intermediate expressions of one series order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct J2Terms {
    pub z2: f64,
    pub r2: f64,
    pub inv_r3: f64,
    /// `-mu x / r^3`, `-mu y / r^3`, `-mu z / r^3`.
    pub kepler: Vector3,
    pub inv_m: f64,
    pub inv_r2: f64,
    /// `3/2 J2 R^2 / r^2`.
    pub oblate: f64,
    pub z2_over_r2: f64,
    /// `1 + 3/2 J2 R^2 / r^2 (1 - 5 z^2/r^2)`.
    pub factor_xy: f64,
    /// `1 + 3/2 J2 R^2 / r^2 (3 - 5 z^2/r^2)`.
    pub factor_z: f64,
    pub accel: Vector3,
}

impl TaylorSystem<7> for TwoBodyJ2 {
    type Terms = J2Terms;

    fn expand(&self, n: usize, x: &mut [[f64; 7]], u: &mut [J2Terms]) {
        let z2 = cauchy(n, |j| x[j][2], |j| x[j][2]);
        let r2 = cauchy(n, |j| x[j][0], |j| x[j][0]) + cauchy(n, |j| x[j][1], |j| x[j][1]) + z2;
        u[n].z2 = z2;
        u[n].r2 = r2;

        let inv_r3 = power(n, -1.5, |j| u[j].r2, |j| u[j].inv_r3);
        u[n].inv_r3 = inv_r3;
        let mu_inv_r3 = |j: usize| -self.mu * u[j].inv_r3;
        let kepler = [
            cauchy(n, |j| x[j][0], mu_inv_r3),
            cauchy(n, |j| x[j][1], mu_inv_r3),
            cauchy(n, |j| x[j][2], mu_inv_r3),
        ];
        u[n].kepler = kepler;

        let inv_m = power(n, -1.0, |j| x[j][6], |j| u[j].inv_m);
        u[n].inv_m = inv_m;

        if self.j2rg2 == 0.0 {
            u[n].factor_xy = constant(n, 1.0);
            u[n].factor_z = constant(n, 1.0);
        } else {
            let inv_r2 = power(n, -1.0, |j| u[j].r2, |j| u[j].inv_r2);
            u[n].inv_r2 = inv_r2;
            u[n].oblate = 1.5 * self.j2rg2 * inv_r2;
            let z2_over_r2 = cauchy(n, |j| u[j].z2, |j| u[j].inv_r2);
            u[n].z2_over_r2 = z2_over_r2;

            let xy = cauchy(n, |j| u[j].oblate, |j| {
                constant(j, 1.0) - 5.0 * u[j].z2_over_r2
            });
            let z = cauchy(n, |j| u[j].oblate, |j| {
                constant(j, 3.0) - 5.0 * u[j].z2_over_r2
            });
            u[n].factor_xy = constant(n, 1.0) + xy;
            u[n].factor_z = constant(n, 1.0) + z;
        }

        let accel = [
            cauchy(n, |j| u[j].kepler[0], |j| u[j].factor_xy) + inv_m * self.thrust[0],
            cauchy(n, |j| u[j].kepler[1], |j| u[j].factor_xy) + inv_m * self.thrust[1],
            cauchy(n, |j| u[j].kepler[2], |j| u[j].factor_z) + inv_m * self.thrust[2],
        ];
        u[n].accel = accel;

        let next = 1.0 / (n + 1) as f64;
        let (lower, upper) = x.split_at_mut(n + 1);
        let cur = &lower[n];
        let out = &mut upper[0];
        for k in 0..3 {
            out[k] = cur[k + 3] * next;
            out[k + 3] = accel[k] * next;
        }
        // Constant thrust: the rocket equation is linear in time.
        out[6] = if n == 0 {
            -norm(&self.thrust) / self.veff
        } else {
            0.0
        };
    }
}
