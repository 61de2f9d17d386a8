//! Core constants, epochs, and vector primitives shared by the leg workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity used to turn specific impulse into exhaust velocity (m/s²).
    pub const G0: f64 = 9.80665;
    /// Seconds per Julian day.
    pub const DAY2SEC: f64 = 86_400.0;
    /// Days per second.
    pub const SEC2DAY: f64 = 1.0 / DAY2SEC;
    /// Sun gravitational parameter (m³/s²).
    pub const MU_SUN: f64 = 1.327_124_400_18e20;
    /// Astronomical unit (m).
    pub const AU: f64 = 149_597_870_700.0;
}

/// Epoch handling on the modified Julian date 2000 scale.
pub mod epoch {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    use super::constants::{DAY2SEC, SEC2DAY};

    /// A point in time expressed as days since 2000-01-01 00:00:00 (MJD2000).
    #[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Epoch(f64);

    impl Epoch {
        pub const fn from_mjd2000(days: f64) -> Self {
            Self(days)
        }

        pub fn mjd2000(self) -> f64 {
            self.0
        }

        /// Epoch reached after `seconds` of elapsed time (negative values go back).
        pub fn offset_seconds(self, seconds: f64) -> Self {
            Self(self.0 + seconds * SEC2DAY)
        }

        /// Elapsed seconds from `earlier` to `self`.
        pub fn seconds_since(self, earlier: Epoch) -> f64 {
            (self.0 - earlier.0) * DAY2SEC
        }
    }

    impl fmt::Display for Epoch {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:.9} MJD2000", self.0)
        }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Cartesian 3-vector in SI units.
    pub type Vector3 = [f64; 3];

    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Largest absolute component of any slice (infinity norm).
    #[inline]
    pub fn inf_norm(values: &[f64]) -> f64 {
        values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::epoch::Epoch;
    use super::vector::{cross, inf_norm};

    #[test]
    fn epoch_offsets_round_trip() {
        let t0 = Epoch::from_mjd2000(7_000.25);
        let t1 = t0.offset_seconds(3_600.0);
        assert!((t1.seconds_since(t0) - 3_600.0).abs() < 1e-6);
        assert!(t1 > t0);
    }

    #[test]
    fn cross_of_basis_vectors() {
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn inf_norm_picks_largest_magnitude() {
        assert_eq!(inf_norm(&[1.0, -4.5, 2.0]), 4.5);
        assert_eq!(inf_norm(&[]), 0.0);
    }
}
