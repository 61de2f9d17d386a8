//! Low-thrust spacecraft model: wet mass plus an engine of bounded thrust.

use std::fmt;

use leg_core::constants::G0;
use serde::{Deserialize, Serialize};

/// Spacecraft carrying a single throttleable engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    pub mass_kg: f64,
    pub max_thrust_newtons: f64,
    pub isp_seconds: f64,
}

impl Spacecraft {
    pub fn new(mass_kg: f64, max_thrust_newtons: f64, isp_seconds: f64) -> Self {
        Self {
            mass_kg,
            max_thrust_newtons,
            isp_seconds,
        }
    }

    /// Effective exhaust velocity `Isp · g0` (m/s).
    pub fn effective_exhaust_velocity(&self) -> f64 {
        self.isp_seconds * G0
    }

    /// Propellant mass flow at full thrust (kg/s).
    pub fn max_mass_flow(&self) -> f64 {
        self.max_thrust_newtons / self.effective_exhaust_velocity()
    }
}

impl fmt::Display for Spacecraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mass {} kg, thrust {} N, isp {} s",
            self.mass_kg, self.max_thrust_newtons, self.isp_seconds
        )
    }
}
