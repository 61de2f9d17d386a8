use std::fmt;

use leg_core::epoch::Epoch;
use leg_core::vector::{Vector3, dot};
use serde::{Deserialize, Serialize};

/// Constant thrust direction/magnitude over one segment, as a fraction of the
/// maximum thrust. Feasible throttles satisfy `|value| <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throttle {
    pub start: Epoch,
    pub end: Epoch,
    pub value: Vector3,
}

impl Throttle {
    pub fn new(start: Epoch, end: Epoch, value: Vector3) -> Self {
        Self { start, end, value }
    }

    /// Throttle whose window is still a placeholder (epochs 0 and 1).
    pub fn unscheduled(value: Vector3) -> Self {
        Self::new(Epoch::from_mjd2000(0.0), Epoch::from_mjd2000(1.0), value)
    }

    /// Inequality constraint `|u|^2 - 1`.
    pub fn magnitude_constraint(&self) -> f64 {
        dot(&self.value, &self.value) - 1.0
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::unscheduled([0.0; 3])
    }
}

impl fmt::Display for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}] u = {:?}",
            self.start.mjd2000(),
            self.end.mjd2000(),
            self.value
        )
    }
}
