use std::fmt;

use leg_core::vector::Vector3;
use serde::{Deserialize, Serialize};

/// Cartesian spacecraft state relative to the central body (SI units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftState {
    pub position: Vector3,
    pub velocity: Vector3,
    pub mass: f64,
}

impl SpacecraftState {
    pub fn new(position: Vector3, velocity: Vector3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// `[x, y, z, vx, vy, vz, m]`.
    pub fn to_array(&self) -> [f64; 7] {
        let [x, y, z] = self.position;
        let [vx, vy, vz] = self.velocity;
        [x, y, z, vx, vy, vz, self.mass]
    }

    pub fn from_array(values: [f64; 7]) -> Self {
        let [x, y, z, vx, vy, vz, mass] = values;
        Self::new([x, y, z], [vx, vy, vz], mass)
    }
}

impl fmt::Display for SpacecraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r = {:?}, v = {:?}, m = {}",
            self.position, self.velocity, self.mass
        )
    }
}
