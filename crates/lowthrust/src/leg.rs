//! Single low-thrust leg shot forward and backward in Sundmann pseudo-time.
//!
//! The leg is a sequence of `n_seg` constant-thrust segments of equal
//! pseudo-time length `ds = sf / n_seg`, with real time following
//! `dt = c r^alpha ds`. The first `ceil(n_seg / 2)` segments are propagated
//! forward from the initial state and the remaining ones backward from the
//! final state. The leg is feasible when the eight mismatches returned by
//! [`Leg::compute_mismatch_con`] vanish and every value of
//! [`Leg::compute_throttles_con`] is non-positive.

use std::fmt;

use leg_core::epoch::Epoch;
use leg_core::vector::{Vector3, scale};
use leg_propulsion::Spacecraft;
use leg_taylor::{
    IntegrationError, PropagatorSettings, Sundmann, SundmannTerms, TaylorPropagator, Workspace,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::LegError;
use crate::state::SpacecraftState;
use crate::throttle::Throttle;

/// Boundary data and throttles handed to [`Leg::set_leg`].
#[derive(Debug, Clone, Copy)]
pub struct LegSetup<'a> {
    pub ti: Epoch,
    pub xi: SpacecraftState,
    /// Flat cartesian throttle components `x1, y1, z1, ..., xn, yn, zn`.
    pub throttles: &'a [f64],
    pub tf: Epoch,
    pub xf: SpacecraftState,
    /// Pseudo-time budget of the whole leg.
    pub sf: f64,
    pub spacecraft: Spacecraft,
    pub mu: f64,
}

/// One recorded point of the leg trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegNode {
    /// Seconds since the leg's initial epoch.
    pub time_s: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    pub mass: f64,
    /// Thrust applied on the segment ending at this node (zero at the boundaries).
    pub thrust: Vector3,
}

impl LegNode {
    fn record(time_s: f64, state: &[f64; 8], thrust: Vector3) -> Self {
        Self {
            time_s,
            position: [state[0], state[1], state[2]],
            velocity: [state[3], state[4], state[5]],
            mass: state[6],
            thrust,
        }
    }

    /// `[t, x, y, z, vx, vy, vz, m, Tx, Ty, Tz]`.
    pub fn to_array(&self) -> [f64; 11] {
        let [x, y, z] = self.position;
        let [vx, vy, vz] = self.velocity;
        let [tx, ty, tz] = self.thrust;
        [self.time_s, x, y, z, vx, vy, vz, self.mass, tx, ty, tz]
    }
}

/// Low-thrust leg using the Sundmann variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    ti: Epoch,
    xi: SpacecraftState,
    throttles: Vec<Throttle>,
    tf: Epoch,
    xf: SpacecraftState,
    sf: f64,
    spacecraft: Spacecraft,
    mu: f64,
    c: f64,
    alpha: f64,
    settings: PropagatorSettings,
    set: bool,
}

impl Leg {
    /// Creates an unset leg with room for `n_seg` segments.
    ///
    /// `tol` is the base-10 exponent used for both integration tolerances.
    pub fn new(n_seg: usize, c: f64, alpha: f64, tol: i32) -> Self {
        Self {
            ti: Epoch::default(),
            xi: SpacecraftState::default(),
            throttles: vec![Throttle::default(); n_seg],
            tf: Epoch::default(),
            xf: SpacecraftState::default(),
            sf: 0.0,
            spacecraft: Spacecraft::default(),
            mu: 0.0,
            c,
            alpha,
            settings: PropagatorSettings::with_tolerance(tol),
            set: false,
        }
    }

    /// Validates and stores the leg data. On error the leg is left unchanged.
    pub fn set_leg(&mut self, setup: LegSetup<'_>) -> Result<(), LegError> {
        let len = setup.throttles.len();
        if len % 3 != 0 {
            return Err(LegError::ThrottleLength(len));
        }
        if len / 3 != self.throttles.len() {
            return Err(LegError::SegmentCountMismatch {
                expected: self.throttles.len(),
                found: len / 3,
            });
        }
        if self.throttles.is_empty() {
            return Err(LegError::NoSegments);
        }
        if !(setup.tf > setup.ti) {
            return Err(LegError::NonIncreasingEpochs);
        }
        check_mu(setup.mu)?;
        check_spacecraft(&setup.spacecraft)?;

        self.ti = setup.ti;
        self.xi = setup.xi;
        self.tf = setup.tf;
        self.xf = setup.xf;
        self.sf = setup.sf;
        self.spacecraft = setup.spacecraft;
        self.mu = setup.mu;
        // Windows are meaningless until the states are computed.
        for (throttle, value) in self.throttles.iter_mut().zip(setup.throttles.chunks_exact(3)) {
            *throttle = Throttle::unscheduled([value[0], value[1], value[2]]);
        }
        self.set = true;
        Ok(())
    }

    /// Replaces the spacecraft, with the same mass check as [`set_leg`](Self::set_leg).
    pub fn set_spacecraft(&mut self, spacecraft: Spacecraft) -> Result<(), LegError> {
        check_spacecraft(&spacecraft)?;
        self.spacecraft = spacecraft;
        Ok(())
    }

    /// Replaces the gravity parameter, with the same check as [`set_leg`](Self::set_leg).
    pub fn set_mu(&mut self, mu: f64) -> Result<(), LegError> {
        check_mu(mu)?;
        self.mu = mu;
        Ok(())
    }

    /// Overrides the iteration and order limits; tolerances included.
    pub fn set_propagator_settings(&mut self, settings: PropagatorSettings) {
        self.settings = settings;
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn ti(&self) -> Epoch {
        self.ti
    }

    pub fn tf(&self) -> Epoch {
        self.tf
    }

    pub fn xi(&self) -> &SpacecraftState {
        &self.xi
    }

    pub fn xf(&self) -> &SpacecraftState {
        &self.xf
    }

    pub fn n_seg(&self) -> usize {
        self.throttles.len()
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn spacecraft(&self) -> &Spacecraft {
        &self.spacecraft
    }

    pub fn sf(&self) -> f64 {
        self.sf
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tol(&self) -> i32 {
        self.settings.log10_abs_tolerance
    }

    pub fn propagator_settings(&self) -> &PropagatorSettings {
        &self.settings
    }

    /// Stored throttles; their windows are placeholders until
    /// [`get_throttles`](Self::get_throttles) stamps them.
    pub fn throttles(&self) -> &[Throttle] {
        &self.throttles
    }

    /// Nominal transfer duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.tf.seconds_since(self.ti)
    }

    /// The eight equality constraints: position, velocity, mass and time
    /// mismatch between the forward and backward halves.
    pub fn compute_mismatch_con(&self) -> Result<[f64; 8], LegError> {
        self.ensure_set()?;
        let n_fwd = self.n_seg_fwd();
        let ds = self.segment_pseudo_time();
        let propagator = TaylorPropagator::new(self.settings);
        let mut workspace = Workspace::new();

        let mut fwd = extend(&self.xi);
        for throttle in &self.throttles[..n_fwd] {
            let dynamics = self.segment_dynamics(throttle);
            propagator.propagate_with(&dynamics, &mut fwd, ds, &mut workspace)?;
        }

        let mut back = extend(&self.xf);
        for throttle in self.throttles[n_fwd..].iter().rev() {
            let dynamics = self.segment_dynamics(throttle);
            propagator.propagate_with(&dynamics, &mut back, -ds, &mut workspace)?;
        }

        let mut mismatch = [0.0; 8];
        for (m, (f, b)) in mismatch.iter_mut().zip(fwd.iter().zip(&back)).take(7) {
            *m = f - b;
        }
        mismatch[7] = fwd[7] - back[7] - self.duration_s();
        trace!(?mismatch, "leg mismatch");
        Ok(mismatch)
    }

    /// One inequality constraint `|u|^2 - 1` per segment.
    pub fn compute_throttles_con(&self) -> Result<Vec<f64>, LegError> {
        self.ensure_set()?;
        Ok(self
            .throttles
            .iter()
            .map(Throttle::magnitude_constraint)
            .collect())
    }

    /// Full trajectory history: `n_seg + 2` nodes, forward half first, then
    /// the backward half ending at the final state.
    ///
    /// Slower than [`compute_mismatch_con`](Self::compute_mismatch_con), which
    /// keeps no history.
    pub fn compute_states(&self) -> Result<Vec<LegNode>, LegError> {
        self.ensure_set()?;
        let n_seg = self.n_seg();
        let n_fwd = self.n_seg_fwd();
        let ds = self.segment_pseudo_time();
        let dt = self.duration_s();
        let propagator = TaylorPropagator::new(self.settings);
        let mut workspace: Workspace<8, SundmannTerms> = Workspace::new();
        let mut nodes = vec![LegNode::default(); n_seg + 2];

        let mut fwd = extend(&self.xi);
        nodes[0] = LegNode::record(0.0, &fwd, [0.0; 3]);
        for (i, throttle) in self.throttles[..n_fwd].iter().enumerate() {
            let dynamics = self.segment_dynamics(throttle);
            propagator
                .propagate_with(&dynamics, &mut fwd, ds, &mut workspace)
                .map_err(|err| states_failure(i, err))?;
            nodes[i + 1] = LegNode::record(fwd[7], &fwd, dynamics.thrust);
        }

        let mut back = extend(&self.xf);
        nodes[n_seg + 1] = LegNode::record(dt, &back, [0.0; 3]);
        for (i, throttle) in self.throttles[n_fwd..].iter().rev().enumerate() {
            let dynamics = self.segment_dynamics(throttle);
            propagator
                .propagate_with(&dynamics, &mut back, -ds, &mut workspace)
                .map_err(|err| states_failure(n_seg - 1 - i, err))?;
            nodes[n_seg - i] = LegNode::record(dt + back[7], &back, dynamics.thrust);
        }
        Ok(nodes)
    }

    /// Stamps each throttle with the epochs bounding its segment and returns them.
    pub fn get_throttles(&mut self) -> Result<&[Throttle], LegError> {
        let nodes = self.compute_states()?;
        self.schedule_throttles(&nodes)
    }

    /// Like [`get_throttles`](Self::get_throttles) but reuses nodes already
    /// returned by [`compute_states`](Self::compute_states).
    pub fn schedule_throttles(&mut self, nodes: &[LegNode]) -> Result<&[Throttle], LegError> {
        self.ensure_set()?;
        if nodes.len() != self.n_seg() + 2 {
            return Err(LegError::NodeCountMismatch {
                expected: self.n_seg() + 2,
                found: nodes.len(),
            });
        }
        let n_fwd = self.n_seg_fwd();
        let ti = self.ti;
        for (i, throttle) in self.throttles.iter_mut().enumerate() {
            // The matching point is recorded twice, once by each half.
            let first = if i < n_fwd { i } else { i + 1 };
            throttle.start = ti.offset_seconds(nodes[first].time_s);
            throttle.end = ti.offset_seconds(nodes[first + 1].time_s);
        }
        Ok(&self.throttles)
    }

    fn ensure_set(&self) -> Result<(), LegError> {
        if self.set { Ok(()) } else { Err(LegError::NotSet) }
    }

    fn n_seg_fwd(&self) -> usize {
        self.n_seg().div_ceil(2)
    }

    fn segment_pseudo_time(&self) -> f64 {
        self.sf / self.n_seg() as f64
    }

    fn segment_dynamics(&self, throttle: &Throttle) -> Sundmann {
        Sundmann {
            mu: self.mu,
            veff: self.spacecraft.effective_exhaust_velocity(),
            thrust: scale(&throttle.value, self.spacecraft.max_thrust_newtons),
            c: self.c,
            alpha: self.alpha,
        }
    }
}

fn check_mu(mu: f64) -> Result<(), LegError> {
    if mu > 0.0 { Ok(()) } else { Err(LegError::NonPositiveMu) }
}

fn check_spacecraft(spacecraft: &Spacecraft) -> Result<(), LegError> {
    if spacecraft.mass_kg > 0.0 { Ok(()) } else { Err(LegError::ZeroMass) }
}

fn extend(state: &SpacecraftState) -> [f64; 8] {
    let mut out = [0.0; 8];
    out[..7].copy_from_slice(&state.to_array());
    out
}

fn states_failure(segment: usize, err: IntegrationError) -> LegError {
    debug!(segment, %err, "leg state propagation failed");
    LegError::StatesUnavailable(err)
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of segments: {}", self.n_seg())?;
        writeln!(f, "Central body gravitational parameter: {}", self.mu)?;
        writeln!(f, "Spacecraft: {}", self.spacecraft)?;
        writeln!(f, "Departure epoch: {}", self.ti)?;
        writeln!(f, "Arrival epoch: {}", self.tf)?;
        writeln!(f, "Initial state: {}", self.xi)?;
        writeln!(f, "Final state: {}", self.xf)?;
        writeln!(f, "Pseudo-time of flight: {}", self.sf)?;
        writeln!(f, "Sundmann c: {}, alpha: {}", self.c, self.alpha)?;
        writeln!(f, "Integration tolerance: 1e{}", self.tol())?;
        writeln!(f, "Throttles values:")?;
        for throttle in &self.throttles {
            writeln!(f, "\t{:?}", throttle.value)?;
        }
        Ok(())
    }
}
