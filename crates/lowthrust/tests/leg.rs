use leg_core::constants::{DAY2SEC, G0};
use leg_core::epoch::Epoch;
use leg_core::vector::scale;
use leg_lowthrust::{Leg, LegError, LegSetup, Spacecraft, SpacecraftState};
use leg_taylor::{PropagatorSettings, Sundmann, propagate_taylor_s};

const C: f64 = 1.0;
const ALPHA: f64 = 1.5;
const TOL: i32 = -10;
const SF: f64 = 3.0;

fn spacecraft() -> Spacecraft {
    // Non-dimensional units: veff = 1.
    Spacecraft::new(1.0, 0.05, 1.0 / G0)
}

fn initial_state() -> SpacecraftState {
    SpacecraftState::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 1.0)
}

fn throttle_sequence(n_seg: usize) -> Vec<f64> {
    (0..n_seg)
        .flat_map(|i| {
            let phase = i as f64 * 0.7;
            [0.6 * phase.cos(), 0.6 * phase.sin(), 0.1]
        })
        .collect()
}

/// Propagates every segment forward and returns the end state with its elapsed time.
fn forward_only(n_seg: usize, throttles: &[f64]) -> (SpacecraftState, f64) {
    let sc = spacecraft();
    let settings = PropagatorSettings::with_tolerance(TOL);
    let ds = SF / n_seg as f64;
    let mut state = initial_state().to_array();
    let mut elapsed = 0.0;
    for u in throttles.chunks_exact(3) {
        let dynamics = Sundmann {
            mu: 1.0,
            veff: sc.effective_exhaust_velocity(),
            thrust: scale(&[u[0], u[1], u[2]], sc.max_thrust_newtons),
            c: C,
            alpha: ALPHA,
        };
        propagate_taylor_s(&mut state, &mut elapsed, &dynamics, ds, &settings)
            .expect("forward propagation");
    }
    (SpacecraftState::from_array(state), elapsed)
}

fn consistent_leg(n_seg: usize) -> Leg {
    let throttles = throttle_sequence(n_seg);
    let (xf, elapsed) = forward_only(n_seg, &throttles);
    let ti = Epoch::from_mjd2000(0.0);
    let mut leg = Leg::new(n_seg, C, ALPHA, TOL);
    leg.set_leg(LegSetup {
        ti,
        xi: initial_state(),
        throttles: &throttles,
        tf: ti.offset_seconds(elapsed),
        xf,
        sf: SF,
        spacecraft: spacecraft(),
        mu: 1.0,
    })
    .expect("valid leg");
    leg
}

#[test]
fn forward_consistent_leg_has_vanishing_mismatch() {
    for n_seg in [1, 4, 5] {
        let leg = consistent_leg(n_seg);
        let mismatch = leg.compute_mismatch_con().expect("mismatch");
        for (k, m) in mismatch.iter().enumerate() {
            assert!(m.abs() < 1e-6, "n_seg {n_seg}: mismatch[{k}] = {m}");
        }
    }
}

#[test]
fn perturbed_throttles_break_consistency() {
    let n_seg = 4;
    let mut throttles = throttle_sequence(n_seg);
    let (xf, elapsed) = forward_only(n_seg, &throttles);
    throttles[9] = -0.9;
    let mut leg = Leg::new(n_seg, C, ALPHA, TOL);
    leg.set_leg(LegSetup {
        ti: Epoch::from_mjd2000(0.0),
        xi: initial_state(),
        throttles: &throttles,
        tf: Epoch::from_mjd2000(elapsed / DAY2SEC),
        xf,
        sf: SF,
        spacecraft: spacecraft(),
        mu: 1.0,
    })
    .unwrap();
    let mismatch = leg.compute_mismatch_con().unwrap();
    assert!(mismatch[..6].iter().any(|m| m.abs() > 1e-4));
}

#[test]
fn throttle_constraints_are_squared_norm_minus_one() {
    let mut leg = Leg::new(3, C, ALPHA, TOL);
    leg.set_leg(LegSetup {
        ti: Epoch::from_mjd2000(10.0),
        xi: initial_state(),
        throttles: &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5],
        tf: Epoch::from_mjd2000(11.0),
        xf: initial_state(),
        sf: SF,
        spacecraft: spacecraft(),
        mu: 1.0,
    })
    .unwrap();
    let con = leg.compute_throttles_con().unwrap();
    assert_eq!(con.len(), 3);
    assert_eq!(con[0], 0.0);
    assert_eq!(con[1], -1.0);
    assert!((con[2] + 0.25).abs() < 1e-15);
}

#[test]
fn states_span_the_nominal_duration() {
    let n_seg = 5;
    let leg = consistent_leg(n_seg);
    let nodes = leg.compute_states().expect("states");
    assert_eq!(nodes.len(), n_seg + 2);
    assert_eq!(nodes[0].time_s, 0.0);
    assert_eq!(nodes[n_seg + 1].time_s, leg.duration_s());
    assert_eq!(nodes[0].thrust, [0.0; 3]);
    assert_eq!(nodes[n_seg + 1].thrust, [0.0; 3]);
    assert_eq!(nodes[0].position, leg.xi().position);
    assert_eq!(nodes[n_seg + 1].velocity, leg.xf().velocity);

    // Forward and backward halves meet at the matching point.
    let n_fwd = 3;
    assert!((nodes[n_fwd].time_s - nodes[n_fwd + 1].time_s).abs() < 1e-6);
    for k in 0..3 {
        assert!((nodes[n_fwd].position[k] - nodes[n_fwd + 1].position[k]).abs() < 1e-6);
    }
    for pair in nodes.windows(2) {
        assert!(pair[1].time_s >= pair[0].time_s - 1e-6);
    }
    let thrust = leg.spacecraft().max_thrust_newtons;
    assert!((nodes[1].thrust[0] - thrust * leg.throttles()[0].value[0]).abs() < 1e-15);
    assert!((nodes[n_seg].thrust[2] - thrust * leg.throttles()[n_seg - 1].value[2]).abs() < 1e-15);
}

#[test]
fn throttle_windows_tile_the_leg() {
    let n_seg = 4;
    let mut leg = consistent_leg(n_seg);
    let ti = leg.ti();
    let tf = leg.tf();
    let throttles = leg.get_throttles().expect("throttles").to_vec();
    assert_eq!(throttles.len(), n_seg);
    assert!((throttles[0].start.mjd2000() - ti.mjd2000()).abs() < 1e-12);
    assert!((throttles[n_seg - 1].end.mjd2000() - tf.mjd2000()).abs() < 1e-12);
    for t in &throttles {
        assert!(t.end > t.start);
    }
    for pair in throttles.windows(2) {
        assert!((pair[1].start.mjd2000() - pair[0].end.mjd2000()).abs() < 1e-9);
    }
}

#[test]
fn scheduling_from_computed_states_matches_get_throttles() {
    let mut leg = consistent_leg(5);
    let nodes = leg.compute_states().expect("states");
    let scheduled = leg.schedule_throttles(&nodes).expect("scheduled").to_vec();
    let recomputed = leg.get_throttles().expect("throttles").to_vec();
    assert_eq!(scheduled, recomputed);
    assert_eq!(scheduled[2].end, leg.ti().offset_seconds(nodes[3].time_s));
    assert_eq!(scheduled[3].start, leg.ti().offset_seconds(nodes[4].time_s));
}

#[test]
fn state_failures_are_reported_coarsely() {
    let mut leg = consistent_leg(2);
    leg.set_propagator_settings(PropagatorSettings {
        max_order: 5,
        ..PropagatorSettings::with_tolerance(-16)
    });
    assert!(matches!(
        leg.compute_states(),
        Err(LegError::StatesUnavailable(_))
    ));
    assert!(matches!(
        leg.compute_mismatch_con(),
        Err(LegError::Integration(_))
    ));
}
