use std::path::Path;

use leg_config::{ConfigError, LegConfig, StateConfig, load_legs};
use leg_core::epoch::Epoch;
use leg_lowthrust::{Leg, LegError, LegSetup, Spacecraft, SpacecraftState};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scenario '{name}' is invalid: {source}")]
    InvalidLeg {
        name: String,
        #[source]
        source: LegError,
    },
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("no scenarios defined")]
    Empty,
}

pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LegConfig>, ScenarioError> {
    Ok(load_legs(path)?)
}

/// Picks a scenario by case-insensitive name, or the first one when no name is given.
pub fn find_scenario<'a>(
    scenarios: &'a [LegConfig],
    name: Option<&str>,
) -> Result<&'a LegConfig, ScenarioError> {
    match name {
        Some(name) => {
            let upper = name.to_uppercase();
            scenarios
                .iter()
                .find(|s| s.name.to_uppercase() == upper)
                .ok_or_else(|| ScenarioError::NotFound(name.to_string()))
        }
        None => scenarios.first().ok_or(ScenarioError::Empty),
    }
}

/// Builds a validated leg from its configuration record.
pub fn leg_from_config(config: &LegConfig) -> Result<Leg, ScenarioError> {
    let invalid = |source| ScenarioError::InvalidLeg {
        name: config.name.clone(),
        source,
    };
    let mut leg = Leg::new(
        config.n_seg(),
        config.sundmann.c,
        config.sundmann.alpha,
        config.log10_tolerance,
    );

    let mut settings = *leg.propagator_settings();
    if let Some(max_iterations) = config.propagator.max_iterations {
        settings.max_iterations = max_iterations;
    }
    if let Some(max_order) = config.propagator.max_order {
        settings.max_order = max_order;
    }
    leg.set_propagator_settings(settings);

    let sc = &config.spacecraft;
    leg.set_leg(LegSetup {
        ti: Epoch::from_mjd2000(config.departure_mjd2000),
        xi: state_from_config(&config.initial_state),
        throttles: &config.throttles,
        tf: Epoch::from_mjd2000(config.arrival_mjd2000),
        xf: state_from_config(&config.final_state),
        sf: config.pseudo_time,
        spacecraft: Spacecraft::new(sc.mass_kg, sc.max_thrust_newtons, sc.isp_seconds),
        mu: config.mu_m3_s2,
    })
    .map_err(invalid)?;
    debug!(scenario = %config.name, n_seg = leg.n_seg(), "leg configured");
    Ok(leg)
}

fn state_from_config(state: &StateConfig) -> SpacecraftState {
    SpacecraftState::new(state.position_m, state.velocity_m_s, state.mass_kg)
}
