use leg_taylor::IntegrationError;
use thiserror::Error;

/// Errors raised while configuring or evaluating a [`Leg`](crate::Leg).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LegError {
    #[error("the length of the throttles list must be a multiple of 3 (got {0})")]
    ThrottleLength(usize),
    #[error("the leg has {expected} segments but the throttle sequence describes {found}")]
    SegmentCountMismatch { expected: usize, found: usize },
    #[error("a leg needs at least one segment")]
    NoSegments,
    #[error("final epoch must be strictly after initial epoch")]
    NonIncreasingEpochs,
    #[error("gravity parameter must be larger than zero")]
    NonPositiveMu,
    #[error("spacecraft mass must be larger than zero")]
    ZeroMass,
    #[error("expected {expected} state nodes, got {found}")]
    NodeCountMismatch { expected: usize, found: usize },
    #[error("leg data has not been set")]
    NotSet,
    #[error("could not compute the states, check the leg data")]
    StatesUnavailable(#[source] IntegrationError),
    #[error(transparent)]
    Integration(#[from] IntegrationError),
}
