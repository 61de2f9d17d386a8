use thiserror::Error;

/// Failures raised while covering a propagation interval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("polynomial order {order} is too high (maximum {max_order})")]
    OrderTooHigh { order: usize, max_order: usize },
    #[error("maximum number of iterations ({max_iterations}) reached with {remaining} left to propagate")]
    IterationLimit { max_iterations: usize, remaining: f64 },
}
