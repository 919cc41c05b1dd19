use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("object {0} has no orbital element set")]
    MissingElements(String),
    #[error("eccentricity {0} outside [0, 1)")]
    EccentricityOutOfRange(f64),
    #[error("mean motion must be positive, got {0} rev/day")]
    NonPositiveMeanMotion(f64),
    #[error("step count {0} outside 1..=1000000")]
    InvalidStepCount(usize),
    #[error("invalid prediction horizon: {0} hours")]
    InvalidHorizon(f64),
}
