mod constants;
mod drag;
mod error;
mod kepler;
mod trajectory;

pub use constants::*;
pub use drag::{atmospheric_density, drag_correction};
pub use error::PropagationError;
pub use kepler::{
    compute_semi_major_axis, mean_to_true_anomaly, orbital_period_seconds, orbital_to_cartesian,
    orbital_velocity,
};
pub use trajectory::{
    generate_trajectory, offset_timestamp, validate_grid, OrbitTrajectory, TrajectorySample,
};
