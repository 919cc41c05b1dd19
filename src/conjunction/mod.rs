mod analysis;
mod error;
mod geometry;
mod immediate;
mod maneuver;
mod prediction;
mod scoring;
mod types;

pub use analysis::analyze_conjunction;
pub use error::ConjunctionError;
pub use geometry::{relative_speed, time_to_closest_approach};
pub use immediate::detect_immediate_threats;
pub use maneuver::{avoidance_maneuver, maneuver_direction, preventive_maneuver};
pub use prediction::{
    circular_track, find_close_approaches, next_close_approaches, predict_future_collisions,
    CloseApproach,
};
pub use scoring::{
    assess_risk_level, collision_probability, future_collision_probability, hard_body_radius,
    position_uncertainty_km, uncertainty_probability, velocity_uncertainty_km_s,
};
pub use types::{
    AlertKind, ConjunctionAlert, ConjunctionAnalysis, ManeuverDirection, SuggestedManeuver,
    Uncertainty,
};

pub const CRITICAL_DISTANCE_KM: f64 = 5.0;
pub const WARNING_DISTANCE_KM: f64 = 25.0;
pub const MAX_POSITION_UNCERTAINTY_KM: f64 = 5.0;
/// Debris and target samples closer than this in time are compared.
pub const APPROACH_WINDOW_SECONDS: f64 = 3_600.0;
pub const PREDICTION_STEP_COUNT: usize = 100;
pub const ANALYSIS_STEP_COUNT: usize = 1_000;
/// Relative speeds below this (km^2/s^2, squared) count as co-moving.
pub const CO_MOVING_THRESHOLD: f64 = 1e-10;
/// Lead time of an immediate avoidance maneuver.
pub const IMMEDIATE_MANEUVER_LEAD_MINUTES: i64 = 30;
/// Preventive maneuvers are executed this long before the predicted approach.
pub const PREVENTIVE_MANEUVER_LEAD_SECONDS: f64 = 3_600.0;
