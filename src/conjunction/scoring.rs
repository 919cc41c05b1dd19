use std::f64::consts::PI;

use crate::conjunction::{
    CRITICAL_DISTANCE_KM, MAX_POSITION_UNCERTAINTY_KM, WARNING_DISTANCE_KM,
};
use crate::object::RiskLevel;

/// Risk tier from miss distance (km) and debris diameter (m).
///
/// Larger debris widens every tier: the thresholds scale with
/// `log10(100 * size + 1)`.
pub fn assess_risk_level(distance_km: f64, debris_size_m: f64) -> RiskLevel {
    let size_multiplier = (debris_size_m * 100.0 + 1.0).log10();

    if distance_km < CRITICAL_DISTANCE_KM * size_multiplier {
        RiskLevel::Critical
    } else if distance_km < CRITICAL_DISTANCE_KM * 2.0 * size_multiplier {
        RiskLevel::High
    } else if distance_km < WARNING_DISTANCE_KM * size_multiplier {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Probability for a pair observed at the current instant.
pub fn collision_probability(distance_km: f64, relative_speed_km_s: f64, debris_size_m: f64) -> f64 {
    let cross_section = PI * (debris_size_m / 2.0).powi(2);
    let base = (-distance_km / CRITICAL_DISTANCE_KM).exp();
    let velocity_factor = (relative_speed_km_s / 15.0).min(2.0);
    let size_factor = (cross_section * 10.0).min(10.0);
    clamp_probability(base * velocity_factor * size_factor)
}

/// Probability for a predicted approach, where no relative velocity is known.
pub fn future_collision_probability(distance_km: f64, debris_size_m: f64) -> f64 {
    let size_factor = (debris_size_m * 10.0).min(1.0);
    let distance_factor = (-distance_km / WARNING_DISTANCE_KM).exp();
    clamp_probability(size_factor * distance_factor)
}

/// Position uncertainty (km) grows with altitude.
pub fn position_uncertainty_km(altitude_km: f64) -> f64 {
    (0.1 + altitude_km / 10_000.0).min(MAX_POSITION_UNCERTAINTY_KM)
}

/// Velocity uncertainty (km/s) grows with object size.
pub fn velocity_uncertainty_km_s(size_m: f64) -> f64 {
    0.01 + size_m * 0.001
}

pub fn hard_body_radius(size_m: f64) -> f64 {
    let cross_section = PI * (size_m / 2.0).powi(2);
    (cross_section / PI).sqrt()
}

/// Gaussian-like probability with the hard-body radius widened by position uncertainty.
pub fn uncertainty_probability(miss_distance_km: f64, size_m: f64, position_sigma_km: f64) -> f64 {
    let total_radius = hard_body_radius(size_m) + position_sigma_km;
    clamp_probability((-(miss_distance_km.powi(2)) / (2.0 * total_radius.powi(2))).exp())
}

pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
