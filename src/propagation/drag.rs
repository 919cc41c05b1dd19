use std::f64::consts::PI;

use crate::object::Vector3;
use crate::propagation::{
    DENSITY_FLOOR, DENSITY_TABLE, DRAG_CEILING_KM, DRAG_COEFFICIENT, EARTH_RADIUS_KM,
    LATERAL_DRAG_FRACTION, MAX_DECAY_FRACTION,
};

/// Step-table atmospheric density (kg/m^3) for an altitude in km.
pub fn atmospheric_density(altitude_km: f64) -> f64 {
    DENSITY_TABLE
        .iter()
        .find(|(ceiling, _)| altitude_km < *ceiling)
        .map_or(DENSITY_FLOOR, |(_, rho)| *rho)
}

/// Offset to subtract from a Keplerian position to account for decay.
///
/// The model is intentionally crude: the correction grows with density and
/// with the square of elapsed time so that low objects visibly spiral in
/// over a prediction horizon. It points radially outward (so subtracting it
/// pulls the object inward) with a small along-track part so the object
/// trails its ideal position.
pub fn drag_correction(
    position: Vector3,
    velocity: Vector3,
    size_m: f64,
    elapsed_s: f64,
) -> Vector3 {
    let altitude_km = position.norm() - EARTH_RADIUS_KM;
    if altitude_km > DRAG_CEILING_KM {
        return Vector3::default();
    }

    let rho = atmospheric_density(altitude_km);
    let cross_section = PI * (size_m / 2.0).powi(2);
    let drag_accel = 0.5 * rho * cross_section * DRAG_COEFFICIENT;
    let altitude_decay = drag_accel * elapsed_s.powi(2) / 2.0;
    let factor = (altitude_decay / 1000.0)
        .min(altitude_km * MAX_DECAY_FRACTION)
        .max(0.0);

    position.normalized() * factor + velocity.normalized() * (factor * LATERAL_DRAG_FRACTION)
}
