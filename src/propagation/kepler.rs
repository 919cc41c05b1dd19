use std::f64::consts::PI;

use crate::object::Vector3;
use crate::propagation::{
    PropagationError, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, MU_EARTH_KM3_S2, SECONDS_PER_DAY,
};

/// Semi-major axis (km) from mean motion (rev/day) via Kepler's third law.
pub fn compute_semi_major_axis(mean_motion: f64) -> Result<f64, PropagationError> {
    if !mean_motion.is_finite() || mean_motion <= 0.0 {
        return Err(PropagationError::NonPositiveMeanMotion(mean_motion));
    }
    let n_rad_s = mean_motion * 2.0 * PI / SECONDS_PER_DAY;
    Ok((MU_EARTH_KM3_S2 / (n_rad_s * n_rad_s)).cbrt())
}

pub fn orbital_period_seconds(semi_major_axis_km: f64) -> f64 {
    2.0 * PI * (semi_major_axis_km.powi(3) / MU_EARTH_KM3_S2).sqrt()
}

/// Solves Kepler's equation with Newton-Raphson and returns the true anomaly.
///
/// Both anomalies are in radians.
pub fn mean_to_true_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, PropagationError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(PropagationError::EccentricityOutOfRange(eccentricity));
    }

    let mut eccentric_anomaly = mean_anomaly;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let residual =
            eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;
        eccentric_anomaly -= residual / (1.0 - eccentricity * eccentric_anomaly.cos());
        if residual.abs() < KEPLER_TOLERANCE {
            break;
        }
    }

    let half = eccentric_anomaly / 2.0;
    Ok(2.0
        * f64::atan2(
            (1.0 + eccentricity).sqrt() * half.sin(),
            (1.0 - eccentricity).sqrt() * half.cos(),
        ))
}

/// ECI position (km) from classical elements. Angles in degrees, true anomaly in radians.
pub fn orbital_to_cartesian(
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    raan_deg: f64,
    arg_perigee_deg: f64,
    true_anomaly: f64,
) -> Vector3 {
    let r = semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());
    let perifocal = (r * true_anomaly.cos(), r * true_anomaly.sin());
    perifocal_to_eci(perifocal, inclination_deg, raan_deg, arg_perigee_deg)
}

/// ECI velocity (km/s) matching [`orbital_to_cartesian`].
pub fn orbital_velocity(
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    raan_deg: f64,
    arg_perigee_deg: f64,
    true_anomaly: f64,
) -> Vector3 {
    let h = (MU_EARTH_KM3_S2 * semi_major_axis * (1.0 - eccentricity * eccentricity)).sqrt();
    let perifocal = (
        -(MU_EARTH_KM3_S2 / h) * true_anomaly.sin(),
        (MU_EARTH_KM3_S2 / h) * (eccentricity + true_anomaly.cos()),
    );
    perifocal_to_eci(perifocal, inclination_deg, raan_deg, arg_perigee_deg)
}

// 3-1-3 rotation: RAAN about z, inclination about x, argument of perigee about z.
fn perifocal_to_eci(
    (p, q): (f64, f64),
    inclination_deg: f64,
    raan_deg: f64,
    arg_perigee_deg: f64,
) -> Vector3 {
    let (sin_raan, cos_raan) = raan_deg.to_radians().sin_cos();
    let (sin_inc, cos_inc) = inclination_deg.to_radians().sin_cos();
    let (sin_argp, cos_argp) = arg_perigee_deg.to_radians().sin_cos();

    Vector3::new(
        (cos_raan * cos_argp - sin_raan * sin_argp * cos_inc) * p
            + (-cos_raan * sin_argp - sin_raan * cos_argp * cos_inc) * q,
        (sin_raan * cos_argp + cos_raan * sin_argp * cos_inc) * p
            + (-sin_raan * sin_argp + cos_raan * cos_argp * cos_inc) * q,
        (sin_inc * sin_argp) * p + (sin_inc * cos_argp) * q,
    )
}
