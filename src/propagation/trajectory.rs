use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::object::{StateVector, TrackedObject};
use crate::propagation::{
    compute_semi_major_axis, drag_correction, mean_to_true_anomaly, orbital_period_seconds,
    orbital_to_cartesian, orbital_velocity, PropagationError, EARTH_RADIUS_KM, MAX_STEP_COUNT,
    SECONDS_PER_HOUR,
};

#[derive(Debug, Clone, Serialize)]
pub struct TrajectorySample {
    /// Seconds since the start of the trajectory.
    pub offset_seconds: f64,
    pub state: StateVector,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbitTrajectory {
    pub samples: Vec<TrajectorySample>,
    pub period_minutes: f64,
    pub apogee_km: f64,
    pub perigee_km: f64,
}

/// Propagates an object's element set over `hours_ahead` hours.
///
/// Returns `step_count + 1` evenly spaced samples starting at the object's
/// current state timestamp. Mean anomaly advances linearly with the
/// Keplerian period; each position is then pulled in by the drag model.
pub fn generate_trajectory(
    object: &TrackedObject,
    hours_ahead: f64,
    step_count: usize,
) -> Result<OrbitTrajectory, PropagationError> {
    let elements = object
        .elements
        .as_ref()
        .ok_or_else(|| PropagationError::MissingElements(object.id.clone()))?;
    elements.validate()?;
    let start = object.state.timestamp;
    validate_grid(start, hours_ahead, step_count)?;

    let semi_major_axis = compute_semi_major_axis(elements.mean_motion)?;
    let period = orbital_period_seconds(semi_major_axis);
    let time_step = hours_ahead * SECONDS_PER_HOUR / step_count as f64;

    let mut samples = Vec::with_capacity(step_count + 1);
    for i in 0..=step_count {
        let elapsed = i as f64 * time_step;
        let mean_anomaly_deg = (elements.mean_anomaly_deg + elapsed / period * 360.0) % 360.0;
        let true_anomaly =
            mean_to_true_anomaly(mean_anomaly_deg.to_radians(), elements.eccentricity)?;

        let position = orbital_to_cartesian(
            semi_major_axis,
            elements.eccentricity,
            elements.inclination_deg,
            elements.raan_deg,
            elements.arg_perigee_deg,
            true_anomaly,
        );
        let velocity = orbital_velocity(
            semi_major_axis,
            elements.eccentricity,
            elements.inclination_deg,
            elements.raan_deg,
            elements.arg_perigee_deg,
            true_anomaly,
        );
        let decay = drag_correction(position, velocity, object.size_m, elapsed);

        samples.push(TrajectorySample {
            offset_seconds: elapsed,
            state: StateVector::new(
                position - decay,
                Some(velocity),
                offset_timestamp(start, elapsed)
                    .ok_or(PropagationError::InvalidHorizon(hours_ahead))?,
            ),
        });
    }

    Ok(OrbitTrajectory {
        samples,
        period_minutes: period / 60.0,
        apogee_km: semi_major_axis * (1.0 + elements.eccentricity) - EARTH_RADIUS_KM,
        perigee_km: semi_major_axis * (1.0 - elements.eccentricity) - EARTH_RADIUS_KM,
    })
}

/// Checks that a sampling grid is usable and that its last sample is a representable instant.
pub fn validate_grid(
    start: DateTime<Utc>,
    hours_ahead: f64,
    step_count: usize,
) -> Result<(), PropagationError> {
    if step_count == 0 || step_count > MAX_STEP_COUNT {
        return Err(PropagationError::InvalidStepCount(step_count));
    }
    if !hours_ahead.is_finite() || hours_ahead < 0.0 {
        return Err(PropagationError::InvalidHorizon(hours_ahead));
    }
    offset_timestamp(start, hours_ahead * SECONDS_PER_HOUR)
        .map(|_| ())
        .ok_or(PropagationError::InvalidHorizon(hours_ahead))
}

/// `start` shifted by `seconds`, or `None` when the result falls outside chrono's range.
pub fn offset_timestamp(start: DateTime<Utc>, seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    Duration::try_milliseconds((seconds * 1000.0).round() as i64)
        .and_then(|offset| start.checked_add_signed(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{OrbitalElementSet, Vector3};
    use crate::propagation::MU_EARTH_KM3_S2;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};
    use std::f64::consts::PI;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    fn mean_motion_for(semi_major_axis: f64) -> f64 {
        (MU_EARTH_KM3_S2 / semi_major_axis.powi(3)).sqrt() * 86_400.0 / (2.0 * PI)
    }

    fn object_on_orbit(semi_major_axis: f64, eccentricity: f64, size_m: f64) -> TrackedObject {
        let elements = OrbitalElementSet {
            inclination_deg: 51.6,
            raan_deg: 120.0,
            eccentricity,
            arg_perigee_deg: 30.0,
            mean_anomaly_deg: 45.0,
            mean_motion: mean_motion_for(semi_major_axis),
            epoch: epoch(),
        };
        let state = StateVector::new(Vector3::new(semi_major_axis, 0.0, 0.0), None, epoch());
        TrackedObject::debris("DEB-TEST", size_m, state).with_elements(elements)
    }

    #[test]
    fn sample_count_and_time_span() {
        let object = object_on_orbit(7000.0, 0.01, 1.0);
        let trajectory = generate_trajectory(&object, 24.0, 100).unwrap();
        assert_eq!(trajectory.samples.len(), 101);
        assert_eq!(trajectory.samples[0].offset_seconds, 0.0);
        assert_relative_eq!(
            trajectory.samples.last().unwrap().offset_seconds,
            24.0 * 3600.0,
            epsilon = 1e-6
        );
        assert!(trajectory
            .samples
            .windows(2)
            .all(|w| w[0].offset_seconds <= w[1].offset_seconds
                && w[0].state.timestamp <= w[1].state.timestamp));
        assert_eq!(trajectory.samples[0].state.timestamp, epoch());
    }

    #[test]
    fn derived_orbit_summary() {
        let object = object_on_orbit(7000.0, 0.01, 1.0);
        let trajectory = generate_trajectory(&object, 1.0, 10).unwrap();
        assert_relative_eq!(trajectory.apogee_km, 7070.0 - EARTH_RADIUS_KM, epsilon = 1e-6);
        assert_relative_eq!(trajectory.perigee_km, 6930.0 - EARTH_RADIUS_KM, epsilon = 1e-6);
        let expected_period = 2.0 * PI * (7000.0f64.powi(3) / MU_EARTH_KM3_S2).sqrt() / 60.0;
        assert_relative_eq!(trajectory.period_minutes, expected_period, epsilon = 1e-6);
    }

    #[test]
    fn circular_orbit_closes_after_one_period() {
        let a = EARTH_RADIUS_KM + 1200.0;
        let object = object_on_orbit(a, 0.0, 2.0);
        let period_hours = orbital_period_seconds(a) / SECONDS_PER_HOUR;
        let trajectory = generate_trajectory(&object, period_hours, 12).unwrap();
        let first = trajectory.samples.first().unwrap().state.position;
        let last = trajectory.samples.last().unwrap().state.position;
        assert!(first.distance(&last) < 1e-6, "gap {} km", first.distance(&last));
    }

    #[test]
    fn low_orbit_drifts_inward() {
        let a = EARTH_RADIUS_KM + 250.0;
        let object = object_on_orbit(a, 0.0, 10.0);
        let trajectory = generate_trajectory(&object, 24.0, 48).unwrap();
        let first = trajectory.samples.first().unwrap().state.position.norm();
        let last = trajectory.samples.last().unwrap().state.position.norm();
        assert_relative_eq!(first, a, epsilon = 1e-9);
        assert!(last < a - 1e-4, "radius {last} did not decay below {a}");
    }

    #[test]
    fn high_orbit_has_no_drag_drift() {
        let a = EARTH_RADIUS_KM + 1000.0;
        let object = object_on_orbit(a, 0.0, 10.0);
        let trajectory = generate_trajectory(&object, 24.0, 48).unwrap();
        for sample in &trajectory.samples {
            assert_relative_eq!(sample.state.position.norm(), a, epsilon = 1e-8);
        }
    }

    #[test]
    fn samples_carry_orbital_velocity() {
        let a = EARTH_RADIUS_KM + 1000.0;
        let object = object_on_orbit(a, 0.0, 1.0);
        let trajectory = generate_trajectory(&object, 2.0, 4).unwrap();
        let v = trajectory.samples[2].state.velocity.unwrap();
        assert_relative_eq!(v.norm(), (MU_EARTH_KM3_S2 / a).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn missing_elements_fail() {
        let state = StateVector::new(Vector3::new(7000.0, 0.0, 0.0), None, epoch());
        let object = TrackedObject::debris("NO-TLE", 1.0, state);
        assert_eq!(
            generate_trajectory(&object, 24.0, 100).unwrap_err(),
            PropagationError::MissingElements("NO-TLE".into())
        );
    }

    #[test]
    fn invalid_grid_fails() {
        let object = object_on_orbit(7000.0, 0.0, 1.0);
        assert_eq!(
            generate_trajectory(&object, 24.0, 0).unwrap_err(),
            PropagationError::InvalidStepCount(0)
        );
        assert_eq!(
            generate_trajectory(&object, 24.0, usize::MAX).unwrap_err(),
            PropagationError::InvalidStepCount(usize::MAX)
        );
        assert!(matches!(
            generate_trajectory(&object, -1.0, 10),
            Err(PropagationError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn unrepresentable_horizon_is_rejected() {
        let object = object_on_orbit(EARTH_RADIUS_KM + 400.0, 0.0, 1.0);
        for hours in [1.0e10, 1.0e15, f64::MAX] {
            assert_eq!(
                generate_trajectory(&object, hours, 10).unwrap_err(),
                PropagationError::InvalidHorizon(hours)
            );
        }
    }

    #[test]
    fn offsets_outside_chrono_range_are_none() {
        assert_eq!(offset_timestamp(epoch(), 90.0), Some(epoch() + Duration::seconds(90)));
        assert_eq!(offset_timestamp(epoch(), 1.0e18), None);
        assert_eq!(offset_timestamp(epoch(), f64::INFINITY), None);
    }

    #[test]
    fn propagation_is_deterministic() {
        let object = object_on_orbit(EARTH_RADIUS_KM + 300.0, 0.02, 3.0);
        let a = generate_trajectory(&object, 12.0, 30).unwrap();
        let b = generate_trajectory(&object, 12.0, 30).unwrap();
        for (x, y) in a.samples.iter().zip(&b.samples) {
            assert_eq!(x.state, y.state);
        }
    }
}
