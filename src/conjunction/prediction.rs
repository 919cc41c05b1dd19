use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::conjunction::{
    assess_risk_level, future_collision_probability, preventive_maneuver, AlertKind,
    ConjunctionAlert, APPROACH_WINDOW_SECONDS, PREDICTION_STEP_COUNT, WARNING_DISTANCE_KM,
};
use crate::object::{NextCloseApproach, StateVector, TrackedObject, Vector3};
use crate::propagation::{
    generate_trajectory, offset_timestamp, validate_grid, PropagationError, TrajectorySample,
    SECONDS_PER_HOUR,
};

/// A pair of time-aligned samples closer than the screening threshold.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    pub distance_km: f64,
    /// Offset of the target sample, seconds from the start of the horizon.
    pub offset_seconds: f64,
    pub target_position: Vector3,
    pub debris_position: Vector3,
}

/// Propagates each debris object and compares it against a circular track per target.
///
/// Debris without an element set, or whose elements fail to propagate, is
/// skipped so one bad object never aborts the pass. Targets whose track
/// cannot be built over the horizon are skipped the same way.
pub fn predict_future_collisions(
    debris: &[TrackedObject],
    targets: &[TrackedObject],
    hours_ahead: f64,
    now: DateTime<Utc>,
) -> Vec<ConjunctionAlert> {
    let tracks: Vec<_> = targets
        .iter()
        .filter_map(
            |craft| match circular_track(craft, hours_ahead, PREDICTION_STEP_COUNT) {
                Ok(track) => Some((craft, track)),
                Err(e) => {
                    log::warn!("Failed to build track for {}: {}", craft.id, e);
                    None
                }
            },
        )
        .collect();

    let mut alerts = Vec::new();
    for object in debris {
        if object.elements.is_none() {
            log::debug!("Skipping {}: no element set", object.id);
            continue;
        }

        let orbit = match generate_trajectory(object, hours_ahead, PREDICTION_STEP_COUNT) {
            Ok(orbit) => orbit,
            Err(e) => {
                log::warn!("Failed to predict collisions for {}: {}", object.id, e);
                continue;
            }
        };

        for (craft, track) in &tracks {
            for approach in find_close_approaches(track, &orbit.samples, WARNING_DISTANCE_KM) {
                alerts.push(ConjunctionAlert {
                    id: format!(
                        "FUTURE-ALERT-{}-{}-{}",
                        craft.id, object.id, approach.offset_seconds
                    ),
                    kind: AlertKind::Predicted,
                    debris_id: object.id.clone(),
                    target_id: craft.id.clone(),
                    risk_level: assess_risk_level(approach.distance_km, object.size_m),
                    estimated_distance_km: approach.distance_km,
                    time_to_closest_approach_h: approach.offset_seconds / SECONDS_PER_HOUR,
                    probability: future_collision_probability(
                        approach.distance_km,
                        object.size_m,
                    ),
                    suggested_maneuver: preventive_maneuver(
                        approach.target_position,
                        approach.debris_position,
                        approach.offset_seconds,
                        now,
                    ),
                    created_at: now,
                });
            }
        }
    }

    if !alerts.is_empty() {
        log::info!(
            "Predicted {} potential conjunctions over {} h",
            alerts.len(),
            hours_ahead
        );
    }
    alerts
}

/// Future positions of a target assumed to fly a circular orbit.
///
/// The current position is rotated about the z axis at `|v| / |r|`, so the
/// track keeps the target's current z. Non-positive horizons or a zero step
/// count produce a single sample at the current position.
pub fn circular_track(
    craft: &TrackedObject,
    hours_ahead: f64,
    step_count: usize,
) -> Result<Vec<TrajectorySample>, PropagationError> {
    let position = craft.position();
    let radius = position.norm();
    let speed = craft.velocity().norm();
    let omega = if radius > 0.0 { speed / radius } else { 0.0 };

    let steps = if hours_ahead.is_finite() && hours_ahead > 0.0 {
        step_count
    } else {
        0
    };
    let time_step = if steps > 0 {
        validate_grid(craft.state.timestamp, hours_ahead, steps)?;
        hours_ahead * SECONDS_PER_HOUR / steps as f64
    } else {
        0.0
    };

    (0..=steps)
        .map(|i| {
            let elapsed = i as f64 * time_step;
            let (sin, cos) = (omega * elapsed).sin_cos();
            let timestamp = offset_timestamp(craft.state.timestamp, elapsed)
                .ok_or(PropagationError::InvalidHorizon(hours_ahead))?;
            Ok(TrajectorySample {
                offset_seconds: elapsed,
                state: StateVector::new(
                    Vector3::new(
                        position.x * cos - position.y * sin,
                        position.x * sin + position.y * cos,
                        position.z,
                    ),
                    None,
                    timestamp,
                ),
            })
        })
        .collect()
}

/// All sample pairs less than an hour apart whose separation is within `threshold_km`.
pub fn find_close_approaches(
    target_samples: &[TrajectorySample],
    debris_samples: &[TrajectorySample],
    threshold_km: f64,
) -> Vec<CloseApproach> {
    let mut approaches = Vec::new();

    for target in target_samples {
        for debris in debris_samples {
            if (target.offset_seconds - debris.offset_seconds).abs() >= APPROACH_WINDOW_SECONDS {
                continue;
            }
            let distance = target.state.position.distance(&debris.state.position);
            if distance <= threshold_km {
                approaches.push(CloseApproach {
                    distance_km: distance,
                    offset_seconds: target.offset_seconds,
                    target_position: target.state.position,
                    debris_position: debris.state.position,
                });
            }
        }
    }

    approaches
}

/// Earliest upcoming approach per debris object, ignoring pairs that never close.
pub fn next_close_approaches(
    alerts: &[ConjunctionAlert],
) -> HashMap<String, NextCloseApproach> {
    let mut next: HashMap<String, (f64, NextCloseApproach)> = HashMap::new();

    for alert in alerts {
        let hours = alert.time_to_closest_approach_h;
        if !hours.is_finite() {
            continue;
        }
        let Some(time) = offset_timestamp(alert.created_at, hours * SECONDS_PER_HOUR) else {
            continue;
        };
        let candidate = NextCloseApproach {
            target_id: alert.target_id.clone(),
            distance_km: alert.estimated_distance_km,
            time,
        };
        match next.get(&alert.debris_id) {
            Some((best, _)) if *best <= hours => {}
            _ => {
                next.insert(alert.debris_id.clone(), (hours, candidate));
            }
        }
    }

    next.into_iter()
        .map(|(id, (_, approach))| (id, approach))
        .collect()
}
