use chrono::{DateTime, Utc};

use crate::conjunction::{
    assess_risk_level, circular_track, position_uncertainty_km, uncertainty_probability,
    velocity_uncertainty_km_s, ConjunctionAnalysis, ConjunctionError, Uncertainty,
    ANALYSIS_STEP_COUNT,
};
use crate::object::TrackedObject;
use crate::propagation::{
    generate_trajectory, offset_timestamp, PropagationError, SECONDS_PER_HOUR,
};

/// High-resolution look at a single debris/target pair over `hours_ahead`.
///
/// Returns `Ok(None)` when the debris has no element set. Both trajectories
/// share the same time grid, so the minimum is taken over index-aligned
/// samples.
pub fn analyze_conjunction(
    debris: &TrackedObject,
    target: &TrackedObject,
    hours_ahead: f64,
    now: DateTime<Utc>,
) -> Result<Option<ConjunctionAnalysis>, ConjunctionError> {
    if debris.elements.is_none() {
        return Ok(None);
    }

    let orbit = generate_trajectory(debris, hours_ahead, ANALYSIS_STEP_COUNT).map_err(|source| {
        ConjunctionError::Propagation {
            object: debris.id.clone(),
            source,
        }
    })?;
    let track = circular_track(target, hours_ahead, ANALYSIS_STEP_COUNT).map_err(|source| {
        ConjunctionError::Propagation {
            object: target.id.clone(),
            source,
        }
    })?;

    let (miss_distance, offset_seconds) = track
        .iter()
        .zip(&orbit.samples)
        .map(|(craft, object)| {
            (
                craft.state.position.distance(&object.state.position),
                craft.offset_seconds,
            )
        })
        .fold((f64::INFINITY, 0.0), |best, candidate| {
            if candidate.0 < best.0 {
                candidate
            } else {
                best
            }
        });

    let time_of_closest_approach = offset_timestamp(now, offset_seconds).ok_or_else(|| {
        ConjunctionError::Propagation {
            object: debris.id.clone(),
            source: PropagationError::InvalidHorizon(hours_ahead),
        }
    })?;

    let position_sigma = position_uncertainty_km(debris.altitude_km());
    let analysis = ConjunctionAnalysis {
        debris_id: debris.id.clone(),
        target_id: target.id.clone(),
        probability: uncertainty_probability(miss_distance, debris.size_m, position_sigma),
        miss_distance_km: miss_distance,
        risk_level: assess_risk_level(miss_distance, debris.size_m),
        time_of_closest_approach,
        hours_to_closest_approach: offset_seconds / SECONDS_PER_HOUR,
        uncertainty: Uncertainty {
            position_km: position_sigma,
            velocity_km_s: velocity_uncertainty_km_s(debris.size_m),
        },
    };
    log::debug!(
        "Conjunction {} / {}: miss {:.3} km at +{:.2} h, p = {:.3e}",
        analysis.debris_id,
        analysis.target_id,
        analysis.miss_distance_km,
        analysis.hours_to_closest_approach,
        analysis.probability
    );

    Ok(Some(analysis))
}
