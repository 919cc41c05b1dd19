use chrono::{DateTime, Duration, Utc};

use crate::conjunction::{
    ManeuverDirection, SuggestedManeuver, IMMEDIATE_MANEUVER_LEAD_MINUTES,
    PREVENTIVE_MANEUVER_LEAD_SECONDS, WARNING_DISTANCE_KM,
};
use crate::object::Vector3;
use crate::propagation::offset_timestamp;

/// Above this share of the approach vector on the z axis the burn is radial.
const RADIAL_DOMINANCE: f64 = 0.7;

/// Heuristic avoidance burn for a pair that is already inside the warning distance.
///
/// The delta-v is a signalling scale, not a solved maneuver.
pub fn avoidance_maneuver(
    craft_position: Vector3,
    debris_position: Vector3,
    current_distance_km: f64,
    now: DateTime<Utc>,
) -> Option<SuggestedManeuver> {
    if current_distance_km > WARNING_DISTANCE_KM {
        return None;
    }

    let safe_distance = WARNING_DISTANCE_KM.max(current_distance_km * 2.0);
    let required_delta_v = (safe_distance - current_distance_km) / 100.0;

    Some(SuggestedManeuver {
        delta_v_m_s: required_delta_v.abs(),
        direction: maneuver_direction(debris_position - craft_position),
        execution_time: now
            .checked_add_signed(Duration::minutes(IMMEDIATE_MANEUVER_LEAD_MINUTES))?,
    })
}

/// Burn scheduled one hour ahead of a predicted approach `offset_s` seconds from now.
///
/// `None` when the execution time is not a representable instant.
pub fn preventive_maneuver(
    craft_position: Vector3,
    debris_position: Vector3,
    offset_s: f64,
    now: DateTime<Utc>,
) -> Option<SuggestedManeuver> {
    let distance = craft_position.distance(&debris_position);
    let lead = (offset_s - PREVENTIVE_MANEUVER_LEAD_SECONDS).max(0.0);

    Some(SuggestedManeuver {
        delta_v_m_s: (distance / 1000.0).max(0.1),
        direction: ManeuverDirection::OptimalAvoidance,
        execution_time: offset_timestamp(now, lead)?,
    })
}

/// Burn direction from the dominant axis of the craft-to-debris vector.
pub fn maneuver_direction(approach: Vector3) -> ManeuverDirection {
    let magnitude = approach.norm();
    if magnitude == 0.0 {
        return ManeuverDirection::AlongTrack;
    }

    let z_share = approach.z / magnitude;
    if z_share > RADIAL_DOMINANCE {
        ManeuverDirection::AntiZenith
    } else if z_share < -RADIAL_DOMINANCE {
        ManeuverDirection::Zenith
    } else if approach.x.abs() > approach.y.abs() {
        ManeuverDirection::CrossTrack
    } else {
        ManeuverDirection::AlongTrack
    }
}
