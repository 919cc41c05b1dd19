use chrono::{DateTime, Utc};

use crate::conjunction::{
    assess_risk_level, avoidance_maneuver, collision_probability, relative_speed,
    time_to_closest_approach, AlertKind, ConjunctionAlert,
};
use crate::object::TrackedObject;

/// Screens every (target, debris) pair at the current instant.
///
/// No propagation is involved, so debris without an element set is screened
/// like any other object.
pub fn detect_immediate_threats(
    debris: &[TrackedObject],
    targets: &[TrackedObject],
    threshold_km: f64,
    now: DateTime<Utc>,
) -> Vec<ConjunctionAlert> {
    let mut alerts = Vec::new();

    for craft in targets {
        for object in debris {
            let distance = craft.position().distance(&object.position());
            if distance > threshold_km {
                continue;
            }

            let alert = ConjunctionAlert {
                id: format!(
                    "ALERT-{}-{}-{}",
                    craft.id,
                    object.id,
                    now.timestamp_millis()
                ),
                kind: AlertKind::Immediate,
                debris_id: object.id.clone(),
                target_id: craft.id.clone(),
                risk_level: assess_risk_level(distance, object.size_m),
                estimated_distance_km: distance,
                time_to_closest_approach_h: time_to_closest_approach(
                    craft.position(),
                    craft.velocity(),
                    object.position(),
                    object.velocity(),
                ),
                probability: collision_probability(
                    distance,
                    relative_speed(craft.velocity(), object.velocity()),
                    object.size_m,
                ),
                suggested_maneuver: avoidance_maneuver(
                    craft.position(),
                    object.position(),
                    distance,
                    now,
                ),
                created_at: now,
            };
            log::debug!(
                "{} within {:.2} km of {} ({})",
                alert.debris_id,
                distance,
                alert.target_id,
                alert.risk_level
            );
            alerts.push(alert);
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{RiskLevel, StateVector, Vector3};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap()
    }

    fn craft() -> TrackedObject {
        TrackedObject::spacecraft(
            "ISS",
            StateVector::new(
                Vector3::new(6778.0, 0.0, 0.0),
                Some(Vector3::new(0.0, 7.66, 0.0)),
                now(),
            ),
        )
    }

    fn debris_at(offset_km: f64) -> TrackedObject {
        TrackedObject::debris(
            "DEB-42",
            0.5,
            StateVector::new(
                Vector3::new(6778.0, offset_km, 0.0),
                Some(Vector3::new(0.0, -7.66, 0.0)),
                now(),
            ),
        )
    }

    #[test]
    fn distant_debris_raises_nothing() {
        let alerts = detect_immediate_threats(&[debris_at(100.0)], &[craft()], 25.0, now());
        assert!(alerts.is_empty());
    }

    #[test]
    fn close_debris_raises_one_alert() {
        let alerts = detect_immediate_threats(&[debris_at(10.0)], &[craft()], 25.0, now());
        assert_eq!(alerts.len(), 1);

        let alert = &alerts[0];
        assert_eq!(alert.kind, AlertKind::Immediate);
        assert_eq!(alert.debris_id, "DEB-42");
        assert_eq!(alert.target_id, "ISS");
        assert_eq!(alert.id, format!("ALERT-ISS-DEB-42-{}", now().timestamp_millis()));
        assert!((alert.estimated_distance_km - 10.0).abs() < 1e-9);
        // 10 km vs 0.5 m debris: between 5x and 10x log10(51)
        assert_eq!(alert.risk_level, RiskLevel::High);
        assert!((0.0..=1.0).contains(&alert.probability));
        assert!(alert.time_to_closest_approach_h > 0.0);
        assert!(alert.suggested_maneuver.is_some());
        assert_eq!(alert.created_at, now());
    }

    #[test]
    fn threshold_is_inclusive() {
        let alerts = detect_immediate_threats(&[debris_at(25.0)], &[craft()], 25.0, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].risk_level, RiskLevel::Medium);
    }

    #[test]
    fn co_moving_pair_never_closes() {
        let mut debris = debris_at(3.0);
        debris.state.velocity = craft().state.velocity;
        let alerts = detect_immediate_threats(&[debris], &[craft()], 25.0, now());
        assert_eq!(alerts[0].time_to_closest_approach_h, f64::INFINITY);
        assert_eq!(alerts[0].probability, 0.0);
        assert_eq!(alerts[0].risk_level, RiskLevel::Critical);
    }

    #[test]
    fn every_pair_is_screened() {
        let debris = vec![debris_at(1.0), debris_at(5.0), debris_at(500.0)];
        let mut second = craft();
        second.id = "TIANGONG".into();
        let alerts = detect_immediate_threats(&debris, &[craft(), second], 25.0, now());
        assert_eq!(alerts.len(), 4);
    }
}
