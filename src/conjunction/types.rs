use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::object::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ManeuverDirection {
    Zenith,
    AntiZenith,
    CrossTrack,
    AlongTrack,
    /// Preventive burn for a predicted approach; direction left to the operator.
    OptimalAvoidance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedManeuver {
    pub delta_v_m_s: f64,
    pub direction: ManeuverDirection,
    pub execution_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertKind {
    Immediate,
    Predicted,
}

/// A close approach between a debris object and a target spacecraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConjunctionAlert {
    pub id: String,
    pub kind: AlertKind,
    pub debris_id: String,
    pub target_id: String,
    pub risk_level: RiskLevel,
    pub estimated_distance_km: f64,
    /// Hours until closest approach; infinite when the pair is co-moving.
    pub time_to_closest_approach_h: f64,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_maneuver: Option<SuggestedManeuver>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Uncertainty {
    pub position_km: f64,
    pub velocity_km_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConjunctionAnalysis {
    pub debris_id: String,
    pub target_id: String,
    pub probability: f64,
    pub miss_distance_km: f64,
    pub risk_level: RiskLevel,
    pub time_of_closest_approach: DateTime<Utc>,
    pub hours_to_closest_approach: f64,
    pub uncertainty: Uncertainty,
}
