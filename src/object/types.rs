use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::object::Vector3;
use crate::propagation::{PropagationError, EARTH_RADIUS_KM};

/// Classical element set at a reference epoch. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElementSet {
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    /// Revolutions per day.
    pub mean_motion: f64,
    pub epoch: DateTime<Utc>,
}

impl OrbitalElementSet {
    /// Rejects element sets the propagator cannot converge on.
    pub fn validate(&self) -> Result<(), PropagationError> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(PropagationError::EccentricityOutOfRange(self.eccentricity));
        }
        if !self.mean_motion.is_finite() || self.mean_motion <= 0.0 {
            return Err(PropagationError::NonPositiveMeanMotion(self.mean_motion));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vector3>,
    pub timestamp: DateTime<Utc>,
}

impl StateVector {
    pub fn new(position: Vector3, velocity: Option<Vector3>, timestamp: DateTime<Utc>) -> Self {
        Self {
            position,
            velocity,
            timestamp,
        }
    }

    /// Velocity, treating an unknown velocity as at rest.
    pub fn velocity_or_zero(&self) -> Vector3 {
        self.velocity.unwrap_or_default()
    }

    pub fn altitude_km(&self) -> f64 {
        self.position.norm() - EARTH_RADIUS_KM
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpacecraftClass {
    Station,
    Satellite,
    Spacecraft,
}

/// Role-specific payload of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    Debris { risk_level: RiskLevel },
    Spacecraft { class: SpacecraftClass, active: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    pub altitude_km: f64,
    pub inclination_deg: f64,
    pub eccentricity: f64,
}

impl OrbitalParameters {
    pub fn derive(state: &StateVector, elements: Option<&OrbitalElementSet>) -> Self {
        Self {
            altitude_km: state.altitude_km(),
            inclination_deg: elements.map_or(0.0, |e| e.inclination_deg),
            eccentricity: elements.map_or(0.0, |e| e.eccentricity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCloseApproach {
    pub target_id: String,
    pub distance_km: f64,
    pub time: DateTime<Utc>,
}

/// A piece of debris or a spacecraft, as handed over by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: String,
    pub name: String,
    /// Characteristic diameter in meters.
    pub size_m: f64,
    pub mass_kg: f64,
    pub state: StateVector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<OrbitalElementSet>,
    pub orbit: OrbitalParameters,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub last_update: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_close_approach: Option<NextCloseApproach>,
}

impl TrackedObject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size_m: f64,
        mass_kg: f64,
        state: StateVector,
        elements: Option<OrbitalElementSet>,
        kind: ObjectKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size_m,
            mass_kg,
            orbit: OrbitalParameters::derive(&state, elements.as_ref()),
            last_update: state.timestamp,
            state,
            elements,
            kind,
            next_close_approach: None,
        }
    }

    /// Debris whose risk tag is derived from its current altitude and speed.
    pub fn debris(id: impl Into<String>, size_m: f64, state: StateVector) -> Self {
        let risk_level = baseline_debris_risk(state.altitude_km(), state.velocity_or_zero().norm());
        let id = id.into();
        Self::new(
            id.clone(),
            id,
            size_m,
            0.0,
            state,
            None,
            ObjectKind::Debris { risk_level },
        )
    }

    pub fn spacecraft(id: impl Into<String>, state: StateVector) -> Self {
        let id = id.into();
        Self::new(
            id.clone(),
            id,
            0.0,
            0.0,
            state,
            None,
            ObjectKind::Spacecraft {
                class: SpacecraftClass::Spacecraft,
                active: true,
            },
        )
    }

    pub fn with_elements(mut self, elements: OrbitalElementSet) -> Self {
        self.orbit = OrbitalParameters::derive(&self.state, Some(&elements));
        self.elements = Some(elements);
        self
    }

    pub fn position(&self) -> Vector3 {
        self.state.position
    }

    pub fn velocity(&self) -> Vector3 {
        self.state.velocity_or_zero()
    }

    pub fn altitude_km(&self) -> f64 {
        self.orbit.altitude_km
    }

    pub fn is_debris(&self) -> bool {
        matches!(self.kind, ObjectKind::Debris { .. })
    }

    /// Spacecraft that can still maneuver and therefore act as screening targets.
    pub fn is_active_spacecraft(&self) -> bool {
        matches!(self.kind, ObjectKind::Spacecraft { active: true, .. })
    }
}

/// Coarse catalog-level risk tag: low, fast objects are re-entry or crowded-shell hazards.
pub fn baseline_debris_risk(altitude_km: f64, speed_km_s: f64) -> RiskLevel {
    if altitude_km < 2000.0 && speed_km_s > 4.8 {
        RiskLevel::High
    } else if altitude_km < 550.0 && speed_km_s > 3.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
