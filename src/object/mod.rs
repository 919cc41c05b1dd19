mod types;
mod vector;

pub use types::{
    baseline_debris_risk, NextCloseApproach, ObjectKind, OrbitalElementSet, OrbitalParameters,
    RiskLevel, SpacecraftClass, StateVector, TrackedObject,
};
pub use vector::Vector3;
