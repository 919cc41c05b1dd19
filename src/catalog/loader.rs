use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::catalog::{elements_from_tle, CatalogError};
use crate::object::{
    baseline_debris_risk, NextCloseApproach, ObjectKind, OrbitalElementSet, RiskLevel,
    SpacecraftClass, StateVector, TrackedObject, Vector3,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    Debris,
    Spacecraft,
}

/// One object as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: EntryRole,
    #[serde(default)]
    pub class: Option<SpacecraftClass>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub size_m: f64,
    #[serde(default)]
    pub mass_kg: f64,
    pub position: Vector3,
    #[serde(default)]
    pub velocity: Option<Vector3>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub elements: Option<OrbitalElementSet>,
    /// Raw 2- or 3-line TLE, used when `elements` is absent.
    #[serde(default)]
    pub tle: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    objects: Vec<CatalogEntry>,
}

impl CatalogEntry {
    fn into_object(self, loaded_at: DateTime<Utc>) -> Result<TrackedObject, CatalogError> {
        let (elements, tle_name) = match (self.elements, self.tle.as_deref()) {
            (Some(elements), _) => (Some(elements), None),
            (None, Some(tle)) => {
                let (elements, name) = elements_from_tle(&self.id, tle)?;
                (Some(elements), name)
            }
            (None, None) => (None, None),
        };

        let state = StateVector::new(
            self.position,
            self.velocity,
            self.timestamp.unwrap_or(loaded_at),
        );
        let kind = match self.role {
            EntryRole::Debris => ObjectKind::Debris {
                risk_level: self.risk_level.unwrap_or_else(|| {
                    baseline_debris_risk(state.altitude_km(), state.velocity_or_zero().norm())
                }),
            },
            EntryRole::Spacecraft => ObjectKind::Spacecraft {
                class: self.class.unwrap_or(SpacecraftClass::Satellite),
                active: self.active,
            },
        };
        let name = self
            .name
            .or(tle_name)
            .unwrap_or_else(|| self.id.clone());

        Ok(TrackedObject::new(
            self.id,
            name,
            self.size_m,
            self.mass_kg,
            state,
            elements,
            kind,
        ))
    }
}

/// Objects split by screening role: debris on one side, maneuverable targets on the other.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    path: Option<PathBuf>,
    debris: Vec<TrackedObject>,
    targets: Vec<TrackedObject>,
    inactive: Vec<TrackedObject>,
}

impl Catalog {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let mut catalog = Self::parse(&content, Utc::now())?;
        catalog.path = Some(path);
        Ok(catalog)
    }

    /// Parses catalog YAML. Entries without a timestamp are stamped with `loaded_at`.
    pub fn parse(yaml: &str, loaded_at: DateTime<Utc>) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let objects = file
            .objects
            .into_iter()
            .map(|entry| entry.into_object(loaded_at))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_objects(objects)
    }

    pub fn from_objects(objects: Vec<TrackedObject>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut catalog = Catalog::default();

        for object in objects {
            if !seen.insert(object.id.clone()) {
                return Err(CatalogError::DuplicateId(object.id));
            }
            match object.kind {
                ObjectKind::Debris { .. } => catalog.debris.push(object),
                ObjectKind::Spacecraft { active: true, .. } => catalog.targets.push(object),
                ObjectKind::Spacecraft { active: false, .. } => catalog.inactive.push(object),
            }
        }

        Ok(catalog)
    }

    /// Re-reads the file this catalog was loaded from.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        *self = Self::load(path)?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn debris(&self) -> &[TrackedObject] {
        &self.debris
    }

    /// Active spacecraft, i.e. objects that can act on an avoidance maneuver.
    pub fn targets(&self) -> &[TrackedObject] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.debris.len() + self.targets.len() + self.inactive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.debris
            .iter()
            .chain(self.targets.iter())
            .chain(self.inactive.iter())
    }

    pub fn get(&self, id: &str) -> Result<&TrackedObject, CatalogError> {
        self.objects()
            .find(|o| o.id == id)
            .ok_or_else(|| CatalogError::UnknownObject(id.to_string()))
    }

    /// Records the upcoming approach of each debris object.
    pub fn apply_next_close_approaches(&mut self, approaches: &HashMap<String, NextCloseApproach>) {
        for object in &mut self.debris {
            object.next_close_approach = approaches.get(&object.id).cloned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
objects:
  - id: ISS
    role: spacecraft
    class: station
    size_m: 100
    mass_kg: 420000
    position: { x: 6778.0, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 7.66, z: 0.0 }
    tle: |
      ISS (ZARYA)
      1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
      2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
  - id: DEB-1
    name: Fengyun 1C fragment
    role: debris
    size_m: 0.5
    position: { x: 6778.0, y: 10.0, z: 0.0 }
    velocity: { x: 0.0, y: -7.66, z: 0.0 }
    timestamp: 2026-01-12T10:00:00Z
    elements:
      inclination_deg: 98.6
      raan_deg: 10.0
      eccentricity: 0.001
      arg_perigee_deg: 0.0
      mean_anomaly_deg: 0.0
      mean_motion: 14.2
      epoch: 2026-01-12T00:00:00Z
  - id: DEB-2
    role: debris
    risk_level: critical
    size_m: 2.0
    position: { x: 0.0, y: 7200.0, z: 0.0 }
  - id: OLD-SAT
    role: spacecraft
    active: false
    position: { x: 0.0, y: 0.0, z: 7500.0 }
"#;

    fn loaded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 12, 0, 0).unwrap()
    }

    #[test]
    fn objects_are_split_by_role() {
        let catalog = Catalog::parse(CATALOG, loaded_at()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.debris().len(), 2);
        assert_eq!(catalog.targets().len(), 1);
        assert_eq!(catalog.targets()[0].id, "ISS");
        assert!(catalog.get("OLD-SAT").is_ok());
    }

    #[test]
    fn tle_and_explicit_elements_are_both_accepted() {
        let catalog = Catalog::parse(CATALOG, loaded_at()).unwrap();
        let iss = catalog.get("ISS").unwrap();
        assert_eq!(iss.name, "ISS (ZARYA)");
        assert!((iss.elements.unwrap().inclination_deg - 51.6461).abs() < 1e-9);
        assert_eq!(iss.state.timestamp, loaded_at());

        let fragment = catalog.get("DEB-1").unwrap();
        assert_eq!(fragment.name, "Fengyun 1C fragment");
        assert_eq!(fragment.orbit.inclination_deg, 98.6);
        assert_eq!(
            fragment.last_update,
            Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn debris_risk_defaults_to_baseline() {
        let catalog = Catalog::parse(CATALOG, loaded_at()).unwrap();
        match catalog.get("DEB-1").unwrap().kind {
            ObjectKind::Debris { risk_level } => assert_eq!(risk_level, RiskLevel::High),
            other => panic!("unexpected kind {other:?}"),
        }
        match catalog.get("DEB-2").unwrap().kind {
            ObjectKind::Debris { risk_level } => assert_eq!(risk_level, RiskLevel::Critical),
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(catalog.get("DEB-2").unwrap().elements.is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
objects:
  - { id: A, role: debris, position: { x: 7000.0, y: 0.0, z: 0.0 } }
  - { id: A, role: debris, position: { x: 7100.0, y: 0.0, z: 0.0 } }
"#;
        assert!(matches!(
            Catalog::parse(yaml, loaded_at()),
            Err(CatalogError::DuplicateId(id)) if id == "A"
        ));
    }

    #[test]
    fn unknown_object_lookup_fails() {
        let catalog = Catalog::parse(CATALOG, loaded_at()).unwrap();
        assert!(matches!(
            catalog.get("NOPE"),
            Err(CatalogError::UnknownObject(_))
        ));
    }

    #[test]
    fn load_and_reload_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(CATALOG.as_bytes()).unwrap();
        let mut catalog = Catalog::load(temp.path()).unwrap();
        assert_eq!(catalog.path(), Some(temp.path()));
        assert_eq!(catalog.len(), 4);

        std::fs::write(
            temp.path(),
            "objects:\n  - { id: X, role: debris, position: { x: 7000.0, y: 0.0, z: 0.0 } }\n",
        )
        .unwrap();
        catalog.reload().unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn next_approaches_are_attached_to_debris() {
        let mut catalog = Catalog::parse(CATALOG, loaded_at()).unwrap();
        let mut approaches = HashMap::new();
        approaches.insert(
            "DEB-1".to_string(),
            NextCloseApproach {
                target_id: "ISS".into(),
                distance_km: 4.2,
                time: loaded_at(),
            },
        );
        catalog.apply_next_close_approaches(&approaches);
        assert_eq!(
            catalog.get("DEB-1").unwrap().next_close_approach.as_ref().map(|a| a.distance_km),
            Some(4.2)
        );
        assert!(catalog.get("DEB-2").unwrap().next_close_approach.is_none());
    }
}
