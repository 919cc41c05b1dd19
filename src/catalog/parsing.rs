use sgp4::Elements;

use crate::catalog::CatalogError;
use crate::object::OrbitalElementSet;

/// Splits a 2- or 3-line TLE block into (name, line1, line2).
pub fn parse_tle_lines(id: &str, tle: &str) -> Result<(Option<String>, String, String), CatalogError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].clone(), lines[1].clone())),
        3 => Ok((Some(lines[0].clone()), lines[1].clone(), lines[2].clone())),
        _ => Err(CatalogError::InvalidTleFormat(id.to_string())),
    }
}

/// Parses TLE text into an element set, returning the TLE's object name if it carried one.
pub fn elements_from_tle(
    id: &str,
    tle: &str,
) -> Result<(OrbitalElementSet, Option<String>), CatalogError> {
    let (name, line1, line2) = parse_tle_lines(id, tle)?;
    let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes()).map_err(|e| {
        CatalogError::InvalidTle {
            id: id.to_string(),
            message: e.to_string(),
        }
    })?;

    let set = OrbitalElementSet {
        inclination_deg: elements.inclination,
        raan_deg: elements.right_ascension,
        eccentricity: elements.eccentricity,
        arg_perigee_deg: elements.argument_of_perigee,
        mean_anomaly_deg: elements.mean_anomaly,
        mean_motion: elements.mean_motion,
        epoch: elements.datetime.and_utc(),
    };
    Ok((set, elements.object_name))
}
