/// Mean Earth radius used for altitude conversions (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Earth's gravitational parameter (km^3/s^2).
pub const MU_EARTH_KM3_S2: f64 = 398_600.441_8;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Largest sampling grid a trajectory may be built on.
pub const MAX_STEP_COUNT: usize = 1_000_000;

pub const KEPLER_MAX_ITERATIONS: usize = 10;
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Above this altitude the drag correction is zero (km).
pub const DRAG_CEILING_KM: f64 = 800.0;
pub const DRAG_COEFFICIENT: f64 = 2.2;
/// Cumulative decay is capped at this fraction of the current altitude.
pub const MAX_DECAY_FRACTION: f64 = 0.001;
/// Along-track share of the drag correction relative to the radial part.
pub const LATERAL_DRAG_FRACTION: f64 = 0.1;

/// Upper altitude bound (km) and density (kg/m^3) of each atmosphere band.
pub const DENSITY_TABLE: [(f64, f64); 7] = [
    (200.0, 2.5e-11),
    (300.0, 1.7e-12),
    (400.0, 3.0e-13),
    (500.0, 7.0e-14),
    (600.0, 2.0e-14),
    (700.0, 7.0e-15),
    (800.0, 3.0e-15),
];
pub const DENSITY_FLOOR: f64 = 1.0e-15;
