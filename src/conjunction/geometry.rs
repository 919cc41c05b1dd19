use crate::conjunction::CO_MOVING_THRESHOLD;
use crate::object::Vector3;
use crate::propagation::SECONDS_PER_HOUR;

pub fn relative_speed(v1: Vector3, v2: Vector3) -> f64 {
    (v2 - v1).norm()
}

/// Hours until closest approach under straight-line relative motion.
///
/// Returns infinity for co-moving objects and never a negative time.
pub fn time_to_closest_approach(p1: Vector3, v1: Vector3, p2: Vector3, v2: Vector3) -> f64 {
    let rel_pos = p2 - p1;
    let rel_vel = v2 - v1;
    let rel_speed2 = rel_vel.norm_squared();

    if rel_speed2 < CO_MOVING_THRESHOLD {
        return f64::INFINITY;
    }

    let seconds = -rel_pos.dot(&rel_vel) / rel_speed2;
    seconds.max(0.0) / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_states_never_approach() {
        let p = Vector3::new(6800.0, 10.0, -4.0);
        let v = Vector3::new(0.0, 7.6, 0.1);
        assert_eq!(time_to_closest_approach(p, v, p, v), f64::INFINITY);
    }

    #[test]
    fn head_on_pair() {
        // 36 km apart closing at 10 km/s -> 3.6 s
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(36.0, 0.0, 0.0);
        let v1 = Vector3::new(5.0, 0.0, 0.0);
        let v2 = Vector3::new(-5.0, 0.0, 0.0);
        assert_relative_eq!(
            time_to_closest_approach(p1, v1, p2, v2),
            3.6 / 3600.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(relative_speed(v1, v2), 10.0);
    }

    #[test]
    fn receding_pair_is_clamped_to_now() {
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(10.0, 0.0, 0.0);
        let v1 = Vector3::new(-1.0, 0.0, 0.0);
        let v2 = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(time_to_closest_approach(p1, v1, p2, v2), 0.0);
    }
}
