use glam::Vec3;

/// Point at `radius` with polar angle `phi` measured from +Y and azimuth
/// `theta` measured from +Z toward +X.
pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_equator_zero_azimuth_points_along_z() {
        let p = from_spherical(1.0, FRAC_PI_2, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_points_along_x() {
        let p = from_spherical(1.0, FRAC_PI_2, FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn test_pole() {
        let p = from_spherical(2.0, 0.0, PI);
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_radius_is_preserved() {
        let p = from_spherical(3.5, 1.1, 2.3);
        assert!((p.length() - 3.5).abs() < 1e-5);
    }
}
