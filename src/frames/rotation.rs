use nalgebra::Matrix3;

// Frame (passive) rotations: `r_new = rx(a) * r_old` rotates the axes by
// `a` about x.

pub(crate) fn rx(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

pub(crate) fn ry(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

pub(crate) fn rz(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_z_moves_axes() {
        // Rotating the frame by +90° about z puts the old x axis at -y.
        let v = rz(FRAC_PI_2) * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-15);
        let v = rx(FRAC_PI_2) * Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        let v = ry(FRAC_PI_2) * Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(v, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn rotations_are_orthonormal() {
        let m = rz(0.3) * rx(-1.1) * ry(2.0);
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-14);
    }
}
