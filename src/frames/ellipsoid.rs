use std::f64::consts::{FRAC_PI_2, PI};

/// WGS84 semi-major axis in metres.
pub const WGS84_A_M: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// First eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

const WGS84_B_M: f64 = WGS84_A_M * (1.0 - WGS84_F);

/// Result of the ellipsoidal inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticSolution {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_m: f64,
    pub iterations: u32,
    /// Size of the last latitude correction.
    pub residual_rad: f64,
    pub converged: bool,
}

/// Earth-fixed Cartesian position in metres for a WGS84 geodetic point.
pub fn geodetic_to_ecef(latitude_rad: f64, longitude_rad: f64, altitude_m: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = latitude_rad.sin_cos();
    let (sin_lon, cos_lon) = longitude_rad.sin_cos();
    let n = WGS84_A_M / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    [
        (n + altitude_m) * cos_lat * cos_lon,
        (n + altitude_m) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + altitude_m) * sin_lat,
    ]
}

/// Inverts an Earth-fixed position (metres) to WGS84 latitude, longitude
/// and height with a Newton iteration on latitude.
///
/// The iteration stops once the latitude correction drops below
/// `tolerance_rad` or after `max_iterations` steps; in the latter case the
/// last estimate is returned with `converged` unset.
pub fn ecef_to_geodetic(position_m: [f64; 3], tolerance_rad: f64, max_iterations: u32) -> GeodeticSolution {
    let [x, y, z] = position_m;
    let p = x.hypot(y);
    let longitude_rad = if p > 0.0 { y.atan2(x) } else { 0.0 };

    // On the polar axis the longitude is undefined and the latitude exact.
    if p < 1e-9 {
        let latitude_rad = if z >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        return GeodeticSolution {
            latitude_rad,
            longitude_rad,
            altitude_m: z.abs() - WGS84_B_M,
            iterations: 0,
            residual_rad: 0.0,
            converged: true,
        };
    }

    let mut phi = z.atan2(p * (1.0 - WGS84_E2));
    let mut iterations = 0;
    let mut residual_rad = f64::INFINITY;

    while iterations < max_iterations {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let w2 = 1.0 - WGS84_E2 * sin_phi * sin_phi;
        let w = w2.sqrt();
        let n = WGS84_A_M / w;

        let f = p * sin_phi - z * cos_phi - WGS84_E2 * n * sin_phi * cos_phi;
        let df = p * cos_phi + z * sin_phi
            - WGS84_E2
                * (n * (cos_phi * cos_phi - sin_phi * sin_phi)
                    + WGS84_A_M * WGS84_E2 * sin_phi * sin_phi * cos_phi * cos_phi / (w2 * w));

        let step = f / df;
        phi = (phi - step).clamp(-FRAC_PI_2, FRAC_PI_2);
        iterations += 1;
        residual_rad = step.abs();
        if residual_rad < tolerance_rad {
            break;
        }
    }

    let (sin_phi, cos_phi) = phi.sin_cos();
    let w = (1.0 - WGS84_E2 * sin_phi * sin_phi).sqrt();
    let altitude_m = p * cos_phi + z * sin_phi - WGS84_A_M * w;

    GeodeticSolution {
        latitude_rad: phi,
        longitude_rad: normalize_longitude(longitude_rad),
        altitude_m,
        iterations,
        residual_rad,
        converged: residual_rad < tolerance_rad,
    }
}

fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI && lon > 0.0 {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trips_forward_conversion() {
        for &(lat, lon, alt) in &[
            (0.0, 0.0, 0.0),
            (51.4779, -0.0015, 45.0),
            (-33.86, 151.21, 550_000.0),
            (78.2, 15.6, 1_200_000.0),
            (-89.9, -179.5, 20_200_000.0),
        ] {
            let ecef = geodetic_to_ecef(f64::to_radians(lat), f64::to_radians(lon), alt);
            let solution = ecef_to_geodetic(ecef, 1e-12, 20);
            assert!(solution.converged, "{lat} {lon} {alt}");
            assert_relative_eq!(solution.latitude_rad.to_degrees(), lat, epsilon = 1e-9);
            assert_relative_eq!(solution.longitude_rad.to_degrees(), lon, epsilon = 1e-9);
            assert_relative_eq!(solution.altitude_m, alt, epsilon = 1e-4);
        }
    }

    #[test]
    fn poles_are_handled_explicitly() {
        let north = ecef_to_geodetic([0.0, 0.0, WGS84_B_M + 500_000.0], 1e-12, 20);
        assert_eq!(north.latitude_rad, FRAC_PI_2);
        assert_relative_eq!(north.altitude_m, 500_000.0, epsilon = 1e-6);

        let south = ecef_to_geodetic([0.0, 0.0, -WGS84_B_M], 1e-12, 20);
        assert_eq!(south.latitude_rad, -FRAC_PI_2);
        assert_relative_eq!(south.altitude_m, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn iteration_cap_reports_unconverged() {
        let ecef = geodetic_to_ecef(0.9, 0.3, 700_000.0);
        let solution = ecef_to_geodetic(ecef, 1e-15, 1);
        assert_eq!(solution.iterations, 1);
        assert!(!solution.converged);
        assert_relative_eq!(solution.latitude_rad, 0.9, epsilon = 1e-5);
    }

    #[test]
    fn longitude_stays_in_range() {
        let solution = ecef_to_geodetic([-7_000_000.0, -1e-3, 0.0], 1e-12, 20);
        assert!(solution.longitude_rad >= -PI && solution.longitude_rad <= PI);
        assert_relative_eq!(solution.longitude_rad.abs(), PI, epsilon = 1e-9);
    }
}
