//! Precession-nutation: IAU 2006 Fukushima-Williams precession with a
//! truncated IAU 2000B luni-solar nutation series, the CIO locator and the
//! equation of the equinoxes.

use nalgebra::Matrix3;

use super::rotation::{rx, ry, rz};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;
const MAS_TO_RAD: f64 = ARCSEC_TO_RAD / 1_000.0;
/// Series amplitudes are in units of 0.1 microarcsecond.
const SERIES_UNIT_TO_RAD: f64 = ARCSEC_TO_RAD / 1.0e7;
const ARCSEC_PER_TURN: f64 = 1_296_000.0;

/// Fixed offsets standing in for the planetary nutation terms.
const PLANETARY_DPSI_MAS: f64 = -0.135;
const PLANETARY_DEPS_MAS: f64 = 0.388;

/// One luni-solar term: multipliers of (l, l', F, D, Ω), then
/// longitude sin, sin·t, cos and obliquity cos, cos·t, sin.
struct NutationTerm {
    args: [i8; 5],
    longitude: [f64; 3],
    obliquity: [f64; 3],
}

const fn term(args: [i8; 5], longitude: [f64; 3], obliquity: [f64; 3]) -> NutationTerm {
    NutationTerm {
        args,
        longitude,
        obliquity,
    }
}

const LUNI_SOLAR: [NutationTerm; 20] = [
    term([0, 0, 0, 0, 1], [-172_064_161.0, -174_666.0, 33_386.0], [92_052_331.0, 9_086.0, 15_377.0]),
    term([0, 0, 2, -2, 2], [-13_170_906.0, -1_675.0, -13_696.0], [5_730_336.0, -3_015.0, -4_587.0]),
    term([0, 0, 2, 0, 2], [-2_276_413.0, -234.0, 2_796.0], [978_459.0, -485.0, 1_374.0]),
    term([0, 0, 0, 0, 2], [2_074_554.0, 207.0, -698.0], [-897_492.0, 470.0, -291.0]),
    term([0, 1, 0, 0, 0], [1_475_877.0, -3_633.0, 11_817.0], [73_871.0, -184.0, -1_924.0]),
    term([0, 1, 2, -2, 2], [-516_821.0, 1_226.0, -524.0], [224_386.0, -677.0, -174.0]),
    term([1, 0, 0, 0, 0], [711_159.0, 73.0, -872.0], [-6_750.0, 0.0, 358.0]),
    term([0, 0, 2, 0, 1], [-387_298.0, -367.0, 380.0], [200_728.0, 18.0, 318.0]),
    term([1, 0, 2, 0, 2], [-301_461.0, -36.0, 816.0], [129_025.0, -63.0, 367.0]),
    term([0, -1, 2, -2, 2], [215_829.0, -494.0, 111.0], [-95_929.0, 299.0, 132.0]),
    term([0, 0, 2, -2, 1], [128_227.0, 137.0, 181.0], [-68_982.0, -9.0, 39.0]),
    term([-1, 0, 2, 0, 2], [123_457.0, 11.0, 19.0], [-53_311.0, 32.0, -4.0]),
    term([-1, 0, 0, 2, 0], [156_994.0, 10.0, -168.0], [-1_235.0, 0.0, 82.0]),
    term([1, 0, 0, 0, 1], [63_110.0, 63.0, 27.0], [-33_228.0, 0.0, -9.0]),
    term([-1, 0, 0, 0, 1], [-57_976.0, -63.0, -189.0], [31_429.0, 0.0, -75.0]),
    term([-1, 0, 2, 2, 2], [-59_641.0, -11.0, 149.0], [25_543.0, -11.0, 66.0]),
    term([1, 0, 2, 0, 1], [-51_613.0, -42.0, 129.0], [26_366.0, 0.0, 78.0]),
    term([-2, 0, 2, 0, 1], [45_893.0, 50.0, 31.0], [-24_236.0, -10.0, 20.0]),
    term([0, 0, 0, 2, 0], [63_384.0, 11.0, -150.0], [-1_220.0, 0.0, 29.0]),
    term([0, 0, 2, 2, 2], [-38_571.0, -1.0, 158.0], [16_452.0, -11.0, 68.0]),
];

/// Delaunay arguments (l, l', F, D, Ω) in radians, linear in TT centuries.
pub(crate) fn delaunay_arguments(t: f64) -> [f64; 5] {
    let reduce = |arcsec: f64| (arcsec % ARCSEC_PER_TURN) * ARCSEC_TO_RAD;
    [
        reduce(485_868.249_036 + 1_717_915_923.217_8 * t),
        reduce(1_287_104.793_05 + 129_596_181.050_1 * t),
        reduce(335_779.526_232 + 1_739_527_262.847_8 * t),
        reduce(1_072_260.703_69 + 1_602_961_601.209_0 * t),
        reduce(450_160.398_036 - 6_962_890.543_1 * t),
    ]
}

fn combine(multipliers: [i8; 5], fa: &[f64; 5]) -> f64 {
    multipliers
        .iter()
        .zip(fa)
        .map(|(&m, &a)| f64::from(m) * a)
        .sum()
}

/// Nutation in longitude and obliquity, radians.
pub(crate) fn nutation(t: f64) -> (f64, f64) {
    let fa = delaunay_arguments(t);
    let (mut dp, mut de) = (0.0, 0.0);
    // Smallest terms first.
    for entry in LUNI_SOLAR.iter().rev() {
        let (sin_arg, cos_arg) = combine(entry.args, &fa).sin_cos();
        let [ps, pst, pc] = entry.longitude;
        let [ec, ect, es] = entry.obliquity;
        dp += (ps + pst * t) * sin_arg + pc * cos_arg;
        de += (ec + ect * t) * cos_arg + es * sin_arg;
    }
    (
        dp * SERIES_UNIT_TO_RAD + PLANETARY_DPSI_MAS * MAS_TO_RAD,
        de * SERIES_UNIT_TO_RAD + PLANETARY_DEPS_MAS * MAS_TO_RAD,
    )
}

/// Mean obliquity of the ecliptic (IAU 2006), radians.
pub(crate) fn mean_obliquity(t: f64) -> f64 {
    (84_381.406
        + (-46.836_769
            + (-0.000_183_1 + (0.002_003_40 + (-0.000_000_576 - 0.000_000_043_4 * t) * t) * t)
                * t)
            * t)
        * ARCSEC_TO_RAD
}

/// Bias-precession-nutation quantities at one TT instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrecessionNutation {
    /// GCRS to true-of-date rotation.
    pub matrix: Matrix3<f64>,
    pub dpsi: f64,
    pub eps_a: f64,
}

impl PrecessionNutation {
    pub fn at(t: f64) -> Self {
        let gamb = (-0.052_928
            + (10.556_378
                + (0.493_204_4 + (-0.000_312_38 + (-0.000_002_788 + 0.000_000_026_0 * t) * t) * t)
                    * t)
                * t)
            * ARCSEC_TO_RAD;
        let phib = (84_381.412_819
            + (-46.811_016
                + (0.051_126_8 + (0.000_532_89 + (-0.000_000_440 - 0.000_000_017_6 * t) * t) * t)
                    * t)
                * t)
            * ARCSEC_TO_RAD;
        let psib = (-0.041_775
            + (5_038.481_484
                + (1.558_417_5 + (-0.000_185_22 + (-0.000_026_452 - 0.000_000_014_8 * t) * t) * t)
                    * t)
                * t)
            * ARCSEC_TO_RAD;
        let eps_a = mean_obliquity(t);
        let (dpsi, deps) = nutation(t);

        let matrix = rx(-(eps_a + deps)) * rz(-(psib + dpsi)) * rx(phib) * rz(gamb);
        Self {
            matrix,
            dpsi,
            eps_a,
        }
    }

    /// Celestial intermediate pole coordinates X, Y.
    pub fn cip(&self) -> (f64, f64) {
        (self.matrix[(2, 0)], self.matrix[(2, 1)])
    }
}

/// CIO locator s (IAU 2006) given the CIP coordinates, radians.
pub(crate) fn cio_locator(t: f64, x: f64, y: f64) -> f64 {
    let [_, lp, f, d, om] = delaunay_arguments(t);
    let s0 = 94.00e-6
        - 2_640.73e-6 * om.sin()
        - 63.53e-6 * (2.0 * om).sin()
        - 11.75e-6 * (2.0 * f - 2.0 * d + 3.0 * om).sin()
        - 11.21e-6 * (2.0 * f - 2.0 * d + om).sin()
        + 4.57e-6 * (2.0 * f - 2.0 * d + 2.0 * om).sin()
        - 2.02e-6 * (2.0 * f + 3.0 * om).sin()
        - 1.98e-6 * (2.0 * f + om).sin()
        + 1.72e-6 * (3.0 * om).sin()
        + 1.41e-6 * (lp + om).sin()
        + 1.26e-6 * (lp - om).sin();
    let s1 = 3_808.65e-6 + 1.71e-6 * om.sin();
    let s2 = -122.68e-6 + 743.52e-6 * om.sin() + 56.91e-6 * (2.0 * f - 2.0 * d + 2.0 * om).sin()
        + 9.84e-6 * (2.0 * f + 2.0 * om).sin()
        - 8.85e-6 * (2.0 * om).sin();
    let s3 = -72_574.11e-6;
    let s4 = 27.98e-6;
    let s5 = 15.62e-6;
    let polynomial = s0 + (s1 + (s2 + (s3 + (s4 + s5 * t) * t) * t) * t) * t;
    polynomial * ARCSEC_TO_RAD - x * y / 2.0
}

/// Equation of the equinoxes including the complementary terms, radians.
pub(crate) fn equation_of_equinoxes(t: f64, dpsi: f64, eps_a: f64) -> f64 {
    let [_, lp, f, d, om] = delaunay_arguments(t);
    let complementary = 2_640.96e-6 * om.sin()
        + 63.52e-6 * (2.0 * om).sin()
        + 11.75e-6 * (2.0 * f - 2.0 * d + 3.0 * om).sin()
        + 11.21e-6 * (2.0 * f - 2.0 * d + om).sin()
        - 4.55e-6 * (2.0 * f - 2.0 * d + 2.0 * om).sin()
        + 2.02e-6 * (2.0 * f + 3.0 * om).sin()
        + 1.98e-6 * (2.0 * f + om).sin()
        - 1.72e-6 * (3.0 * om).sin()
        - 1.41e-6 * (lp + om).sin()
        - 1.26e-6 * (lp - om).sin()
        - 0.87e-6 * t * om.sin();
    dpsi * eps_a.cos() + complementary * ARCSEC_TO_RAD
}

/// GCRS to CIRS rotation from the CIP coordinates and s.
pub(crate) fn celestial_to_intermediate(x: f64, y: f64, s: f64) -> Matrix3<f64> {
    let r2 = x * x + y * y;
    let e = if r2 > 0.0 { y.atan2(x) } else { 0.0 };
    let d = (r2 / (1.0 - r2)).sqrt().atan();
    rz(-(e + s)) * ry(d) * rz(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nutation_near_j2000() {
        // Dominated by the 18.6-year term: Δψ ≈ -13.9", Δε ≈ -5.8" at J2000.
        let (dpsi, deps) = nutation(0.0);
        assert_relative_eq!(dpsi / ARCSEC_TO_RAD, -13.93, epsilon = 0.05);
        assert_relative_eq!(deps / ARCSEC_TO_RAD, -5.77, epsilon = 0.05);
    }

    #[test]
    fn obliquity_at_j2000() {
        assert_relative_eq!(mean_obliquity(0.0) / ARCSEC_TO_RAD, 84_381.406, epsilon = 1e-9);
    }

    #[test]
    fn precession_nutation_is_orthonormal() {
        let pn = PrecessionNutation::at(0.24);
        let product = pn.matrix * pn.matrix.transpose();
        assert_relative_eq!(product, Matrix3::identity(), epsilon = 1e-14);
    }

    #[test]
    fn cip_grows_with_precession() {
        // X is dominated by 2004.19" per century of general precession.
        let (x, _) = PrecessionNutation::at(0.2).cip();
        assert_relative_eq!(x / ARCSEC_TO_RAD, 2004.19 * 0.2, epsilon = 20.0);
    }

    #[test]
    fn intermediate_matrix_maps_pole() {
        let (x, y) = (1.2e-3, -3.4e-4);
        let c = celestial_to_intermediate(x, y, 0.0);
        let z = (1.0 - x * x - y * y).sqrt();
        let pole = c * nalgebra::Vector3::new(x, y, z);
        assert_relative_eq!(pole, nalgebra::Vector3::z(), epsilon = 1e-12);
    }
}
