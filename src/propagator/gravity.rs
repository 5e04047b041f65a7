use serde::{Deserialize, Serialize};

/// Earth gravity model whose constants feed the analytic propagator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityModel {
    /// The constants element sets are fitted with.
    #[default]
    Wgs72,
    Wgs84,
}

/// Geopotential constants in the propagator's canonical units
/// (Earth radii, minutes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geopotential {
    /// km³/s²
    pub mu: f64,
    pub radius_km: f64,
    /// sqrt(GM) in Earth radii^1.5 per minute.
    pub xke: f64,
    /// Minutes per time unit.
    pub tumin: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j3oj2: f64,
}

impl GravityModel {
    pub fn constants(self) -> Geopotential {
        let (mu, radius_km, j2, j3, j4): (f64, f64, f64, f64, f64) = match self {
            GravityModel::Wgs72 => (398_600.8, 6378.135, 0.001_082_616, -0.000_002_538_81, -0.000_001_655_97),
            GravityModel::Wgs84 => (
                398_600.5,
                6378.137,
                0.001_082_629_989_05,
                -0.000_002_532_153_06,
                -0.000_001_610_987_61,
            ),
        };
        let xke = 60.0 / (radius_km * radius_km * radius_km / mu).sqrt();
        Geopotential {
            mu,
            radius_km,
            xke,
            tumin: 1.0 / xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wgs72_xke() {
        let c = GravityModel::Wgs72.constants();
        assert_relative_eq!(c.xke, 0.074_366_916_1, max_relative = 1e-8);
        assert_relative_eq!(c.tumin * c.xke, 1.0);
    }

    #[test]
    fn wgs84_xke() {
        let c = GravityModel::Wgs84.constants();
        assert_relative_eq!(c.xke, 0.074_366_853_168_7, max_relative = 1e-8);
        assert_relative_eq!(c.j3oj2, -0.002_338_890_558_4, max_relative = 1e-6);
    }

    #[test]
    fn model_names_deserialize() {
        let m: GravityModel = serde_yaml::from_str("wgs84").unwrap();
        assert_eq!(m, GravityModel::Wgs84);
        assert_eq!(GravityModel::default(), GravityModel::Wgs72);
    }
}
