use serde::Serialize;

/// Earth orientation at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EopParameters {
    /// Modified Julian date (UTC) the parameters apply to.
    pub mjd: f64,
    pub xp_arcsec: f64,
    pub yp_arcsec: f64,
    /// UT1-UTC in seconds.
    pub dut1_s: f64,
    /// Celestial pole offset dX (IAU 2000A) in milliarcseconds.
    pub dx_mas: f64,
    pub dy_mas: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EopProvenance {
    Published,
    Approximated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "provenance", rename_all = "snake_case")]
pub enum EarthOrientationSample {
    /// Interpolated from a published series.
    Published {
        params: EopParameters,
        /// Formal UT1-UTC uncertainty of the bracketing rows, seconds.
        dut1_error_s: f64,
        /// Formal polar motion uncertainty, arcseconds.
        pole_error_arcsec: f64,
    },
    /// From the analytic model. `substituted` is set when a published
    /// series was configured but did not cover the instant.
    Approximated {
        params: EopParameters,
        substituted: bool,
    },
}

impl EarthOrientationSample {
    pub fn params(&self) -> &EopParameters {
        match self {
            EarthOrientationSample::Published { params, .. } => params,
            EarthOrientationSample::Approximated { params, .. } => params,
        }
    }

    pub fn provenance(&self) -> EopProvenance {
        match self {
            EarthOrientationSample::Published { .. } => EopProvenance::Published,
            EarthOrientationSample::Approximated { .. } => EopProvenance::Approximated,
        }
    }

    pub fn is_substituted(&self) -> bool {
        matches!(
            self,
            EarthOrientationSample::Approximated {
                substituted: true,
                ..
            }
        )
    }
}
