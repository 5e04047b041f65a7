use std::f64::consts::{PI, TAU};

use crate::elements::OrbitalElementSet;
use crate::epoch::EpochTime;
use crate::propagator::deep_space::{DeepSpace, EpochElements, MeanState, NearEarthRates};
use crate::propagator::{Frame, Geopotential, GravityModel, PropagatedState, PropagationError, Regime};

const DEG2RAD: f64 = PI / 180.0;
const MINUTES_PER_DAY: f64 = 1440.0;
const TEMP4: f64 = 1.5e-12;
const KEPLER_MAX_ITERATIONS: usize = 10;
const KEPLER_TOLERANCE: f64 = 1.0e-12;
/// Remaining correction above which the capped Kepler loop is treated as
/// diverged rather than merely slow.
const KEPLER_DIVERGENCE: f64 = 1.0e-10;

/// Higher-order drag terms, absent when perigee is below 220 km or the
/// orbit is long-period.
#[derive(Debug, Clone, Copy)]
struct HigherOrderDrag {
    d2: f64,
    d3: f64,
    d4: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
    cc5: f64,
    omgcof: f64,
    xmcof: f64,
    eta: f64,
    delmo: f64,
    sinmao: f64,
}

/// Long-period J3 and short-period J2 coefficients that depend on
/// inclination only.
#[derive(Debug, Clone, Copy)]
struct InclinationTerms {
    aycof: f64,
    xlcof: f64,
    con41: f64,
    x1mth2: f64,
    x7thm1: f64,
}

impl InclinationTerms {
    fn new(sin_i: f64, cos_i: f64, j3oj2: f64) -> Self {
        let cosisq = cos_i * cos_i;
        let denominator = if (cos_i + 1.0).abs() > TEMP4 { 1.0 + cos_i } else { TEMP4 };
        InclinationTerms {
            aycof: -0.5 * j3oj2 * sin_i,
            xlcof: -0.25 * j3oj2 * sin_i * (3.0 + 5.0 * cos_i) / denominator,
            con41: 3.0 * cosisq - 1.0,
            x1mth2: 1.0 - cosisq,
            x7thm1: 7.0 * cosisq - 1.0,
        }
    }
}

#[derive(Debug, Clone)]
enum Dynamics {
    NearEarth { drag: Option<HigherOrderDrag> },
    DeepSpace(Box<DeepSpace>),
}

/// SGP4/SDP4 propagator initialised for one element set.
///
/// Propagation takes `&self`: the same offset always produces the same
/// state, regardless of which offsets were requested before.
#[derive(Debug, Clone)]
pub struct Propagator {
    satellite_id: u32,
    epoch: EpochTime,
    geo: Geopotential,
    regime: Regime,
    elements: EpochElements,
    bstar: f64,
    rates: NearEarthRates,
    nodecf: f64,
    cc1: f64,
    cc4: f64,
    t2cof: f64,
    inclination_terms: InclinationTerms,
    dynamics: Dynamics,
}

impl Propagator {
    pub fn new(
        set: &OrbitalElementSet,
        epoch: &EpochTime,
        gravity: GravityModel,
    ) -> Result<Self, PropagationError> {
        let geo = gravity.constants();
        let e = &set.elements;

        let ecco = e.eccentricity;
        if !(0.0..1.0).contains(&ecco) {
            return Err(PropagationError::InvalidElements(format!(
                "eccentricity {} outside [0, 1)",
                ecco
            )));
        }
        if !(e.mean_motion.is_finite() && e.mean_motion > 0.0) {
            return Err(PropagationError::InvalidElements(format!(
                "mean motion {} rev/day is not positive",
                e.mean_motion
            )));
        }

        let inclo = e.inclination_deg * DEG2RAD;
        let nodeo = e.raan_deg * DEG2RAD;
        let argpo = e.arg_perigee_deg * DEG2RAD;
        let mo = e.mean_anomaly_deg * DEG2RAD;
        let no_kozai = e.mean_motion * TAU / MINUTES_PER_DAY;
        let bstar = e.bstar;

        // Recover the original mean motion from the Kozai mean motion.
        let x2o3 = 2.0 / 3.0;
        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let cosio = inclo.cos();
        let cosio2 = cosio * cosio;
        let sinio = inclo.sin();

        let ak = (geo.xke / no_kozai).powf(x2o3);
        let d1 = 0.75 * geo.j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
        let del = d1 / (ak * ak);
        let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
        let del = d1 / (adel * adel);
        let no_unkozai = no_kozai / (1.0 + del);

        let ao = (geo.xke / no_unkozai).powf(x2o3);
        let po = ao * omeosq;
        let con42 = 1.0 - 5.0 * cosio2;
        let posq = po * po;
        let rp = ao * (1.0 - ecco);

        let epoch_days = epoch.days_since_1950();
        let gsto = gstime(epoch.julian_date());

        // Atmosphere model: density reference heights in Earth radii.
        let ss = 78.0 / geo.radius_km + 1.0;
        let qzms2t = ((120.0 - 78.0) / geo.radius_km).powi(4);
        let perigee_km = (rp - 1.0) * geo.radius_km;
        let (sfour, qzms24) = if perigee_km < 156.0 {
            let s = if perigee_km < 98.0 { 20.0 } else { perigee_km - 78.0 };
            (s / geo.radius_km + 1.0, ((120.0 - s) / geo.radius_km).powi(4))
        } else {
            (ss, qzms2t)
        };

        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);
        let inclination_terms = InclinationTerms::new(sinio, cosio, geo.j3oj2);
        let con41 = inclination_terms.con41;
        let x1mth2 = inclination_terms.x1mth2;

        let cc2 = coef1
            * no_unkozai
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * geo.j2 * tsi / psisq * con41 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let cc1 = bstar * cc2;
        let cc3 = if ecco > 1.0e-4 {
            -2.0 * coef * tsi * geo.j3oj2 * no_unkozai * sinio / ecco
        } else {
            0.0
        };
        let cc4 = 2.0
            * no_unkozai
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - geo.j2 * tsi / (ao * psisq)
                    * (-3.0 * con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75 * x1mth2 * (2.0 * etasq - eeta * (1.0 + etasq)) * (2.0 * argpo).cos()));
        let cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * geo.j2 * pinvsq * no_unkozai;
        let temp2 = 0.5 * temp1 * geo.j2 * pinvsq;
        let temp3 = -0.46875 * geo.j4 * pinvsq * pinvsq * no_unkozai;
        let mdot = no_unkozai
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        let argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        let nodedot =
            xhdot1 + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;
        let rates = NearEarthRates {
            mdot,
            argpdot,
            nodedot,
        };

        let elements = EpochElements {
            eccentricity: ecco,
            inclination: inclo,
            raan: nodeo,
            arg_perigee: argpo,
            mean_anomaly: mo,
            mean_motion: no_unkozai,
        };

        let regime = Regime::select(TAU / no_unkozai);
        let dynamics = match regime {
            Regime::LongPeriod => Dynamics::DeepSpace(Box::new(DeepSpace::new(
                epoch_days, &elements, &rates, gsto, geo.xke,
            ))),
            Regime::ShortPeriod if rp < 220.0 / geo.radius_km + 1.0 => Dynamics::NearEarth { drag: None },
            Regime::ShortPeriod => {
                let cc1sq = cc1 * cc1;
                let d2 = 4.0 * ao * tsi * cc1sq;
                let temp = d2 * tsi * cc1 / 3.0;
                let d3 = (17.0 * ao + sfour) * temp;
                let d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * cc1;
                let delmo = 1.0 + eta * mo.cos();
                Dynamics::NearEarth {
                    drag: Some(HigherOrderDrag {
                        d2,
                        d3,
                        d4,
                        t3cof: d2 + 2.0 * cc1sq,
                        t4cof: 0.25 * (3.0 * d3 + cc1 * (12.0 * d2 + 10.0 * cc1sq)),
                        t5cof: 0.2
                            * (3.0 * d4 + 12.0 * cc1 * d3 + 6.0 * d2 * d2 + 15.0 * cc1sq * (2.0 * d2 + cc1sq)),
                        cc5,
                        omgcof: bstar * cc3 * argpo.cos(),
                        xmcof: if ecco > 1.0e-4 { -x2o3 * coef * bstar / eeta } else { 0.0 },
                        eta,
                        delmo: delmo * delmo * delmo,
                        sinmao: mo.sin(),
                    }),
                }
            }
        };

        let propagator = Propagator {
            satellite_id: set.norad_id,
            epoch: *epoch,
            geo,
            regime,
            elements,
            bstar,
            rates,
            nodecf: 3.5 * omeosq * xhdot1 * cc1,
            cc1,
            cc4,
            t2cof: 1.5 * cc1,
            inclination_terms,
            dynamics,
        };

        log::debug!(
            "Initialised {} ({:?}, period {:.2} min, resonant: {})",
            set.norad_id,
            regime,
            TAU / no_unkozai,
            matches!(&propagator.dynamics, Dynamics::DeepSpace(ds) if ds.is_resonant())
        );

        // A state at epoch must exist; this rejects sets already decayed.
        propagator
            .propagate(0.0)
            .map_err(|e| PropagationError::InvalidElements(e.to_string()))?;
        Ok(propagator)
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// TEME state `offset_minutes` after the element-set epoch.
    pub fn propagate(&self, offset_minutes: f64) -> Result<PropagatedState, PropagationError> {
        let t = offset_minutes;
        let geo = &self.geo;
        let el = &self.elements;
        let x2o3 = 2.0 / 3.0;
        let vkmpersec = geo.radius_km * geo.xke / 60.0;

        // Secular gravity and drag.
        let xmdf = el.mean_anomaly + self.rates.mdot * t;
        let argpdf = el.arg_perigee + self.rates.argpdot * t;
        let nodedf = el.raan + self.rates.nodedot * t;
        let t2 = t * t;
        let mut mean = MeanState {
            eccentricity: el.eccentricity,
            inclination: el.inclination,
            raan: nodedf + self.nodecf * t2,
            arg_perigee: argpdf,
            mean_anomaly: xmdf,
            mean_motion: el.mean_motion,
        };
        let mut tempa = 1.0 - self.cc1 * t;
        let mut tempe = self.bstar * self.cc4 * t;
        let mut templ = self.t2cof * t2;

        match &self.dynamics {
            Dynamics::NearEarth { drag: Some(d) } => {
                let delomg = d.omgcof * t;
                let delmtemp = 1.0 + d.eta * xmdf.cos();
                let delm = d.xmcof * (delmtemp * delmtemp * delmtemp - d.delmo);
                let temp = delomg + delm;
                mean.mean_anomaly = xmdf + temp;
                mean.arg_perigee = argpdf - temp;
                let t3 = t2 * t;
                let t4 = t3 * t;
                tempa -= d.d2 * t2 + d.d3 * t3 + d.d4 * t4;
                tempe += self.bstar * d.cc5 * (mean.mean_anomaly.sin() - d.sinmao);
                templ += d.t3cof * t3 + t4 * (d.t4cof + t * d.t5cof);
            }
            Dynamics::NearEarth { drag: None } => {}
            Dynamics::DeepSpace(ds) => {
                mean = ds.secular(t, mean);
            }
        }

        if mean.mean_motion <= 0.0 {
            return Err(PropagationError::NegativeMeanMotion {
                offset_minutes: t,
                mean_motion: mean.mean_motion,
            });
        }

        let am = (geo.xke / mean.mean_motion).powf(x2o3) * tempa * tempa;
        let nm = geo.xke / am.powf(1.5);
        let mut em = mean.eccentricity - tempe;
        if !(-0.001..1.0).contains(&em) {
            return Err(PropagationError::EccentricityOutOfRange {
                offset_minutes: t,
                eccentricity: em,
            });
        }
        if em < 1.0e-6 {
            em = 1.0e-6;
        }

        let mm = mean.mean_anomaly + el.mean_motion * templ;
        let xlm = mm + mean.arg_perigee + mean.raan;
        let nodem = mean.raan % TAU;
        let argpm = mean.arg_perigee % TAU;
        let xlm = xlm % TAU;
        let mm = (xlm - argpm - nodem) % TAU;

        let mut osc = MeanState {
            eccentricity: em,
            inclination: mean.inclination,
            raan: nodem,
            arg_perigee: argpm,
            mean_anomaly: mm,
            mean_motion: nm,
        };

        // Lunar-solar periodics replace the inclination-dependent terms
        // with ones evaluated at the perturbed inclination.
        let terms = match &self.dynamics {
            Dynamics::DeepSpace(ds) => {
                osc = ds.periodics(t, osc);
                if osc.inclination < 0.0 {
                    osc.inclination = -osc.inclination;
                    osc.raan += PI;
                    osc.arg_perigee -= PI;
                }
                if !(0.0..=1.0).contains(&osc.eccentricity) {
                    return Err(PropagationError::EccentricityOutOfRange {
                        offset_minutes: t,
                        eccentricity: osc.eccentricity,
                    });
                }
                InclinationTerms::new(osc.inclination.sin(), osc.inclination.cos(), geo.j3oj2)
            }
            Dynamics::NearEarth { .. } => self.inclination_terms,
        };
        let ep = osc.eccentricity;
        let xincp = osc.inclination;
        let argpp = osc.arg_perigee;
        let nodep = osc.raan;
        let mp = osc.mean_anomaly;
        let sinip = xincp.sin();
        let cosip = xincp.cos();

        // Long-period periodics.
        let axnl = ep * argpp.cos();
        let temp = 1.0 / (am * (1.0 - ep * ep));
        let aynl = ep * argpp.sin() + temp * terms.aycof;
        let xl = mp + argpp + nodep + temp * terms.xlcof * axnl;

        let u = (xl - nodep) % TAU;
        let eo1 = solve_kepler(u, axnl, aynl, KEPLER_MAX_ITERATIONS).map_err(|correction| {
            PropagationError::KeplerDivergence {
                offset_minutes: t,
                correction,
            }
        })?;

        // Short-period preliminary quantities.
        let sineo1 = eo1.sin();
        let coseo1 = eo1.cos();
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);
        if pl < 0.0 {
            return Err(PropagationError::NegativeSemiLatusRectum {
                offset_minutes: t,
                value: pl,
            });
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        let temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        let temp = 1.0 / pl;
        let temp1 = 0.5 * geo.j2 * temp;
        let temp2 = temp1 * temp;

        // Short-period periodics.
        let mrt = rl * (1.0 - 1.5 * temp2 * betal * terms.con41) + 0.5 * temp1 * terms.x1mth2 * cos2u;
        let su = su - 0.25 * temp2 * terms.x7thm1 * sin2u;
        let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = xincp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * terms.x1mth2 * sin2u / geo.xke;
        let rvdot = rvdotl + nm * temp1 * (terms.x1mth2 * cos2u + 1.5 * terms.con41) / geo.xke;

        // Also catches a non-finite radius.
        if !(mrt >= 1.0) {
            return Err(PropagationError::Decayed {
                offset_minutes: t,
                radius_er: mrt,
            });
        }

        // Orientation vectors.
        let (sinsu, cossu) = su.sin_cos();
        let (snod, cnod) = xnode.sin_cos();
        let (sini, cosi) = xinc.sin_cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let ux = xmx * sinsu + cnod * cossu;
        let uy = xmy * sinsu + snod * cossu;
        let uz = sini * sinsu;
        let vx = xmx * cossu - cnod * sinsu;
        let vy = xmy * cossu - snod * sinsu;
        let vz = sini * cossu;

        let mr = mrt * geo.radius_km;
        Ok(PropagatedState {
            satellite_id: self.satellite_id,
            timestamp: self.epoch.at_offset(t),
            offset_minutes: t,
            position_km: [mr * ux, mr * uy, mr * uz],
            velocity_km_s: [
                (mvt * ux + rvdot * vx) * vkmpersec,
                (mvt * uy + rvdot * vy) * vkmpersec,
                (mvt * uz + rvdot * vz) * vkmpersec,
            ],
            frame: Frame::Teme,
        })
    }
}

/// Kepler's equation in the equinoctial variables, solved for the
/// eccentric longitude with Newton steps clamped to 0.95 rad.
///
/// Fails with the last correction when it is still above
/// `KEPLER_DIVERGENCE` after `max_iterations` steps.
fn solve_kepler(u: f64, axnl: f64, aynl: f64, max_iterations: usize) -> Result<f64, f64> {
    let mut eo1 = u;
    let mut tem5: f64 = 9999.9;
    let mut iterations = 0;
    while tem5.abs() >= KEPLER_TOLERANCE && iterations < max_iterations {
        let (sineo1, coseo1) = eo1.sin_cos();
        tem5 = 1.0 - coseo1 * axnl - sineo1 * aynl;
        tem5 = (u - aynl * coseo1 + axnl * sineo1 - eo1) / tem5;
        if tem5.abs() >= 0.95 {
            tem5 = 0.95_f64.copysign(tem5);
        }
        eo1 += tem5;
        iterations += 1;
    }
    if !tem5.is_finite() || tem5.abs() > KEPLER_DIVERGENCE {
        return Err(tem5);
    }
    Ok(eo1)
}

/// Initialise and propagate in one call.
pub fn propagate(
    set: &OrbitalElementSet,
    epoch: &EpochTime,
    offset_minutes: f64,
    gravity: GravityModel,
) -> Result<PropagatedState, PropagationError> {
    Propagator::new(set, epoch, gravity)?.propagate(offset_minutes)
}

/// Greenwich mean sidereal time (IAU 1982) in radians for a UT1 Julian date.
pub fn gstime(jdut1: f64) -> f64 {
    let tut1 = (jdut1 - 2_451_545.0) / 36_525.0;
    let seconds = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876_600.0 * 3600.0 + 8_640_184.812866) * tut1
        + 67_310.54841;
    (seconds * DEG2RAD / 240.0).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::resolve;
    use approx::assert_relative_eq;

    fn setup(line1: &str, line2: &str) -> (OrbitalElementSet, EpochTime) {
        let set = OrbitalElementSet::from_tle(None, line1, line2).unwrap();
        let epoch = resolve(&set).unwrap();
        (set, epoch)
    }

    fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
        ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
    }

    const VALLADO_L1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
    const VALLADO_L2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

    #[test]
    fn vallado_reference_satellite() {
        let (set, epoch) = setup(VALLADO_L1, VALLADO_L2);
        let prop = Propagator::new(&set, &epoch, GravityModel::Wgs72).unwrap();
        assert_eq!(prop.regime(), Regime::ShortPeriod);

        let s0 = prop.propagate(0.0).unwrap();
        assert!(distance(s0.position_km, [7022.46529266, -1400.08296755, 0.03995155]) < 0.1);
        assert!(distance(s0.velocity_km_s, [1.893841015, 6.405893759, 4.534807250]) < 1e-4);

        let s360 = prop.propagate(360.0).unwrap();
        assert!(distance(s360.position_km, [-7154.03120202, -3783.17682504, -3536.19412294]) < 0.1);
        assert!(distance(s360.velocity_km_s, [4.741887409, -4.151817765, -2.093935425]) < 1e-4);
        assert_eq!(s360.frame, Frame::Teme);
        assert_eq!((s360.timestamp - epoch.instant()).num_minutes(), 360);
    }

    #[test]
    fn propagation_is_order_independent() {
        let (set, epoch) = setup(
            "1 22675U 93036A   24015.50000000  .00000100  00000-0  00000+0 0  9990",
            "2 22675  63.4000 300.0000 7100000 270.0000  10.0000  2.00600000 12346",
        );
        let prop = Propagator::new(&set, &epoch, GravityModel::Wgs72).unwrap();
        assert_eq!(prop.regime(), Regime::LongPeriod);
        let direct = prop.propagate(2000.0).unwrap();
        let _ = prop.propagate(-1500.0).unwrap();
        let _ = prop.propagate(700.0).unwrap();
        assert_eq!(prop.propagate(2000.0).unwrap(), direct);
    }

    #[test]
    fn deep_space_orbits_stay_physical() {
        let cases = [
            (
                "1 28129U 03058A   24015.50000000 -.00000030  00000-0  00000+0 0  9998",
                "2 28129  55.1000 120.2000 0085000 250.0000 109.5000  2.00563000 12341",
                26_560.0,
            ),
            (
                "1 41866U 16071A   24015.50000000 -.00000090  00000-0  00000+0 0  9996",
                "2 41866   0.0500  95.0000 0001000 200.0000  60.0000  1.00270000 12345",
                42_164.0,
            ),
        ];
        for (l1, l2, sma) in cases {
            let (set, epoch) = setup(l1, l2);
            let prop = Propagator::new(&set, &epoch, GravityModel::Wgs72).unwrap();
            assert_eq!(prop.regime(), Regime::LongPeriod);
            for offset in [0.0, 360.0, 1440.0, 4320.0] {
                let s = prop.propagate(offset).unwrap();
                assert!((s.radius_km() - sma).abs() < 0.02 * sma, "{} at {}", s.radius_km(), offset);
            }
        }
    }

    #[test]
    fn free_function_matches_propagator() {
        let (set, epoch) = setup(VALLADO_L1, VALLADO_L2);
        let a = propagate(&set, &epoch, 100.0, GravityModel::Wgs72).unwrap();
        let b = Propagator::new(&set, &epoch, GravityModel::Wgs72)
            .unwrap()
            .propagate(100.0)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_hyperbolic_elements() {
        let (mut set, epoch) = setup(VALLADO_L1, VALLADO_L2);
        set.elements.eccentricity = 1.2;
        let err = Propagator::new(&set, &epoch, GravityModel::Wgs72).unwrap_err();
        assert!(matches!(err, PropagationError::InvalidElements(_)));
        assert_eq!(err.reason_code(), crate::reason::ReasonCode::PropagationDivergence);
    }

    #[test]
    fn decayed_orbit_reported() {
        let (mut set, epoch) = setup(VALLADO_L1, VALLADO_L2);
        // Perigee inside the Earth.
        set.elements.eccentricity = 0.9;
        assert!(Propagator::new(&set, &epoch, GravityModel::Wgs72).is_err());
    }

    #[test]
    fn high_drag_orbit_decays_after_epoch() {
        let (set, epoch) = setup(
            "1 44799U 19074Z   24015.25000000  .00500000  00000-0  80000-0 0  9996",
            "2 44799  51.6000   0.0000 0100000  90.0000   0.0000 15.90000000 23456",
        );
        let propagator = Propagator::new(&set, &epoch, GravityModel::Wgs72).unwrap();
        let early = propagator.propagate(30.0).unwrap();
        assert!(early.radius_km() > 6_378.135);

        match propagator.propagate(60.0) {
            Err(PropagationError::Decayed {
                offset_minutes,
                radius_er,
            }) => {
                assert_eq!(offset_minutes, 60.0);
                assert!(radius_er < 1.0, "{radius_er}");
            }
            other => panic!("expected decay, got {other:?}"),
        }
    }

    #[test]
    fn kepler_solution_satisfies_equation() {
        let (u, axnl, aynl) = (1.0, 0.3, 0.2);
        let e = solve_kepler(u, axnl, aynl, KEPLER_MAX_ITERATIONS).unwrap();
        let residual = u - (e - axnl * e.sin() + aynl * e.cos());
        assert!(residual.abs() < 1e-12, "{residual:e}");
    }

    #[test]
    fn kepler_iteration_cap_reports_divergence() {
        let correction = solve_kepler(0.5, 0.7, 0.0, 1).unwrap_err();
        assert_relative_eq!(correction, 0.870_12, epsilon = 1e-4);
        assert!(solve_kepler(f64::NAN, 0.1, 0.1, KEPLER_MAX_ITERATIONS).is_err());
    }

    #[test]
    fn sidereal_time_at_j2000() {
        // 280.46061837 degrees at 2000-01-01 12:00 UT1
        assert_relative_eq!(gstime(2_451_545.0).to_degrees(), 280.46061837, epsilon = 1e-6);
    }
}
