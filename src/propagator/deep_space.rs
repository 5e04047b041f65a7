//! Lunar-solar and geopotential-resonance terms for long-period orbits.
//!
//! Everything here is computed once at initialisation and evaluated
//! without mutation afterwards: the resonance integrator restarts from the
//! epoch on every call, so a given offset always yields the same state.

use std::f64::consts::{PI, TAU};

const ZNS: f64 = 1.19459e-5;
const ZES: f64 = 0.01675;
const ZNL: f64 = 1.5835218e-4;
const ZEL: f64 = 0.05490;
const C1SS: f64 = 2.9864797e-6;
const C1L: f64 = 4.7968065e-7;
const ZSINIS: f64 = 0.39785416;
const ZCOSIS: f64 = 0.91744867;
const ZCOSGS: f64 = 0.1945905;
const ZSINGS: f64 = -0.98088458;

/// Earth rotation rate in radians per minute.
const RPTIM: f64 = 4.37526908801129966e-3;
const STEP: f64 = 720.0;
const STEP2: f64 = 259_200.0;

/// Inclinations this close to 0 or π zero the node rates.
const NEAR_EQUATORIAL: f64 = 5.2359877e-2;

/// Mean elements at epoch, radians and radians/minute.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EpochElements {
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_perigee: f64,
    pub mean_anomaly: f64,
    /// Un-Kozai'd mean motion.
    pub mean_motion: f64,
}

/// Near-Earth secular rates the resonance terms are referenced to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NearEarthRates {
    pub mdot: f64,
    pub argpdot: f64,
    pub nodedot: f64,
}

/// Mean elements after secular update, before periodics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MeanState {
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
}

/// Auxiliary products of the sun or moon geometry against the orbit.
#[derive(Debug, Clone, Copy, Default)]
struct PerturberTerms {
    s1: f64,
    s2: f64,
    s3: f64,
    s4: f64,
    s5: f64,
    s6: f64,
    s7: f64,
    z1: f64,
    z2: f64,
    z3: f64,
    z11: f64,
    z12: f64,
    z13: f64,
    z21: f64,
    z22: f64,
    z23: f64,
    z31: f64,
    z32: f64,
    z33: f64,
}

/// Orientation of the perturbing body's orbit.
struct PerturberGeometry {
    cos_g: f64,
    sin_g: f64,
    cos_i: f64,
    sin_i: f64,
    cos_h: f64,
    sin_h: f64,
    coupling: f64,
}

impl PerturberTerms {
    fn compute(geo: &PerturberGeometry, orbit: &OrbitTrig) -> Self {
        let PerturberGeometry {
            cos_g,
            sin_g,
            cos_i,
            sin_i,
            cos_h,
            sin_h,
            coupling,
        } = *geo;
        let emsq = orbit.emsq;
        let betasq = 1.0 - emsq;

        let a1 = cos_g * cos_h + sin_g * cos_i * sin_h;
        let a3 = -sin_g * cos_h + cos_g * cos_i * sin_h;
        let a7 = -cos_g * sin_h + sin_g * cos_i * cos_h;
        let a8 = sin_g * sin_i;
        let a9 = sin_g * sin_h + cos_g * cos_i * cos_h;
        let a10 = cos_g * sin_i;
        let a2 = orbit.cosim * a7 + orbit.sinim * a8;
        let a4 = orbit.cosim * a9 + orbit.sinim * a10;
        let a5 = -orbit.sinim * a7 + orbit.cosim * a8;
        let a6 = -orbit.sinim * a9 + orbit.cosim * a10;

        let x1 = a1 * orbit.cosomm + a2 * orbit.sinomm;
        let x2 = a3 * orbit.cosomm + a4 * orbit.sinomm;
        let x3 = -a1 * orbit.sinomm + a2 * orbit.cosomm;
        let x4 = -a3 * orbit.sinomm + a4 * orbit.cosomm;
        let x5 = a5 * orbit.sinomm;
        let x6 = a6 * orbit.sinomm;
        let x7 = a5 * orbit.cosomm;
        let x8 = a6 * orbit.cosomm;

        let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
        let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
        let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
        let z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * emsq;
        let z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * emsq;
        let z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * emsq;
        let z11 = -6.0 * a1 * a5 + emsq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
        let z12 = -6.0 * (a1 * a6 + a3 * a5)
            + emsq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
        let z13 = -6.0 * a3 * a6 + emsq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
        let z21 = 6.0 * a2 * a5 + emsq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
        let z22 = 6.0 * (a4 * a5 + a2 * a6)
            + emsq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
        let z23 = 6.0 * a4 * a6 + emsq * (24.0 * x2 * x6 - 6.0 * x4 * x8);

        let s3 = coupling / orbit.mean_motion;
        let s4 = s3 * orbit.rtemsq;
        PerturberTerms {
            s1: -15.0 * orbit.eccentricity * s4,
            s2: -0.5 * s3 / orbit.rtemsq,
            s3,
            s4,
            s5: x1 * x3 + x2 * x4,
            s6: x2 * x3 + x1 * x4,
            s7: x2 * x4 - x1 * x3,
            z1: z1 + z1 + betasq * z31,
            z2: z2 + z2 + betasq * z32,
            z3: z3 + z3 + betasq * z33,
            z11,
            z12,
            z13,
            z21,
            z22,
            z23,
            z31,
            z32,
            z33,
        }
    }

    /// Secular contribution (de, di, dl, dgh, dh) at rate `zn`.
    fn secular(&self, zn: f64, emsq: f64) -> [f64; 5] {
        [
            self.s1 * zn * self.s5,
            self.s2 * zn * (self.z11 + self.z13),
            -zn * self.s3 * (self.z1 + self.z3 - 14.0 - 6.0 * emsq),
            self.s4 * zn * (self.z31 + self.z33 - 6.0),
            -zn * self.s2 * (self.z21 + self.z23),
        ]
    }
}

/// Trigonometry of the epoch orbit shared by both perturbers.
struct OrbitTrig {
    sinim: f64,
    cosim: f64,
    sinomm: f64,
    cosomm: f64,
    eccentricity: f64,
    emsq: f64,
    rtemsq: f64,
    mean_motion: f64,
}

/// Amplitudes of one perturber's long-period terms.
#[derive(Debug, Clone, Copy)]
struct PeriodicCoefficients {
    e2: f64,
    e3: f64,
    i2: f64,
    i3: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    gh2: f64,
    gh3: f64,
    gh4: f64,
    h2: f64,
    h3: f64,
    /// Eccentricity of the perturber's apparent orbit.
    ze: f64,
    /// Mean anomaly of the perturber at epoch.
    zm0: f64,
    /// Mean motion of the perturber, rad/min.
    zn: f64,
}

impl PeriodicCoefficients {
    fn new(t: &PerturberTerms, emsq: f64, ze: f64, zm0: f64, zn: f64) -> Self {
        PeriodicCoefficients {
            e2: 2.0 * t.s1 * t.s6,
            e3: 2.0 * t.s1 * t.s7,
            i2: 2.0 * t.s2 * t.z12,
            i3: 2.0 * t.s2 * (t.z13 - t.z11),
            l2: -2.0 * t.s3 * t.z2,
            l3: -2.0 * t.s3 * (t.z3 - t.z1),
            l4: -2.0 * t.s3 * (-21.0 - 9.0 * emsq) * ze,
            gh2: 2.0 * t.s4 * t.z32,
            gh3: 2.0 * t.s4 * (t.z33 - t.z31),
            gh4: -18.0 * t.s4 * ze,
            h2: -2.0 * t.s2 * t.z22,
            h3: -2.0 * t.s2 * (t.z23 - t.z21),
            ze,
            zm0,
            zn,
        }
    }

    /// (pe, pinc, pl, pgh, ph) at `t` minutes.
    fn evaluate(&self, t: f64) -> [f64; 5] {
        let zm = self.zm0 + self.zn * t;
        let zf = zm + 2.0 * self.ze * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        [
            self.e2 * f2 + self.e3 * f3,
            self.i2 * f2 + self.i3 * f3,
            self.l2 * f2 + self.l3 * f3 + self.l4 * sinzf,
            self.gh2 * f2 + self.gh3 * f3 + self.gh4 * sinzf,
            self.h2 * f2 + self.h3 * f3,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
struct SecularRates {
    dedt: f64,
    didt: f64,
    dmdt: f64,
    domdt: f64,
    dnodt: f64,
}

#[derive(Debug, Clone, Copy)]
enum ResonanceKind {
    /// 24 h geosynchronous resonance.
    Synchronous { del1: f64, del2: f64, del3: f64 },
    /// 12 h resonance of eccentric semi-synchronous (Molniya-class) orbits.
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Resonance {
    kind: ResonanceKind,
    xfact: f64,
    xlamo: f64,
}

impl Resonance {
    /// Mean-motion rate and its derivative at longitude `xli`, `atime`
    /// minutes after epoch.
    fn derivatives(&self, xli: f64, xni: f64, atime: f64, argpo: f64, argpdot: f64) -> (f64, f64, f64) {
        const FASX2: f64 = 0.13130908;
        const FASX4: f64 = 2.8843198;
        const FASX6: f64 = 0.37448087;
        const G22: f64 = 5.7686396;
        const G32: f64 = 0.95240898;
        const G44: f64 = 1.8014998;
        const G52: f64 = 1.0508330;
        const G54: f64 = 4.4108898;

        let xldot = xni + self.xfact;
        match self.kind {
            ResonanceKind::Synchronous { del1, del2, del3 } => {
                let xndt = del1 * (xli - FASX2).sin()
                    + del2 * (2.0 * (xli - FASX4)).sin()
                    + del3 * (3.0 * (xli - FASX6)).sin();
                let xnddt = del1 * (xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (xli - FASX6)).cos();
                (xldot, xndt, xnddt * xldot)
            }
            ResonanceKind::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            } => {
                let xomi = argpo + argpdot * atime;
                let x2omi = xomi + xomi;
                let x2li = xli + xli;
                let xndt = d2201 * (x2omi + xli - G22).sin()
                    + d2211 * (xli - G22).sin()
                    + d3210 * (xomi + xli - G32).sin()
                    + d3222 * (-xomi + xli - G32).sin()
                    + d4410 * (x2omi + x2li - G44).sin()
                    + d4422 * (x2li - G44).sin()
                    + d5220 * (xomi + xli - G52).sin()
                    + d5232 * (-xomi + xli - G52).sin()
                    + d5421 * (xomi + x2li - G54).sin()
                    + d5433 * (-xomi + x2li - G54).sin();
                let xnddt = d2201 * (x2omi + xli - G22).cos()
                    + d2211 * (xli - G22).cos()
                    + d3210 * (xomi + xli - G32).cos()
                    + d3222 * (-xomi + xli - G32).cos()
                    + d5220 * (xomi + xli - G52).cos()
                    + d5232 * (-xomi + xli - G52).cos()
                    + 2.0
                        * (d4410 * (x2omi + x2li - G44).cos()
                            + d4422 * (x2li - G44).cos()
                            + d5421 * (xomi + x2li - G54).cos()
                            + d5433 * (-xomi + x2li - G54).cos());
                (xldot, xndt, xnddt * xldot)
            }
        }
    }
}

/// Precomputed deep-space terms for one satellite.
#[derive(Debug, Clone)]
pub(crate) struct DeepSpace {
    solar: PeriodicCoefficients,
    lunar: PeriodicCoefficients,
    rates: SecularRates,
    resonance: Option<Resonance>,
    gsto: f64,
    argpo: f64,
    argpdot: f64,
    no_unkozai: f64,
}

impl DeepSpace {
    /// `epoch_days` counts days since 1950 January 0.0; `gsto` is the
    /// sidereal angle at epoch.
    pub fn new(
        epoch_days: f64,
        elements: &EpochElements,
        rates: &NearEarthRates,
        gsto: f64,
        xke: f64,
    ) -> Self {
        let orbit = OrbitTrig {
            sinim: elements.inclination.sin(),
            cosim: elements.inclination.cos(),
            sinomm: elements.arg_perigee.sin(),
            cosomm: elements.arg_perigee.cos(),
            eccentricity: elements.eccentricity,
            emsq: elements.eccentricity * elements.eccentricity,
            rtemsq: (1.0 - elements.eccentricity * elements.eccentricity).sqrt(),
            mean_motion: elements.mean_motion,
        };
        let snodm = elements.raan.sin();
        let cnodm = elements.raan.cos();

        // Lunar orbit orientation at epoch.
        let day = epoch_days + 18_261.5;
        let xnodce = (4.5236020 - 9.2422029e-4 * day) % TAU;
        let stem = xnodce.sin();
        let ctem = xnodce.cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let gam = 5.8351514 + 0.0019443680 * day;
        let zx = (0.39785416 * stem / zsinil).atan2(zcoshl * ctem + 0.91744867 * zsinhl * stem);
        let zx = gam + zx - xnodce;

        let sun = PerturberTerms::compute(
            &PerturberGeometry {
                cos_g: ZCOSGS,
                sin_g: ZSINGS,
                cos_i: ZCOSIS,
                sin_i: ZSINIS,
                cos_h: cnodm,
                sin_h: snodm,
                coupling: C1SS,
            },
            &orbit,
        );
        let moon = PerturberTerms::compute(
            &PerturberGeometry {
                cos_g: zx.cos(),
                sin_g: zx.sin(),
                cos_i: zcosil,
                sin_i: zsinil,
                cos_h: zcoshl * cnodm + zsinhl * snodm,
                sin_h: snodm * zcoshl - cnodm * zsinhl,
                coupling: C1L,
            },
            &orbit,
        );

        let zmol = (4.7199672 + 0.22997150 * day - gam) % TAU;
        let zmos = (6.2565837 + 0.017201977 * day) % TAU;
        let solar = PeriodicCoefficients::new(&sun, orbit.emsq, ZES, zmos, ZNS);
        let lunar = PeriodicCoefficients::new(&moon, orbit.emsq, ZEL, zmol, ZNL);

        let secular_rates = secular_rates(&sun, &moon, &orbit, elements.inclination);
        let resonance = resonance(elements, rates, &orbit, &secular_rates, gsto, xke);

        DeepSpace {
            solar,
            lunar,
            rates: secular_rates,
            resonance,
            gsto,
            argpo: elements.arg_perigee,
            argpdot: rates.argpdot,
            no_unkozai: elements.mean_motion,
        }
    }

    pub fn is_resonant(&self) -> bool {
        self.resonance.is_some()
    }

    /// Apply lunar-solar secular rates and integrate the resonance terms
    /// from epoch to `t` minutes.
    pub fn secular(&self, t: f64, mut mean: MeanState) -> MeanState {
        let theta = (self.gsto + t * RPTIM) % TAU;
        mean.eccentricity += self.rates.dedt * t;
        mean.inclination += self.rates.didt * t;
        mean.arg_perigee += self.rates.domdt * t;
        mean.raan += self.rates.dnodt * t;
        mean.mean_anomaly += self.rates.dmdt * t;

        let Some(resonance) = &self.resonance else {
            return mean;
        };

        let delt = if t > 0.0 { STEP } else { -STEP };
        let mut atime = 0.0;
        let mut xli = resonance.xlamo;
        let mut xni = self.no_unkozai;
        let (xldot, xndt, xnddt, ft) = loop {
            let (xldot, xndt, xnddt) =
                resonance.derivatives(xli, xni, atime, self.argpo, self.argpdot);
            if (t - atime).abs() < STEP {
                break (xldot, xndt, xnddt, t - atime);
            }
            xli += xldot * delt + xndt * STEP2;
            xni += xndt * delt + xnddt * STEP2;
            atime += delt;
        };

        let nm = xni + xndt * ft + xnddt * ft * ft * 0.5;
        let xl = xli + xldot * ft + xndt * ft * ft * 0.5;
        mean.mean_anomaly = match resonance.kind {
            ResonanceKind::Synchronous { .. } => xl - mean.raan - mean.arg_perigee + theta,
            ResonanceKind::HalfDay { .. } => xl - 2.0 * mean.raan + 2.0 * theta,
        };
        mean.mean_motion = nm;
        mean
    }

    /// Add the lunar-solar periodics at `t` minutes to the perturbed
    /// elements (Lyddane form below 0.2 rad inclination).
    pub fn periodics(&self, t: f64, mut state: MeanState) -> MeanState {
        let s = self.solar.evaluate(t);
        let l = self.lunar.evaluate(t);
        let pe = s[0] + l[0];
        let pinc = s[1] + l[1];
        let pl = s[2] + l[2];
        let pgh = s[3] + l[3];
        let ph = s[4] + l[4];

        state.inclination += pinc;
        state.eccentricity += pe;
        let sinip = state.inclination.sin();
        let cosip = state.inclination.cos();

        if state.inclination >= 0.2 {
            let ph = ph / sinip;
            state.arg_perigee += pgh - cosip * ph;
            state.raan += ph;
            state.mean_anomaly += pl;
        } else {
            let sinop = state.raan.sin();
            let cosop = state.raan.cos();
            let alfdp = sinip * sinop + (ph * cosop + pinc * cosip * sinop);
            let betdp = sinip * cosop + (-ph * sinop + pinc * cosip * cosop);
            let nodep = state.raan % TAU;
            let xls = state.mean_anomaly + state.arg_perigee + pl + pgh + (cosip - pinc * sinip) * nodep;
            let xnoh = nodep;
            let mut nodep = alfdp.atan2(betdp);
            if (xnoh - nodep).abs() > PI {
                if nodep < xnoh {
                    nodep += TAU;
                } else {
                    nodep -= TAU;
                }
            }
            state.mean_anomaly += pl;
            state.arg_perigee = xls - state.mean_anomaly - cosip * nodep;
            state.raan = nodep;
        }
        state
    }
}

fn secular_rates(sun: &PerturberTerms, moon: &PerturberTerms, orbit: &OrbitTrig, inclination: f64) -> SecularRates {
    let near_equatorial = !(NEAR_EQUATORIAL..=PI - NEAR_EQUATORIAL).contains(&inclination);
    let [ses, sis, sls, sghs, shs] = sun.secular(ZNS, orbit.emsq);
    let [sel, sil, sll, sghl, shl] = moon.secular(ZNL, orbit.emsq);

    let mut shs = if near_equatorial { 0.0 } else { shs };
    if orbit.sinim != 0.0 {
        shs /= orbit.sinim;
    }
    let shl = if near_equatorial { 0.0 } else { shl };

    let mut domdt = sghs - orbit.cosim * shs + sghl;
    let mut dnodt = shs;
    if orbit.sinim != 0.0 {
        domdt -= orbit.cosim / orbit.sinim * shl;
        dnodt += shl / orbit.sinim;
    }

    SecularRates {
        dedt: ses + sel,
        didt: sis + sil,
        dmdt: sls + sll,
        domdt,
        dnodt,
    }
}

fn resonance(
    elements: &EpochElements,
    rates: &NearEarthRates,
    orbit: &OrbitTrig,
    secular: &SecularRates,
    gsto: f64,
    xke: f64,
) -> Option<Resonance> {
    const Q22: f64 = 1.7891679e-6;
    const Q31: f64 = 2.1460748e-6;
    const Q33: f64 = 2.2123015e-7;
    const ROOT22: f64 = 1.7891679e-6;
    const ROOT44: f64 = 7.3636953e-9;
    const ROOT54: f64 = 2.1765803e-9;
    const ROOT32: f64 = 3.7393792e-7;
    const ROOT52: f64 = 1.1428639e-7;

    let nm = elements.mean_motion;
    let em = elements.eccentricity;
    let synchronous = nm > 0.0034906585 && nm < 0.0052359877;
    let half_day = (8.26e-3..=9.24e-3).contains(&nm) && em >= 0.5;
    if !synchronous && !half_day {
        return None;
    }

    let aonv = (nm / xke).powf(2.0 / 3.0);
    let cosim = orbit.cosim;
    let sinim = orbit.sinim;
    let theta = gsto % TAU;

    if half_day {
        let cosisq = cosim * cosim;
        let emsq = orbit.emsq;
        let eoc = em * emsq;
        let g201 = -0.306 - (em - 0.64) * 0.440;

        let (g211, g310, g322, g410, g422, g520) = if em <= 0.65 {
            (
                3.616 - 13.2470 * em + 16.2900 * emsq,
                -19.302 + 117.3900 * em - 228.4190 * emsq + 156.5910 * eoc,
                -18.9068 + 109.7927 * em - 214.6334 * emsq + 146.5816 * eoc,
                -41.122 + 242.6940 * em - 471.0940 * emsq + 313.9530 * eoc,
                -146.407 + 841.8800 * em - 1629.014 * emsq + 1083.4350 * eoc,
                -532.114 + 3017.977 * em - 5740.032 * emsq + 3708.2760 * eoc,
            )
        } else {
            let g520 = if em > 0.715 {
                -5149.66 + 29936.92 * em - 54087.36 * emsq + 31324.56 * eoc
            } else {
                1464.74 - 4664.75 * em + 3763.64 * emsq
            };
            (
                -72.099 + 331.819 * em - 508.738 * emsq + 266.724 * eoc,
                -346.844 + 1582.851 * em - 2415.925 * emsq + 1246.113 * eoc,
                -342.585 + 1554.908 * em - 2366.899 * emsq + 1215.972 * eoc,
                -1052.797 + 4758.686 * em - 7193.992 * emsq + 3651.957 * eoc,
                -3581.690 + 16178.110 * em - 24462.770 * emsq + 12422.520 * eoc,
                g520,
            )
        };
        let (g533, g521, g532) = if em < 0.7 {
            (
                -919.22770 + 4988.61 * em - 9064.77 * emsq + 5542.21 * eoc,
                -822.71072 + 4568.6173 * em - 8491.4146 * emsq + 5337.524 * eoc,
                -853.66600 + 4690.25 * em - 8624.77 * emsq + 5341.4 * eoc,
            )
        } else {
            (
                -37995.78 + 161616.52 * em - 229838.2 * emsq + 109377.94 * eoc,
                -51752.104 + 218913.95 * em - 309468.16 * emsq + 146349.42 * eoc,
                -40023.88 + 170470.89 * em - 242699.48 * emsq + 115605.82 * eoc,
            )
        };

        let sini2 = sinim * sinim;
        let f220 = 0.75 * (1.0 + 2.0 * cosim + cosisq);
        let f221 = 1.5 * sini2;
        let f321 = 1.875 * sinim * (1.0 - 2.0 * cosim - 3.0 * cosisq);
        let f322 = -1.875 * sinim * (1.0 + 2.0 * cosim - 3.0 * cosisq);
        let f441 = 35.0 * sini2 * f220;
        let f442 = 39.3750 * sini2 * sini2;
        let f522 = 9.84375
            * sinim
            * (sini2 * (1.0 - 2.0 * cosim - 5.0 * cosisq)
                + 0.33333333 * (-2.0 + 4.0 * cosim + 6.0 * cosisq));
        let f523 = sinim
            * (4.92187512 * sini2 * (-2.0 - 4.0 * cosim + 10.0 * cosisq)
                + 6.56250012 * (1.0 + 2.0 * cosim - 3.0 * cosisq));
        let f542 = 29.53125
            * sinim
            * (2.0 - 8.0 * cosim + cosisq * (-12.0 + 8.0 * cosim + 10.0 * cosisq));
        let f543 = 29.53125
            * sinim
            * (-2.0 - 8.0 * cosim + cosisq * (12.0 + 8.0 * cosim - 10.0 * cosisq));

        let xno2 = nm * nm;
        let ainv2 = aonv * aonv;
        let mut temp1 = 3.0 * xno2 * ainv2;
        let temp = temp1 * ROOT22;
        let d2201 = temp * f220 * g201;
        let d2211 = temp * f221 * g211;
        temp1 *= aonv;
        let temp = temp1 * ROOT32;
        let d3210 = temp * f321 * g310;
        let d3222 = temp * f322 * g322;
        temp1 *= aonv;
        let temp = 2.0 * temp1 * ROOT44;
        let d4410 = temp * f441 * g410;
        let d4422 = temp * f442 * g422;
        temp1 *= aonv;
        let temp = temp1 * ROOT52;
        let d5220 = temp * f522 * g520;
        let d5232 = temp * f523 * g532;
        let temp = 2.0 * temp1 * ROOT54;
        let d5421 = temp * f542 * g521;
        let d5433 = temp * f543 * g533;

        return Some(Resonance {
            kind: ResonanceKind::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            },
            xlamo: (elements.mean_anomaly + elements.raan + elements.raan - theta - theta) % TAU,
            xfact: rates.mdot + secular.dmdt + 2.0 * (rates.nodedot + secular.dnodt - RPTIM) - nm,
        });
    }

    let emsq = orbit.emsq;
    let g200 = 1.0 + emsq * (-2.5 + 0.8125 * emsq);
    let g310 = 1.0 + 2.0 * emsq;
    let g300 = 1.0 + emsq * (-6.0 + 6.60937 * emsq);
    let f220 = 0.75 * (1.0 + cosim) * (1.0 + cosim);
    let f311 = 0.9375 * sinim * sinim * (1.0 + 3.0 * cosim) - 0.75 * (1.0 + cosim);
    let f330 = 1.0 + cosim;
    let f330 = 1.875 * f330 * f330 * f330;
    let del1 = 3.0 * nm * nm * aonv * aonv;
    let del2 = 2.0 * del1 * f220 * g200 * Q22;
    let del3 = 3.0 * del1 * f330 * g300 * Q33 * aonv;
    let del1 = del1 * f311 * g310 * Q31 * aonv;
    let xpidot = rates.argpdot + rates.nodedot;

    Some(Resonance {
        kind: ResonanceKind::Synchronous { del1, del2, del3 },
        xlamo: (elements.mean_anomaly + elements.raan + elements.arg_perigee - theta) % TAU,
        xfact: rates.mdot + xpidot - RPTIM + secular.dmdt + secular.domdt + secular.dnodt - nm,
    })
}
