//! Compares the in-crate propagator with the `sgp4` crate using the same
//! WGS84 constants.

use orbit_frames::elements::OrbitalElementSet;
use orbit_frames::epoch::resolve;
use orbit_frames::propagator::{GravityModel, Propagator, Regime};

const CASES: &[(&str, &str, Regime)] = &[
    (
        "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
        "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
        Regime::ShortPeriod,
    ),
    (
        "1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996",
        "2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454",
        Regime::ShortPeriod,
    ),
    (
        "1 28129U 03058A   24015.50000000 -.00000030  00000-0  00000+0 0  9998",
        "2 28129  55.1000 120.2000 0085000 250.0000 109.5000  2.00563000 12341",
        Regime::LongPeriod,
    ),
    (
        "1 22675U 93036A   24015.50000000  .00000100  00000-0  00000+0 0  9990",
        "2 22675  63.4000 300.0000 7100000 270.0000  10.0000  2.00600000 12346",
        Regime::LongPeriod,
    ),
    (
        "1 41866U 16071A   24015.50000000 -.00000090  00000-0  00000+0 0  9996",
        "2 41866   0.0500  95.0000 0001000 200.0000  60.0000  1.00270000 12345",
        Regime::LongPeriod,
    ),
];

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

#[test]
fn matches_reference_propagator() {
    for &(line1, line2, regime) in CASES {
        let set = OrbitalElementSet::from_tle(None, line1, line2).unwrap();
        let epoch = resolve(&set).unwrap();
        let propagator = Propagator::new(&set, &epoch, GravityModel::Wgs84).unwrap();
        assert_eq!(propagator.regime(), regime, "{}", set.norad_id);

        let elements = sgp4::Elements::from_tle(None, line1.as_bytes(), line2.as_bytes()).unwrap();
        let constants = sgp4::Constants::from_elements(&elements).unwrap();

        for offset in [0.0, 90.0, 360.0, 720.0, 1440.0] {
            let ours = propagator.propagate(offset).unwrap();
            let reference = constants.propagate(sgp4::MinutesSinceEpoch(offset)).unwrap();

            let dr = distance(ours.position_km, reference.position);
            let dv = distance(ours.velocity_km_s, reference.velocity);
            assert!(dr < 1.0, "{} at {offset} min: position differs by {dr} km", set.norad_id);
            assert!(dv < 1e-3, "{} at {offset} min: velocity differs by {dv} km/s", set.norad_id);
        }
    }
}
