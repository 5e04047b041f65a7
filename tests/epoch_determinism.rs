use orbit_frames::elements::OrbitalElementSet;
use orbit_frames::epoch::{full_year, plan, resolve, PlannerConfig};
use orbit_frames::propagator::{propagate, GravityModel};
use orbit_frames::ReasonCode;

const L1: &str = "1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996";
const L2: &str = "2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454";

#[test]
fn resolution_is_repeatable() {
    let set = OrbitalElementSet::from_tle(None, L1, L2).unwrap();
    let first = resolve(&set).unwrap();
    for _ in 0..10 {
        assert_eq!(resolve(&set).unwrap(), first);
    }
}

#[test]
fn two_digit_years() {
    for yy in 0..=56 {
        assert_eq!(full_year(yy), 2000 + yy as i32);
    }
    for yy in 57..=99 {
        assert_eq!(full_year(yy), 1900 + yy as i32);
    }
}

#[test]
fn plan_and_propagation_are_idempotent() {
    let set = OrbitalElementSet::from_tle(None, L1, L2).unwrap();
    let epoch = resolve(&set).unwrap();
    let config = PlannerConfig {
        time_step_seconds: 60.0,
        ..PlannerConfig::default()
    };
    let a = plan(&epoch, set.elements.period_minutes(), &config);
    let b = plan(&epoch, set.elements.period_minutes(), &config);
    assert_eq!(a, b);
    assert_eq!(a.offsets()[0], 0.0);

    for &offset in a.offsets().iter().rev().step_by(7) {
        let x = propagate(&set, &epoch, offset, GravityModel::Wgs72).unwrap();
        let y = propagate(&set, &epoch, offset, GravityModel::Wgs72).unwrap();
        assert_eq!(x, y);
        assert_eq!(x.timestamp, epoch.at_offset(offset));
    }
}

#[test]
fn corrupted_line_two_is_a_malformed_epoch() {
    let mut line2 = L2.to_string();
    line2.replace_range(68..69, "0");
    let set = OrbitalElementSet::from_tle(None, L1, &line2).unwrap();
    let err = resolve(&set).unwrap_err();
    assert_eq!(err.reason_code(), ReasonCode::MalformedEpoch);
}
