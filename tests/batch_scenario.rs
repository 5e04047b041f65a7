use std::sync::Arc;

use orbit_frames::batch::{BatchConfig, BatchRunner};
use orbit_frames::elements::parse_element_sets;
use orbit_frames::eop::ApproximateEop;
use orbit_frames::propagator::Regime;
use orbit_frames::ReasonCode;

const FLEET: &str = "\
STARLINK-1007
1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996
2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454
STARLINK-1008
1 44714U 19074B   24015.25000000  .00001100  00000-0  76000-4 0  9999
2 44714  53.0530 120.0000 0001500  85.0000 300.0000 15.06400000 23453
STARLINK-1009
1 44715U 19074C   24015.25000000  .00001300  00000-0  88000-4 0  9995
2 44715  53.0550 140.0000 0001300  95.0000 240.0000 15.06400000 23450
STARLINK-1010
1 44716U 19074D   24015.25000000  .00001200  00000-0  82000-4 0  9993
2 44716  53.0540 160.0000 0001400  90.0000 200.0000 15.06400000 23454
";

const DAY_ZERO: &str = "\
STARLINK-1011
1 44717U 19074E   24000.25000000  .00001200  00000-0  82000-4 0  9994
2 44717  53.0540 180.0000 0001400  90.0000 100.0000 15.06400000 23456
";

fn runner() -> BatchRunner {
    let mut config = BatchConfig::default();
    config.planner.time_step_seconds = 60.0;
    config.planner.coverage_cycles = 1.0;
    config.workers = Some(2);
    BatchRunner::new(config, Arc::new(ApproximateEop)).unwrap()
}

#[test]
fn three_valid_one_corrupted_checksum() {
    let sets = parse_element_sets(FLEET, "fleet");
    assert_eq!(sets.len(), 4);

    let output = runner().run(&sets);
    let summary = &output.summary;
    assert_eq!(summary.attempted, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    assert!(!summary.deadline_hit);
    assert_eq!(summary.failures[0].norad_id, 44716);
    assert_eq!(summary.failures[0].reason, ReasonCode::MalformedEpoch);

    let ids: Vec<u32> = output.series.iter().map(|s| s.norad_id).collect();
    assert_eq!(ids, vec![44713, 44714, 44715]);
    for series in &output.series {
        assert!((85..=100).contains(&series.points.len()), "{}", series.points.len());
        assert_eq!(series.regime, Regime::ShortPeriod);
        assert_eq!(series.dropped_points, 0);
        for point in &series.points {
            let g = &point.geodetic;
            assert!((-90.0..=90.0).contains(&g.latitude_deg));
            assert!((-180.0..=180.0).contains(&g.longitude_deg));
            assert!((100_000.0..=3_000_000.0).contains(&g.altitude_m));
            assert_eq!(g.satellite_id, series.norad_id);
        }
    }
    assert_eq!(summary.total_points, output.series.iter().map(|s| s.points.len()).sum::<usize>());
}

#[test]
fn one_malformed_epoch_does_not_affect_the_rest() {
    let mut sets = parse_element_sets(FLEET, "fleet");
    sets.truncate(3);
    sets.extend(parse_element_sets(DAY_ZERO, "day-zero"));

    let output = runner().run(&sets);
    assert_eq!(output.series.len(), 3);
    assert_eq!(output.summary.count(ReasonCode::MalformedEpoch), 1);
    assert_eq!(output.summary.failures[0].norad_id, 44717);

    // Same satellites processed alone give identical series.
    let alone = runner().run(&sets[..3]);
    for (a, b) in output.series.iter().zip(&alone.series) {
        assert_eq!(a.points.len(), b.points.len());
        for (p, q) in a.points.iter().zip(&b.points) {
            assert_eq!(p.state, q.state);
            assert_eq!(p.geodetic, q.geodetic);
        }
    }
}

#[test]
fn timestamps_follow_each_satellites_own_epoch() {
    let sets = parse_element_sets(FLEET, "fleet");
    let output = runner().run(&sets[..1]);
    let series = &output.series[0];
    let first = &series.points[0].state;
    assert_eq!(first.offset_minutes, 0.0);
    assert_eq!(first.timestamp.to_rfc3339(), "2024-01-15T06:00:00+00:00");

    let offsets: Vec<f64> = series.points.iter().map(|p| p.state.offset_minutes).collect();
    assert!(offsets.windows(2).all(|w| w[1] > w[0]));
    let last = series.points.last().unwrap();
    let elapsed = last.state.timestamp - first.timestamp;
    assert_eq!(elapsed.num_seconds() as f64, last.state.offset_minutes * 60.0);
}

#[test]
fn summary_serializes_reason_codes() {
    let sets = parse_element_sets(FLEET, "fleet");
    let output = runner().run(&sets);
    let json = serde_json::to_value(&output.summary).unwrap();
    assert_eq!(json["failures"][0]["reason"], "MALFORMED_EPOCH");
    assert_eq!(json["attempted"], 4);
}
