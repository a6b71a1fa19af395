//! Integration tests for the resistance reclassifier.
//!
//! The per-cell implementation is checked against a direct simulation of the
//! original procedure, which swept the whole grid once per moving-boundary
//! step and relied on later sweeps overwriting earlier ones.

use paramo_algorithms::resistance::{
    reclassify, run_batch, BatchParams, CostSink, DirectorySink, ElevationRange, RangeOutcome,
    ReclassifyParams, PARAMO_RANGES,
};
use paramo_core::io::read_ascii_grid_from_str;
use paramo_core::raster::Raster;
use paramo_core::Result;
use std::sync::Mutex;

/// Reference implementation: grid-wide sweeps with overwriting assignment,
/// exactly as the original procedure ordered them.
fn simulate_sweeping_loops(dem: &Raster, lower: f64, upper: f64, width: f64) -> Vec<f64> {
    let stats = dem.statistics();
    let (min_elev, max_elev) = (stats.min.unwrap(), stats.max.unwrap());

    let values: Vec<f64> = dem.data().iter().copied().collect();
    let valid: Vec<bool> = values.iter().map(|&v| !dem.is_nodata(v)).collect();
    let mut out = vec![f64::NAN; values.len()];

    fn assign(
        out: &mut [f64],
        values: &[f64],
        valid: &[bool],
        cost: f64,
        pred: impl Fn(f64) -> bool,
    ) {
        for i in 0..values.len() {
            if valid[i] && pred(values[i]) {
                out[i] = cost;
            }
        }
    }

    // In-range band first
    assign(&mut out, &values, &valid, 1.0, |e| e >= lower && e <= upper);

    // Above the range: near bands, then the overwriting tail
    let mut boundary = upper;
    let mut penalty = 2.0;
    while boundary + width <= upper + 200.0 {
        assign(&mut out, &values, &valid, penalty, |e| {
            e > boundary && e <= boundary + width
        });
        penalty += 2.0;
        boundary += width;
    }
    let mut penalty = 7.0;
    while boundary <= max_elev {
        assign(&mut out, &values, &valid, penalty, |e| e > boundary);
        penalty += 3.0;
        boundary += 100.0;
    }

    // Below the range
    let mut boundary = lower;
    let mut penalty = 2.0;
    while boundary - width >= lower - 300.0 {
        assign(&mut out, &values, &valid, penalty, |e| {
            e >= boundary - width && e < boundary
        });
        penalty += 2.0;
        boundary -= width;
    }
    let mut penalty = 9.0;
    while boundary >= min_elev {
        assign(&mut out, &values, &valid, penalty, |e| e < boundary);
        penalty += 3.0;
        boundary -= 100.0;
    }

    out
}

/// Deterministic pseudo-random elevations spanning well past both tails,
/// with a sprinkling of no-data cells.
fn synthetic_dem(rows: usize, cols: usize, seed: u64) -> Raster {
    let mut state = seed;
    let mut next = || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let values: Vec<f64> = (0..rows * cols)
        .map(|_| {
            let r = next();
            if r % 17 == 0 {
                f64::NAN
            } else {
                // 800..5200 with fractional parts
                800.0 + (r % 44000) as f64 / 10.0
            }
        })
        .collect();

    let mut dem = Raster::from_vec(values, rows, cols).unwrap();
    dem.set_nodata(Some(f64::NAN));
    dem
}

fn assert_grids_equal(actual: &Raster, expected: &[f64], context: &str) {
    for (i, (&a, &e)) in actual.data().iter().zip(expected.iter()).enumerate() {
        assert!(
            a == e || (a.is_nan() && e.is_nan()),
            "{}: cell {} mismatch: got {}, expected {}",
            context,
            i,
            a,
            e
        );
    }
}

#[test]
fn matches_sweeping_loop_simulation_across_ranges() {
    let dem = synthetic_dem(23, 31, 0x5eed);
    for range in [
        ElevationRange::new(2000.0, 2700.0),
        ElevationRange::new(2100.0, 2800.0),
        ElevationRange::new(3900.0, 4600.0),
        ElevationRange::new(1800.0, 2500.0),
        // A band hanging past the data's low end
        ElevationRange::new(900.0, 1600.0),
        // A narrow off-table band
        ElevationRange::new(3333.0, 3444.0),
    ] {
        let result = reclassify(&dem, ReclassifyParams::new(range)).unwrap();
        let expected = simulate_sweeping_loops(&dem, range.lower, range.upper, 100.0);
        assert_grids_equal(&result, &expected, &range.file_stem());
    }
}

#[test]
fn matches_simulation_with_nonstandard_width() {
    let dem = synthetic_dem(11, 13, 0xc0ffee);
    let range = ElevationRange::new(2400.0, 3100.0);
    for width in [50.0, 150.0, 200.0, 250.0] {
        let result = reclassify(
            &dem,
            ReclassifyParams {
                range,
                transition_width: width,
            },
        )
        .unwrap();
        let expected = simulate_sweeping_loops(&dem, range.lower, range.upper, width);
        assert_grids_equal(&result, &expected, &format!("width {}", width));
    }
}

#[test]
fn end_to_end_scenario() {
    // Mixed elevations against range (2000, 2700). The two far cells sit
    // 1250 m above and 800 m below the range.
    let mut dem =
        Raster::from_vec(vec![2050.0, 2699.0, 2701.0, 2850.0, 3950.0, 1200.0], 1, 6).unwrap();
    dem.set_nodata(Some(f64::NAN));

    let range = ElevationRange::new(2000.0, 2700.0);
    let result = reclassify(&dem, ReclassifyParams::new(range)).unwrap();

    // 2850 falls in the second near band (2800, 2900]; 3950 exceeds tail
    // boundaries 2900..3900 (7 + 3*10); 1200 undercuts 1700..1300 (9 + 3*4).
    let expected = [1.0, 1.0, 2.0, 4.0, 37.0, 21.0];
    for (col, &want) in expected.iter().enumerate() {
        assert_eq!(
            result.get(0, col).unwrap(),
            want,
            "cell {} ({})",
            col,
            dem.get(0, col).unwrap()
        );
    }

    // And the same through the reference simulation
    let simulated = simulate_sweeping_loops(&dem, range.lower, range.upper, 100.0);
    assert_grids_equal(&result, &simulated, "scenario");
}

#[test]
fn reclassify_is_idempotent() {
    let dem = synthetic_dem(9, 9, 42);
    let params = ReclassifyParams::new(ElevationRange::new(2500.0, 3200.0));

    let first = reclassify(&dem, params).unwrap();
    let second = reclassify(&dem, params).unwrap();

    for (a, b) in first.data().iter().zip(second.data().iter()) {
        assert!(a == b || (a.is_nan() && b.is_nan()));
    }
}

#[test]
fn nodata_propagates_through_every_range() {
    let mut dem = synthetic_dem(8, 8, 7);
    dem.set(0, 0, f64::NAN).unwrap();
    dem.set(5, 3, f64::NAN).unwrap();
    let nodata_cells: Vec<usize> = dem
        .data()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_nan())
        .map(|(i, _)| i)
        .collect();

    for range in PARAMO_RANGES {
        let result = reclassify(&dem, ReclassifyParams::new(range)).unwrap();
        let out: Vec<f64> = result.data().iter().copied().collect();
        for &i in &nodata_cells {
            assert!(out[i].is_nan(), "{} cell {}", range.file_stem(), i);
        }
    }
}

#[test]
fn costs_grow_with_distance_from_band() {
    let dem = synthetic_dem(16, 16, 99);
    let range = ElevationRange::new(2600.0, 3300.0);
    let result = reclassify(&dem, ReclassifyParams::new(range)).unwrap();

    let mut pairs: Vec<(f64, f64)> = dem
        .data()
        .iter()
        .zip(result.data().iter())
        .filter(|(e, _)| !e.is_nan())
        .map(|(&e, &c)| (e, c))
        .collect();

    // Above the band, cost must be non-decreasing in elevation
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let mut last = 0.0;
    for &(e, c) in pairs.iter().filter(|(e, _)| *e > range.upper) {
        assert!(c >= last, "cost dropped to {} at elevation {}", c, e);
        last = c;
    }
    // Below the band, cost must be non-increasing in elevation
    let mut last = f64::INFINITY;
    for &(e, c) in pairs.iter().filter(|(e, _)| *e < range.lower) {
        assert!(c <= last, "cost rose to {} at elevation {}", c, e);
        last = c;
    }
}

#[test]
fn batch_from_ascii_grid_to_directory() {
    let asc = "\
ncols 3
nrows 2
xllcorner -73.5
yllcorner 4.5
cellsize 0.01
NODATA_value -9999
2050 2699 2701
2850 3950 -9999
";
    let mut dem = read_ascii_grid_from_str(asc).unwrap();
    dem.set_crs(Some(paramo_core::Crs::wgs84_longlat()));

    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path()).unwrap();
    let outcomes = run_batch(&dem, &PARAMO_RANGES, &sink, BatchParams::default());

    assert_eq!(outcomes.len(), 22);
    assert!(outcomes.iter().all(RangeOutcome::is_ok));
    for range in &PARAMO_RANGES {
        assert!(
            dir.path().join(range.file_name()).exists(),
            "missing {}",
            range.file_name()
        );
    }
}

#[test]
fn batch_short_circuit_never_invokes_reclassifier() {
    // A sink that fails if it ever sees a non-no-data cell: with an
    // all-no-data input, only the short-circuit path can satisfy it.
    struct NoDataOnlySink {
        calls: Mutex<usize>,
    }

    impl CostSink for NoDataOnlySink {
        fn write(&self, range: &ElevationRange, cost: &Raster) -> Result<()> {
            assert!(
                cost.data().iter().all(|v| v.is_nan()),
                "{} produced values from an all-no-data input",
                range.file_stem()
            );
            *self.calls.lock().unwrap() += 1;
            Ok(())
        }
    }

    let mut dem = Raster::from_vec(vec![f64::NAN; 9], 3, 3).unwrap();
    dem.set_nodata(Some(f64::NAN));

    let sink = NoDataOnlySink {
        calls: Mutex::new(0),
    };
    let outcomes = run_batch(&dem, &PARAMO_RANGES, &sink, BatchParams::default());
    assert!(outcomes.iter().all(RangeOutcome::is_ok));
    assert_eq!(*sink.calls.lock().unwrap(), 22);
}
