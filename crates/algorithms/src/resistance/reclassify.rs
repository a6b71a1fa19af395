//! Per-range cost reclassification
//!
//! Reclassifies a DEM against one elevation range. Cells inside the range
//! cost 1; cells outside are penalized in 100 m bands that grow with the
//! elevation distance from the range boundary:
//!
//! - above: 2 and 4 for the first two 100 m bands, then 7, 10, 13, ...
//! - below: 2, 4 and 6 for the first three 100 m bands, then 9, 12, 15, ...
//!
//! The original procedure assigned the far bands by repeatedly overwriting
//! every cell beyond a moving boundary until the boundary passed the
//! dataset's own extreme elevation. Each cell's final value is therefore the
//! penalty of the highest (lowest, below the range) boundary it still
//! exceeds. This module replays that moving-boundary walk per cell instead
//! of sweeping the whole grid once per step; the integration tests check the
//! walk against a direct simulation of the sweeping loop.

use crate::resistance::ElevationRange;
use paramo_core::raster::Raster;
use paramo_core::{Error, Result};
use rayon::prelude::*;

/// Width of the graduated transition bands next to the range (m)
pub const TRANSITION_WIDTH: f64 = 100.0;

/// Extent of the near bands above the range before the far tail begins (m)
pub const ABOVE_CUTOFF: f64 = 200.0;

/// Extent of the near bands below the range before the far tail begins (m).
/// One step wider than the above-range cutoff; preserved as observed.
pub const BELOW_CUTOFF: f64 = 300.0;

/// Boundary step of the far tails (m)
pub const TAIL_STEP: f64 = 100.0;

const IN_RANGE_COST: f64 = 1.0;
const NEAR_BASE: f64 = 2.0;
const NEAR_STEP: f64 = 2.0;
const ABOVE_TAIL_BASE: f64 = 7.0;
const BELOW_TAIL_BASE: f64 = 9.0;
const TAIL_PENALTY_STEP: f64 = 3.0;

/// Parameters for reclassification
#[derive(Debug, Clone, Copy)]
pub struct ReclassifyParams {
    /// Elevation range receiving the baseline cost
    pub range: ElevationRange,
    /// Transition band width (fixed at 100 in the observed design)
    pub transition_width: f64,
}

impl ReclassifyParams {
    /// Parameters for a range with the standard transition width
    pub fn new(range: ElevationRange) -> Self {
        Self {
            range,
            transition_width: TRANSITION_WIDTH,
        }
    }
}

/// Reclassify a DEM against one elevation range.
///
/// The output has the same shape and georeferencing as the input. No-data
/// cells stay no-data (NaN). If the input has no valid cells at all, an
/// all-no-data raster is returned without running the band assignment.
///
/// Each cell's cost is a pure function of its own elevation, the range
/// bounds, and the dataset's valid min/max elevation, so repeated calls on
/// the same input yield identical outputs.
pub fn reclassify(dem: &Raster, params: ReclassifyParams) -> Result<Raster> {
    let ReclassifyParams {
        range,
        transition_width,
    } = params;

    if range.lower >= range.upper {
        return Err(Error::InvalidParameter {
            name: "range",
            value: format!("({}, {})", range.lower, range.upper),
            reason: "lower limit must be below upper limit".to_string(),
        });
    }
    if !(transition_width > 0.0) {
        return Err(Error::InvalidParameter {
            name: "transition_width",
            value: transition_width.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let stats = dem.statistics();
    let (Some(min_elev), Some(max_elev)) = (stats.min, stats.max) else {
        // Every cell is no-data: emit a no-data grid of the same shape
        let mut output = dem.like(f64::NAN);
        output.set_nodata(Some(f64::NAN));
        return Ok(output);
    };

    let (rows, cols) = dem.shape();
    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for (col, slot) in row_data.iter_mut().enumerate() {
                let e = unsafe { dem.get_unchecked(row, col) };
                if dem.is_nodata(e) {
                    continue;
                }
                *slot = cell_cost(e, range, transition_width, min_elev, max_elev);
            }
            row_data
        })
        .collect();

    let mut output = dem.with_data(data)?;
    output.set_nodata(Some(f64::NAN));
    Ok(output)
}

/// Cost for a single valid elevation sample.
fn cell_cost(e: f64, range: ElevationRange, width: f64, min_elev: f64, max_elev: f64) -> f64 {
    if range.contains(e) {
        IN_RANGE_COST
    } else if e > range.upper {
        cost_above(e, range.upper, width, max_elev)
    } else {
        cost_below(e, range.lower, width, min_elev)
    }
}

/// Walk the bands above the range: near bands `(boundary, boundary+width]`
/// at 2, 4, ... up to the cutoff, then the far tail assigning to every cell
/// above the moving boundary until it passes the dataset maximum.
fn cost_above(e: f64, upper: f64, width: f64, max_elev: f64) -> f64 {
    let mut boundary = upper;
    let mut penalty = NEAR_BASE;
    while boundary + width <= upper + ABOVE_CUTOFF {
        if e > boundary && e <= boundary + width {
            return penalty;
        }
        penalty += NEAR_STEP;
        boundary += width;
    }

    let mut penalty = ABOVE_TAIL_BASE;
    let mut cost = f64::NAN;
    while boundary <= max_elev {
        // Overwriting assignment: the last boundary this cell exceeds wins
        if e > boundary {
            cost = penalty;
        }
        penalty += TAIL_PENALTY_STEP;
        boundary += TAIL_STEP;
    }
    cost
}

/// Mirror of [`cost_above`] below the range: near bands
/// `[boundary-width, boundary)` at 2, 4, 6 down to the cutoff, then the far
/// tail from 9 bounded by the dataset minimum.
fn cost_below(e: f64, lower: f64, width: f64, min_elev: f64) -> f64 {
    let mut boundary = lower;
    let mut penalty = NEAR_BASE;
    while boundary - width >= lower - BELOW_CUTOFF {
        if e >= boundary - width && e < boundary {
            return penalty;
        }
        penalty += NEAR_STEP;
        boundary -= width;
    }

    let mut penalty = BELOW_TAIL_BASE;
    let mut cost = f64::NAN;
    while boundary >= min_elev {
        if e < boundary {
            cost = penalty;
        }
        penalty += TAIL_PENALTY_STEP;
        boundary -= TAIL_STEP;
    }
    cost
}
