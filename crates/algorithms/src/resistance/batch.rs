//! Batch driver: one cost raster per elevation range
//!
//! Iterates the fixed range table over a single immutable DEM, forwarding
//! each cost raster with its range to a [`CostSink`]. Ranges are mutually
//! independent, so the default path fans out over rayon; `sequential`
//! preserves the original one-at-a-time behavior.

use crate::resistance::{reclassify, ElevationRange, ReclassifyParams, TRANSITION_WIDTH};
use paramo_core::io::write_geotiff;
use paramo_core::raster::Raster;
use paramo_core::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Receives finished cost rasters, one per range.
pub trait CostSink: Sync {
    /// Write one range's cost raster. Called exactly once per range.
    fn write(&self, range: &ElevationRange, cost: &Raster) -> Result<()>;
}

/// Sink writing `RC_<lower>_<upper>.tif` GeoTIFFs into a directory,
/// overwriting existing files.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating the directory if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Output path for a range
    pub fn path_for(&self, range: &ElevationRange) -> PathBuf {
        self.dir.join(range.file_name())
    }
}

impl CostSink for DirectorySink {
    fn write(&self, range: &ElevationRange, cost: &Raster) -> Result<()> {
        write_geotiff(cost, self.path_for(range))
    }
}

/// Parameters for a batch run
#[derive(Debug, Clone, Copy)]
pub struct BatchParams {
    /// Transition band width forwarded to every range
    pub transition_width: f64,
    /// Process ranges one at a time instead of in parallel
    pub sequential: bool,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            transition_width: TRANSITION_WIDTH,
            sequential: false,
        }
    }
}

/// Result of processing one range
#[derive(Debug)]
pub struct RangeOutcome {
    pub range: ElevationRange,
    pub result: Result<()>,
}

impl RangeOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Reclassify the DEM against every range and forward each cost raster to
/// the sink.
///
/// A failure in one range (reclassification or write) is recorded in its
/// outcome and does not abort the remaining ranges. Outcomes are returned in
/// range order regardless of execution order.
///
/// If the DEM has no valid cells at all, an all-no-data raster is emitted
/// for every range without invoking the reclassifier.
pub fn run_batch<S: CostSink>(
    dem: &Raster,
    ranges: &[ElevationRange],
    sink: &S,
    params: BatchParams,
) -> Vec<RangeOutcome> {
    if dem.statistics().valid_count == 0 {
        info!("input has no valid cells; emitting no-data outputs");
        let mut empty = dem.like(f64::NAN);
        empty.set_nodata(Some(f64::NAN));
        return ranges
            .iter()
            .map(|range| RangeOutcome {
                range: *range,
                result: sink.write(range, &empty),
            })
            .collect();
    }

    let process = |range: &ElevationRange| -> RangeOutcome {
        debug!(lower = range.lower, upper = range.upper, "reclassifying");
        let result = reclassify(
            dem,
            ReclassifyParams {
                range: *range,
                transition_width: params.transition_width,
            },
        )
        .and_then(|cost| sink.write(range, &cost));

        match &result {
            Ok(()) => info!("{} done", range.file_stem()),
            Err(e) => warn!("{} failed: {}", range.file_stem(), e),
        }
        RangeOutcome {
            range: *range,
            result,
        }
    };

    if params.sequential {
        ranges.iter().map(process).collect()
    } else {
        ranges.par_iter().map(process).collect()
    }
}
