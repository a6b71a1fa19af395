//! Elevation-band resistance surfaces
//!
//! - Reclassify: per-range cost assignment from a DEM
//! - Ranges: the fixed table of overlapping elevation bands
//! - Batch: one cost raster per range, written through a sink

mod batch;
mod ranges;
mod reclassify;

pub use batch::{run_batch, BatchParams, CostSink, DirectorySink, RangeOutcome};
pub use ranges::{ElevationRange, PARAMO_RANGES, RANGE_SHIFT, RANGE_WIDTH};
pub use reclassify::{
    reclassify, ReclassifyParams, ABOVE_CUTOFF, BELOW_CUTOFF, TAIL_STEP, TRANSITION_WIDTH,
};
