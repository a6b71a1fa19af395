//! # Paramo Algorithms
//!
//! Resistance-surface generation for high-Andean connectivity modeling.
//!
//! The single algorithm category, **resistance**, reclassifies a DEM into
//! cost rasters for a series of overlapping elevation bands: cells inside a
//! band cost 1, cells outside receive penalties graduated by their elevation
//! distance from the band boundary.

pub mod resistance;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::resistance::{
        reclassify, run_batch, BatchParams, CostSink, DirectorySink, ElevationRange,
        RangeOutcome, ReclassifyParams, PARAMO_RANGES,
    };
    pub use paramo_core::prelude::*;
}
