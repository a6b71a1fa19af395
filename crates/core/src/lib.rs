//! # Paramo Core
//!
//! Core types and I/O for the paramo resistance-surface toolkit.
//!
//! This crate provides:
//! - `Raster`: georeferenced f64 grid type
//! - `GeoTransform`: affine transformation for georeferencing
//! - `Crs`: opaque coordinate reference system metadata
//! - I/O: ESRI ASCII grid reading, GeoTIFF writing

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;

pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterStatistics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterStatistics};
}
