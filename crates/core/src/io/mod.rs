//! I/O for geospatial raster data
//!
//! Input is the ESRI ASCII grid format; output is single-band GeoTIFF.

mod asc;
mod geotiff;

pub use asc::{read_ascii_grid, read_ascii_grid_from_str};
pub use geotiff::{write_geotiff, write_geotiff_to_buffer};
