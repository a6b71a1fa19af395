//! Coordinate Reference System metadata
//!
//! The toolkit never reprojects; a `Crs` is opaque metadata carried from
//! input to output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PROJ string for geographic WGS84 coordinates, the CRS assigned to every
/// DEM this toolkit loads.
pub const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Coordinate reference system carried as opaque metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    /// PROJ string (primary representation)
    proj: String,
    /// EPSG code if known
    epsg: Option<u32>,
}

impl Crs {
    /// Create a CRS from a PROJ string
    pub fn from_proj(proj: impl Into<String>) -> Self {
        Self {
            proj: proj.into(),
            epsg: None,
        }
    }

    /// Geographic WGS84 (lon/lat degrees, EPSG:4326)
    pub fn wgs84_longlat() -> Self {
        Self {
            proj: WGS84_LONGLAT.to_string(),
            epsg: Some(4326),
        }
    }

    /// Get the PROJ string
    pub fn proj(&self) -> &str {
        &self.proj
    }

    /// Get the EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Whether this CRS is geographic (angular units) rather than projected
    pub fn is_geographic(&self) -> bool {
        self.proj.contains("+proj=longlat") || self.epsg == Some(4326)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "EPSG:{}", code),
            None => write!(f, "{}", self.proj),
        }
    }
}
