//! Fixed table of elevation ranges
//!
//! Ranges follow the paleoclimatic literature for the high-Andean belt:
//! 700 m wide bands whose lower limits climb in 100 m steps, so each range
//! overlaps its neighbors. The table spans the sub-paramo through
//! super-paramo zones.

/// An ordered pair of elevation bounds, `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    /// Lower elevation limit (inclusive)
    pub lower: f64,
    /// Upper elevation limit (inclusive)
    pub upper: f64,
}

impl ElevationRange {
    /// Create a new range
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Band width in elevation units
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether an elevation falls inside the band (inclusive on both ends)
    pub fn contains(&self, elevation: f64) -> bool {
        elevation >= self.lower && elevation <= self.upper
    }

    /// Output file stem, e.g. `RC_2100_2800` for the range (2100, 2800)
    pub fn file_stem(&self) -> String {
        format!("RC_{}_{}", self.lower, self.upper)
    }

    /// Output file name, e.g. `RC_2100_2800.tif`
    pub fn file_name(&self) -> String {
        format!("{}.tif", self.file_stem())
    }
}

/// Width of every range in the fixed table (m)
pub const RANGE_WIDTH: f64 = 700.0;

/// Shift between successive lower limits (m)
pub const RANGE_SHIFT: f64 = 100.0;

/// The fixed, ordered table of 22 elevation ranges.
pub const PARAMO_RANGES: [ElevationRange; 22] = [
    ElevationRange::new(1800.0, 2500.0),
    ElevationRange::new(1900.0, 2600.0),
    ElevationRange::new(2000.0, 2700.0),
    ElevationRange::new(2100.0, 2800.0),
    ElevationRange::new(2200.0, 2900.0),
    ElevationRange::new(2300.0, 3000.0),
    ElevationRange::new(2400.0, 3100.0),
    ElevationRange::new(2500.0, 3200.0),
    ElevationRange::new(2600.0, 3300.0),
    ElevationRange::new(2700.0, 3400.0),
    ElevationRange::new(2800.0, 3500.0),
    ElevationRange::new(2900.0, 3600.0),
    ElevationRange::new(3000.0, 3700.0),
    ElevationRange::new(3100.0, 3800.0),
    ElevationRange::new(3200.0, 3900.0),
    ElevationRange::new(3300.0, 4000.0),
    ElevationRange::new(3400.0, 4100.0),
    ElevationRange::new(3500.0, 4200.0),
    ElevationRange::new(3600.0, 4300.0),
    ElevationRange::new(3700.0, 4400.0),
    ElevationRange::new(3800.0, 4500.0),
    ElevationRange::new(3900.0, 4600.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(PARAMO_RANGES.len(), 22);
        for range in &PARAMO_RANGES {
            assert!(range.lower < range.upper);
            assert_eq!(range.width(), RANGE_WIDTH);
        }
        for pair in PARAMO_RANGES.windows(2) {
            assert_eq!(pair[1].lower - pair[0].lower, RANGE_SHIFT);
            // Each range overlaps its successor
            assert!(pair[1].lower < pair[0].upper);
        }
    }

    #[test]
    fn test_file_naming() {
        let range = ElevationRange::new(2100.0, 2800.0);
        assert_eq!(range.file_stem(), "RC_2100_2800");
        assert_eq!(range.file_name(), "RC_2100_2800.tif");
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = ElevationRange::new(2000.0, 2700.0);
        assert!(range.contains(2000.0));
        assert!(range.contains(2700.0));
        assert!(!range.contains(1999.9));
        assert!(!range.contains(2700.1));
    }
}
