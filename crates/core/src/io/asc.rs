//! ESRI ASCII grid reader
//!
//! Parses the `.asc` header (`ncols`, `nrows`, `xllcorner`/`xllcenter`,
//! `yllcorner`/`yllcenter`, `cellsize`, optional `nodata_value`) followed by
//! row-major cell values. Declared no-data values are mapped to NaN.

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster};
use std::fs;
use std::path::Path;

/// Recognized header keywords (lowercase). Anything else starts the data
/// block, so tokens like a literal `nan` stay cell values.
const HEADER_KEYWORDS: [&str; 8] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "xllcenter",
    "yllcenter",
    "cellsize",
    "nodata_value",
];

/// Parsed ASCII grid header
#[derive(Debug, Clone, Default)]
struct AscHeader {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<f64>,
    yll: Option<f64>,
    /// Whether xll/yll refer to the cell center rather than the corner
    center_origin: bool,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

/// Read an ESRI ASCII grid file into a Raster
pub fn read_ascii_grid<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let text = fs::read_to_string(path.as_ref())?;
    read_ascii_grid_from_str(&text)
}

/// Parse an ESRI ASCII grid from text
pub fn read_ascii_grid_from_str(text: &str) -> Result<Raster> {
    let mut header = AscHeader::default();
    let mut data: Vec<f64> = Vec::new();
    let mut in_header = true;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if in_header {
            let mut tokens = trimmed.split_whitespace();
            let key = tokens.next().unwrap_or_default().to_ascii_lowercase();
            if HEADER_KEYWORDS.contains(&key.as_str()) {
                let value = tokens.next().ok_or_else(|| Error::AsciiGrid {
                    line: line_no,
                    message: format!("header keyword '{}' has no value", key),
                })?;
                parse_header_field(&mut header, &key, value, line_no)?;
                continue;
            }
            // First non-keyword line starts the data block
            in_header = false;
            validate_header(&header, line_no)?;
        }

        for token in trimmed.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::AsciiGrid {
                line: line_no,
                message: format!("invalid cell value '{}'", token),
            })?;
            data.push(value);
        }
    }

    if in_header {
        return Err(Error::AsciiGrid {
            line: text.lines().count(),
            message: "file contains no data rows".to_string(),
        });
    }

    let rows = header.nrows.unwrap();
    let cols = header.ncols.unwrap();
    if data.len() != rows * cols {
        return Err(Error::AsciiGrid {
            line: text.lines().count(),
            message: format!(
                "expected {} cell values ({}x{}), found {}",
                rows * cols,
                rows,
                cols,
                data.len()
            ),
        });
    }

    // Map the declared no-data marker to NaN
    if let Some(nd) = header.nodata {
        for v in &mut data {
            if (*v - nd).abs() < f64::EPSILON {
                *v = f64::NAN;
            }
        }
    }

    let cellsize = header.cellsize.unwrap();
    let mut xll = header.xll.unwrap();
    let mut yll = header.yll.unwrap();
    if header.center_origin {
        xll -= cellsize / 2.0;
        yll -= cellsize / 2.0;
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;
    raster.set_transform(GeoTransform::from_ll_corner(xll, yll, cellsize, rows));
    raster.set_nodata(Some(f64::NAN));
    Ok(raster)
}

fn parse_header_field(
    header: &mut AscHeader,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<()> {
    let parse_f64 = |v: &str| -> Result<f64> {
        v.parse().map_err(|_| Error::AsciiGrid {
            line: line_no,
            message: format!("invalid numeric value '{}' for '{}'", v, key),
        })
    };

    match key {
        "ncols" => {
            header.ncols = Some(parse_f64(value)? as usize);
        }
        "nrows" => {
            header.nrows = Some(parse_f64(value)? as usize);
        }
        "xllcorner" => {
            header.xll = Some(parse_f64(value)?);
        }
        "yllcorner" => {
            header.yll = Some(parse_f64(value)?);
        }
        "xllcenter" => {
            header.xll = Some(parse_f64(value)?);
            header.center_origin = true;
        }
        "yllcenter" => {
            header.yll = Some(parse_f64(value)?);
            header.center_origin = true;
        }
        "cellsize" => {
            header.cellsize = Some(parse_f64(value)?);
        }
        "nodata_value" => {
            header.nodata = Some(parse_f64(value)?);
        }
        // The caller only routes keywords from HEADER_KEYWORDS here
        _ => unreachable!("unrecognized header keyword '{}'", key),
    }
    Ok(())
}

fn validate_header(header: &AscHeader, line_no: usize) -> Result<()> {
    let missing = [
        ("ncols", header.ncols.is_none()),
        ("nrows", header.nrows.is_none()),
        ("xllcorner", header.xll.is_none()),
        ("yllcorner", header.yll.is_none()),
        ("cellsize", header.cellsize.is_none()),
    ]
    .iter()
    .filter(|(_, absent)| *absent)
    .map(|(name, _)| *name)
    .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(Error::AsciiGrid {
            line: line_no,
            message: format!("missing header field(s): {}", missing.join(", ")),
        });
    }
    if header.cellsize.is_some_and(|c| c <= 0.0) {
        return Err(Error::AsciiGrid {
            line: line_no,
            message: "cellsize must be positive".to_string(),
        });
    }
    Ok(())
}
