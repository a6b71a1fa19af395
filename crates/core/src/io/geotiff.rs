//! GeoTIFF writing via the `tiff` crate
//!
//! Writes single-band 32-bit float GeoTIFFs with ModelPixelScale,
//! ModelTiepoint and GeoKeyDirectory tags. Existing files are overwritten.

use crate::error::{Error, Result};
use crate::raster::Raster;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

/// Write a Raster to a GeoTIFF file, replacing any existing file.
pub fn write_geotiff<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_geotiff(raster, file)
}

/// Write a Raster to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer(raster: &Raster) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_geotiff(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode a Raster as GeoTIFF into any `Write + Seek` sink
fn encode_geotiff<W>(raster: &Raster, writer: W) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Tiff(format!("encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();

    // No-data cells (declared value or NaN) are written as NaN
    let data: Vec<f32> = raster
        .data()
        .iter()
        .map(|&v| {
            if raster.is_nodata(v) {
                f32::NAN
            } else {
                v as f32
            }
        })
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Tiff(format!("cannot create image: {}", e)))?;

    let gt = raster.transform();

    let scale = vec![gt.pixel_width, gt.pixel_height.abs(), 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, scale.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write scale tag: {}", e)))?;

    // Raster (0,0) pinned to the geographic origin
    let tiepoint = vec![0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, tiepoint.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write tiepoint tag: {}", e)))?;

    // GDAL's no-data convention: NaN samples flagged for downstream readers
    image
        .encoder()
        .write_tag(Tag::GdalNodata, "nan")
        .map_err(|e| Error::Tiff(format!("cannot write nodata tag: {}", e)))?;

    // GeoKeyDirectoryTag. GTModelTypeGeoKey=2 (Geographic) for lon/lat CRSs,
    // 1 (Projected) otherwise; GTRasterTypeGeoKey=1 (RasterPixelIsArea);
    // GeographicTypeGeoKey=4326 when the CRS carries that EPSG code.
    let geographic = raster.crs().is_some_and(|c| c.is_geographic());
    let model_type: u16 = if geographic { 2 } else { 1 };
    let mut geokeys: Vec<u16> = vec![
        1, 1, 0, 2, // version 1.1.0, key count patched below
        1024, 0, 1, model_type,
        1025, 0, 1, 1,
    ];
    if let Some(4326) = raster.crs().and_then(|c| c.epsg()) {
        geokeys[3] = 3;
        geokeys.extend_from_slice(&[2048, 0, 1, 4326]);
    }
    image
        .encoder()
        .write_tag(Tag::GeoKeyDirectoryTag, geokeys.as_slice())
        .map_err(|e| Error::Tiff(format!("cannot write geokey tag: {}", e)))?;

    image
        .write_data(&data)
        .map_err(|e| Error::Tiff(format!("cannot write image data: {}", e)))?;

    Ok(())
}
