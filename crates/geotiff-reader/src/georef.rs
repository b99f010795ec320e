//! Affine georeferencing from GeoTIFF model tags.
//!
//! Two encodings are supported:
//!
//! - `ModelPixelScaleTag` + `ModelTiepointTag`: one tiepoint `(i, j, k, x, y, z)`
//!   ties raster position `(i, j)` to world `(x, y)`; the scale gives cell size.
//! - `ModelTransformationTag`: a 4x4 row-major matrix. Only axis-aligned
//!   matrices are accepted.
//!
//! A `GTRasterTypeGeoKey` of `RasterPixelIsPoint` moves the origin half a cell
//! up and left so the transform always addresses cell corners.

use stack_query::GeoTransform;

use crate::error::{GeoTiffError, GeoTiffResult};

/// `GTRasterTypeGeoKey` in the GeoKey directory.
const GT_RASTER_TYPE_GEO_KEY: u32 = 1025;

/// `RasterPixelIsPoint` value of `GTRasterTypeGeoKey`.
const RASTER_PIXEL_IS_POINT: u32 = 2;

/// Raw georeferencing tags read from a TIFF directory.
#[derive(Debug, Clone, Default)]
pub struct GeoTags {
    pub pixel_scale: Option<Vec<f64>>,
    pub tiepoint: Option<Vec<f64>>,
    pub transformation: Option<Vec<f64>>,
    pub geo_key_directory: Option<Vec<u32>>,
}

impl GeoTags {
    /// Build the affine transform these tags describe.
    pub fn transform(&self) -> GeoTiffResult<GeoTransform> {
        let transform = match (&self.pixel_scale, &self.tiepoint, &self.transformation) {
            (Some(scale), Some(tiepoint), _) => from_scale_and_tiepoint(scale, tiepoint)?,
            (_, _, Some(matrix)) => from_transformation(matrix)?,
            _ => {
                return Err(GeoTiffError::MissingGeoreference(
                    "no ModelPixelScale/ModelTiepoint pair or ModelTransformation".to_string(),
                ))
            }
        };

        if self.pixel_is_point() {
            Ok(GeoTransform::new(
                transform.origin_x - transform.cell_width / 2.0,
                transform.origin_y - transform.cell_height / 2.0,
                transform.cell_width,
                transform.cell_height,
            ))
        } else {
            Ok(transform)
        }
    }

    /// Whether the GeoKey directory declares point-registered pixels.
    pub fn pixel_is_point(&self) -> bool {
        self.geo_key_directory
            .as_deref()
            .and_then(|keys| geo_key_value(keys, GT_RASTER_TYPE_GEO_KEY))
            == Some(RASTER_PIXEL_IS_POINT)
    }
}

fn from_scale_and_tiepoint(scale: &[f64], tiepoint: &[f64]) -> GeoTiffResult<GeoTransform> {
    if scale.len() < 2 || tiepoint.len() < 6 {
        return Err(GeoTiffError::MissingGeoreference(format!(
            "pixel scale has {} values and tiepoint has {}",
            scale.len(),
            tiepoint.len()
        )));
    }
    let (sx, sy) = (scale[0], scale[1]);
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);

    Ok(GeoTransform::new(x - i * sx, y + j * sy, sx, -sy))
}

fn from_transformation(matrix: &[f64]) -> GeoTiffResult<GeoTransform> {
    if matrix.len() < 16 {
        return Err(GeoTiffError::MissingGeoreference(format!(
            "model transformation has {} values",
            matrix.len()
        )));
    }
    if matrix[1] != 0.0 || matrix[4] != 0.0 {
        return Err(GeoTiffError::Unsupported(
            "rotated model transformation".to_string(),
        ));
    }

    Ok(GeoTransform::new(matrix[3], matrix[7], matrix[0], matrix[5]))
}

/// Look up an inline SHORT value in a GeoKey directory.
///
/// The directory is a header `(version, revision, minor, count)` followed by
/// `count` entries of `(key, location, count, value)`. Location 0 means the
/// value is stored inline.
fn geo_key_value(directory: &[u32], key: u32) -> Option<u32> {
    let count = *directory.get(3)? as usize;
    directory
        .get(4..)?
        .chunks_exact(4)
        .take(count)
        .find(|entry| entry[0] == key && entry[1] == 0)
        .map(|entry| entry[3])
}
