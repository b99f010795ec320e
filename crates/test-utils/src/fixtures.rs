//! Common test fixtures for raster stack tests.
//!
//! Grid definitions for in-memory layers plus a small GeoTIFF writer so
//! reader and service tests can work against real files in a temp directory.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

pub type FixtureResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// GDAL ASCII metadata tag (statistics live here).
pub const TAG_GDAL_METADATA: u16 = 42112;

/// GDAL ASCII nodata tag.
pub const TAG_GDAL_NODATA: u16 = 42113;

/// Common grid specifications for testing.
pub mod grid {
    use super::RasterSpec;

    /// The 10x10 grid used by most query tests: origin (0, 100), 10 m cells.
    pub const SIMPLE_10X10: RasterSpec = RasterSpec {
        origin_x: 0.0,
        origin_y: 100.0,
        cell_size: 10.0,
        columns: 10,
        rows: 10,
    };

    /// A UTM-like grid with an origin that needs rounding to compare.
    pub const UTM_30M: RasterSpec = RasterSpec {
        origin_x: 517_461.5932,
        origin_y: 5_046_855.8012,
        cell_size: 30.0,
        columns: 40,
        rows: 25,
    };

    /// Smallest useful grid.
    pub const SINGLE_CELL: RasterSpec = RasterSpec {
        origin_x: 100.0,
        origin_y: 200.0,
        cell_size: 5.0,
        columns: 1,
        rows: 1,
    };
}

/// Geometry of a north-up raster with square cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSpec {
    /// X of the upper-left corner.
    pub origin_x: f64,
    /// Y of the upper-left corner.
    pub origin_y: f64,
    /// Cell width and (positive) cell height.
    pub cell_size: f64,
    pub columns: usize,
    pub rows: usize,
}

impl RasterSpec {
    /// Number of cells in one band.
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// World coordinate at the centre of `(column, row)`.
    pub fn cell_center(&self, column: usize, row: usize) -> (f64, f64) {
        (
            self.origin_x + (column as f64 + 0.5) * self.cell_size,
            self.origin_y - (row as f64 + 0.5) * self.cell_size,
        )
    }

    /// Same grid with a different column count.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Same grid with a shifted origin.
    pub fn with_origin(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }
}

/// Optional GDAL tags written alongside the pixels.
#[derive(Debug, Clone, Default)]
pub struct GeoTiffOptions {
    /// Written verbatim into `GDAL_NODATA`.
    pub nodata: Option<String>,
    /// Written as `STATISTICS_MINIMUM` / `STATISTICS_MAXIMUM` in `GDAL_METADATA`.
    pub statistics: Option<(f64, f64)>,
    /// Use a `ModelTransformationTag` instead of pixel scale + tiepoint.
    pub model_transformation: bool,
}

impl GeoTiffOptions {
    pub fn with_nodata(mut self, nodata: impl Into<String>) -> Self {
        self.nodata = Some(nodata.into());
        self
    }

    pub fn with_statistics(mut self, minimum: f64, maximum: f64) -> Self {
        self.statistics = Some((minimum, maximum));
        self
    }

    pub fn with_model_transformation(mut self) -> Self {
        self.model_transformation = true;
        self
    }
}

/// GDAL_METADATA XML carrying band statistics.
pub fn gdal_statistics_xml(minimum: f64, maximum: f64) -> String {
    format!(
        "<GDALMetadata>\n  \
         <Item name=\"STATISTICS_MAXIMUM\" sample=\"0\">{maximum}</Item>\n  \
         <Item name=\"STATISTICS_MINIMUM\" sample=\"0\">{minimum}</Item>\n\
         </GDALMetadata>"
    )
}

/// Write a single-band float32 GeoTIFF.
pub fn write_geotiff(
    path: &Path,
    spec: &RasterSpec,
    data: &[f64],
    options: &GeoTiffOptions,
) -> FixtureResult<()> {
    if data.len() != spec.cell_count() {
        return Err(format!(
            "expected {} values for a {}x{} grid, got {}",
            spec.cell_count(),
            spec.columns,
            spec.rows,
            data.len()
        )
        .into());
    }

    let pixels: Vec<f32> = data.iter().map(|v| *v as f32).collect();
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path)?))?;
    let mut image =
        encoder.new_image::<colortype::Gray32Float>(spec.columns as u32, spec.rows as u32)?;

    let dir = image.encoder();
    if options.model_transformation {
        let matrix = [
            spec.cell_size, 0.0, 0.0, spec.origin_x,
            0.0, -spec.cell_size, 0.0, spec.origin_y,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        dir.write_tag(Tag::ModelTransformationTag, &matrix[..])?;
    } else {
        let scale = [spec.cell_size, spec.cell_size, 0.0];
        let tiepoint = [0.0, 0.0, 0.0, spec.origin_x, spec.origin_y, 0.0];
        dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])?;
        dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
    }
    if let Some(nodata) = &options.nodata {
        dir.write_tag(Tag::from_u16_exhaustive(TAG_GDAL_NODATA), nodata.as_str())?;
    }
    if let Some((minimum, maximum)) = options.statistics {
        let xml = gdal_statistics_xml(minimum, maximum);
        dir.write_tag(Tag::from_u16_exhaustive(TAG_GDAL_METADATA), xml.as_str())?;
    }

    image.write_data(&pixels)?;
    Ok(())
}

/// Write a three-band float32 GeoTIFF from per-band grids.
pub fn write_three_band_geotiff(
    path: &Path,
    spec: &RasterSpec,
    bands: [&[f64]; 3],
) -> FixtureResult<()> {
    if bands.iter().any(|b| b.len() != spec.cell_count()) {
        return Err("band length does not match grid".into());
    }

    let mut pixels = Vec::with_capacity(spec.cell_count() * 3);
    for i in 0..spec.cell_count() {
        for band in &bands {
            pixels.push(band[i] as f32);
        }
    }

    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path)?))?;
    let mut image =
        encoder.new_image::<colortype::RGB32Float>(spec.columns as u32, spec.rows as u32)?;
    let scale = [spec.cell_size, spec.cell_size, 0.0];
    let tiepoint = [0.0, 0.0, 0.0, spec.origin_x, spec.origin_y, 0.0];
    image.encoder().write_tag(Tag::ModelPixelScaleTag, &scale[..])?;
    image.encoder().write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
    image.write_data(&pixels)?;
    Ok(())
}

/// A temporary directory of GeoTIFF layers.
///
/// The directory is removed when the fixture is dropped.
pub struct StackDir {
    dir: TempDir,
}

impl StackDir {
    pub fn new() -> FixtureResult<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Root of the fixture directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<name>.tif` and return its full path.
    pub fn add_layer(
        &self,
        name: &str,
        spec: &RasterSpec,
        data: &[f64],
        options: &GeoTiffOptions,
    ) -> FixtureResult<PathBuf> {
        let path = self.dir.path().join(format!("{name}.tif"));
        write_geotiff(&path, spec, data, options)?;
        Ok(path)
    }

    /// Write a layer into a subdirectory, creating it as needed.
    pub fn add_layer_in(
        &self,
        subdir: &str,
        name: &str,
        spec: &RasterSpec,
        data: &[f64],
        options: &GeoTiffOptions,
    ) -> FixtureResult<PathBuf> {
        let dir = self.dir.path().join(subdir);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{name}.tif"));
        write_geotiff(&path, spec, data, options)?;
        Ok(path)
    }

    /// Write an arbitrary file (for malformed-input tests).
    pub fn add_file(&self, name: &str, contents: &[u8]) -> FixtureResult<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
