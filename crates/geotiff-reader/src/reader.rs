//! GeoTIFF-backed raster layer.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use stack_query::{GeoTransform, RasterLayer, ReadResult};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::georef::GeoTags;
use crate::metadata::{parse_nodata, parse_statistics};

pub const TAG_GDAL_METADATA: u16 = 42112;
pub const TAG_GDAL_NODATA: u16 = 42113;

/// `PlanarConfiguration` value for band-sequential storage.
const PLANAR_SEPARATE: u32 = 2;

/// A decoded GeoTIFF image exposed as a [`RasterLayer`].
///
/// The first image of the file is decoded on open and held as interleaved
/// `f64` samples; a layer is opened per query and dropped with it.
#[derive(Debug, Clone)]
pub struct GeoTiffLayer {
    name: String,
    path: PathBuf,
    transform: GeoTransform,
    rows: usize,
    columns: usize,
    samples_per_pixel: usize,
    nodata: Option<f64>,
    metadata: Option<String>,
    data: Vec<f64>,
}

impl GeoTiffLayer {
    /// Open a GeoTIFF, naming the layer after the file stem.
    pub fn open(path: impl AsRef<Path>) -> GeoTiffResult<Self> {
        let path = path.as_ref();
        Self::open_named(path, layer_name(path))
    }

    /// Open a GeoTIFF under an explicit layer name.
    pub fn open_named(path: impl AsRef<Path>, name: impl Into<String>) -> GeoTiffResult<Self> {
        let path = path.as_ref();
        let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
        decoder = decoder.with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions()?;
        let samples_per_pixel = match decoder.colortype()? {
            ColorType::Gray(_) => 1,
            ColorType::GrayA(_) => 2,
            ColorType::RGB(_) => 3,
            ColorType::RGBA(_) | ColorType::CMYK(_) => 4,
            ColorType::Multiband { num_samples, .. } => num_samples as usize,
            other => {
                return Err(GeoTiffError::Unsupported(format!(
                    "color type {other:?} in {}",
                    path.display()
                )))
            }
        };

        let planar = decoder.get_tag_u32(Tag::PlanarConfiguration).unwrap_or(1);
        if planar == PLANAR_SEPARATE && samples_per_pixel > 1 {
            return Err(GeoTiffError::Unsupported(format!(
                "band-sequential storage in {}",
                path.display()
            )));
        }

        let tags = GeoTags {
            pixel_scale: decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok(),
            tiepoint: decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok(),
            transformation: decoder.get_tag_f64_vec(Tag::ModelTransformationTag).ok(),
            geo_key_directory: decoder.get_tag_u32_vec(Tag::GeoKeyDirectoryTag).ok(),
        };
        let transform = tags.transform()?;

        let nodata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(TAG_GDAL_NODATA))
            .ok()
            .and_then(|s| parse_nodata(&s));
        let metadata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(TAG_GDAL_METADATA))
            .ok();

        let data = decoding_result_to_f64(decoder.read_image()?);
        let (columns, rows) = (width as usize, height as usize);
        if data.len() != columns * rows * samples_per_pixel {
            return Err(GeoTiffError::Unsupported(format!(
                "decoded {} samples, expected {}x{}x{} in {}",
                data.len(),
                columns,
                rows,
                samples_per_pixel,
                path.display()
            )));
        }

        let name = name.into();
        debug!(
            layer = %name,
            path = %path.display(),
            columns,
            rows,
            bands = samples_per_pixel,
            nodata = ?nodata,
            origin_x = transform.origin_x,
            origin_y = transform.origin_y,
            "Opened GeoTIFF layer"
        );

        Ok(Self {
            name,
            path: path.to_path_buf(),
            transform,
            rows,
            columns,
            samples_per_pixel,
            nodata,
            metadata,
            data,
        })
    }

    /// File the layer was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_band(&self, band: usize) -> GeoTiffResult<usize> {
        if band == 0 || band > self.samples_per_pixel {
            return Err(GeoTiffError::InvalidBand {
                band,
                count: self.samples_per_pixel,
            });
        }
        Ok(band - 1)
    }

    fn sample(&self, band: usize, column: usize, row: usize) -> GeoTiffResult<f64> {
        let offset = self.check_band(band)?;
        if column >= self.columns || row >= self.rows {
            return Err(GeoTiffError::CellOutOfRange {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(self.data[(row * self.columns + column) * self.samples_per_pixel + offset])
    }

    fn band(&self, band: usize) -> GeoTiffResult<Vec<f64>> {
        let offset = self.check_band(band)?;
        Ok(self
            .data
            .iter()
            .skip(offset)
            .step_by(self.samples_per_pixel)
            .copied()
            .collect())
    }
}

impl RasterLayer for GeoTiffLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn band_count(&self) -> usize {
        self.samples_per_pixel
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn stored_min_max(&self, band: usize) -> Option<(f64, f64)> {
        self.metadata
            .as_deref()
            .and_then(|xml| parse_statistics(xml, band))
    }

    fn read_cell(&self, band: usize, column: usize, row: usize) -> ReadResult<f64> {
        Ok(self.sample(band, column, row)?)
    }

    fn read_band(&self, band: usize) -> ReadResult<Vec<f64>> {
        Ok(self.band(band)?)
    }
}

/// Layer name for a raster path: the file name without its extension.
pub fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn decoding_result_to_f64(result: DecodingResult) -> Vec<f64> {
    match result {
        DecodingResult::U8(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U64(data) => data.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I8(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I64(data) => data.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::F32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::F64(data) => data,
    }
}
