//! Raster path resolution under the data directory.

use std::path::{Component, Path, PathBuf};

use location_protocol::ProtocolError;

/// Resolve a requested raster against `data_dir`.
///
/// Only plain relative paths are accepted: absolute paths and `..`
/// components never leave the data directory.
pub fn resolve_raster(data_dir: &Path, raster: &str) -> Result<PathBuf, ProtocolError> {
    let relative = Path::new(raster);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if raster.is_empty() || !plain {
        return Err(ProtocolError::InvalidRasterPath(raster.to_string()));
    }

    let path = data_dir.join(relative);
    if !path.is_file() {
        return Err(ProtocolError::RasterNotFound(raster.to_string()));
    }

    Ok(path)
}

/// Resolve every raster of a stack, failing on the first bad one.
pub fn resolve_rasters(data_dir: &Path, rasters: &[String]) -> Result<Vec<PathBuf>, ProtocolError> {
    rasters
        .iter()
        .map(|raster| resolve_raster(data_dir, raster))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bluegrass")).unwrap();
        std::fs::write(dir.path().join("lsd.tif"), b"x").unwrap();
        std::fs::write(dir.path().join("bluegrass").join("dtw.tif"), b"x").unwrap();
        dir
    }

    #[test]
    fn test_resolves_relative_paths() {
        let dir = data_dir();
        assert_eq!(
            resolve_raster(dir.path(), "lsd.tif").unwrap(),
            dir.path().join("lsd.tif")
        );
        assert_eq!(
            resolve_raster(dir.path(), "./bluegrass/dtw.tif").unwrap(),
            dir.path().join("./bluegrass/dtw.tif")
        );
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = data_dir();
        for raster in ["../lsd.tif", "bluegrass/../../etc/passwd", "/etc/passwd", ""] {
            assert_eq!(
                resolve_raster(dir.path(), raster),
                Err(ProtocolError::InvalidRasterPath(raster.to_string())),
                "{raster}"
            );
        }
    }

    #[test]
    fn test_missing_raster() {
        let dir = data_dir();
        assert_eq!(
            resolve_raster(dir.path(), "wtele.tif"),
            Err(ProtocolError::RasterNotFound("wtele.tif".to_string()))
        );
        // directories are not rasters
        assert!(resolve_raster(dir.path(), "bluegrass").is_err());
    }

    #[test]
    fn test_first_failure_wins() {
        let dir = data_dir();
        let rasters = vec!["lsd.tif".to_string(), "nope.tif".to_string(), "../x".to_string()];
        assert_eq!(
            resolve_rasters(dir.path(), &rasters),
            Err(ProtocolError::RasterNotFound("nope.tif".to_string()))
        );
    }
}
