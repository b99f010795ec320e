//! Parameters in, JSON bodies out.

use location_protocol::{
    FailureResponse, LocationError, LocationParams, LocationResponse, RasterSource, Status,
};
use stack_query::{GeoTransform, MemoryLayer, RasterLayer, StackQuery};

fn query_string(pairs: &[(&str, &str)]) -> LocationParams {
    let value = serde_json::Value::Object(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect(),
    );
    serde_json::from_value(value).unwrap()
}

fn layers(names: &[&str], value: f64) -> Vec<Box<dyn RasterLayer>> {
    let transform = GeoTransform::new(0.0, 100.0, 10.0, -10.0);
    names
        .iter()
        .map(|name| {
            Box::new(MemoryLayer::filled(*name, transform, 10, 10, value).with_nodata(-9999.0))
                as Box<dyn RasterLayer>
        })
        .collect()
}

fn run(params: &LocationParams, stack: &[Box<dyn RasterLayer>]) -> Result<LocationResponse, LocationError> {
    let request = params.validate()?;
    let result = StackQuery::default().run(stack, request.coordinate())?;
    Ok(LocationResponse::new(&request, &result))
}

#[test]
fn test_successful_round_trip() {
    let params = query_string(&[
        ("longitude", "-84.5"),
        ("latitude", "38.05"),
        ("x_coordinate", "25"),
        ("y_coordinate", "75"),
        ("rasters", "lsd.tif dtw.tif"),
    ]);
    let request = params.validate().unwrap();
    assert_eq!(
        request.source,
        RasterSource::Files(vec!["lsd.tif".into(), "dtw.tif".into()])
    );

    let response = run(&params, &layers(&["lsd", "dtw"], 3.25)).unwrap();
    let text = serde_json::to_string(&response).unwrap();
    let parsed: LocationResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, response);
    assert_eq!(parsed.status, Status::Success);
    assert_eq!(parsed.cell_count, 2);
}

#[test]
fn test_out_of_bounds_failure_body() {
    let params = query_string(&[
        ("longitude", "-84.5"),
        ("latitude", "38.05"),
        ("x_coordinate", "250"),
        ("y_coordinate", "75"),
        ("rasters", "lsd.tif"),
    ]);
    let err = run(&params, &layers(&["lsd"], 1.0)).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let body = serde_json::to_value(err.to_failure()).unwrap();
    assert_eq!(body["status"], "failed");
    assert!(body["message"].as_str().unwrap().contains("outside of raster"));
}

#[test]
fn test_no_coverage_failure_body() {
    let params = query_string(&[
        ("longitude", "-84.5"),
        ("latitude", "38.05"),
        ("x_coordinate", "25"),
        ("y_coordinate", "75"),
        ("rasters", "lsd.tif,dtw.tif"),
    ]);
    let err = run(&params, &layers(&["lsd", "dtw"], -9999.0)).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(
        err.to_failure(),
        FailureResponse::new("Site is outside the extent of the geologic units")
    );
}

#[test]
fn test_missing_parameter_failure_body() {
    let params = query_string(&[("rasters", "lsd.tif"), ("latitude", "38")]);
    let err = run(&params, &layers(&["lsd"], 1.0)).unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_failure().message, "Provide a numeric longitude value");
    assert_eq!(err.kind(), "missing_parameter");
}
