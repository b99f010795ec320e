//! Legends built from specification files and value ranges.

use std::io::Write;

use legend::{
    determine_class, ColorModel, ColorRamp, ColorSpecification, Legend, LegendError, Rgb,
    UncertaintyClass, WATER_LEVEL_CLASSES,
};

const GEOLOGY: &str = "\
# Geologic unit colours
@ source: state survey
unit geology CMYK
1\t0.0 0.0 1.0 0.0\tAlluvium
2\t0.0 0.5 1.0 0.0\tLimestone
3\t0.0 0.0 0.0 1.0\tShale
";

#[test]
fn test_specification_file_legend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GEOLOGY.as_bytes()).unwrap();

    let spec = ColorSpecification::from_file(file.path()).unwrap();
    assert_eq!(spec.color_model, ColorModel::Cmyk);
    assert_eq!(spec.identifier, "unit");

    let legend = Legend::from_specification(&spec).unwrap();
    assert_eq!(legend.title.as_deref(), Some("geology"));
    assert_eq!(legend.classes.len(), 3);
    assert_eq!(legend.classes[0].color, Rgb::new(255, 255, 0));
    assert_eq!(legend.classes[1].hex, "#ff8000");
    assert_eq!(legend.classes[2].label, "Shale");
    assert_eq!(legend.class_for(2.0).unwrap().label, "Limestone");
    assert!(legend.class_for(2.5).is_none());
}

#[test]
fn test_missing_specification_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ColorSpecification::from_file(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LegendError::Io(_)));
}

#[test]
fn test_bad_color_in_specification() {
    let spec = ColorSpecification::parse("unit geology RGB\n1\tnot-a-color\tAlluvium\n").unwrap();
    assert!(matches!(
        Legend::from_specification(&spec),
        Err(LegendError::InvalidColor(_))
    ));
}

#[test]
fn test_water_table_range_legend() {
    let legend = Legend::for_range(152.4, 207.9, &ColorRamp::water_level()).with_title("Water table");
    let interval = legend.interval.unwrap();

    assert!(interval.min <= 152.4);
    assert!(interval.max >= 207.9);
    assert_eq!(legend.classes.len(), interval.class_count());
    assert_eq!(legend.classes.first().unwrap().lower, interval.min);
    assert_eq!(legend.classes.last().unwrap().upper, Some(interval.max));

    // every value in range lands in a class
    let mut value = 152.4;
    while value <= 207.9 {
        assert!(legend.class_for(value).is_some(), "{value}");
        value += 0.7;
    }

    let json = serde_json::to_value(&legend).unwrap();
    assert_eq!(json["title"], "Water table");
    assert_eq!(json["classes"][0]["hex"], "#0000e0");
}

#[test]
fn test_cell_colour_from_ramp() {
    let colors = ColorRamp::water_level().allocate_colors();
    assert_eq!(colors.len(), WATER_LEVEL_CLASSES);

    let class = determine_class(180.0, 150.0, 210.0, WATER_LEVEL_CLASSES);
    assert_eq!(class, 15);
    assert_eq!(colors[class], Rgb::new(102, 102, 239));
}

#[test]
fn test_uncertainty_of_queried_cell() {
    assert_eq!(UncertaintyClass::classify(0.2), UncertaintyClass::Low);
    assert_eq!(
        UncertaintyClass::classify(0.5).to_string(),
        "Moderate (0.34 to 0.67)"
    );
}
