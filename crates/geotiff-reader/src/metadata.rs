//! GDAL ASCII tags: `GDAL_NODATA` and the `GDAL_METADATA` XML block.

/// Parse a `GDAL_NODATA` value.
///
/// GDAL writes the sentinel as text, sometimes NUL-terminated, and uses
/// `nan` for NaN sentinels.
pub fn parse_nodata(raw: &str) -> Option<f64> {
    raw.trim_end_matches('\0').trim().parse::<f64>().ok()
}

/// One `<Item>` of a `GDAL_METADATA` block.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataItem {
    pub name: String,
    /// Zero-based band the item belongs to; `None` for dataset-level items.
    pub sample: Option<usize>,
    pub value: String,
}

/// Extract every `<Item>` from a `GDAL_METADATA` document.
///
/// This is not a general XML parser: GDAL writes one flat list of items with
/// double-quoted attributes and no nested elements.
pub fn parse_metadata_items(xml: &str) -> Vec<MetadataItem> {
    let mut items = Vec::new();
    let mut rest = xml;

    while let Some(start) = rest.find("<Item") {
        rest = &rest[start + "<Item".len()..];
        let Some(tag_end) = rest.find('>') else { break };
        let attributes = &rest[..tag_end];
        rest = &rest[tag_end + 1..];
        let Some(text_end) = rest.find('<') else { break };
        let value = rest[..text_end].trim().to_string();
        rest = &rest[text_end..];

        if let Some(name) = attribute(attributes, "name") {
            items.push(MetadataItem {
                name: name.to_string(),
                sample: attribute(attributes, "sample").and_then(|s| s.parse().ok()),
                value,
            });
        }
    }
    items
}

/// Stored `STATISTICS_MINIMUM` / `STATISTICS_MAXIMUM` for a one-based band.
pub fn parse_statistics(xml: &str, band: usize) -> Option<(f64, f64)> {
    let items = parse_metadata_items(xml);
    let sample = band.checked_sub(1)?;
    let lookup = |key: &str| {
        items
            .iter()
            .filter(|item| item.name == key)
            .find(|item| item.sample == Some(sample) || (item.sample.is_none() && sample == 0))
            .and_then(|item| item.value.parse::<f64>().ok())
    };
    Some((lookup("STATISTICS_MINIMUM")?, lookup("STATISTICS_MAXIMUM")?))
}

fn attribute<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("{key}=\"");
    let start = attributes.find(&needle)? + needle.len();
    let len = attributes[start..].find('"')?;
    Some(&attributes[start..start + len])
}
