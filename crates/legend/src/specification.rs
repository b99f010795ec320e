//! Colour specification files.
//!
//! ```text
//! # comment lines start with '#' or '@'
//! zone  description  RGB
//! 1<TAB>#0000e0<TAB>Alluvium
//! 2<TAB>0 128 255<TAB>Limestone
//! ```
//!
//! The header names an identifier, a description and the colour model; every
//! following non-blank line is `value<TAB>color<TAB>description`. A value that
//! appears twice keeps the later entry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ColorModel, Rgb};
use crate::error::{LegendError, LegendResult};

/// One value-to-colour line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub value: f64,
    /// Colour text as written in the file.
    pub color: String,
    pub description: String,
}

/// A parsed colour specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpecification {
    pub identifier: String,
    pub description: String,
    pub color_model: ColorModel,
    /// Entries in file order.
    pub entries: Vec<ColorEntry>,
}

impl ColorSpecification {
    /// Load a specification from a file.
    pub fn from_file(path: impl AsRef<Path>) -> LegendResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let spec = Self::parse(&content)?;
        debug!(
            path = %path.as_ref().display(),
            entries = spec.entries.len(),
            model = ?spec.color_model,
            "Loaded color specification"
        );
        Ok(spec)
    }

    /// Parse specification text.
    pub fn parse(content: &str) -> LegendResult<Self> {
        let mut lines = content.lines().enumerate();

        let header = lines
            .by_ref()
            .find(|(_, line)| !line.starts_with('#') && !line.starts_with('@'))
            .map(|(_, line)| line)
            .ok_or(LegendError::MissingHeader)?;

        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(LegendError::ShortHeader(fields.len()));
        }
        let color_model: ColorModel = fields[2].parse()?;

        let mut spec = ColorSpecification {
            identifier: fields[0].to_string(),
            description: fields[1].to_string(),
            color_model,
            entries: Vec::new(),
        };

        for (index, line) in lines {
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            spec.insert(parse_entry(line, index + 1)?);
        }

        Ok(spec)
    }

    fn insert(&mut self, entry: ColorEntry) {
        match self.entries.iter_mut().find(|e| e.value == entry.value) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Entry for an exact value.
    pub fn get(&self, value: f64) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Parsed colour of an entry, in this specification's model.
    pub fn rgb(&self, entry: &ColorEntry) -> LegendResult<Rgb> {
        Rgb::parse(&entry.color, self.color_model)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(line: &str, line_number: usize) -> LegendResult<ColorEntry> {
    let invalid = |reason: &str| LegendError::InvalidEntry {
        line: line_number,
        reason: reason.to_string(),
    };

    let mut cols = line.split('\t');
    let value = cols
        .next()
        .map(str::trim)
        .ok_or_else(|| invalid("missing value"))?
        .parse::<f64>()
        .map_err(|_| invalid("value is not a number"))?;
    let color = cols.next().ok_or_else(|| invalid("missing color"))?;
    let description = cols.next().ok_or_else(|| invalid("missing description"))?;

    Ok(ColorEntry {
        value,
        color: color.trim().to_string(),
        description: description.trim().to_string(),
    })
}
