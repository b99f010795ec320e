//! Colour handling for raster stack layers.
//!
//! - [`ColorSpecification`]: value/colour/description files in RGB or CMYK
//! - [`Rgb`] with hex and CMYK conversions
//! - [`ColorRamp`] and [`determine_class`] for bucketing cell values
//! - [`Legend`] built from nice intervals or a colour specification
//! - [`UncertaintyClass`] for the uncertainty layer

pub mod color;
pub mod error;
pub mod legend;
pub mod ramp;
pub mod specification;
pub mod uncertainty;

pub use color::{Cmyk, ColorModel, Rgb};
pub use error::{LegendError, LegendResult};
pub use legend::{Legend, LegendClass};
pub use ramp::{determine_class, ColorRamp, WATER_LEVEL_CLASSES, WATER_LEVEL_HIGH, WATER_LEVEL_LOW};
pub use specification::{ColorEntry, ColorSpecification};
pub use uncertainty::UncertaintyClass;
