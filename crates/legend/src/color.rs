//! Colour values and conversions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LegendError, LegendResult};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CMYK fractions, each formatted with four decimals.
    ///
    /// Pure black maps to `K = 1` with zero C, M and Y.
    pub fn to_cmyk(&self) -> [String; 4] {
        let cmyk = Cmyk::from(*self);
        [cmyk.c, cmyk.m, cmyk.y, cmyk.k].map(|v| format!("{v:.4}"))
    }

    /// Parse colour text in the given model.
    ///
    /// RGB accepts `#rrggbb` or three 0-255 components; CMYK accepts four
    /// 0-1 fractions. Components may be separated by whitespace or commas.
    pub fn parse(text: &str, model: ColorModel) -> LegendResult<Self> {
        let text = text.trim();
        if model == ColorModel::Rgb {
            if let Some(rgb) = Self::from_hex(text) {
                return Ok(rgb);
            }
        }

        let parts: Vec<f64> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| LegendError::InvalidColor(text.to_string()))?;

        match (model, parts.as_slice()) {
            (ColorModel::Rgb, [r, g, b]) if [r, g, b].iter().all(|v| (0.0..=255.0).contains(*v)) => {
                Ok(Self::new(*r as u8, *g as u8, *b as u8))
            }
            (ColorModel::Cmyk, [c, m, y, k]) if [c, m, y, k].iter().all(|v| (0.0..=1.0).contains(*v)) => {
                Ok(Cmyk {
                    c: *c,
                    m: *m,
                    y: *y,
                    k: *k,
                }
                .into())
            }
            _ => Err(LegendError::InvalidColor(text.to_string())),
        }
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    pub fn interpolate(&self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// CMYK fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl From<Rgb> for Cmyk {
    fn from(rgb: Rgb) -> Self {
        if rgb.r == 0 && rgb.g == 0 && rgb.b == 0 {
            return Cmyk {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0,
            };
        }

        let c = 1.0 - rgb.r as f64 / 255.0;
        let m = 1.0 - rgb.g as f64 / 255.0;
        let y = 1.0 - rgb.b as f64 / 255.0;
        let k = c.min(m).min(y);

        Cmyk {
            c: (c - k) / (1.0 - k),
            m: (m - k) / (1.0 - k),
            y: (y - k) / (1.0 - k),
            k,
        }
    }
}

impl From<Cmyk> for Rgb {
    fn from(cmyk: Cmyk) -> Self {
        let channel = |v: f64| (255.0 * (1.0 - v) * (1.0 - cmyk.k)).round() as u8;
        Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
    }
}

/// Colour model named in a specification header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorModel {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "CMYK")]
    Cmyk,
}

impl std::str::FromStr for ColorModel {
    type Err = LegendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RGB" => Ok(ColorModel::Rgb),
            "CMYK" => Ok(ColorModel::Cmyk),
            _ => Err(LegendError::UnknownColorModel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let rgb = Rgb::from_hex("#1a2B3c").unwrap();
        assert_eq!(rgb, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(rgb.to_hex(), "#1a2b3c");
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_hex_invalid() {
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    #[test]
    fn test_cmyk_black() {
        assert_eq!(Rgb::new(0, 0, 0).to_cmyk(), ["0.0000", "0.0000", "0.0000", "1.0000"]);
    }

    #[test]
    fn test_cmyk_values() {
        assert_eq!(Rgb::new(255, 0, 0).to_cmyk(), ["0.0000", "1.0000", "1.0000", "0.0000"]);
        assert_eq!(Rgb::new(255, 255, 255).to_cmyk(), ["0.0000", "0.0000", "0.0000", "0.0000"]);
        // 1 - 204/255 = 0.2 for C and M, 1 - 255/255 = 0 for Y
        assert_eq!(Rgb::new(204, 204, 255).to_cmyk(), ["0.2000", "0.2000", "0.0000", "0.0000"]);
    }

    #[test]
    fn test_cmyk_to_rgb() {
        let rgb: Rgb = Cmyk::from(Rgb::new(204, 102, 51)).into();
        assert_eq!(rgb, Rgb::new(204, 102, 51));
    }

    #[test]
    fn test_parse_models() {
        assert_eq!(Rgb::parse("#0000e0", ColorModel::Rgb).unwrap(), Rgb::new(0, 0, 224));
        assert_eq!(Rgb::parse("0 0 224", ColorModel::Rgb).unwrap(), Rgb::new(0, 0, 224));
        assert_eq!(Rgb::parse("0,0,224", ColorModel::Rgb).unwrap(), Rgb::new(0, 0, 224));
        assert_eq!(
            Rgb::parse("0.0 1.0 1.0 0.0", ColorModel::Cmyk).unwrap(),
            Rgb::new(255, 0, 0)
        );
        assert!(Rgb::parse("300 0 0", ColorModel::Rgb).is_err());
        assert!(Rgb::parse("0 0 0", ColorModel::Cmyk).is_err());
        assert!(Rgb::parse("red", ColorModel::Rgb).is_err());
    }

    #[test]
    fn test_color_model_from_str() {
        assert_eq!("rgb".parse::<ColorModel>().unwrap(), ColorModel::Rgb);
        assert_eq!("CMYK".parse::<ColorModel>().unwrap(), ColorModel::Cmyk);
        assert!("HSV".parse::<ColorModel>().is_err());
    }

    #[test]
    fn test_interpolate() {
        let a = Rgb::new(0, 0, 224);
        let b = Rgb::new(204, 204, 255);
        assert_eq!(a.interpolate(b, 0.0), a);
        assert_eq!(a.interpolate(b, 1.0), b);
        assert_eq!(a.interpolate(b, 0.5), Rgb::new(102, 102, 239));
    }
}
