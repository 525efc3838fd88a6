// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Maps date categories to decoration colors.
//!
//! Colors run from a "near" endpoint (past dates and today) to a "far" endpoint
//! (the farthest category), either by blending RGB channels or by sweeping the
//! hue at fixed saturation and lightness.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::highlight::bucket::{BucketPolicy, Category};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// `#000000`, dark text.
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    /// `#ffffff`, light text.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// `#ff0000`, the default near color.
    pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
    /// `#0000ff`, the default far color.
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xff);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blends towards `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }

    /// Builds a color from hue (degrees), saturation and lightness (both 0..=1).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Rgb {
        let hue = hue.rem_euclid(360.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }

    /// Relative luminance as defined by WCAG, 0 (black) to 1 (white).
    pub fn relative_luminance(self) -> f64 {
        let linear = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Black or white, whichever reads better on this background.
    pub fn contrasting_text(self) -> Rgb {
        if self.relative_luminance() > 0.179 { Rgb::BLACK } else { Rgb::WHITE }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("expected a #rrggbb color, got {s:?}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| Error::Config(format!("{s:?}: {e}")))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// How colors are spread between the near and far endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "scheme", rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Channel-wise blend from `near` to `far`.
    Rgb { near: Rgb, far: Rgb },
    /// Hue sweep from `near_hue` to `far_hue` (degrees).
    Hue {
        near_hue: f64,
        far_hue: f64,
        saturation: f64,
        lightness: f64,
    },
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Rgb {
            near: Rgb::RED,
            far: Rgb::BLUE,
        }
    }
}

impl ColorScheme {
    /// Red through yellow and green to blue.
    pub fn rainbow() -> Self {
        ColorScheme::Hue {
            near_hue: 0.0,
            far_hue: 240.0,
            saturation: 0.85,
            lightness: 0.5,
        }
    }

    /// Returns the color at position `t` between the endpoints.
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        match self {
            ColorScheme::Rgb { near, far } => near.lerp(*far, t),
            ColorScheme::Hue {
                near_hue,
                far_hue,
                saturation,
                lightness,
            } => Rgb::from_hsl(near_hue + (far_hue - near_hue) * t, *saturation, *lightness),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let ColorScheme::Hue {
            near_hue,
            far_hue,
            saturation,
            lightness,
        } = self
        {
            if !near_hue.is_finite() || !far_hue.is_finite() {
                return Err(Error::Config("hues must be finite".into()));
            }
            if !(0.0..=1.0).contains(saturation) || !(0.0..=1.0).contains(lightness) {
                return Err(Error::Config(format!(
                    "saturation and lightness must be within 0..=1, got {saturation} and {lightness}"
                )));
            }
        }
        Ok(())
    }
}

/// Colors of one decoration: background plus a readable text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationStyle {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl DecorationStyle {
    /// A style with the given background and a contrasting foreground.
    pub fn on(background: Rgb) -> Self {
        Self {
            background,
            foreground: background.contrasting_text(),
        }
    }
}

/// Derives decoration styles for categories.
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    scheme: ColorScheme,
}

impl ColorMapper {
    /// Creates a color mapper for the given scheme.
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    /// Returns the scheme in use.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Gets the background color for a category.
    pub fn get_color(&self, policy: &BucketPolicy, category: Category) -> Rgb {
        self.scheme.color_at(policy.intensity(category))
    }

    /// Gets the full decoration style for a category.
    pub fn get_style(&self, policy: &BucketPolicy, category: Category) -> DecorationStyle {
        DecorationStyle::on(self.get_color(policy, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(color, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_string(), "#1a2b3c");
        assert_eq!("00ff00".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, 0.0), Rgb::RED);
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, 1.0), Rgb::BLUE);
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, 0.5), Rgb::new(128, 0, 128));
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, 7.0), Rgb::BLUE);
        assert_eq!(Rgb::RED.lerp(Rgb::BLUE, -1.0), Rgb::RED);
    }

    #[test]
    fn test_hsl() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::RED);
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::BLUE);
        assert_eq!(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::RED);
        assert_eq!(Rgb::from_hsl(0.0, 0.0, 1.0), Rgb::WHITE);
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(Rgb::WHITE.contrasting_text(), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.contrasting_text(), Rgb::WHITE);
        assert_eq!(Rgb::new(255, 255, 0).contrasting_text(), Rgb::BLACK);
        assert_eq!(Rgb::BLUE.contrasting_text(), Rgb::WHITE);
    }

    #[test]
    fn test_endpoint_colors() {
        let mapper = ColorMapper::default();
        for policy in [BucketPolicy::linear(), BucketPolicy::fibonacci()] {
            assert_eq!(mapper.get_color(&policy, Category::PAST), Rgb::RED);
            assert_eq!(mapper.get_color(&policy, policy.max_category()), Rgb::BLUE);
        }
    }

    #[test]
    fn test_rgb_colors_are_monotonic() {
        let mapper = ColorMapper::default();
        let policy = BucketPolicy::fibonacci();
        let colors: Vec<Rgb> = policy.categories().into_iter().map(|c| mapper.get_color(&policy, c)).collect();
        for pair in colors.windows(2) {
            assert!(pair[0].r > pair[1].r, "{pair:?}");
            assert!(pair[0].b < pair[1].b, "{pair:?}");
        }
    }

    #[test]
    fn test_hue_scheme() {
        let mapper = ColorMapper::new(ColorScheme::Hue {
            near_hue: 0.0,
            far_hue: 240.0,
            saturation: 1.0,
            lightness: 0.5,
        });
        let policy = BucketPolicy::Linear { cap: 2 };
        assert_eq!(mapper.get_color(&policy, Category::PAST), Rgb::RED);
        assert_eq!(mapper.get_color(&policy, Category::new(1)), Rgb::new(0, 255, 0));
        assert_eq!(mapper.get_color(&policy, Category::new(2)), Rgb::BLUE);
    }

    #[test]
    fn test_style_has_readable_text() {
        let mapper = ColorMapper::default();
        let style = mapper.get_style(&BucketPolicy::fibonacci(), Category::PAST);
        assert_eq!(style.background, Rgb::RED);
        assert_eq!(style.foreground, style.background.contrasting_text());
    }

    #[test]
    fn test_scheme_validation() {
        assert!(ColorScheme::default().validate().is_ok());
        assert!(ColorScheme::rainbow().validate().is_ok());
        let bad = ColorScheme::Hue {
            near_hue: 0.0,
            far_hue: 240.0,
            saturation: 1.5,
            lightness: 0.5,
        };
        assert!(bad.validate().is_err());
    }
}
