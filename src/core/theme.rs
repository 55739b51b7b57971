//! Page theme: a (dark, bright) color pair and the CSS custom properties
//! derived from it.
//!
//! The pair is picked once and then passed explicitly to whichever renderer
//! needs it; nothing here holds global state.

use crate::utils::error::InvalidColor;
use crate::utils::validation;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const THEME_COLOR_PAIRS: [(&str, &str); 10] = [
    ("#1b2a41", "#00b4d8"),
    ("#2e2d4d", "#ff6f59"),
    ("#12312b", "#30c39e"),
    ("#1a2b49", "#f9a03f"),
    ("#2d1e2f", "#ff4f79"),
    ("#202145", "#64dfdf"),
    ("#2c1f30", "#ff9f1c"),
    ("#103a3e", "#36c5f0"),
    ("#2a1a3b", "#d65db1"),
    ("#173042", "#3ddc97"),
];

/// Colors baked into the wordmark SVG template.
const WORDMARK_DARK_COLORS: [&str; 2] = ["#123934", "#0a3a35"];
const WORDMARK_BRIGHT_COLOR: &str = "#24a687";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = validation::hex_digits(s).ok_or_else(|| InvalidColor(s.to_string()))?;
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| InvalidColor(s.to_string()))?;

        Ok(Rgb {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Linear blend toward `target`; `amount` is clamped to [0, 1].
    pub fn mix(&self, target: Rgb, amount: f64) -> Rgb {
        let ratio = amount.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| channel(a as f64 + (b as f64 - a as f64) * ratio);
        Rgb {
            r: blend(self.r, target.r),
            g: blend(self.g, target.g),
            b: blend(self.b, target.b),
        }
    }

    pub fn lighten(&self, amount: f64) -> Rgb {
        self.mix(Rgb::WHITE, amount)
    }

    pub fn darken(&self, amount: f64) -> Rgb {
        self.mix(Rgb::BLACK, amount)
    }

    pub fn to_rgba(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    /// WCAG relative luminance.
    pub fn luminance(&self) -> f64 {
        let linear = |value: u8| {
            let c = value as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn readable_text(&self) -> Rgb {
        if self.luminance() > 0.55 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: Rgb,
    pub bright: Rgb,
}

impl Theme {
    pub fn new(dark: Rgb, bright: Rgb) -> Self {
        Self { dark, bright }
    }

    pub fn from_hex(dark: &str, bright: &str) -> Result<Self, InvalidColor> {
        Ok(Self::new(dark.parse()?, bright.parse()?))
    }

    pub fn palette() -> Vec<Theme> {
        THEME_COLOR_PAIRS
            .iter()
            .filter_map(|(dark, bright)| Theme::from_hex(dark, bright).ok())
            .collect()
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Theme {
        let palette = Self::palette();
        // palette is a non-empty constant
        *palette.choose(rng).unwrap_or(&palette[0])
    }

    pub fn from_seed(seed: u64) -> Theme {
        Self::random(&mut StdRng::seed_from_u64(seed))
    }

    /// Custom properties set on the document root, in declaration order.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let dark = self.dark;
        let bright = self.bright;
        vec![
            ("--theme-dark", dark.to_string()),
            ("--theme-dark-strong", dark.darken(0.18).to_string()),
            ("--theme-dark-soft", dark.lighten(0.65).to_string()),
            ("--theme-bright", bright.to_string()),
            ("--theme-bright-strong", bright.darken(0.2).to_string()),
            ("--theme-bright-soft", bright.lighten(0.72).to_string()),
            ("--theme-bright-lighter", bright.lighten(0.86).to_string()),
            ("--theme-shadow", dark.to_rgba(0.32)),
            ("--theme-bright-translucent", bright.to_rgba(0.18)),
            ("--theme-dark-translucent", dark.to_rgba(0.18)),
            ("--stack1", bright.lighten(0.88).to_string()),
            ("--stack2", bright.lighten(0.64).to_string()),
            ("--stack3", bright.lighten(0.42).to_string()),
            ("--text-on-bright", bright.readable_text().to_string()),
            ("--text-on-dark", dark.readable_text().to_string()),
            ("--warning-soft", bright.to_rgba(0.24)),
            ("--danger-soft", bright.darken(0.35).to_rgba(0.24)),
            ("--wordmark-dark", dark.to_string()),
            ("--wordmark-bright", bright.to_string()),
        ]
    }

    pub fn css_root_block(&self) -> String {
        let body: String = self
            .css_variables()
            .iter()
            .map(|(name, value)| format!("  {}: {};\n", name, value))
            .collect();
        format!(":root {{\n{}}}\n", body)
    }

    /// Swaps the template colors of the wordmark SVG for this theme's pair.
    pub fn recolor_wordmark(&self, svg: &str) -> String {
        let dark = self.dark.to_string();
        let bright = self.bright.to_string();

        let mut replacements: Vec<(&str, &str)> = WORDMARK_DARK_COLORS
            .iter()
            .map(|c| (*c, dark.as_str()))
            .collect();
        replacements.push((WORDMARK_BRIGHT_COLOR, bright.as_str()));

        replacements
            .into_iter()
            .fold(svg.to_string(), |text, (pattern, value)| {
                match Regex::new(&format!("(?i){}", regex::escape(pattern))) {
                    Ok(re) => re.replace_all(&text, value).into_owned(),
                    Err(_) => text,
                }
            })
    }

    pub fn wordmark_data_uri(&self, svg: &str) -> String {
        let recolored = self.recolor_wordmark(svg);
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(recolored.as_bytes()))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::new(
            Rgb { r: 0x1b, g: 0x2a, b: 0x41 },
            Rgb { r: 0x00, g: 0xb4, b: 0xd8 },
        )
    }
}
