//! Width measurement.
//!
//! The fitting algorithm never looks at font metrics. Everything it knows
//! about how wide a piece of text renders comes from a [`WidthOracle`].

use unicode_width::UnicodeWidthStr;

/// Font descriptor handed through to the oracle untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
        }
    }
}

/// Everything an oracle needs to measure a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureContext {
    pub font: FontSpec,
    pub size: f32,
    /// Width of the container, in the same unit the oracle reports.
    pub max_width: f32,
    pub locale: String,
}

impl MeasureContext {
    pub fn new(max_width: f32) -> Self {
        Self {
            font: FontSpec::default(),
            size: 1.0,
            max_width,
            locale: "en".to_string(),
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Measures the width `text` occupies when laid out as a single unbroken
/// line constrained to `ctx.max_width`.
///
/// Implementations must be deterministic for the duration of one fit call.
pub trait WidthOracle {
    fn measure(&self, text: &str, ctx: &MeasureContext) -> f32;
}

impl<F> WidthOracle for F
where
    F: Fn(&str, &MeasureContext) -> f32,
{
    fn measure(&self, text: &str, ctx: &MeasureContext) -> f32 {
        self(text, ctx)
    }
}

/// Terminal oracle: one column per cell, scaled by font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellOracle {
    /// Horizontal advance of one cell relative to the font size.
    pub advance_ratio: f32,
}

impl Default for CellOracle {
    fn default() -> Self {
        Self { advance_ratio: 1.0 }
    }
}

impl CellOracle {
    pub fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }
}

impl WidthOracle for CellOracle {
    fn measure(&self, text: &str, ctx: &MeasureContext) -> f32 {
        text.width() as f32 * ctx.size * self.advance_ratio
    }
}
