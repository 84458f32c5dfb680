use std::cell::Cell;
use tokenfit_rs::{MeasureContext, WidthOracle};

/// Every character measures `per_char`, spaces included.
pub struct UniformOracle {
    pub per_char: f32,
}

impl WidthOracle for UniformOracle {
    fn measure(&self, text: &str, _ctx: &MeasureContext) -> f32 {
        text.chars().count() as f32 * self.per_char
    }
}

/// Proportional oracle: narrow and wide glyphs, like a real font.
#[allow(dead_code)]
pub struct ProportionalOracle;

impl WidthOracle for ProportionalOracle {
    fn measure(&self, text: &str, _ctx: &MeasureContext) -> f32 {
        text.chars()
            .map(|c| match c {
                'i' | 'l' | 'j' | '1' | ' ' => 4.0,
                'm' | 'w' | 'M' | 'W' => 12.0,
                _ => 8.0,
            })
            .sum()
    }
}

/// Wraps an oracle and counts how often it is asked.
#[allow(dead_code)]
pub struct CountingOracle<O> {
    pub inner: O,
    calls: Cell<usize>,
}

#[allow(dead_code)]
impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<O: WidthOracle> WidthOracle for CountingOracle<O> {
    fn measure(&self, text: &str, ctx: &MeasureContext) -> f32 {
        self.calls.set(self.calls.get() + 1);
        self.inner.measure(text, ctx)
    }
}

/// A 33-word seed phrase, words separated by single spaces.
#[allow(dead_code)]
pub fn seed_phrase() -> String {
    [
        "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "absurd",
        "abuse", "access", "accident", "account", "accuse", "achieve", "acid", "acoustic",
        "acquire", "across", "act", "action", "actor", "actress", "actual", "adapt", "add",
        "addict", "address", "adjust", "admit", "adult", "advance", "advice",
    ]
    .join(" ")
}

/// A 64-character hexadecimal hash.
#[allow(dead_code)]
pub fn hex_hash() -> String {
    "0123456789abcdef".repeat(4)
}
