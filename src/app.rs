use crate::config::Config;
use crate::errors::AppResult;
use crate::fit::{fit, try_fit};
use crate::split::split_at_tail;
use crate::ui;
use std::io::{BufRead, Write};

/// How each token is broken up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Fit against the configured width.
    Fit,
    /// Break off the last N characters only.
    SplitTail(usize),
}

pub struct AppState {
    pub config: Config,
    pub mode: AppMode,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mode: AppMode::Fit,
        }
    }

    pub fn with_mode(mut self, mode: AppMode) -> Self {
        self.mode = mode;
        self
    }

    /// Breaks one token according to the current mode.
    ///
    /// In strict mode a token that cannot be fitted is an error; otherwise it
    /// comes back unsplit.
    pub fn process(&self, token: &str) -> AppResult<String> {
        match self.mode {
            AppMode::SplitTail(index) => {
                let index = index.min(token.chars().count());
                Ok(split_at_tail(token, index))
            }
            AppMode::Fit => {
                let ctx = self.config.measure_context();
                let oracle = self.config.oracle();
                if self.config.strict {
                    Ok(try_fit(token, &ctx, &oracle)?.into_string())
                } else {
                    Ok(fit(token, &ctx, &oracle))
                }
            }
        }
    }

    /// Writes one processed line per token, followed by its preview when
    /// enabled.
    pub fn write_token(&self, token: &str, out: &mut impl Write) -> AppResult<()> {
        let fitted = self.process(token)?;
        writeln!(out, "{}", fitted)?;

        if self.config.preview {
            let width = preview_width(&self.config);
            for row in ui::render_preview(&fitted, width) {
                writeln!(out, "{}", row)?;
            }
        }
        Ok(())
    }

    /// Processes `tokens`, or every non-blank line of `input` when there are
    /// none.
    pub fn run(&self, tokens: &[String], input: impl BufRead, mut out: impl Write) -> AppResult<()> {
        if tokens.is_empty() {
            for line in input.lines() {
                let token = line?;
                if token.trim().is_empty() {
                    continue;
                }
                self.write_token(&token, &mut out)?;
            }
        } else {
            for token in tokens {
                self.write_token(token, &mut out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

// Preview boxes are drawn in whole terminal columns, while `max_width` is in
// oracle units: one column is `font_size * advance_ratio` of those.
fn preview_width(config: &Config) -> u16 {
    let columns = config.max_width / (config.font_size * config.advance_ratio);
    columns.floor().clamp(1.0, f32::from(u16::MAX)) as u16
}
