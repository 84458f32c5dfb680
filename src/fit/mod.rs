//! Character-level line fitting for opaque tokens.
//!
//! Seed phrases, addresses, hashes and extended keys have no natural break
//! points, so a space-breaking layout engine renders them as one overflowing
//! line. [`fit`] inserts single spaces at character offsets chosen so that
//! every resulting line measures inside the container, using nothing but a
//! [`WidthOracle`].
//!
//! The work happens in three stages:
//! 1. [`LineBudget::estimate`] turns one measurement of the whole token into
//!    a characters-per-line guess.
//! 2. [`converge`] refines the guess for the current line against a
//!    [`FitBand`] and reports a skew.
//! 3. The loop here applies each skew to the budget for all later lines,
//!    retries the current line with the corrected budget, and collects the
//!    accepted chunks.

pub mod converge;
pub mod estimate;

pub use converge::{converge, Convergence, FitBand};
pub use estimate::LineBudget;

use crate::errors::FitError;
use crate::measure::{MeasureContext, WidthOracle};
use crate::token::Token;
use std::fmt;

/// How many times one line may be re-converged with a corrected budget.
/// A deterministic oracle settles on the first retry.
pub const MAX_RETRIES_PER_LINE: usize = 4;

/// Chunks produced by one fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    chunks: Vec<String>,
    split: bool,
}

impl FitResult {
    fn unsplit(token: &str) -> Self {
        let chunks = if token.is_empty() {
            Vec::new()
        } else {
            vec![token.to_string()]
        };
        Self {
            chunks,
            split: false,
        }
    }

    /// Accepted chunks in token order. Never contains an empty string.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Whether any break points were inserted.
    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn into_string(self) -> String {
        self.chunks.join(" ")
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chunks.join(" "))
    }
}

/// Lives for a single fit call.
struct FitState {
    chars_per_line: usize,
    // Read cursor: everything before it has been emitted.
    start: usize,
    retries: usize,
    chunks: Vec<String>,
}

enum Step {
    /// Emit `token[start..end]`.
    Accept(usize),
    /// Re-run the current line after shifting the budget by this many chars.
    Retry(isize),
}

impl FitState {
    fn new(budget: &LineBudget) -> Self {
        Self {
            chars_per_line: budget.chars_per_line,
            start: 0,
            retries: 0,
            chunks: Vec::with_capacity(budget.line_count),
        }
    }

    fn next_step<O>(
        &self,
        token: &Token<'_>,
        band: FitBand,
        oracle: &O,
        ctx: &MeasureContext,
    ) -> Result<Step, FitError>
    where
        O: WidthOracle + ?Sized,
    {
        // Budget of zero: one character is already wider than the container
        if self.chars_per_line == 0 {
            return Err(FitError::MeasurementInconsistency {
                offset: self.start,
                remaining: token.len() - self.start,
            });
        }

        let end = (self.start + self.chars_per_line).min(token.len());
        if end == token.len() {
            return Ok(Step::Accept(end));
        }

        let convergence = converge(token, self.start, end - self.start, band, oracle, ctx)?;
        if convergence.skew != 0 {
            Ok(Step::Retry(convergence.skew))
        } else {
            Ok(Step::Accept(end))
        }
    }

    fn retry(&mut self, skew: isize) -> Result<(), FitError> {
        if self.retries == MAX_RETRIES_PER_LINE {
            return Err(FitError::RetryLimit {
                offset: self.start,
                attempts: self.retries,
            });
        }
        self.retries += 1;

        self.chars_per_line = match self.chars_per_line.checked_add_signed(skew) {
            Some(corrected) => corrected,
            None => panic!(
                "skew {} drives a budget of {} below zero",
                skew, self.chars_per_line
            ),
        };
        tracing::trace!(
            start = self.start,
            skew,
            chars_per_line = self.chars_per_line,
            "corrected line budget"
        );
        Ok(())
    }

    fn accept(&mut self, token: &Token<'_>, end: usize) {
        debug_assert!(end > self.start, "accepted an empty line at {}", end);
        self.chunks.push(token.slice(self.start, end).to_string());
        self.start = end;
        self.retries = 0;
    }
}

/// Splits `token` into chunks that each fit `ctx.max_width`.
///
/// Returns the token as a single unsplit chunk when it already fits or when
/// there is nothing meaningful to measure (empty token, non-positive width,
/// zero measured width). Fails only when the oracle's measurements cannot be
/// reconciled with the fit band.
pub fn try_fit<O>(token: &str, ctx: &MeasureContext, oracle: &O) -> Result<FitResult, FitError>
where
    O: WidthOracle + ?Sized,
{
    if token.is_empty() || !ctx.max_width.is_finite() || ctx.max_width <= 0.0 {
        return Ok(FitResult::unsplit(token));
    }

    let total_width = oracle.measure(token, ctx);
    if total_width <= ctx.max_width {
        return Ok(FitResult::unsplit(token));
    }

    let token = Token::new(token);
    let Some(budget) = LineBudget::estimate(total_width, ctx.max_width, token.len()) else {
        tracing::debug!(total_width, "token is not measurable, leaving it unsplit");
        return Ok(FitResult::unsplit(token.as_str()));
    };
    tracing::debug!(
        chars = token.len(),
        total_width,
        max_width = ctx.max_width,
        ?budget,
        "estimated line budget"
    );

    let band = FitBand::new(ctx.max_width, budget.avg_char_width);
    let mut state = FitState::new(&budget);

    while state.start < token.len() {
        match state.next_step(&token, band, oracle, ctx)? {
            Step::Retry(skew) => state.retry(skew)?,
            Step::Accept(end) => state.accept(&token, end),
        }
    }

    tracing::debug!(
        lines = state.chunks.len(),
        chars_per_line = state.chars_per_line,
        "fitted token"
    );

    Ok(FitResult {
        chunks: state.chunks,
        split: true,
    })
}

/// Like [`try_fit`], but falls back to the unchanged token when it cannot be
/// split cleanly.
pub fn fit<O>(token: &str, ctx: &MeasureContext, oracle: &O) -> String
where
    O: WidthOracle + ?Sized,
{
    match try_fit(token, ctx, oracle) {
        Ok(result) => result.into_string(),
        Err(err) => {
            tracing::warn!(%err, "leaving token unsplit");
            token.to_string()
        }
    }
}
