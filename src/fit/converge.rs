use crate::errors::FitError;
use crate::measure::{MeasureContext, WidthOracle};
use crate::token::Token;

/// Slack added to every measured width before it is compared to the band.
/// Shaped widths are snapped to whole pixels by the layout engine.
const ROUNDING_SLACK: f32 = 1.0;

/// Window of acceptable line widths: `[max - 3 * avg, max - avg]`.
///
/// Aiming at a single target width oscillates, since shaped width is not
/// monotonic enough per character; the band is two average characters wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBand {
    pub lower: f32,
    pub upper: f32,
}

impl FitBand {
    pub fn new(max_width: f32, avg_char_width: f32) -> Self {
        Self {
            lower: max_width - 3.0 * avg_char_width,
            upper: max_width - avg_char_width,
        }
    }

    /// Both edges are inclusive.
    fn classify(&self, width: f32) -> Placement {
        let padded = width + ROUNDING_SLACK;
        if padded > self.upper {
            Placement::TooWide
        } else if padded < self.lower {
            Placement::TooNarrow
        } else {
            Placement::Inside
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    TooWide,
    TooNarrow,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    Widen,
    Narrow,
}

/// Outcome of converging one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convergence {
    /// Signed difference between the settled length and the candidate.
    pub skew: isize,
    /// Settled line length in characters.
    pub len: usize,
}

/// Walks the candidate line length one character at a time until the
/// measured width of `token[start..start + len]` lands in `band`.
///
/// Widening stops once the line swallows the rest of the token. The walk only
/// ever moves in one direction, so it costs at most `remaining + 1`
/// measurements; a reversal means the band sits between two adjacent lengths
/// and cannot be reached. A NaN or infinite width is never in the band.
///
/// # Panics
///
/// If `candidate_len` is zero or longer than the rest of the token. Every
/// settled line holds at least one character.
pub fn converge<O>(
    token: &Token<'_>,
    start: usize,
    candidate_len: usize,
    band: FitBand,
    oracle: &O,
    ctx: &MeasureContext,
) -> Result<Convergence, FitError>
where
    O: WidthOracle + ?Sized,
{
    let remaining = token.len() - start;
    assert!(candidate_len >= 1, "candidate line at {} is empty", start);
    assert!(
        candidate_len <= remaining,
        "candidate length {} exceeds the {} characters remaining",
        candidate_len,
        remaining
    );

    let inconsistent = || FitError::MeasurementInconsistency {
        offset: start,
        remaining,
    };

    let settled = |len: usize| Convergence {
        skew: len as isize - candidate_len as isize,
        len,
    };

    let mut len = candidate_len;
    let mut direction = None;

    for _ in 0..=remaining {
        let width = oracle.measure(token.slice(start, start + len), ctx);
        if !width.is_finite() {
            tracing::trace!(start, len, width, "unusable measurement");
            return Err(inconsistent());
        }
        let placement = band.classify(width);
        tracing::trace!(start, len, width, ?placement, "measured candidate line");

        match placement {
            Placement::Inside => return Ok(settled(len)),
            Placement::TooWide => {
                if direction == Some(Direction::Widen) || len <= 1 {
                    return Err(inconsistent());
                }
                direction = Some(Direction::Narrow);
                len -= 1;
            }
            Placement::TooNarrow => {
                if len == remaining {
                    return Ok(settled(len));
                }
                if direction == Some(Direction::Narrow) {
                    return Err(inconsistent());
                }
                direction = Some(Direction::Widen);
                len += 1;
            }
        }
    }

    Err(inconsistent())
}
