/// Initial per-line character budget, derived from one measurement of the
/// whole token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBudget {
    /// Upper bound on the number of lines the token needs.
    pub line_count: usize,
    /// Average width of one character. A step size, not a precise budget.
    pub avg_char_width: f32,
    pub chars_per_line: usize,
}

impl LineBudget {
    /// Returns `None` when the inputs leave nothing to fit against: an empty
    /// token, a non-positive container, or a token that measures as zero.
    pub fn estimate(total_width: f32, max_width: f32, char_count: usize) -> Option<Self> {
        if char_count == 0 || !total_width.is_finite() || !max_width.is_finite() {
            return None;
        }
        if total_width <= 0.0 || max_width <= 0.0 {
            return None;
        }

        let avg_char_width = total_width / char_count as f32;
        if avg_char_width <= 0.0 {
            return None;
        }

        Some(Self {
            line_count: (total_width / max_width).floor() as usize + 1,
            avg_char_width,
            chars_per_line: (max_width / avg_char_width).floor() as usize,
        })
    }
}
