/// Character-indexed view over an opaque token.
///
/// Offsets are in `char`s, not bytes, so a slice never splits a multi-byte
/// scalar value.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    text: &'a str,
    // Byte offset of every char boundary, including the end of the text.
    bounds: Vec<usize>,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str) -> Self {
        let bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();

        Self { text, bounds }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Characters `start..end`.
    ///
    /// # Panics
    ///
    /// If `start > end` or `end > self.len()`. Clamping here would silently
    /// drop or duplicate characters in the fitted output.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        assert!(
            start <= end && end <= self.len(),
            "token slice {}..{} out of range for length {}",
            start,
            end,
            self.len()
        );
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}
