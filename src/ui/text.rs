use unicode_width::UnicodeWidthStr;

// Space-breaking wrapper: the layout behavior a fitted token is shaped for
pub struct TextWrapper;

impl TextWrapper {
    /// Greedily packs space-separated words into lines of at most `max_width`
    /// columns. A word wider than `max_width` gets a line of its own and
    /// overflows; spaces are the only break points.
    pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current_line = String::new();
        let mut current_width = 0;
        let mut line_started = false;

        for word in text.split(' ') {
            let word_width = word.width();

            if line_started && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_width = word_width;
            } else {
                if line_started {
                    current_line.push(' ');
                    current_width += 1;
                }
                current_line.push_str(word);
                current_width += word_width;
            }
            line_started = true;
        }

        lines.push(current_line);
        lines
    }
}
