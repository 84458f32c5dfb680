use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub mod text;


use text::TextWrapper;

/// Number of terminal rows `text` occupies when wrapped to `width` columns.
///
/// Lines wider than `width` (an unfitted token) are hard-broken by the
/// paragraph, so they count once per started row.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = TextWrapper::wrap(text, width)
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Renders `text` into a bordered paragraph whose inner area is `width`
/// columns wide and returns the rows of the buffer.
pub fn render_preview(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let area = Rect::new(
        0,
        0,
        width.saturating_add(2),
        wrapped_height(text, width).saturating_add(2),
    );
    let mut buffer = Buffer::empty(area);

    Paragraph::new(text)
        .block(Block::bordered())
        .wrap(Wrap { trim: false })
        .render(area, &mut buffer);

    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        })
        .collect()
}
