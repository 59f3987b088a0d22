use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox shown in front of a todo
pub(super) fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `right` pushed against the right edge of `width` cells.
/// `right` is dropped when it does not fit.
pub(super) fn push_right_aligned<'a>(spans: &mut Vec<Span<'a>>, right: Span<'a>, width: usize) {
    let used = spans_width(spans);
    let right_width = unicode::display_width(&right.content);
    if used + right_width < width {
        let padding = " ".repeat(width - used - right_width);
        spans.push(Span::styled(padding, right.style));
        spans.push(right);
    }
}
