//! Grapheme-aware measuring for todo rows and the text inputs.
//!
//! Cursor positions are byte offsets into the edit buffer and always sit on
//! a grapheme boundary.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Cells taken by one grapheme. Control characters are not drawn.
fn cells(grapheme: &str) -> usize {
    if grapheme.chars().any(char::is_control) {
        0
    } else {
        grapheme.width()
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cells).sum()
}

/// Shorten `s` to at most `max_cells`, ending in `…` when anything was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = cells(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push(ELLIPSIS);
    out
}

/// Byte offset just past the grapheme at `at`. None at the end of `s`.
pub fn next_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    s.get(at..)?.graphemes(true).next().map(|g| at + g.len())
}

/// Byte offset where the grapheme before `at` starts. None at the start.
pub fn prev_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    s.get(..at)?
        .graphemes(true)
        .next_back()
        .map(|g| at - g.len())
}

/// Terminal column of the cursor at byte offset `at`
pub fn byte_offset_to_display_col(s: &str, at: usize) -> usize {
    s.get(..at)
        .map_or_else(|| display_width(s), display_width)
}

/// Start of the word left of `at`, skipping blanks first (Alt-b, Ctrl-w).
pub fn word_boundary_left(s: &str, at: usize) -> usize {
    let Some(prefix) = s.get(..at) else {
        return 0;
    };
    let mut pos = at;
    let mut graphemes = prefix.graphemes(true).rev().peekable();
    while let Some(g) = graphemes.next_if(|g| is_blank(g)) {
        pos -= g.len();
    }
    while let Some(g) = graphemes.next_if(|g| !is_blank(g)) {
        pos -= g.len();
    }
    pos
}

/// Start of the next word right of `at` (Alt-f), or the end of `s`.
pub fn word_boundary_right(s: &str, at: usize) -> usize {
    let Some(suffix) = s.get(at..) else {
        return s.len();
    };
    let mut pos = at;
    let mut graphemes = suffix.graphemes(true).peekable();
    while let Some(g) = graphemes.next_if(|g| !is_blank(g)) {
        pos += g.len();
    }
    while let Some(g) = graphemes.next_if(|g| is_blank(g)) {
        pos += g.len();
    }
    pos
}
