//! Word wrapping of revealed lines.
//!
//! The response is wrapped here rather than by the paragraph widget, so the
//! scroll limits count exactly the rows that get drawn. Break points depend
//! only on the source text: a hidden word takes the same rows it will take
//! once shown.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A styled span and whether a row may end in place of it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WrapPiece {
    pub span: Span<'static>,
    pub is_gap: bool,
}

/// Wrap one line of pieces to rows of at most `width` columns.
///
/// Gaps that would overflow end the row and are dropped. Any other piece
/// moves to the next row whole, and is cut by character only when it is
/// wider than a full row. An empty line still yields one row.
pub(crate) fn wrap_pieces(pieces: Vec<WrapPiece>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(
            pieces.into_iter().map(|p| p.span).collect::<Vec<_>>(),
        )];
    }

    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for piece in pieces {
        let piece_width = piece.span.content.width();

        if current_width + piece_width <= width {
            current.push(piece.span);
            current_width += piece_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
        }
        if piece.is_gap {
            continue;
        }

        if piece_width <= width {
            current.push(piece.span);
            current_width = piece_width;
            continue;
        }

        let style = piece.span.style;
        let mut chunk = String::new();
        let mut chunk_width = 0;
        for c in piece.span.content.chars() {
            let c_width = c.width().unwrap_or(0);
            if chunk_width + c_width > width && !chunk.is_empty() {
                rows.push(Line::from(Span::styled(std::mem::take(&mut chunk), style)));
                chunk_width = 0;
            }
            chunk.push(c);
            chunk_width += c_width;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
            current_width = chunk_width;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(Line::from(current));
    }
    rows
}
