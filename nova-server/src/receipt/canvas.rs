//! Draw-command canvas for receipt layout
//!
//! The layout engine emits [`DrawOp`]s against a cursor-tracked canvas in PDF
//! points with a top-left origin. Keeping the ops as plain data makes layout
//! deterministic and testable without touching the drawing library; only the
//! `pdf` backend knows how to rasterize them.

/// Horizontal alignment within a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// One drawing command, in points, top-left origin
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        /// Field width; right/center alignment resolves against it
        width: f32,
        align: Align,
        size: f32,
        bold: bool,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    HLine {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

/// Cursor-tracked op sink
pub struct Canvas {
    ops: Vec<DrawOp>,
    y: f32,
}

impl Canvas {
    pub fn new(top_margin: f32) -> Self {
        Self {
            ops: Vec::new(),
            y: top_margin,
        }
    }

    /// Current cursor position from the top of the page
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move the cursor down
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Jump the cursor to an absolute position
    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    /// Emit text at an explicit position (does not move the cursor)
    #[allow(clippy::too_many_arguments)]
    pub fn text_at(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        align: Align,
        size: f32,
        bold: bool,
        text: impl Into<String>,
    ) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            width,
            align,
            size,
            bold,
            text: text.into(),
        });
    }

    /// Emit text at the cursor
    pub fn text(
        &mut self,
        x: f32,
        width: f32,
        align: Align,
        size: f32,
        bold: bool,
        text: impl Into<String>,
    ) {
        let y = self.y;
        self.text_at(x, y, width, align, size, bold, text);
    }

    /// Emit a rectangle outline (does not move the cursor)
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    /// Emit a horizontal rule at the cursor
    pub fn hline(&mut self, x1: f32, x2: f32) {
        self.ops.push(DrawOp::HLine { x1, x2, y: self.y });
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

/// Greedy word wrap against an approximate character budget
///
/// Helvetica at receipt sizes averages about half the font size per glyph;
/// the budget errs wide so wrapped rows never collide.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_tracking() {
        let mut c = Canvas::new(40.0);
        assert_eq!(c.y(), 40.0);
        c.advance(14.0);
        assert_eq!(c.y(), 54.0);
        c.set_y(120.0);
        assert_eq!(c.y(), 120.0);
    }

    #[test]
    fn test_text_uses_cursor() {
        let mut c = Canvas::new(40.0);
        c.advance(10.0);
        c.text(40.0, 100.0, Align::Left, 10.0, false, "hola");
        let ops = c.into_ops();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], DrawOp::Text { y, .. } if *y == 50.0));
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_text("Mesa de Centro", 40), vec!["Mesa de Centro"]);
    }

    #[test]
    fn test_wrap_long_text() {
        let lines = wrap_text("Comedor Toscana de madera maciza con seis sillas tapizadas", 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 20);
        }
        // No words lost
        assert_eq!(
            lines.join(" "),
            "Comedor Toscana de madera maciza con seis sillas tapizadas"
        );
    }

    #[test]
    fn test_wrap_word_longer_than_budget() {
        // An oversized single word still lands on its own line
        let lines = wrap_text("palabra extraordinariamentelarga", 10);
        assert_eq!(lines, vec!["palabra", "extraordinariamentelarga"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
