//! printpdf backend for receipt draw commands
//!
//! The only module that touches the drawing library. Converts the layout's
//! top-left-origin point coordinates into printpdf's bottom-left millimetre
//! space and rasterizes each [`DrawOp`] onto a single A4 page.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, Point, Rgb,
};

use super::canvas::{Align, DrawOp};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PAGE_HEIGHT_PT: f32 = 842.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Approximate Helvetica advance: about half the font size per glyph.
/// Used only to resolve right/center alignment inside a field.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn x_mm(pt: f32) -> Mm {
    Mm(pt * PT_TO_MM)
}

/// Flip a top-origin y (in points) into printpdf's bottom-origin space,
/// anchoring text at its baseline
fn y_mm(top_pt: f32, font_size: f32) -> Mm {
    Mm((PAGE_HEIGHT_PT - top_pt - font_size * 0.8) * PT_TO_MM)
}

/// Rasterize draw commands into PDF bytes
pub fn to_bytes(ops: &[DrawOp]) -> Result<Vec<u8>, BoxError> {
    let (doc, page, layer) = PdfDocument::new(
        "Nota de compra",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.75, 0.75, 0.75, None)));
    layer.set_outline_thickness(0.5);

    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                width,
                align,
                size,
                bold: is_bold,
                text,
            } => {
                let font: &IndirectFontRef = if *is_bold { &bold } else { &regular };
                let drawn_x = match align {
                    Align::Left => *x,
                    Align::Right => x + width - text_width(text, *size),
                    Align::Center => x + (width - text_width(text, *size)) / 2.0,
                };
                layer.use_text(text.clone(), *size, x_mm(drawn_x), y_mm(*y, *size), font);
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
            } => {
                let top = Mm((PAGE_HEIGHT_PT - y) * PT_TO_MM);
                let bottom = Mm((PAGE_HEIGHT_PT - y - height) * PT_TO_MM);
                let left = x_mm(*x);
                let right = x_mm(x + width);
                let outline = Line {
                    points: vec![
                        (Point::new(left, top), false),
                        (Point::new(right, top), false),
                        (Point::new(right, bottom), false),
                        (Point::new(left, bottom), false),
                    ],
                    is_closed: true,
                };
                layer.add_line(outline);
            }
            DrawOp::HLine { x1, x2, y } => {
                let at = Mm((PAGE_HEIGHT_PT - y) * PT_TO_MM);
                let rule = Line {
                    points: vec![
                        (Point::new(x_mm(*x1), at), false),
                        (Point::new(x_mm(*x2), at), false),
                    ],
                    is_closed: false,
                };
                layer.add_line(rule);
            }
        }
    }

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_pdf_bytes() {
        let ops = vec![
            DrawOp::Text {
                x: 40.0,
                y: 40.0,
                width: 300.0,
                align: Align::Left,
                size: 20.0,
                bold: true,
                text: "Nova Hogar".into(),
            },
            DrawOp::HLine {
                x1: 40.0,
                x2: 555.0,
                y: 112.0,
            },
            DrawOp::Rect {
                x: 325.0,
                y: 300.0,
                width: 230.0,
                height: 90.0,
            },
        ];
        let bytes = to_bytes(&ops).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_empty_op_stream_still_renders() {
        let bytes = to_bytes(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_writes_durable_copy() {
        // Mirrors the finalize path: render then persist under receipts dir
        let dir = tempfile::tempdir().unwrap();
        let bytes = to_bytes(&[]).unwrap();
        let path = dir.path().join("nota_orden_7.pdf");
        std::fs::write(&path, &bytes).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_alignment_resolution() {
        // Right-aligned text must start left of the field's right edge
        let w = text_width("$358.80", 12.0);
        assert!(w > 0.0 && w < 82.0);
    }
}
