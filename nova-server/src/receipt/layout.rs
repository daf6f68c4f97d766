//! Fixed receipt layout
//!
//! Emits the purchase note as a stream of draw commands: company header,
//! order metadata, customer block, itemized table with wrapped product
//! names, totals panel and footer. Deterministic given the same order data
//! and timestamp.

use chrono::{DateTime, Utc};
use shared::models::OrderWithLines;

use crate::config::CompanyInfo;
use crate::money::format_currency;

use super::canvas::{Align, Canvas, DrawOp, wrap_text};

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const MARGIN: f32 = 40.0;
const RIGHT_EDGE: f32 = PAGE_WIDTH - MARGIN;

// Item table columns
const QTY_X: f32 = MARGIN;
const PRODUCT_X: f32 = 90.0;
const PRICE_X: f32 = 420.0;
const PRICE_WIDTH: f32 = 70.0;
const SUBTOTAL_X: f32 = 485.0;
const SUBTOTAL_WIDTH: f32 = 70.0;
const NAME_WIDTH: f32 = PRICE_X - PRODUCT_X - 10.0;

const ROW_LINE_HEIGHT: f32 = 12.0;
const TOTALS_LINE_HEIGHT: f32 = 14.0;
const TOTALS_BOX_WIDTH: f32 = 230.0;

/// Purchase note renderer
pub struct ReceiptRenderer<'a> {
    company: &'a CompanyInfo,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(company: &'a CompanyInfo) -> Self {
        Self { company }
    }

    /// Render the full note for one order
    pub fn render(&self, order: &OrderWithLines, generated_at: DateTime<Utc>) -> Vec<DrawOp> {
        let mut c = Canvas::new(MARGIN);

        self.render_header(&mut c);
        self.render_meta(&mut c, order, generated_at);
        self.render_items(&mut c, order);
        self.render_totals(&mut c, order);
        self.render_footer(&mut c);

        c.into_ops()
    }

    /// Company name/slogan on the left, boxed address block on the right
    fn render_header(&self, c: &mut Canvas) {
        c.text_at(MARGIN, 40.0, 300.0, Align::Left, 20.0, true, &self.company.name);
        c.text_at(MARGIN, 64.0, 300.0, Align::Left, 10.0, false, &self.company.slogan);

        let box_x = 354.0;
        c.rect(box_x, 34.0, 192.0, 64.0);
        c.text_at(box_x + 6.0, 40.0, 180.0, Align::Left, 10.0, true, &self.company.name);
        c.text_at(box_x + 6.0, 54.0, 180.0, Align::Left, 9.0, false, &self.company.address);
        c.text_at(
            box_x + 6.0,
            68.0,
            180.0,
            Align::Left,
            9.0,
            false,
            format!("Tel: {}", self.company.phone),
        );
        c.text_at(box_x + 6.0, 82.0, 180.0, Align::Left, 9.0, false, &self.company.email);

        c.set_y(112.0);
        c.hline(MARGIN, RIGHT_EDGE);
        c.advance(16.0);
    }

    /// Order number, generation timestamp and the customer block
    fn render_meta(&self, c: &mut Canvas, order: &OrderWithLines, generated_at: DateTime<Utc>) {
        let header = &order.order;

        c.text(MARGIN, 200.0, Align::Left, 11.0, true, format!("Orden #{}", header.id));
        c.text(
            MARGIN,
            RIGHT_EDGE - MARGIN,
            Align::Right,
            10.0,
            false,
            format!("Fecha: {}", generated_at.format("%d/%m/%Y %H:%M")),
        );
        c.advance(18.0);

        c.text(
            MARGIN,
            400.0,
            Align::Left,
            10.0,
            false,
            format!("Cliente: {}", header.customer_name),
        );
        c.advance(14.0);
        c.text(
            MARGIN,
            400.0,
            Align::Left,
            10.0,
            false,
            format!(
                "Dirección: {}, {}, {} {}",
                header.address, header.city, header.postal_code, header.country
            ),
        );
        c.advance(14.0);
        c.text(
            MARGIN,
            400.0,
            Align::Left,
            10.0,
            false,
            format!("Teléfono: {}", header.phone),
        );
        c.advance(22.0);
    }

    /// Itemized table. Each row is positioned independently; long product
    /// names wrap and push later rows down so rows never overlap.
    fn render_items(&self, c: &mut Canvas, order: &OrderWithLines) {
        c.text(QTY_X, 40.0, Align::Left, 11.0, true, "Cant");
        c.text(PRODUCT_X, NAME_WIDTH, Align::Left, 11.0, true, "Producto");
        c.text(PRICE_X, PRICE_WIDTH, Align::Right, 11.0, true, "Precio");
        c.text(SUBTOTAL_X, SUBTOTAL_WIDTH, Align::Right, 11.0, true, "Subtotal");
        c.advance(14.0);
        c.hline(MARGIN, RIGHT_EDGE);
        c.advance(6.0);

        // ~half the font size per Helvetica glyph at size 10
        let max_chars = (NAME_WIDTH / 5.0) as usize;

        for line in &order.lines {
            let row_y = c.y();
            let name_lines = wrap_text(&line.name, max_chars);

            c.text_at(
                QTY_X,
                row_y,
                40.0,
                Align::Left,
                10.0,
                false,
                line.quantity.to_string(),
            );
            for (i, fragment) in name_lines.iter().enumerate() {
                c.text_at(
                    PRODUCT_X,
                    row_y + i as f32 * ROW_LINE_HEIGHT,
                    NAME_WIDTH,
                    Align::Left,
                    10.0,
                    false,
                    fragment,
                );
            }
            c.text_at(
                PRICE_X,
                row_y,
                PRICE_WIDTH,
                Align::Right,
                10.0,
                false,
                format_currency(line.unit_price),
            );
            c.text_at(
                SUBTOTAL_X,
                row_y,
                SUBTOTAL_WIDTH,
                Align::Right,
                10.0,
                false,
                format_currency(line.subtotal),
            );

            c.advance(name_lines.len() as f32 * ROW_LINE_HEIGHT + 4.0);
        }

        c.advance(4.0);
        c.hline(MARGIN, RIGHT_EDGE);
        c.advance(10.0);
    }

    /// Totals panel: boxed, right-aligned, grand total emphasized
    fn render_totals(&self, c: &mut Canvas, order: &OrderWithLines) {
        let header = &order.order;
        let box_x = PAGE_WIDTH - MARGIN - TOTALS_BOX_WIDTH;
        let box_top = c.y();

        let rows = [
            ("Subtotal:", format_currency(header.subtotal), false),
            ("Descuento Cupón:", format_currency(header.coupon_discount), false),
            ("Impuestos:", format_currency(header.tax), false),
            ("Gastos de envío:", format_currency(header.shipping), false),
            ("Total:", format_currency(header.total), true),
        ];

        let box_height = rows.len() as f32 * TOTALS_LINE_HEIGHT + 20.0;
        c.rect(box_x, box_top, TOTALS_BOX_WIDTH, box_height);
        c.advance(10.0);

        for (label, value, emphasized) in rows {
            let (size, bold) = if emphasized { (12.0, true) } else { (10.0, false) };
            c.text(box_x + 8.0, 120.0, Align::Left, size, bold, label);
            c.text(box_x + 140.0, 82.0, Align::Right, size, bold, value);
            c.advance(TOTALS_LINE_HEIGHT);
        }

        c.set_y(box_top + box_height);
        c.advance(26.0);
    }

    fn render_footer(&self, c: &mut Canvas) {
        let width = RIGHT_EDGE - MARGIN;
        c.text(MARGIN, width, Align::Center, 11.0, true, "Gracias por tu compra");
        c.advance(16.0);
        c.text(MARGIN, width, Align::Center, 10.0, false, &self.company.name);
        c.advance(14.0);
        c.text(
            MARGIN,
            width,
            Align::Center,
            9.0,
            false,
            format!(
                "Si tienes preguntas sobre tu pedido, contáctanos en: {}",
                self.company.email
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shared::models::{DeliveryStatus, Order, OrderLine};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn company() -> CompanyInfo {
        CompanyInfo {
            name: "Nova Hogar".into(),
            slogan: "Diseño y Confort para tu Hogar".into(),
            address: "Calle Ejemplo 123, Ciudad".into(),
            phone: "5550001111".into(),
            email: "contacto@novahogar.mx".into(),
        }
    }

    fn order_line(id: i64, name: &str, quantity: i32, unit: &str, subtotal: &str) -> OrderLine {
        OrderLine {
            id,
            order_id: 7,
            product_id: id,
            name: name.into(),
            quantity,
            unit_price: dec(unit),
            subtotal: dec(subtotal),
        }
    }

    fn sample_order(lines: Vec<OrderLine>) -> OrderWithLines {
        OrderWithLines {
            order: Order {
                id: 7,
                user_id: 1,
                customer_name: "Ana López".into(),
                address: "Av. Reforma 100".into(),
                city: "CDMX".into(),
                postal_code: "06600".into(),
                phone: "5512345678".into(),
                country: "México".into(),
                payment_method: "tarjeta".into(),
                subtotal: dec("200.00"),
                coupon_discount: dec("20.00"),
                tax: dec("28.80"),
                shipping: dec("150.00"),
                total: dec("358.80"),
                delivery_status: DeliveryStatus::None,
                created_at: Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap(),
            },
            lines,
        }
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let order = sample_order(vec![order_line(1, "Sofá Monaco", 2, "100.00", "200.00")]);
        let company = company();
        let renderer = ReceiptRenderer::new(&company);

        let first = renderer.render(&order, ts());
        let second = renderer.render(&order, ts());
        assert_eq!(first, second);
    }

    #[test]
    fn test_totals_panel_values() {
        let order = sample_order(vec![order_line(1, "Sofá Monaco", 2, "100.00", "200.00")]);
        let company = company();
        let ops = ReceiptRenderer::new(&company).render(&order, ts());

        let texts: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert!(texts.contains(&"$200.00"));
        assert!(texts.contains(&"$20.00"));
        assert!(texts.contains(&"$28.80"));
        assert!(texts.contains(&"$150.00"));
        assert!(texts.contains(&"$358.80"));
        assert!(texts.contains(&"Orden #7"));
        assert!(texts.contains(&"Cliente: Ana López"));
    }

    #[test]
    fn test_grand_total_emphasized() {
        let order = sample_order(vec![order_line(1, "Sofá Monaco", 2, "100.00", "200.00")]);
        let company = company();
        let ops = ReceiptRenderer::new(&company).render(&order, ts());

        let total_op = ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == "$358.80"))
            .unwrap();
        match total_op {
            DrawOp::Text { size, bold, .. } => {
                assert!(*bold);
                assert_eq!(*size, 12.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rows_do_not_overlap_with_wrapped_names() {
        let long_name = "Comedor Toscana de madera maciza con seis sillas tapizadas en lino \
                         gris acabado artesanal edición limitada";
        let order = sample_order(vec![
            order_line(1, long_name, 1, "18900.00", "18900.00"),
            order_line(2, "Vitrina Clásica", 2, "8750.00", "17500.00"),
            order_line(3, "Banco Alto Industrial", 3, "1299.00", "3897.00"),
        ]);
        let company = company();
        let ops = ReceiptRenderer::new(&company).render(&order, ts());

        // One subtotal-column op per row; their tops must be strictly
        // increasing and the wrapped first row must push row 2 down by at
        // least its extra lines.
        let row_tops: Vec<f32> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, .. } if *x == SUBTOTAL_X => Some(*y),
                _ => None,
            })
            .collect();
        // Skip the header cell ("Subtotal") emitted at the same column
        let row_tops = &row_tops[1..];
        assert_eq!(row_tops.len(), 3);
        assert!(row_tops[0] < row_tops[1] && row_tops[1] < row_tops[2]);

        let name_lines = wrap_text(long_name, (NAME_WIDTH / 5.0) as usize);
        assert!(name_lines.len() > 1);
        assert!(row_tops[1] - row_tops[0] >= name_lines.len() as f32 * ROW_LINE_HEIGHT);
    }

    #[test]
    fn test_item_sections_identical_across_timestamps() {
        // Only the Fecha line may differ between renders at different times
        let order = sample_order(vec![order_line(1, "Sofá Monaco", 2, "100.00", "200.00")]);
        let company = company();
        let renderer = ReceiptRenderer::new(&company);

        let at_noon = renderer.render(&order, ts());
        let later = renderer.render(
            &order,
            Utc.with_ymd_and_hms(2024, 5, 3, 9, 15, 0).unwrap(),
        );

        let strip_date = |ops: &[DrawOp]| -> Vec<DrawOp> {
            ops.iter()
                .filter(|op| !matches!(op, DrawOp::Text { text, .. } if text.starts_with("Fecha:")))
                .cloned()
                .collect()
        };
        assert_eq!(strip_date(&at_noon), strip_date(&later));
    }
}
