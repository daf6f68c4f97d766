//! Receipt pipeline: layout engine + PDF backend

pub mod canvas;
pub mod layout;
pub mod pdf;

pub use canvas::{Align, Canvas, DrawOp};
pub use layout::ReceiptRenderer;
