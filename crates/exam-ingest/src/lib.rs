//! Question sheet import and export.
//!
//! Sheets are CSV with one row per question (see [`Column`] for the layout).
//! Import is all-or-nothing: problems come back as a batch of [`RowError`]s,
//! including structural issues of the resulting test mapped to the rows that
//! produced them.

mod columns;
mod error;
mod export;
mod import;
mod template;

pub use columns::{Column, LIST_SEPARATOR};
pub use error::{ExportError, ImportError, RowError};
pub use export::write_test_csv;
pub use import::read_test_csv;
pub use template::template_csv;
