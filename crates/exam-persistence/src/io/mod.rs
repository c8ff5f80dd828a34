//! File I/O for the directory-backed store.

mod load;
mod save;

pub use load::load_document;
pub use save::save_document;
