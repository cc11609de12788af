pub mod document;
pub mod html;
pub mod table;

pub use document::{write_document, write_document_file, Section};
pub use table::render_table;
