pub mod document;
pub mod element;
pub mod emit;

pub use document::{build_document, DocumentStyles, ImageConfig};
pub use element::Node;
pub use emit::render_to_string;
