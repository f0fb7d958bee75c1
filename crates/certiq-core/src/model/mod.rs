pub mod document;

pub use document::{Document, DocumentEvent, DocumentReference};
