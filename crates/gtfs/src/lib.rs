pub mod data_model;
pub mod export;

pub use export::{serialize, serialize_on, ExportDocument, ExportError, ExportFormat};
