pub mod document_decoder;
pub mod flow_extractor;
pub mod normalizer;
pub mod option_parser;
pub mod tabular_extractor;
pub mod warn_writer;

pub use document_decoder::{decode_document_text, decode_workbook, Sheet};
pub use flow_extractor::FlowDocumentExtractor;
pub use normalizer::FieldNormalizer;
pub use tabular_extractor::{ColumnMapping, TabularExtractor};
pub use warn_writer::WarnWriter;
