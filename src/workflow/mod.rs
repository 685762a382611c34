pub mod dispatcher;
pub mod import_ctx;

pub use dispatcher::{QuestionExtractor, QuestionImporter, SourceFormat};
pub use import_ctx::ImportCtx;
