pub mod loaders;
pub mod question;
pub mod synonyms;

pub use loaders::{collect_import_files, load_import_file, load_optional_synonym_tables, load_synonym_tables};
pub use question::{Difficulty, ImportReport, ImportStats, Question, QuestionType};
pub use synonyms::{SynonymOverrides, SynonymTables};
