pub mod file_loader;
pub mod toml_loader;

pub use file_loader::{collect_import_files, load_import_file};
pub use toml_loader::{load_optional_synonym_tables, load_synonym_tables, parse_synonym_overrides};
