pub mod import;
pub mod show;
pub mod snippet;

pub use import::import;
pub use show::{show_file_name, write_show_index};
pub use snippet::{snippet_file_name, SnippetFileWriter};
