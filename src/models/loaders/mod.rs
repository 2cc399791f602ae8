pub mod file_loader;

pub use file_loader::{collect_resume_files, stage_paths};
