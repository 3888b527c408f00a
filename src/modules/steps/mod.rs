//! Built-in steps

mod gitignore;
mod package;
mod require_binary;
mod taskfile;
mod write_file;

pub use gitignore::GitignoreEntry;
pub use package::PackageStep;
pub use require_binary::RequireBinary;
pub use taskfile::TaskfileTask;
pub use write_file::WriteFile;
