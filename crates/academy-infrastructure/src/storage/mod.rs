//! Storage layer for atomic file operations and persisted credentials.

mod atomic_file;
mod file_session_storage;

pub use atomic_file::AtomicFile;
pub use file_session_storage::FileSessionStorage;
