/// Filesystem adapters for inventory scanning and report output
mod file_writer;
mod lockfile_inventory;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use lockfile_inventory::LockfileInventorySource;
