pub mod history;
pub mod in_memory;
pub mod snapshot_file;
