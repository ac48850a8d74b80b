//! Board commands

mod init;

pub use init::{InitBoard, DEFAULT_COLUMNS};
