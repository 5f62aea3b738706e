#![cfg(target_os = "windows")]

mod viewer;

pub use viewer::{ViewerHandle, open_viewer};
