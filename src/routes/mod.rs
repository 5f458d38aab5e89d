mod entry;
pub mod forms;
pub mod views;

pub use entry::{STATIC_PREFIX, router};
