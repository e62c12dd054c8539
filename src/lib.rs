pub mod command;
pub mod detection;
pub mod editor;
pub mod error;
pub mod identity;
pub mod math;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use editor::Editor;
pub use error::{FloorgraphError, Result};
