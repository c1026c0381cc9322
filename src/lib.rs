// Library surface for headless/integration tests and reuse.
// The binary only adds argument parsing and logging setup.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keystroke;
pub mod render;
pub mod runtime;
pub mod score;
pub mod sentence;
pub mod session;
pub mod terminal;

pub use error::{Error, Result};
