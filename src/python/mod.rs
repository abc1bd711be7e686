//! The Python interpreter whose environment is being managed.

pub mod interpreter;
pub mod version;

pub use interpreter::{default_executable, Interpreter};
pub use version::PythonVersion;
