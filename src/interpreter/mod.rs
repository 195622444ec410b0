pub mod context;
pub mod environment;
pub mod error;
mod tree;
pub mod value;

pub use tree::TreeWalkInterpreter;

/// Destination for program output written by `print`.
pub trait SystemContext {
    fn write(&mut self, text: &str);
}
