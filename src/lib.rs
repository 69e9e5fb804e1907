pub mod interpreter;
pub mod output;
pub mod rep;

pub use interpreter::Interpreter;
pub use rep::{load_rep, parse_rep, Rep};
