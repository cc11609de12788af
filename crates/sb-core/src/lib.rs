pub mod error;
pub mod types;

pub use error::ScriptBookError;
pub use types::*;
