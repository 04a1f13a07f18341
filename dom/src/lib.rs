mod node;
mod parse;
mod range;

pub use node::*;
pub use parse::*;
pub use range::*;
