mod lower;
mod result;

pub use lower::*;
pub use result::*;
