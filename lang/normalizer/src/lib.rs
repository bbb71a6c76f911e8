mod beta;
mod delta;
mod eta;
mod normalize;

pub use beta::*;
pub use delta::*;
pub use eta::*;
pub use normalize::*;
