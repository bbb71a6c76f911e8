pub mod occurs;
pub mod shift;

pub use occurs::*;
pub use shift::*;
