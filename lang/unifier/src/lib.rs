mod constraints;
mod fresh;
mod result;
mod rules;
mod search;
mod unify;

pub use constraints::*;
pub use fresh::*;
pub use result::*;
pub use rules::*;
pub use search::*;
pub use unify::*;
