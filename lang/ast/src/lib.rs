pub mod check;
pub mod clause;
pub mod ctx;
pub mod exp;
pub mod ident;
pub mod kind;
pub mod signature;
pub mod subst;
pub mod traits;
pub mod typ;

pub use check::*;
pub use clause::*;
pub use ctx::*;
pub use exp::*;
pub use ident::*;
pub use kind::*;
pub use signature::*;
pub use subst::*;
pub use traits::*;
pub use typ::*;

pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
