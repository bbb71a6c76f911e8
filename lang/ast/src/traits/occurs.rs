use crate::exp::Exp;
use crate::ident::Idx;
use crate::HashSet;

/// Free-variable bookkeeping for terms in the shared index space.
///
/// An index occurring at binder depth `d` is loose iff it exceeds `d`; its
/// absolute index (relative to the root of the term) is obtained by
/// subtracting the depth. All methods below report absolute indices.
pub trait Occurs {
    /// Collect the absolute indices of all loose variables into `fvs`.
    ///
    /// `depth` is the number of binders between the root of the traversal
    /// and `self`.
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>);

    /// The set of loose variable indices of `self`.
    fn free_vars(&self) -> HashSet<Idx> {
        let mut fvs = HashSet::default();
        self.free_vars_mut(0, &mut fvs);
        fvs
    }

    /// Whether the free variable `idx` occurs in `self`.
    fn occurs(&self, idx: Idx) -> bool {
        self.free_vars().contains(&idx)
    }
}

impl<T: Occurs> Occurs for Box<T> {
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>) {
        (**self).free_vars_mut(depth, fvs)
    }
}

impl<T: Occurs> Occurs for Option<T> {
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>) {
        if let Some(inner) = self {
            inner.free_vars_mut(depth, fvs)
        }
    }
}

impl<T: Occurs> Occurs for Vec<T> {
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>) {
        for x in self {
            x.free_vars_mut(depth, fvs)
        }
    }
}

/// Whether the free variable `idx` occurs in `exp`.
pub fn occurs_in(idx: Idx, exp: &Exp) -> bool {
    exp.occurs(idx)
}
