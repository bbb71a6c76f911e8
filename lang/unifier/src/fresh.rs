use ast::{Idx, Typ};

/// Generator for fresh free-variable indices.
///
/// The generator owns the next unused index and records every variable it
/// hands out together with its type. One pool is scoped to one
/// unification attempt; two concurrent attempts must use two independent
/// pools so that their free-variable names cannot collide.
#[derive(Debug, Clone)]
pub struct VarPool {
    next: usize,
    vars: Vec<(Idx, Typ)>,
}

impl VarPool {
    /// A pool whose first allocation is `start`.
    pub fn new(start: usize) -> VarPool {
        VarPool { next: start.max(1), vars: Vec::new() }
    }

    /// Make sure subsequent allocations are strictly above `idx`.
    pub fn ensure_above(&mut self, idx: usize) {
        if self.next <= idx {
            self.next = idx + 1;
        }
    }

    /// Allocate a fresh free variable of the given type.
    pub fn fresh(&mut self, ty: Typ) -> Idx {
        let idx = Idx(self.next);
        self.next += 1;
        self.vars.push((idx, ty));
        idx
    }

    /// All variables this pool has allocated, in allocation order.
    pub fn existing(&self) -> &[(Idx, Typ)] {
        &self.vars
    }
}
