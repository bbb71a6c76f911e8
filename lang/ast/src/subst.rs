use pretty::DocAllocator;
use printer::{Alloc, Builder, Print, PrintCfg};

use crate::exp::{App, Exp, Lam, SpineArg, TyLam, Var};
use crate::ident::Idx;
use crate::traits::Shift;

// Front
//
//

/// One entry of a substitution: the image of a single de Bruijn index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Front {
    /// Replace the index by a term
    Exp(Box<Exp>),
    /// Renumber the index to another index
    Bound(Idx),
}

impl Shift for Front {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        match self {
            Front::Exp(e) => e.shift_above(cutoff, by),
            Front::Bound(idx) => idx.shift_above(cutoff, by),
        }
    }
}

// Subst
//
//

/// An explicit substitution: a finite list of fronts for the indices
/// `1..=fronts.len()`, and a shift that renumbers every index beyond the
/// fronts.
///
/// The meaning of `σ = { fronts, shift }` as a function on indices is
/// ```text
/// σ(i) = fronts[i]                       if i <= fronts.len()
/// σ(i) = Bound(i - fronts.len() + shift) otherwise
/// ```
/// Capture avoidance is by construction: applying a substitution under a
/// binder first passes it through [Subst::lift].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subst {
    fronts: Vec<Front>,
    shift: usize,
}

impl Subst {
    /// The identity substitution.
    pub fn id() -> Subst {
        Subst { fronts: Vec::new(), shift: 0 }
    }

    pub fn is_id(&self) -> bool {
        self.shift == 0
            && self
                .fronts
                .iter()
                .enumerate()
                .all(|(i, f)| matches!(f, Front::Bound(idx) if idx.0 == i + 1))
    }

    /// The substitution that renumbers every index upwards by `n`.
    pub fn shifted(n: usize) -> Subst {
        Subst { fronts: Vec::new(), shift: n }
    }

    /// Prepend a front: the result maps index 1 to `front` and index
    /// `i + 1` to whatever `tail` maps `i` to.
    pub fn cons(front: Front, tail: Subst) -> Subst {
        let Subst { mut fronts, shift } = tail;
        fronts.insert(0, front);
        Subst { fronts, shift }
    }

    /// Prepend a renaming front.
    pub fn cons_bound(idx: usize, tail: Subst) -> Subst {
        Subst::cons(Front::Bound(Idx(idx)), tail)
    }

    /// The substitution `[1 ↦ exp]` that additionally renumbers every
    /// other index down by one. This is the β-contraction substitution.
    pub fn beta(exp: Exp) -> Subst {
        Subst::cons(Front::Exp(Box::new(exp)), Subst::id())
    }

    /// The image of a single index.
    pub fn get(&self, idx: Idx) -> Front {
        if idx.0 >= 1 && idx.0 <= self.fronts.len() {
            self.fronts[idx.0 - 1].clone()
        } else {
            Front::Bound(Idx(idx.0 - self.fronts.len() + self.shift))
        }
    }

    /// Push the substitution underneath one binder: index 1 is left
    /// alone and all images are shifted past the new binder.
    pub fn lift(&self) -> Subst {
        let mut fronts = Vec::with_capacity(self.fronts.len() + 1);
        fronts.push(Front::Bound(Idx(1)));
        for front in &self.fronts {
            let mut front = front.clone();
            front.shift(1);
            fronts.push(front);
        }
        Subst { fronts, shift: self.shift + 1 }
    }

    /// Composition: `apply(σ.compose(τ), t) = apply(σ, apply(τ, t))`.
    pub fn compose(&self, other: &Subst) -> Subst {
        let mut fronts: Vec<Front> = other
            .fronts
            .iter()
            .map(|front| match front {
                Front::Exp(e) => Front::Exp(Box::new(*e.subst(self))),
                Front::Bound(idx) => self.get(*idx),
            })
            .collect();
        // The tail of `other` sends i to i - |other| + shift(other); feed
        // the indices that land inside our fronts through them.
        let extra = self.fronts.len().saturating_sub(other.shift);
        for k in 0..extra {
            fronts.push(self.get(Idx(other.shift + k + 1)));
        }
        let shift = self.shift + other.shift.saturating_sub(self.fronts.len());
        Subst { fronts, shift }
    }
}

impl Print for Subst {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let entries = self.fronts.iter().enumerate().map(|(i, front)| {
            let rhs = match front {
                Front::Exp(e) => e.print(cfg, alloc),
                Front::Bound(idx) => idx.print(cfg, alloc),
            };
            alloc.text(format!("@{}", i + 1)).append(" := ").append(rhs)
        });
        alloc
            .intersperse(entries, alloc.text(", "))
            .append(if self.shift == 0 {
                alloc.nil()
            } else {
                alloc.text(format!(" | ^{}", self.shift))
            })
            .enclose("{", "}")
    }
}

// Substitutable
//
//

/// A trait for all entities to which a substitution can be applied.
pub trait Substitutable: Sized {
    type Target;

    fn subst(&self, by: &Subst) -> Self::Target;
}

impl<T: Substitutable> Substitutable for Box<T> {
    type Target = Box<T::Target>;

    fn subst(&self, by: &Subst) -> Self::Target {
        Box::new((**self).subst(by))
    }
}

impl<T: Substitutable> Substitutable for Option<T> {
    type Target = Option<T::Target>;

    fn subst(&self, by: &Subst) -> Self::Target {
        self.as_ref().map(|x| x.subst(by))
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    type Target = Vec<T::Target>;

    fn subst(&self, by: &Subst) -> Self::Target {
        self.iter().map(|x| x.subst(by)).collect()
    }
}

impl Substitutable for Exp {
    type Target = Exp;

    fn subst(&self, by: &Subst) -> Exp {
        match self {
            Exp::Var(Var { idx, ty }) => match by.get(*idx) {
                Front::Exp(e) => *e,
                Front::Bound(idx) => Exp::Var(Var { idx, ty: ty.clone() }),
            },
            Exp::Sym(s) => Exp::Sym(s.clone()),
            Exp::Obj(o) => Exp::Obj(o.clone()),
            Exp::Lam(Lam { name, param_ty, body }) => Exp::Lam(Lam {
                name: name.clone(),
                param_ty: param_ty.clone(),
                body: body.subst(&by.lift()),
            }),
            Exp::TyLam(TyLam { body }) => Exp::TyLam(TyLam { body: body.subst(by) }),
            // Substituting a term for the head variable can produce a
            // redex or a nested application, so the spine is rebuilt.
            Exp::App(App { head, spine }) => Exp::app(*head.subst(by), spine.subst(by)),
        }
    }
}

impl Substitutable for SpineArg {
    type Target = SpineArg;

    fn subst(&self, by: &Subst) -> SpineArg {
        match self {
            SpineArg::Exp(e) => SpineArg::Exp(e.subst(by)),
            SpineArg::Typ(ty) => SpineArg::Typ(ty.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::SymKey;
    use crate::typ::Typ;

    fn i() -> Typ {
        Typ::Base(SymKey(1))
    }

    fn c() -> Exp {
        Exp::sym(SymKey(10), i())
    }

    #[test]
    fn apply_id_is_identity() {
        let t = Exp::lam(i(), Exp::app(Exp::var(2, Typ::fun(i(), i())), vec![SpineArg::exp(Exp::var(1, i()))]));
        assert_eq!(t.subst(&Subst::id()), t);
    }

    #[test]
    fn beta_subst_replaces_and_renumbers() {
        // (λ. @1) applied to c: the body @1 becomes c
        let body = Exp::var(1, i());
        assert_eq!(body.subst(&Subst::beta(c())), c());
        // a variable pointing past the binder moves down
        let loose = Exp::var(2, i());
        assert_eq!(loose.subst(&Subst::beta(c())), Exp::var(1, i()));
    }

    #[test]
    fn subst_under_binder_shifts_fronts() {
        // [1 ↦ c] applied to  λ. @2  gives  λ. c
        let t = Exp::lam(i(), Exp::var(2, i()));
        let sigma = Subst::cons(Front::Exp(Box::new(c())), Subst::shifted(1));
        assert_eq!(t.subst(&sigma), Exp::lam(i(), c()));
    }

    #[test]
    fn no_capture_of_bound_variables() {
        // [1 ↦ @1] applied to  λ. @2  must yield  λ. @2, not  λ. @1
        let t = Exp::lam(i(), Exp::var(2, i()));
        let sigma = Subst::cons(Front::Exp(Box::new(Exp::var(1, i()))), Subst::shifted(1));
        assert_eq!(t.subst(&sigma), t);
    }

    #[test]
    fn compose_agrees_with_sequential_application() {
        let f_ty = Typ::fun(i(), i());
        let t = Exp::app(Exp::var(3, f_ty.clone()), vec![SpineArg::exp(Exp::var(1, i()))]);
        let sigma = Subst::cons(Front::Exp(Box::new(c())), Subst::id());
        let tau = Subst::cons_bound(2, Subst::cons_bound(1, Subst::shifted(2)));
        let composed = sigma.compose(&tau);
        assert_eq!(t.subst(&composed), t.subst(&tau).subst(&sigma));
    }

    #[test]
    fn compose_with_id_is_neutral() {
        let sigma = Subst::cons(Front::Exp(Box::new(c())), Subst::shifted(3));
        assert_eq!(Subst::id().compose(&sigma), sigma);
        assert_eq!(sigma.compose(&Subst::id()), sigma);
    }
}
