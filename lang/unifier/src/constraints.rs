use pretty::DocAllocator;
use printer::{Alloc, Builder, Print, PrintCfg};

use ast::*;

// Eqn
//
//

/// An unsolved equation between two terms of the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eqn {
    pub lhs: Exp,
    pub rhs: Exp,
}

/// The head classification that drives rule selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EqnClass {
    RigidRigid,
    FlexRigid,
    FlexFlex,
}

impl Eqn {
    pub fn new(lhs: Exp, rhs: Exp) -> Eqn {
        Eqn { lhs, rhs }
    }

    pub fn classify(&self) -> EqnClass {
        match (self.lhs.is_flex(), self.rhs.is_flex()) {
            (false, false) => EqnClass::RigidRigid,
            (true, true) => EqnClass::FlexFlex,
            _ => EqnClass::FlexRigid,
        }
    }

    pub fn is_flex_flex(&self) -> bool {
        self.classify() == EqnClass::FlexFlex
    }

    /// Orient so that the preferred side is on the left: a bare variable
    /// wins over everything, otherwise the flexible side wins. An already
    /// well-oriented equation is returned unchanged.
    pub fn oriented(self) -> Eqn {
        let bare_left = self.lhs.is_bare_var().is_some();
        let bare_right = self.rhs.is_bare_var().is_some();
        if bare_left {
            return self;
        }
        if bare_right {
            return self.swapped();
        }
        if !self.lhs.is_flex() && self.rhs.is_flex() {
            return self.swapped();
        }
        self
    }

    fn swapped(self) -> Eqn {
        Eqn { lhs: self.rhs, rhs: self.lhs }
    }
}

impl Substitutable for Eqn {
    type Target = Eqn;

    fn subst(&self, by: &Subst) -> Eqn {
        Eqn { lhs: self.lhs.subst(by), rhs: self.rhs.subst(by) }
    }
}

impl Print for Eqn {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.lhs.print(cfg, alloc).append(" = ").append(self.rhs.print(cfg, alloc))
    }
}

/// Sort so that rigid-rigid equations come first and flex-flex equations
/// last. The sort is stable, so equations of the same class keep their
/// relative order. This invariant makes the head-equation test of the
/// search driver a single classification.
pub fn sort_unsolved(eqns: &mut [Eqn]) {
    eqns.sort_by_key(|eqn| eqn.classify());
}

// Binding
//
//

/// One solved pair: a free variable and the term it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub var: Var,
    pub exp: Exp,
}

impl Print for Binding {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(format!("@{}", self.var.idx))
            .append(" := ")
            .append(self.exp.print(cfg, alloc))
    }
}

/// Compute the substitution that realises all solved pairs
/// simultaneously.
///
/// With `M` the largest bound index, the substitution is built as
/// `shift M` extended with one front per index from `M` down to `1`:
/// the bound term where a pair exists, and a renaming front otherwise.
pub fn compute_subst(solved: &[Binding]) -> Subst {
    let m = solved.iter().map(|b| b.var.idx.0).max().unwrap_or(0);
    let mut subst = Subst::shifted(m);
    for j in 1..=m {
        let idx = m - j + 1;
        let front = match solved.iter().find(|b| b.var.idx.0 == idx) {
            Some(binding) => Front::Exp(Box::new(binding.exp.clone())),
            None => Front::Bound(Idx(idx)),
        };
        subst = Subst::cons(front, subst);
    }
    subst
}
