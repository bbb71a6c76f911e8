use derivative::Derivative;
use pretty::DocAllocator;
use printer::theme::ThemeExt;
use printer::util::ParensIfExt;
use printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::ident::{Ident, Idx, SymKey};
use crate::traits::{Occurs, Shift};
use crate::typ::Typ;
use crate::HashSet;

// Exp
//
//

/// A typed λ-term in spine notation.
///
/// Terms are locally nameless: variables are de Bruijn indices into the
/// shared bound/free index space, and binders do not introduce names that
/// matter for equality. Structural equality on [Exp] is therefore
/// α-equivalence.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum Exp {
    Var(Var),
    Sym(Sym),
    Lam(Lam),
    TyLam(TyLam),
    App(App),
    Obj(Obj),
}

impl Exp {
    pub fn var(idx: usize, ty: Typ) -> Exp {
        Exp::Var(Var { idx: Idx(idx), ty })
    }

    pub fn sym(key: SymKey, ty: Typ) -> Exp {
        Exp::Sym(Sym { key, ty })
    }

    pub fn lam(param_ty: Typ, body: Exp) -> Exp {
        Exp::Lam(Lam { name: None, param_ty, body: Box::new(body) })
    }

    pub fn ty_lam(body: Exp) -> Exp {
        Exp::TyLam(TyLam { body: Box::new(body) })
    }

    /// Build a spine application. Nested applications are flattened so
    /// that the head of a spine is never itself an application; an empty
    /// spine collapses to the head.
    pub fn app(head: Exp, mut spine: Vec<SpineArg>) -> Exp {
        if spine.is_empty() {
            return head;
        }
        match head {
            Exp::App(App { head, spine: mut inner }) => {
                inner.append(&mut spine);
                Exp::App(App { head, spine: inner })
            }
            head => Exp::App(App { head: Box::new(head), spine }),
        }
    }

    /// The head of a spine application; any other term is its own head.
    pub fn head(&self) -> &Exp {
        match self {
            Exp::App(App { head, .. }) => head,
            _ => self,
        }
    }

    /// Strip the leading λ-binders, returning their parameter types
    /// and the body.
    pub fn strip_lams(&self) -> (Vec<&Typ>, &Exp) {
        let mut binders = Vec::new();
        let mut body = self;
        while let Exp::Lam(Lam { param_ty, body: inner, .. }) = body {
            binders.push(param_ty);
            body = inner;
        }
        (binders, body)
    }

    /// The head symbol underneath the leading λ-binders, together with
    /// the depth at which it sits.
    pub fn head_under_lams(&self) -> (usize, &Exp) {
        let (binders, body) = self.strip_lams();
        (binders.len(), body.head())
    }

    /// Whether the head underneath the λ-prefix is a free variable.
    pub fn is_flex(&self) -> bool {
        let (depth, head) = self.head_under_lams();
        matches!(head, Exp::Var(Var { idx, .. }) if idx.0 > depth)
    }

    /// Whether the term is a variable that is free at depth 0, with no
    /// binders and no spine around it. This is the test used by variable
    /// elimination, which is stricter than [Exp::is_flex].
    pub fn is_bare_var(&self) -> Option<&Var> {
        match self {
            Exp::Var(v) => Some(v),
            _ => None,
        }
    }

    /// α-equivalence. With de Bruijn indices this is structural equality;
    /// binder names are ignored by the derived instance.
    pub fn alpha_eq(&self, other: &Exp) -> bool {
        self == other
    }
}

// Var
//
//

/// A variable occurrence, bound or free depending on the enclosing binder
/// depth. The type is annotated at the occurrence.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Var {
    pub idx: Idx,
    pub ty: Typ,
}

impl From<Var> for Exp {
    fn from(val: Var) -> Self {
        Exp::Var(val)
    }
}

// Sym
//
//

/// A constant, referencing the signature by key.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Sym {
    pub key: SymKey,
    pub ty: Typ,
}

impl From<Sym> for Exp {
    fn from(val: Sym) -> Self {
        Exp::Sym(val)
    }
}

// Lam
//
//

/// A one-parameter λ-abstraction. N-ary abstraction is nesting.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Lam {
    /// The name originally annotated in the input, kept for
    /// prettyprinting only.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: Option<Ident>,
    pub param_ty: Typ,
    pub body: Box<Exp>,
}

impl From<Lam> for Exp {
    fn from(val: Lam) -> Self {
        Exp::Lam(val)
    }
}

// TyLam
//
//

/// A type abstraction, binding one type variable.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct TyLam {
    pub body: Box<Exp>,
}

impl From<TyLam> for Exp {
    fn from(val: TyLam) -> Self {
        Exp::TyLam(val)
    }
}

// App
//
//

/// A spine application: a head applied to an ordered list of term and
/// type arguments. The head is never itself an application.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct App {
    pub head: Box<Exp>,
    pub spine: Vec<SpineArg>,
}

impl From<App> for Exp {
    fn from(val: App) -> Self {
        Exp::App(val)
    }
}

#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum SpineArg {
    Exp(Box<Exp>),
    Typ(Typ),
}

impl SpineArg {
    pub fn exp(exp: Exp) -> SpineArg {
        SpineArg::Exp(Box::new(exp))
    }

    pub fn as_exp(&self) -> Option<&Exp> {
        match self {
            SpineArg::Exp(e) => Some(e),
            SpineArg::Typ(_) => None,
        }
    }
}

// Obj
//
//

/// A distinct object or literal leaf; two distinct objects are equal iff
/// their signature keys are equal.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Obj {
    pub key: SymKey,
    pub ty: Typ,
}

impl From<Obj> for Exp {
    fn from(val: Obj) -> Self {
        Exp::Obj(val)
    }
}

// Shift
//
//

impl Shift for Exp {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        match self {
            Exp::Var(Var { idx, .. }) => idx.shift_above(cutoff, by),
            Exp::Sym(_) | Exp::Obj(_) => {}
            Exp::Lam(Lam { body, .. }) => body.shift_above(cutoff + 1, by),
            // A type binder does not affect term indices
            Exp::TyLam(TyLam { body }) => body.shift_above(cutoff, by),
            Exp::App(App { head, spine }) => {
                head.shift_above(cutoff, by);
                spine.shift_above(cutoff, by);
            }
        }
    }
}

impl Shift for SpineArg {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        match self {
            SpineArg::Exp(e) => e.shift_above(cutoff, by),
            SpineArg::Typ(_) => {}
        }
    }
}

// Occurs
//
//

impl Occurs for Exp {
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>) {
        match self {
            Exp::Var(Var { idx, .. }) => {
                if idx.0 > depth {
                    fvs.insert(Idx(idx.0 - depth));
                }
            }
            Exp::Sym(_) | Exp::Obj(_) => {}
            Exp::Lam(Lam { body, .. }) => body.free_vars_mut(depth + 1, fvs),
            Exp::TyLam(TyLam { body }) => body.free_vars_mut(depth, fvs),
            Exp::App(App { head, spine }) => {
                head.free_vars_mut(depth, fvs);
                spine.free_vars_mut(depth, fvs);
            }
        }
    }
}

impl Occurs for SpineArg {
    fn free_vars_mut(&self, depth: usize, fvs: &mut HashSet<Idx>) {
        match self {
            SpineArg::Exp(e) => e.free_vars_mut(depth, fvs),
            SpineArg::Typ(_) => {}
        }
    }
}

// Print
//
//

impl Print for Exp {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Exp::Var(Var { idx, .. }) => alloc.var(&format!("@{idx}")),
            Exp::Sym(Sym { key, .. }) => alloc.sym(&format!("{key}")),
            Exp::Lam(Lam { name, param_ty, body }) => {
                let param = match name {
                    Some(name) => alloc.var(&name.id),
                    None => alloc.var("_"),
                };
                alloc
                    .keyword("^")
                    .append(alloc.space())
                    .append(
                        param
                            .append(": ")
                            .append(param_ty.print(cfg, alloc))
                            .brackets(),
                    )
                    .append(": ")
                    .append(body.print_prec(cfg, alloc, Precedence::Exp))
                    .parens_if(prec, Precedence::Exp)
            }
            Exp::TyLam(TyLam { body }) => alloc
                .keyword("!>")
                .append(": ")
                .append(body.print_prec(cfg, alloc, Precedence::Exp))
                .parens_if(prec, Precedence::Exp),
            Exp::App(App { head, spine }) => {
                let sep = alloc.space().append("@").append(alloc.space());
                head.print_prec(cfg, alloc, Precedence::Atom)
                    .append(sep.clone())
                    .append(alloc.intersperse(
                        spine.iter().map(|arg| arg.print_prec(cfg, alloc, Precedence::Atom)),
                        sep,
                    ))
                    .parens_if(prec, Precedence::App)
            }
            Exp::Obj(Obj { key, .. }) => alloc.sym(&format!("\"{key}\"")),
        }
    }
}

impl Print for SpineArg {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            SpineArg::Exp(e) => e.print_prec(cfg, alloc, prec),
            SpineArg::Typ(ty) => ty.print_prec(cfg, alloc, Precedence::Atom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(n: u32) -> Typ {
        Typ::Base(SymKey(n))
    }

    #[test]
    fn app_flattens_nested_heads() {
        let f = Exp::sym(SymKey(7), Typ::fun_from([base(1), base(1)], base(1)));
        let a = Exp::var(1, base(1));
        let b = Exp::var(2, base(1));
        let partial = Exp::app(f.clone(), vec![SpineArg::exp(a.clone())]);
        let full = Exp::app(partial, vec![SpineArg::exp(b.clone())]);
        let Exp::App(App { head, spine }) = &full else {
            panic!("expected application")
        };
        assert_eq!(**head, f);
        assert_eq!(spine.len(), 2);
    }

    #[test]
    fn flex_head_is_contextual() {
        // λx:i. @2  has a flex head (the variable escapes the binder),
        // λx:i. @1  has a rigid one.
        let flex = Exp::lam(base(1), Exp::var(2, base(1)));
        let rigid = Exp::lam(base(1), Exp::var(1, base(1)));
        assert!(flex.is_flex());
        assert!(!rigid.is_flex());
    }

    #[test]
    fn free_vars_are_absolute() {
        // λ. @3 @ @1  has the single free variable 2
        let body = Exp::app(
            Exp::var(3, Typ::fun(base(1), base(0))),
            vec![SpineArg::exp(Exp::var(1, base(1)))],
        );
        let lam = Exp::lam(base(1), body);
        let fvs = lam.free_vars();
        assert_eq!(fvs.len(), 1);
        assert!(fvs.contains(&Idx(2)));
    }

    #[test]
    fn alpha_eq_ignores_binder_names() {
        let named = Exp::Lam(Lam {
            name: Some(Ident::from_string("X")),
            param_ty: base(1),
            body: Box::new(Exp::var(1, base(1))),
        });
        let unnamed = Exp::lam(base(1), Exp::var(1, base(1)));
        assert!(named.alpha_eq(&unnamed));
    }
}
