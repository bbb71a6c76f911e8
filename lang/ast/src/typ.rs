use printer::util::ParensIfExt;
use printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ident::SymKey;

// Typ
//
//

/// The type language of the term algebra.
///
/// Type variables use de Bruijn indices starting at 1, bound by the
/// innermost enclosing [Typ::Forall]. Structural equality is type equality;
/// there are no definitional type synonyms at this level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Typ {
    /// A base type, identified by its signature key
    Base(SymKey),
    /// The function type `A > B`
    Fun(Box<Typ>, Box<Typ>),
    /// The product type `A * B`
    Prod(Box<Typ>, Box<Typ>),
    /// The sum type `A + B`
    Sum(Box<Typ>, Box<Typ>),
    /// A type variable
    Var(usize),
    /// A universally quantified type `!> A`
    Forall(Box<Typ>),
}

impl Typ {
    pub fn fun(dom: Typ, cod: Typ) -> Typ {
        Typ::Fun(Box::new(dom), Box::new(cod))
    }

    /// Build `a_1 > ... > a_n > res` from the argument list and result.
    pub fn fun_from<I>(args: I, res: Typ) -> Typ
    where
        I: IntoIterator<Item = Typ>,
        I::IntoIter: DoubleEndedIterator,
    {
        args.into_iter().rev().fold(res, |acc, arg| Typ::fun(arg, acc))
    }

    pub fn is_fun(&self) -> bool {
        matches!(self, Typ::Fun(..))
    }

    /// Whether the type is polymorphic, i.e. has a leading quantifier.
    pub fn is_poly(&self) -> bool {
        matches!(self, Typ::Forall(_))
    }

    /// The number of arguments a symbol of this type expects.
    pub fn arity(&self) -> usize {
        match self {
            Typ::Fun(_, cod) => 1 + cod.arity(),
            _ => 0,
        }
    }

    /// The argument types along the spine of function arrows.
    pub fn args(&self) -> Vec<&Typ> {
        let mut args = Vec::new();
        let mut typ = self;
        while let Typ::Fun(dom, cod) = typ {
            args.push(&**dom);
            typ = cod;
        }
        args
    }

    /// The result type behind all function arrows.
    pub fn result(&self) -> &Typ {
        match self {
            Typ::Fun(_, cod) => cod.result(),
            _ => self,
        }
    }

    /// Split into argument types and result type.
    pub fn decompose(&self) -> (Vec<Typ>, Typ) {
        (self.args().into_iter().cloned().collect(), self.result().clone())
    }

    /// Shift loose type variables above `cutoff` by `by`.
    pub fn shift_above(&self, cutoff: usize, by: isize) -> Typ {
        match self {
            Typ::Base(key) => Typ::Base(*key),
            Typ::Fun(dom, cod) => {
                Typ::fun(dom.shift_above(cutoff, by), cod.shift_above(cutoff, by))
            }
            Typ::Prod(fst, snd) => Typ::Prod(
                Box::new(fst.shift_above(cutoff, by)),
                Box::new(snd.shift_above(cutoff, by)),
            ),
            Typ::Sum(fst, snd) => Typ::Sum(
                Box::new(fst.shift_above(cutoff, by)),
                Box::new(snd.shift_above(cutoff, by)),
            ),
            Typ::Var(n) if *n > cutoff => Typ::Var((*n as isize + by) as usize),
            Typ::Var(n) => Typ::Var(*n),
            Typ::Forall(body) => Typ::Forall(Box::new(body.shift_above(cutoff + 1, by))),
        }
    }

    /// Substitute `by` for the type variable `var`, counted relative to the
    /// current depth. Crossing a quantifier bumps both the variable under
    /// substitution and the loose variables of `by`.
    pub fn subst_ty_var(&self, var: usize, by: &Typ) -> Typ {
        match self {
            Typ::Base(key) => Typ::Base(*key),
            Typ::Fun(dom, cod) => Typ::fun(dom.subst_ty_var(var, by), cod.subst_ty_var(var, by)),
            Typ::Prod(fst, snd) => Typ::Prod(
                Box::new(fst.subst_ty_var(var, by)),
                Box::new(snd.subst_ty_var(var, by)),
            ),
            Typ::Sum(fst, snd) => {
                Typ::Sum(Box::new(fst.subst_ty_var(var, by)), Box::new(snd.subst_ty_var(var, by)))
            }
            Typ::Var(n) if *n == var => by.clone(),
            Typ::Var(n) if *n > var => Typ::Var(n - 1),
            Typ::Var(n) => Typ::Var(*n),
            Typ::Forall(body) => Typ::Forall(Box::new(
                body.subst_ty_var(var + 1, &by.shift_above(0, 1)),
            )),
        }
    }

    /// Instantiate the body of a leading quantifier with `by`.
    pub fn instantiate(&self, by: &Typ) -> Option<Typ> {
        match self {
            Typ::Forall(body) => Some(body.subst_ty_var(1, by)),
            _ => None,
        }
    }
}

impl Print for Typ {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Typ::Base(key) => alloc.text(format!("{key}")),
            Typ::Fun(dom, cod) => dom
                .print_prec(cfg, alloc, Precedence::App)
                .append(" > ")
                .append(cod.print_prec(cfg, alloc, Precedence::Exp))
                .parens_if(prec, Precedence::Exp),
            Typ::Prod(fst, snd) => fst
                .print_prec(cfg, alloc, Precedence::App)
                .append(" * ")
                .append(snd.print_prec(cfg, alloc, Precedence::App))
                .parens_if(prec, Precedence::Exp),
            Typ::Sum(fst, snd) => fst
                .print_prec(cfg, alloc, Precedence::App)
                .append(" + ")
                .append(snd.print_prec(cfg, alloc, Precedence::App))
                .parens_if(prec, Precedence::Exp),
            Typ::Var(n) => alloc.text(format!("'{n}")),
            Typ::Forall(body) => alloc
                .text("!> ")
                .append(body.print_prec(cfg, alloc, Precedence::Exp))
                .parens_if(prec, Precedence::Exp),
        }
    }
}
