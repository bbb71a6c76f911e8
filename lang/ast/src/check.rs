use miette::Diagnostic;
use printer::Print;
use thiserror::Error;

use crate::ctx::TypeCtx;
use crate::exp::{App, Exp, Lam, SpineArg, TyLam, Var};
use crate::typ::Typ;

#[derive(Error, Diagnostic, Debug)]
pub enum TypeError {
    #[error("Bound variable @{idx} is annotated with {actual} but its binder has type {expected}")]
    #[diagnostic(code("T-001"))]
    BoundVarMismatch { idx: usize, expected: String, actual: String },
    #[error("Cannot apply a term of non-functional type {actual} to an argument")]
    #[diagnostic(code("T-002"))]
    NotAFunction { actual: String },
    #[error("Cannot apply a term of monomorphic type {actual} to a type argument")]
    #[diagnostic(code("T-003"))]
    NotPolymorphic { actual: String },
    #[error("Argument has type {actual} but the function expects {expected}")]
    #[diagnostic(code("T-004"))]
    ArgMismatch { expected: String, actual: String },
    #[error("The sides of an equation must have the same type, got {lhs} and {rhs}")]
    #[diagnostic(code("T-005"))]
    UnequalSides { lhs: String, rhs: String },
}

/// Synthesise the type of a term.
///
/// Terms annotate enough types at their leaves that synthesis never needs
/// an expected type; the context is only consulted to check that bound
/// variable annotations agree with their binders.
pub fn ty_of(exp: &Exp, ctx: &mut TypeCtx) -> Result<Typ, TypeError> {
    match exp {
        Exp::Var(Var { idx, ty }) => match ctx.lookup(*idx) {
            Some(bound) if bound == ty => Ok(ty.clone()),
            Some(bound) => Err(TypeError::BoundVarMismatch {
                idx: idx.0,
                expected: bound.print_to_string(None),
                actual: ty.print_to_string(None),
            }),
            // A loose index is a free variable; its annotation is its type.
            None => Ok(ty.clone()),
        },
        Exp::Sym(s) => Ok(s.ty.clone()),
        Exp::Obj(o) => Ok(o.ty.clone()),
        Exp::Lam(Lam { param_ty, body, .. }) => {
            let body_ty = ctx.bind(param_ty.clone(), |ctx| ty_of(body, ctx))?;
            Ok(Typ::fun(param_ty.clone(), body_ty))
        }
        Exp::TyLam(TyLam { body }) => Ok(Typ::Forall(Box::new(ty_of(body, ctx)?))),
        Exp::App(App { head, spine }) => {
            let mut ty = ty_of(head, ctx)?;
            for arg in spine {
                ty = match arg {
                    SpineArg::Exp(e) => {
                        let arg_ty = ty_of(e, ctx)?;
                        match ty {
                            Typ::Fun(dom, cod) if *dom == arg_ty => *cod,
                            Typ::Fun(dom, _) => {
                                return Err(TypeError::ArgMismatch {
                                    expected: dom.print_to_string(None),
                                    actual: arg_ty.print_to_string(None),
                                })
                            }
                            other => {
                                return Err(TypeError::NotAFunction {
                                    actual: other.print_to_string(None),
                                })
                            }
                        }
                    }
                    SpineArg::Typ(ty_arg) => match ty.instantiate(ty_arg) {
                        Some(instantiated) => instantiated,
                        None => {
                            return Err(TypeError::NotPolymorphic {
                                actual: ty.print_to_string(None),
                            })
                        }
                    },
                };
            }
            Ok(ty)
        }
    }
}

/// Whether all type annotations inside the term are consistent.
pub fn well_typed(exp: &Exp) -> bool {
    ty_of(exp, &mut TypeCtx::empty()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::SymKey;

    fn i() -> Typ {
        Typ::Base(SymKey(1))
    }

    fn o() -> Typ {
        Typ::Base(SymKey(0))
    }

    #[test]
    fn identity_function() {
        let id = Exp::lam(i(), Exp::var(1, i()));
        assert_eq!(ty_of(&id, &mut TypeCtx::empty()).unwrap(), Typ::fun(i(), i()));
    }

    #[test]
    fn application_peels_arrows() {
        let q = Exp::sym(SymKey(5), Typ::fun(i(), o()));
        let c = Exp::sym(SymKey(6), i());
        let app = Exp::app(q, vec![SpineArg::exp(c)]);
        assert_eq!(ty_of(&app, &mut TypeCtx::empty()).unwrap(), o());
        assert!(well_typed(&app));
    }

    #[test]
    fn ill_typed_argument_is_rejected() {
        let q = Exp::sym(SymKey(5), Typ::fun(i(), o()));
        let t = Exp::sym(SymKey(7), o());
        let app = Exp::app(q, vec![SpineArg::exp(t)]);
        assert!(!well_typed(&app));
    }

    #[test]
    fn polymorphic_head_consumes_type_argument() {
        // eq : !> '1 > '1 > o, applied to i, c, c
        let eq_ty = Typ::Forall(Box::new(Typ::fun_from([Typ::Var(1), Typ::Var(1)], o())));
        let eq = Exp::sym(SymKey(8), eq_ty);
        let c = Exp::sym(SymKey(6), i());
        let app = Exp::app(
            eq,
            vec![SpineArg::Typ(i()), SpineArg::exp(c.clone()), SpineArg::exp(c)],
        );
        assert_eq!(ty_of(&app, &mut TypeCtx::empty()).unwrap(), o());
    }

    #[test]
    fn free_variable_uses_annotation() {
        let x = Exp::var(1, i());
        assert_eq!(ty_of(&x, &mut TypeCtx::empty()).unwrap(), i());
    }
}
