use ast::*;

/// Exhaustively reduce every β-redex, including type-level redexes where
/// a type abstraction meets a type argument. Arguments are normalised
/// before being substituted, and contractions are renormalised, so the
/// result contains no redex.
///
/// Terminates on well-typed input; the unification rules only ever
/// produce well-typed terms.
pub fn beta_normalize(exp: &Exp) -> Exp {
    match exp {
        Exp::Var(_) | Exp::Sym(_) | Exp::Obj(_) => exp.clone(),
        Exp::Lam(Lam { name, param_ty, body }) => Exp::Lam(Lam {
            name: name.clone(),
            param_ty: param_ty.clone(),
            body: Box::new(beta_normalize(body)),
        }),
        Exp::TyLam(TyLam { body }) => Exp::TyLam(TyLam { body: Box::new(beta_normalize(body)) }),
        Exp::App(App { head, spine }) => {
            let head = beta_normalize(head);
            let spine = spine.iter().map(beta_normalize_arg).collect();
            contract(head, spine)
        }
    }
}

fn beta_normalize_arg(arg: &SpineArg) -> SpineArg {
    match arg {
        SpineArg::Exp(e) => SpineArg::Exp(Box::new(beta_normalize(e))),
        SpineArg::Typ(ty) => SpineArg::Typ(ty.clone()),
    }
}

/// Feed a normalised spine into a normalised head, contracting as long as
/// the head is an abstraction matching the next argument.
fn contract(head: Exp, spine: Vec<SpineArg>) -> Exp {
    let mut head = head;
    let mut rest = Vec::new();
    let mut args = spine.into_iter();
    for arg in args.by_ref() {
        match (head, arg) {
            (Exp::Lam(Lam { body, .. }), SpineArg::Exp(e)) => {
                // The contraction can uncover new redexes inside the body.
                head = beta_normalize(&body.subst(&Subst::beta(*e)));
            }
            (Exp::TyLam(TyLam { body }), SpineArg::Typ(ty)) => {
                head = beta_normalize(&subst_ty_in_exp(&body, 1, &ty));
            }
            (blocked, arg) => {
                head = blocked;
                rest.push(arg);
                break;
            }
        }
    }
    rest.extend(args);
    Exp::app(head, rest)
}

/// Substitute a type for the type variable `var` in every type annotation
/// of a term. Crossing a type binder bumps the variable and the loose
/// variables of the replacement.
pub fn subst_ty_in_exp(exp: &Exp, var: usize, by: &Typ) -> Exp {
    match exp {
        Exp::Var(Var { idx, ty }) => Exp::Var(Var { idx: *idx, ty: ty.subst_ty_var(var, by) }),
        Exp::Sym(Sym { key, ty }) => Exp::Sym(Sym { key: *key, ty: ty.subst_ty_var(var, by) }),
        Exp::Obj(Obj { key, ty }) => Exp::Obj(Obj { key: *key, ty: ty.subst_ty_var(var, by) }),
        Exp::Lam(Lam { name, param_ty, body }) => Exp::Lam(Lam {
            name: name.clone(),
            param_ty: param_ty.subst_ty_var(var, by),
            body: Box::new(subst_ty_in_exp(body, var, by)),
        }),
        Exp::TyLam(TyLam { body }) => Exp::TyLam(TyLam {
            body: Box::new(subst_ty_in_exp(body, var + 1, &by.shift_above(0, 1))),
        }),
        Exp::App(App { head, spine }) => {
            let spine = spine
                .iter()
                .map(|arg| match arg {
                    SpineArg::Exp(e) => SpineArg::Exp(Box::new(subst_ty_in_exp(e, var, by))),
                    SpineArg::Typ(ty) => SpineArg::Typ(ty.subst_ty_var(var, by)),
                })
                .collect();
            Exp::app(subst_ty_in_exp(head, var, by), spine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i() -> Typ {
        Typ::Base(Signature::I)
    }

    fn c() -> Exp {
        Exp::sym(SymKey(20), i())
    }

    #[test]
    fn contracts_simple_redex() {
        // (λx:i. x) c  ▷  c
        let redex = Exp::app(Exp::lam(i(), Exp::var(1, i())), vec![SpineArg::exp(c())]);
        assert_eq!(beta_normalize(&redex), c());
    }

    #[test]
    fn contracts_nested_redexes() {
        // (λf. f c) (λx. x)  ▷  c
        let f_ty = Typ::fun(i(), i());
        let outer = Exp::lam(
            f_ty.clone(),
            Exp::app(Exp::var(1, f_ty.clone()), vec![SpineArg::exp(c())]),
        );
        let id = Exp::lam(i(), Exp::var(1, i()));
        let redex = Exp::app(outer, vec![SpineArg::exp(id)]);
        assert_eq!(beta_normalize(&redex), c());
    }

    #[test]
    fn beta_is_idempotent() {
        let f_ty = Typ::fun(i(), i());
        let outer = Exp::lam(
            f_ty.clone(),
            Exp::app(Exp::var(1, f_ty), vec![SpineArg::exp(c())]),
        );
        let id = Exp::lam(i(), Exp::var(1, i()));
        let redex = Exp::app(outer, vec![SpineArg::exp(id)]);
        let nf = beta_normalize(&redex);
        assert_eq!(beta_normalize(&nf), nf);
    }

    #[test]
    fn partial_application_keeps_spine() {
        // (λx:i. q x) under-applied stays put; q c d flattens
        let q_ty = Typ::fun_from([i(), i()], i());
        let q = Exp::sym(SymKey(21), q_ty);
        let app = Exp::app(
            Exp::app(q.clone(), vec![SpineArg::exp(c())]),
            vec![SpineArg::exp(c())],
        );
        let nf = beta_normalize(&app);
        let Exp::App(App { head, spine }) = &nf else { panic!("expected spine") };
        assert_eq!(**head, q);
        assert_eq!(spine.len(), 2);
    }

    #[test]
    fn type_beta_instantiates_annotations() {
        // (!>: λx:'1. x) @ i  ▷  λx:i. x
        let poly_id = Exp::ty_lam(Exp::lam(Typ::Var(1), Exp::var(1, Typ::Var(1))));
        let applied = Exp::app(poly_id, vec![SpineArg::Typ(i())]);
        assert_eq!(beta_normalize(&applied), Exp::lam(i(), Exp::var(1, i())));
    }
}
