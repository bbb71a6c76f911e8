use ast::*;

/// Bring a term into η-long form: every subterm of functional type is a
/// λ-abstraction. Idempotent up to α (which is definitional equality in
/// the de Bruijn representation).
pub fn eta_expand(exp: &Exp, ctx: &mut TypeCtx) -> Result<Exp, TypeError> {
    match exp {
        Exp::Lam(Lam { name, param_ty, body }) => {
            let body = ctx.bind(param_ty.clone(), |ctx| eta_expand(body, ctx))?;
            Ok(Exp::Lam(Lam { name: name.clone(), param_ty: param_ty.clone(), body: Box::new(body) }))
        }
        Exp::TyLam(TyLam { body }) => {
            Ok(Exp::TyLam(TyLam { body: Box::new(eta_expand(body, ctx)?) }))
        }
        _ => {
            // Expand inside the spine first, then wrap the whole term if
            // it still expects arguments.
            let expanded = match exp {
                Exp::App(App { head, spine }) => {
                    let spine = spine
                        .iter()
                        .map(|arg| match arg {
                            SpineArg::Exp(e) => {
                                Ok(SpineArg::Exp(Box::new(eta_expand(e, ctx)?)))
                            }
                            SpineArg::Typ(ty) => Ok(SpineArg::Typ(ty.clone())),
                        })
                        .collect::<Result<Vec<_>, TypeError>>()?;
                    // The head sits in function position and must not be
                    // wrapped itself; only a redex head is traversed.
                    let head = match &**head {
                        Exp::Lam(_) | Exp::TyLam(_) => eta_expand(head, ctx)?,
                        leaf => leaf.clone(),
                    };
                    Exp::app(head, spine)
                }
                leaf => leaf.clone(),
            };
            let ty = ty_of(&expanded, ctx)?;
            if !ty.is_fun() {
                return Ok(expanded);
            }
            let (arg_tys, _) = ty.decompose();
            let n = arg_tys.len();
            let mut wrapped = expanded;
            wrapped.shift(n as isize);
            let vars = arg_tys
                .iter()
                .enumerate()
                .map(|(k, arg_ty)| SpineArg::exp(eta_var(n - k, arg_ty)))
                .collect();
            let mut body = Exp::app(wrapped, vars);
            for arg_ty in arg_tys.into_iter().rev() {
                body = Exp::lam(arg_ty, body);
            }
            Ok(body)
        }
    }
}

/// The η-long form of a variable occurrence of the given type.
fn eta_var(idx: usize, ty: &Typ) -> Exp {
    if !ty.is_fun() {
        return Exp::var(idx, ty.clone());
    }
    let (arg_tys, _) = ty.decompose();
    let n = arg_tys.len();
    let vars = arg_tys
        .iter()
        .enumerate()
        .map(|(k, arg_ty)| SpineArg::exp(eta_var(n - k, arg_ty)))
        .collect();
    let mut body = Exp::app(Exp::var(idx + n, ty.clone()), vars);
    for arg_ty in arg_tys.into_iter().rev() {
        body = Exp::lam(arg_ty, body);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i() -> Typ {
        Typ::Base(Signature::I)
    }

    fn o() -> Typ {
        Typ::Base(Signature::O)
    }

    #[test]
    fn expands_functional_constant() {
        // q : i > o  becomes  λx:i. q x
        let q_ty = Typ::fun(i(), o());
        let q = Exp::sym(SymKey(22), q_ty.clone());
        let expanded = eta_expand(&q, &mut TypeCtx::empty()).unwrap();
        let expected = Exp::lam(
            i(),
            Exp::app(Exp::sym(SymKey(22), q_ty), vec![SpineArg::exp(Exp::var(1, i()))]),
        );
        assert_eq!(expanded, expected);
    }

    #[test]
    fn eta_is_idempotent() {
        let p_ty = Typ::fun_from([i(), Typ::fun(i(), o())], i());
        let p = Exp::sym(SymKey(23), p_ty);
        let once = eta_expand(&p, &mut TypeCtx::empty()).unwrap();
        let twice = eta_expand(&once, &mut TypeCtx::empty()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn base_typed_terms_are_untouched() {
        let c = Exp::sym(SymKey(24), i());
        assert_eq!(eta_expand(&c, &mut TypeCtx::empty()).unwrap(), c);
    }

    #[test]
    fn functional_arguments_are_expanded() {
        // p c : (i > o) > i  with higher-order argument position
        let p_ty = Typ::fun_from([i(), Typ::fun(i(), o())], i());
        let p = Exp::sym(SymKey(23), p_ty);
        let c = Exp::sym(SymKey(24), i());
        let app = Exp::app(p, vec![SpineArg::exp(c)]);
        let expanded = eta_expand(&app, &mut TypeCtx::empty()).unwrap();
        // the result abstracts over the missing (i > o) argument
        let Exp::Lam(Lam { param_ty, .. }) = &expanded else {
            panic!("expected λ-abstraction")
        };
        assert_eq!(param_ty, &Typ::fun(i(), o()));
        // and is stable under renormalisation
        assert_eq!(eta_expand(&expanded, &mut TypeCtx::empty()).unwrap(), expanded);
    }
}
