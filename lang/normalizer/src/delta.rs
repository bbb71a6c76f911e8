use ast::*;

/// Unfold every defined constant by its definition from the signature,
/// transitively, until no defined symbol remains. Used during
/// preprocessing; the unification loop itself only sees δ-free terms.
///
/// Definitions are required to be non-recursive, which the signature
/// construction guarantees: a definition can only mention symbols that
/// were declared before it.
pub fn delta_expand(exp: &Exp, sig: &Signature) -> Exp {
    match exp {
        Exp::Var(_) | Exp::Obj(_) => exp.clone(),
        Exp::Sym(Sym { key, .. }) => match sig.definition(*key) {
            Some(def) => delta_expand(def, sig),
            None => exp.clone(),
        },
        Exp::Lam(Lam { name, param_ty, body }) => Exp::Lam(Lam {
            name: name.clone(),
            param_ty: param_ty.clone(),
            body: Box::new(delta_expand(body, sig)),
        }),
        Exp::TyLam(TyLam { body }) => {
            Exp::TyLam(TyLam { body: Box::new(delta_expand(body, sig)) })
        }
        Exp::App(App { head, spine }) => {
            let spine = spine
                .iter()
                .map(|arg| match arg {
                    SpineArg::Exp(e) => SpineArg::Exp(Box::new(delta_expand(e, sig))),
                    SpineArg::Typ(ty) => SpineArg::Typ(ty.clone()),
                })
                .collect();
            // Unfolding the head can expose a redex; the caller is
            // expected to β-normalise afterwards.
            Exp::app(delta_expand(head, sig), spine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beta_normalize;

    #[test]
    fn unfolds_definitions_transitively() {
        let mut sig = Signature::new();
        let i = Typ::Base(Signature::I);
        let c = sig.add_uninterpreted(Ident::from_string("c"), i.clone()).unwrap();
        let d = sig
            .add_defined(Ident::from_string("d"), i.clone(), Exp::sym(c, i.clone()))
            .unwrap();
        let e = sig
            .add_defined(Ident::from_string("e"), i.clone(), Exp::sym(d, i.clone()))
            .unwrap();
        assert_eq!(delta_expand(&Exp::sym(e, i.clone()), &sig), Exp::sym(c, i));
    }

    #[test]
    fn unfolded_head_reduces_after_beta() {
        // f := λx:i. x,  then  f c  δβ-normalises to  c
        let mut sig = Signature::new();
        let i = Typ::Base(Signature::I);
        let fun_ty = Typ::fun(i.clone(), i.clone());
        let c = sig.add_uninterpreted(Ident::from_string("c"), i.clone()).unwrap();
        let f = sig
            .add_defined(
                Ident::from_string("f"),
                fun_ty.clone(),
                Exp::lam(i.clone(), Exp::var(1, i.clone())),
            )
            .unwrap();
        let app = Exp::app(Exp::sym(f, fun_ty), vec![SpineArg::exp(Exp::sym(c, i.clone()))]);
        assert_eq!(beta_normalize(&delta_expand(&app, &sig)), Exp::sym(c, i));
    }
}
