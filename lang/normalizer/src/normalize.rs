use log::trace;

use ast::*;
use printer::Print;

use crate::beta::beta_normalize;
use crate::eta::eta_expand;

/// Normalisation to the canonical form consumed by the unification rules:
/// η-expansion to η-long form followed by full β-reduction.
pub trait Normalize {
    fn normalize(&self) -> Result<Exp, TypeError>;
}

impl Normalize for Exp {
    fn normalize(&self) -> Result<Exp, TypeError> {
        let eta = eta_expand(self, &mut TypeCtx::empty())?;
        let nf = beta_normalize(&eta);
        trace!("{} ▷ {}", self.print_to_string(None), nf.print_to_string(None));
        Ok(nf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i() -> Typ {
        Typ::Base(Signature::I)
    }

    #[test]
    fn canonical_form_is_stable() {
        // under-applied constant with a redex argument
        let f_ty = Typ::fun_from([i(), i()], i());
        let f = Exp::sym(SymKey(25), f_ty);
        let redex = Exp::app(
            Exp::lam(i(), Exp::var(1, i())),
            vec![SpineArg::exp(Exp::sym(SymKey(26), i()))],
        );
        let t = Exp::app(f, vec![SpineArg::exp(redex)]);
        let nf = t.normalize().unwrap();
        assert_eq!(nf.normalize().unwrap(), nf);
    }
}
