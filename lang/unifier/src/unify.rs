use log::trace;
use printer::Print;

use ast::*;
use normalizer::beta_normalize;

use crate::constraints::{compute_subst, sort_unsolved, Binding, Eqn};
use crate::rules::{decompose, func, Rule};

/// The result of running the deterministic rules to fixpoint.
#[derive(Debug, Clone)]
pub struct Exhausted {
    pub unsolved: Vec<Eqn>,
    pub solved: Vec<Binding>,
}

/// Apply Delete, Decompose, Bind and Func — in that priority order — until
/// none of them fires on any unsolved equation.
///
/// The unsolved list is kept sorted with rigid-rigid equations first and
/// flex-flex equations last, so that afterwards a single look at the head
/// equation classifies the whole state.
pub fn exhaust(
    mut unsolved: Vec<Eqn>,
    mut solved: Vec<Binding>,
    sig: &mut Signature,
) -> Exhausted {
    let find = |eqns: &[Eqn], rule: Rule| eqns.iter().position(|eqn| rule.can_apply(eqn));

    // Establish the sort invariant before the head is ever inspected.
    sort_unsolved(&mut unsolved);

    loop {
        if let Some(i) = find(&unsolved, Rule::Delete) {
            let eqn = unsolved.remove(i);
            trace!("delete {}", eqn.print_to_string(None));
            continue;
        }
        if let Some(i) = find(&unsolved, Rule::Decompose) {
            let eqn = unsolved.remove(i);
            trace!("decompose {}", eqn.print_to_string(None));
            unsolved.extend(decompose(&eqn));
            sort_unsolved(&mut unsolved);
            continue;
        }
        if let Some(i) = find(&unsolved, Rule::Bind) {
            let eqn = unsolved.remove(i);
            trace!("bind {}", eqn.print_to_string(None));
            let binding = crate::rules::bind(eqn);
            let subst = compute_subst(std::slice::from_ref(&binding));
            unsolved = unsolved
                .iter()
                .map(|eqn| {
                    // Substituting into an applied variable uncovers
                    // redexes, so both sides are renormalised.
                    let Eqn { lhs, rhs } = eqn.subst(&subst);
                    Eqn::new(beta_normalize(&lhs), beta_normalize(&rhs))
                })
                .collect();
            solved = solved
                .iter()
                .map(|prev| Binding {
                    var: prev.var.clone(),
                    exp: beta_normalize(&prev.exp.subst(&subst)),
                })
                .collect();
            solved.push(binding);
            sort_unsolved(&mut unsolved);
            continue;
        }
        if let Some(i) = find(&unsolved, Rule::Func) {
            let eqn = unsolved.remove(i);
            trace!("func {}", eqn.print_to_string(None));
            unsolved.push(func(&eqn, sig));
            sort_unsolved(&mut unsolved);
            continue;
        }
        break;
    }

    Exhausted { unsolved, solved }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i() -> Typ {
        Typ::Base(Signature::I)
    }

    fn c() -> Exp {
        Exp::sym(SymKey(50), i())
    }

    fn d() -> Exp {
        Exp::sym(SymKey(51), i())
    }

    #[test]
    fn trivial_equation_is_deleted() {
        let mut sig = Signature::new();
        let Exhausted { unsolved, solved } =
            exhaust(vec![Eqn::new(c(), c())], Vec::new(), &mut sig);
        assert!(unsolved.is_empty());
        assert!(solved.is_empty());
    }

    #[test]
    fn bare_variable_is_bound_and_substituted() {
        let mut sig = Signature::new();
        let f_ty = Typ::fun(i(), i());
        let f = Exp::sym(SymKey(52), f_ty.clone());
        // X = c  together with  f X = f c
        let eqns = vec![
            Eqn::new(Exp::var(1, i()), c()),
            Eqn::new(
                Exp::app(f.clone(), vec![SpineArg::exp(Exp::var(1, i()))]),
                Exp::app(f, vec![SpineArg::exp(c())]),
            ),
        ];
        let Exhausted { unsolved, solved } = exhaust(eqns, Vec::new(), &mut sig);
        assert!(unsolved.is_empty());
        assert_eq!(solved.len(), 1);
        assert_eq!(solved[0].exp, c());
    }

    #[test]
    fn rigid_clash_survives_exhaustion() {
        let mut sig = Signature::new();
        let Exhausted { unsolved, .. } =
            exhaust(vec![Eqn::new(c(), d())], Vec::new(), &mut sig);
        assert_eq!(unsolved.len(), 1);
    }

    #[test]
    fn binding_substitutes_into_earlier_solutions() {
        let mut sig = Signature::new();
        // Y = f X  then  X = c  leaves Y bound to f c
        let f_ty = Typ::fun(i(), i());
        let f = Exp::sym(SymKey(52), f_ty);
        let fx = Exp::app(f.clone(), vec![SpineArg::exp(Exp::var(1, i()))]);
        let fc = Exp::app(f, vec![SpineArg::exp(c())]);
        let eqns = vec![
            Eqn::new(Exp::var(2, Typ::Base(Signature::I)), fx),
            Eqn::new(Exp::var(1, i()), c()),
        ];
        let Exhausted { unsolved, solved } = exhaust(eqns, Vec::new(), &mut sig);
        assert!(unsolved.is_empty());
        assert_eq!(solved.len(), 2);
        let y = solved.iter().find(|b| b.var.idx == Idx(2)).unwrap();
        assert_eq!(y.exp, fc);
    }
}
