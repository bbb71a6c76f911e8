pub mod cst;
mod grammar;
pub mod lexer;
mod result;

pub use lexer::{tokenize, Spanned, Token};
pub use result::*;

use grammar::Parser;

/// Parse a complete TPTP problem file.
pub fn parse_problem(source: &str) -> Result<cst::Problem, ParseError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).problem()
}

/// Parse a single formula, for tests and diagnostics.
pub fn parse_formula(source: &str) -> Result<cst::Formula, ParseError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).formula()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::*;

    #[test]
    fn parses_statements_of_all_dialects() {
        let source = "
            thf(a1, axiom, p @ c).
            tff(a2, axiom, q(c)).
            fof(a3, conjecture, p(c) => q(c)).
            tcf(a4, axiom, ! [X: $i]: q(X)).
            cnf(a5, negated_conjecture, ~ q(c) | p(c)).
            tpi(a6, plain, output(stdout)).
        ";
        let problem = parse_problem(source).unwrap();
        assert_eq!(problem.inputs.len(), 6);
        let dialects: Vec<Dialect> = problem
            .inputs
            .iter()
            .map(|input| match input {
                Input::Formula(f) => f.dialect,
                Input::Include(_) => panic!("no include here"),
            })
            .collect();
        assert_eq!(
            dialects,
            vec![
                Dialect::Thf,
                Dialect::Tff,
                Dialect::Fof,
                Dialect::Tcf,
                Dialect::Cnf,
                Dialect::Tpi
            ]
        );
    }

    #[test]
    fn parses_include_with_selection() {
        let problem = parse_problem("include('Axioms/SET001-0.ax', [a, b]).").unwrap();
        let Input::Include(include) = &problem.inputs[0] else {
            panic!("expected an include")
        };
        assert_eq!(include.path, "Axioms/SET001-0.ax");
        assert_eq!(include.selection, vec!["a", "b"]);
    }

    #[test]
    fn parses_typing_statement() {
        let problem = parse_problem("thf(p_type, type, p: $i > ($i > $o) > $i).").unwrap();
        let Input::Formula(af) = &problem.inputs[0] else { panic!() };
        assert_eq!(af.role, Role::Type);
        let Formula::Typed(Typed { ty, .. }) = &af.formula else {
            panic!("expected a typing")
        };
        let Formula::Binary(Binary { op: BinOp::Arrow, .. }) = &**ty else {
            panic!("expected an arrow type")
        };
    }

    #[test]
    fn application_is_left_associative() {
        let formula = parse_formula("f @ a @ b").unwrap();
        let Formula::Apply(Apply { fun, args, .. }) = formula else { panic!() };
        let Formula::Ident(Ident { name, .. }) = &*fun else { panic!() };
        assert_eq!(name, "f");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn lambda_binders_carry_types() {
        let formula = parse_formula("^ [X: $i, Y]: q @ X").unwrap();
        let Formula::Quantified(Quantified { quant, binders, .. }) = formula else {
            panic!()
        };
        assert_eq!(quant, Quantifier::Lambda);
        assert_eq!(binders.len(), 2);
        assert!(binders[0].ty.is_some());
        assert!(binders[1].ty.is_none());
    }

    #[test]
    fn and_chains_fold() {
        let formula = parse_formula("p & q & r").unwrap();
        let Formula::Binary(Binary { op: BinOp::And, lhs, .. }) = formula else { panic!() };
        let Formula::Binary(Binary { op: BinOp::And, .. }) = &*lhs else {
            panic!("expected a left-nested chain")
        };
    }

    #[test]
    fn equality_binds_tighter_than_connectives() {
        let formula = parse_formula("a = b => c = d").unwrap();
        let Formula::Binary(Binary { op: BinOp::Implies, lhs, rhs, .. }) = formula else {
            panic!()
        };
        let Formula::Binary(Binary { op: BinOp::Equals, .. }) = &*lhs else { panic!() };
        let Formula::Binary(Binary { op: BinOp::Equals, .. }) = &*rhs else { panic!() };
    }

    #[test]
    fn annotations_are_kept() {
        let problem =
            parse_problem("fof(a, axiom, p(c), file('x.p', a), [status(thm)]).").unwrap();
        let Input::Formula(af) = &problem.inputs[0] else { panic!() };
        let annotations = af.annotations.as_ref().unwrap();
        assert_eq!(annotations.info.len(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_problem("thf(a, axiom, p @ ).").is_err());
        assert!(parse_problem("nonsense(a).").is_err());
    }
}
