//! End-to-end tests of the pre-unification driver: the classical
//! first-order cases, the higher-order imitation/projection branching,
//! and the flex-flex postponement behaviour.

use ast::*;
use normalizer::beta_normalize;
use unifier::{pre_unify, Eqn, VarPool};

fn i() -> Typ {
    Typ::Base(Signature::I)
}

fn o() -> Typ {
    Typ::Base(Signature::O)
}

struct Consts {
    sig: Signature,
    c: Exp,
    d: Exp,
    f: Exp,
    f2: Exp,
    g: Exp,
    p: Exp,
    q: Exp,
}

fn consts() -> Consts {
    let mut sig = Signature::new();
    let mut declare = |sig: &mut Signature, name: &str, ty: Typ| {
        let key = sig.add_uninterpreted(Ident::from_string(name), ty.clone()).unwrap();
        Exp::sym(key, ty)
    };
    let c = declare(&mut sig, "c", i());
    let d = declare(&mut sig, "d", i());
    let f = declare(&mut sig, "f", Typ::fun(i(), i()));
    let f2 = declare(&mut sig, "f2", Typ::fun_from([i(), i()], i()));
    let g = declare(&mut sig, "g", Typ::fun(i(), i()));
    let p = declare(&mut sig, "p", Typ::fun_from([i(), Typ::fun(i(), o())], i()));
    let q = declare(&mut sig, "q", Typ::fun(i(), o()));
    Consts { sig, c, d, f, f2, g, p, q }
}

fn app1(f: &Exp, a: Exp) -> Exp {
    Exp::app(f.clone(), vec![SpineArg::exp(a)])
}

fn app2(f: &Exp, a: Exp, b: Exp) -> Exp {
    Exp::app(f.clone(), vec![SpineArg::exp(a), SpineArg::exp(b)])
}

// Scenarios
//
//

#[test]
fn bare_variable_binds_to_constant() {
    // unify(X, c)  ⇒  σ = [X ↦ c], residual []
    let Consts { mut sig, c, .. } = consts();
    let mut vars = VarPool::new(1);
    let eqns = vec![Eqn::new(Exp::var(1, i()), c.clone())];
    let mut stream = pre_unify(&mut sig, &mut vars, eqns, None).unwrap();
    let pre = stream.next().expect("expected a pre-unifier");
    assert!(pre.residual.is_empty());
    assert_eq!(Exp::var(1, i()).subst(&pre.subst), c);
}

#[test]
fn functional_equation_strips_binders_via_skolems() {
    // unify(λx:i. X, λx:i. x): Func applies both sides to a Skolem
    // constant, and X gets bound to it.
    let Consts { mut sig, .. } = consts();
    let mut vars = VarPool::new(2);
    let lhs = Exp::lam(i(), Exp::var(2, i()));
    let rhs = Exp::lam(i(), Exp::var(1, i()));
    let mut stream = pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, rhs)], None).unwrap();
    let pre = stream.next().expect("expected a pre-unifier");
    assert!(pre.residual.is_empty());
    let image = Exp::var(1, i()).subst(&pre.subst);
    let Exp::Sym(Sym { key, .. }) = image else {
        panic!("expected the Skolem witness, got {image:?}")
    };
    assert!(sig.lookup(key).unwrap().name.id.starts_with("sk"));
}

#[test]
fn flex_flex_equations_are_postponed() {
    // Two equations with flexible heads on both sides are returned as
    // the residual of the very first pre-unifier.
    let Consts { mut sig, c, d, p, q, .. } = consts();
    let mut vars = VarPool::new(3);
    let truth = Exp::sym(Signature::TRUE, o());
    let not = Exp::sym(Signature::NOT, Typ::fun(o(), o()));
    // p c (λx:i. $true)  and  p d (λx:i. ~ (q x))
    let t1 = app2(&p, c.clone(), Exp::lam(i(), truth));
    let t2 = app2(
        &p,
        d.clone(),
        Exp::lam(i(), app1(&not, app1(&q, Exp::var(1, i())))),
    );
    let x = Exp::var(1, Typ::fun(i(), i()));
    let y = Exp::var(2, Typ::fun(i(), i()));
    let eqns = vec![
        Eqn::new(app1(&x, t1.clone()), app1(&y, t2.clone())),
        Eqn::new(app1(&x, t2), app1(&y, t1)),
    ];
    let mut stream = pre_unify(&mut sig, &mut vars, eqns, None).unwrap();
    let pre = stream.next().expect("expected a postponed pre-unifier");
    assert_eq!(pre.residual.len(), 2);
    for eqn in &pre.residual {
        assert!(eqn.is_flex_flex());
        // the postponed equations live at base type
        assert_eq!(ty_of(&eqn.lhs, &mut TypeCtx::empty()).unwrap(), i());
    }
}

#[test]
fn rigid_rigid_clash_yields_empty_stream() {
    // unify(f2(a, b), f2(a, c)) with b ≠ c rigid
    let Consts { mut sig, c, d, f2, .. } = consts();
    let mut vars = VarPool::new(1);
    let lhs = app2(&f2, c.clone(), c.clone());
    let rhs = app2(&f2, c, d);
    let mut stream = pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, rhs)], None).unwrap();
    assert!(stream.next().is_none());
}

#[test]
fn applied_variable_imitates_before_projecting() {
    // unify(X a, c) with X : i > i. The imitation [X ↦ λy. c] succeeds
    // and is emitted first; the projection [X ↦ λy. y] leads to the
    // rigid clash a = c and dies.
    let Consts { mut sig, c, d, .. } = consts();
    let mut vars = VarPool::new(2);
    let x_ty = Typ::fun(i(), i());
    let lhs = app1(&Exp::var(1, x_ty.clone()), d.clone());
    let mut stream =
        pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, c.clone())], None).unwrap();
    let pre = stream.next().expect("expected the imitation");
    assert!(pre.residual.is_empty());
    assert_eq!(Exp::var(1, x_ty).subst(&pre.subst), Exp::lam(i(), c));
    assert!(stream.next().is_none());
}

#[test]
fn occurs_cycle_exhausts_without_emission() {
    // unify(X, f(X)): Bind is blocked by the occurs check and every
    // imitation recreates the problem one level down; the depth bound
    // cuts the branch.
    let Consts { mut sig, f, .. } = consts();
    let mut vars = VarPool::new(2);
    let lhs = Exp::var(1, i());
    let rhs = app1(&f, Exp::var(1, i()));
    let mut stream =
        pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, rhs)], Some(12)).unwrap();
    assert!(stream.next().is_none());
}

// Properties
//
//

#[test]
fn identical_inputs_unify_with_identity() {
    let Consts { mut sig, c, f, .. } = consts();
    let mut vars = VarPool::new(2);
    let t = app1(&f, c);
    let mut stream =
        pre_unify(&mut sig, &mut vars, vec![Eqn::new(t.clone(), t)], None).unwrap();
    let pre = stream.next().expect("expected the identity pre-unifier");
    assert!(pre.residual.is_empty());
    assert!(pre.subst.is_id());
}

#[test]
fn identical_variables_unify_with_identity() {
    let Consts { mut sig, .. } = consts();
    let mut vars = VarPool::new(2);
    let x = Exp::var(1, i());
    let mut stream =
        pre_unify(&mut sig, &mut vars, vec![Eqn::new(x.clone(), x)], None).unwrap();
    let pre = stream.next().expect("expected the identity pre-unifier");
    assert!(pre.residual.is_empty());
    assert!(pre.subst.is_id());
}

#[test]
fn first_order_unification_finds_the_mgu() {
    // unify(f2(X, g(Y)), f2(c, g(d)))  ⇒  [X ↦ c, Y ↦ d]
    let Consts { mut sig, c, d, f2, g, .. } = consts();
    let mut vars = VarPool::new(3);
    let lhs = app2(&f2, Exp::var(1, i()), app1(&g, Exp::var(2, i())));
    let rhs = app2(&f2, c.clone(), app1(&g, d.clone()));
    let mut stream = pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, rhs)], None).unwrap();
    let pre = stream.next().expect("expected the MGU");
    assert!(pre.residual.is_empty());
    assert_eq!(Exp::var(1, i()).subst(&pre.subst), c);
    assert_eq!(Exp::var(2, i()).subst(&pre.subst), d);
}

#[test]
fn emitted_substitution_equalises_both_sides() {
    let Consts { mut sig, c, d, .. } = consts();
    let mut vars = VarPool::new(2);
    let x_ty = Typ::fun(i(), i());
    let lhs = app1(&Exp::var(1, x_ty), d);
    let rhs = c;
    let eqn = Eqn::new(lhs.clone(), rhs.clone());
    let mut stream = pre_unify(&mut sig, &mut vars, vec![eqn], None).unwrap();
    let pre = stream.next().unwrap();
    let lhs_image = beta_normalize(&lhs.subst(&pre.subst));
    let rhs_image = beta_normalize(&rhs.subst(&pre.subst));
    assert_eq!(lhs_image, rhs_image);
    assert!(well_typed(&lhs_image));
}

#[test]
fn substitution_is_idempotent_after_closure() {
    let Consts { mut sig, c, d, .. } = consts();
    let mut vars = VarPool::new(2);
    let x_ty = Typ::fun(i(), i());
    let lhs = app1(&Exp::var(1, x_ty), d);
    let mut stream = pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, c)], None).unwrap();
    let pre = stream.next().unwrap();
    assert_eq!(pre.subst.compose(&pre.subst), pre.subst);
}

#[test]
fn search_is_deterministic_across_runs() {
    let run = || {
        let Consts { mut sig, c, d, .. } = consts();
        let mut vars = VarPool::new(2);
        let x_ty = Typ::fun(i(), i());
        let lhs = app1(&Exp::var(1, x_ty), d);
        let stream = pre_unify(&mut sig, &mut vars, vec![Eqn::new(lhs, c)], None).unwrap();
        stream.map(|pre| format!("{pre:?}")).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
