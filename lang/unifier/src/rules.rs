use ast::*;
use normalizer::{beta_normalize, eta_expand};
use printer::Print;

use crate::constraints::{Binding, Eqn, EqnClass};
use crate::fresh::VarPool;
use crate::result::UnifyError;

/// The transformation rules of the pre-unification calculus.
///
/// Every rule is a tagged variant with a total, side-effect-free
/// [Rule::can_apply] predicate; the corresponding transformations are the
/// free-standing functions in this module. A `false` answer means the
/// rule does not fire on this equation, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Drop a trivial equation
    Delete,
    /// Split identical rigid applications pointwise
    Decompose,
    /// Eliminate a bare variable
    Bind,
    /// Apply both sides of a functional equation to a fresh Skolem term
    Func,
    /// Approximate a flexible head by the rigid head constant
    Imitate,
    /// Approximate a flexible head by one of its bound parameters
    Project(usize),
}

impl Rule {
    pub fn can_apply(&self, eqn: &Eqn) -> bool {
        match self {
            Rule::Delete => eqn.lhs.alpha_eq(&eqn.rhs),
            Rule::Decompose => can_decompose(eqn),
            Rule::Bind => can_bind(eqn),
            // In η-long form a term has functional type iff it is an
            // abstraction.
            Rule::Func => {
                matches!(&eqn.lhs, Exp::Lam(_)) && matches!(&eqn.rhs, Exp::Lam(_))
            }
            Rule::Imitate => can_imitate(eqn),
            Rule::Project(param) => compatible_projections(eqn).contains(param),
        }
    }
}

fn can_decompose(eqn: &Eqn) -> bool {
    let (Exp::App(lhs), Exp::App(rhs)) = (&eqn.lhs, &eqn.rhs) else {
        return false;
    };
    if eqn.lhs.is_flex() || eqn.rhs.is_flex() {
        return false;
    }
    lhs.head == rhs.head
        && lhs.spine.len() == rhs.spine.len()
        && lhs.spine.iter().zip(rhs.spine.iter()).all(|pair| match pair {
            (SpineArg::Exp(_), SpineArg::Exp(_)) => true,
            // Type arguments generate no equations and must agree
            (SpineArg::Typ(s), SpineArg::Typ(t)) => s == t,
            _ => false,
        })
}

/// Bind requires a *bare* variable on one side, not merely a flexible
/// head: `X = t` can be solved outright, whereas `X a = t` needs a
/// partial binding first.
fn can_bind(eqn: &Eqn) -> bool {
    match (eqn.lhs.is_bare_var(), eqn.rhs.is_bare_var()) {
        (Some(var), _) => !eqn.rhs.occurs(var.idx),
        (None, Some(var)) => !eqn.lhs.occurs(var.idx),
        (None, None) => false,
    }
}

fn can_imitate(eqn: &Eqn) -> bool {
    if eqn.classify() != EqnClass::FlexRigid {
        return false;
    }
    let rigid = if eqn.lhs.is_flex() { &eqn.rhs } else { &eqn.lhs };
    // Only a constant head can be imitated. A bound variable cannot
    // appear as a rigid head here: equations at this stage carry no
    // λ-prefix, so a variable head is by definition free.
    matches!(rigid.head(), Exp::Sym(_) | Exp::Obj(_))
}

/// The parameter positions (1-based) of the flexible head whose result
/// type matches the result type of the head itself. Empty unless the
/// equation is flex-rigid.
pub fn compatible_projections(eqn: &Eqn) -> Vec<usize> {
    if eqn.classify() != EqnClass::FlexRigid {
        return Vec::new();
    }
    let flex = if eqn.lhs.is_flex() { &eqn.lhs } else { &eqn.rhs };
    let Exp::Var(var) = flex.head() else {
        return Vec::new();
    };
    let beta = var.ty.result().clone();
    var.ty
        .args()
        .iter()
        .enumerate()
        .filter(|(_, alpha)| *alpha.result() == beta)
        .map(|(j, _)| j + 1)
        .collect()
}

// Transformations
//
//

/// Pointwise equations for the term arguments of two identical rigid
/// applications. Type arguments are checked by [Rule::can_apply] and
/// generate nothing.
pub fn decompose(eqn: &Eqn) -> Vec<Eqn> {
    let (Exp::App(lhs), Exp::App(rhs)) = (&eqn.lhs, &eqn.rhs) else {
        return Vec::new();
    };
    lhs.spine
        .iter()
        .zip(rhs.spine.iter())
        .filter_map(|pair| match pair {
            (SpineArg::Exp(l), SpineArg::Exp(r)) => {
                Some(Eqn::new((**l).clone(), (**r).clone()))
            }
            _ => None,
        })
        .collect()
}

/// Turn a bare-variable equation into a solved pair.
pub fn bind(eqn: Eqn) -> Binding {
    let Eqn { lhs, rhs } = eqn.oriented();
    let Exp::Var(var) = lhs else {
        unreachable!("bind fired on an equation without a bare variable side")
    };
    Binding { var, exp: rhs }
}

/// Functional extensionality: apply both λ-prefixed sides to fresh Skolem
/// constants built from the binder types, then β-normalise. The equation
/// drops to the common result type.
pub fn func(eqn: &Eqn, sig: &mut Signature) -> Eqn {
    let (binders, _) = eqn.lhs.strip_lams();
    let skolems: Vec<SpineArg> = binders
        .into_iter()
        .map(|ty| {
            let key = sig.fresh_skolem(ty.clone());
            SpineArg::exp(Exp::sym(key, ty.clone()))
        })
        .collect();
    let apply = |side: &Exp| beta_normalize(&Exp::app(side.clone(), skolems.clone()));
    Eqn::new(apply(&eqn.lhs), apply(&eqn.rhs))
}

/// The imitation binding for a flex-rigid equation: the flexible head is
/// equated with a λ-skeleton whose head copies the rigid constant and
/// whose arguments are fresh variables applied to all bound parameters.
pub fn imitate(eqn: &Eqn, vars: &mut VarPool) -> Result<Eqn, UnifyError> {
    let Eqn { lhs: flex, rhs: rigid } = eqn.clone().oriented();
    let Exp::Var(head_var) = flex.head().clone() else {
        return Err(UnifyError::NoFlexHead);
    };
    let (alphas, _) = head_var.ty.decompose();

    // The rigid skeleton: the head constant together with its leading
    // type arguments, and the domains of its term arguments.
    let rigid_head = rigid.head().clone();
    let head_ty = match &rigid_head {
        Exp::Sym(s) => s.ty.clone(),
        Exp::Obj(o) => o.ty.clone(),
        _ => return Err(UnifyError::NoFlexHead),
    };
    let (ty_args, exp_arg_count) = match &rigid {
        Exp::App(App { spine, .. }) => {
            let ty_args: Vec<Typ> = spine
                .iter()
                .map_while(|arg| match arg {
                    SpineArg::Typ(ty) => Some(ty.clone()),
                    SpineArg::Exp(_) => None,
                })
                .collect();
            let exp_args = spine.iter().filter(|arg| matches!(arg, SpineArg::Exp(_))).count();
            (ty_args, exp_args)
        }
        _ => (Vec::new(), 0),
    };
    let mut inst_ty = head_ty;
    for ty_arg in &ty_args {
        inst_ty = inst_ty.instantiate(ty_arg).ok_or_else(|| TypeError::NotPolymorphic {
            actual: inst_ty.print_to_string(None),
        })?;
    }
    let gammas: Vec<Typ> =
        inst_ty.args().into_iter().take(exp_arg_count).cloned().collect();

    let skeleton_head =
        Exp::app(rigid_head, ty_args.into_iter().map(SpineArg::Typ).collect());
    let binding = partial_binding(&alphas, skeleton_head, &gammas, vars)?;
    Ok(Eqn::new(Exp::Var(head_var), binding))
}

/// The projection binding selecting the `param`-th bound parameter
/// (1-based) of the flexible head.
pub fn project(eqn: &Eqn, param: usize, vars: &mut VarPool) -> Result<Eqn, UnifyError> {
    let Eqn { lhs: flex, .. } = eqn.clone().oriented();
    let Exp::Var(head_var) = flex.head().clone() else {
        return Err(UnifyError::NoFlexHead);
    };
    let (alphas, _) = head_var.ty.decompose();
    let alpha = alphas[param - 1].clone();
    let (deltas, _) = alpha.decompose();
    // y_param as it occurs underneath the full λ-prefix
    let projected = Exp::var(alphas.len() - param + 1, alpha);
    let binding = partial_binding(&alphas, projected, &deltas, vars)?;
    Ok(Eqn::new(Exp::Var(head_var), binding))
}

/// Build `λy_1:α_1. … λy_n:α_n. head (X_1 ȳ) … (X_m ȳ)` where each `X_i`
/// is a fresh variable of type `α_1 > … > α_n > γ_i`. The binding is
/// η-expanded before use.
fn partial_binding(
    alphas: &[Typ],
    head: Exp,
    gammas: &[Typ],
    vars: &mut VarPool,
) -> Result<Exp, UnifyError> {
    let n = alphas.len();
    let params: Vec<Exp> = alphas
        .iter()
        .enumerate()
        .map(|(j, ty)| Exp::var(n - j, ty.clone()))
        .collect();
    let spine: Vec<SpineArg> = gammas
        .iter()
        .map(|gamma| {
            let ty = Typ::fun_from(alphas.to_vec(), gamma.clone());
            let fresh = vars.fresh(ty.clone());
            // Underneath the n binders the fresh variable's index grows
            // by the binder depth.
            let occurrence = Exp::var(fresh.0 + n, ty);
            SpineArg::exp(Exp::app(
                occurrence,
                params.iter().cloned().map(SpineArg::exp).collect(),
            ))
        })
        .collect();
    let mut body = Exp::app(head, spine);
    for ty in alphas.iter().rev() {
        body = Exp::lam(ty.clone(), body);
    }
    Ok(eta_expand(&body, &mut TypeCtx::empty())?)
}
