use std::collections::VecDeque;

use log::{trace, warn};
use printer::Print;

use ast::*;
use normalizer::Normalize;

use crate::constraints::{compute_subst, Binding, Eqn, EqnClass};
use crate::fresh::VarPool;
use crate::result::UnifyError;
use crate::rules::{compatible_projections, imitate, project, Rule};
use crate::unify::{exhaust, Exhausted};

/// Nodes deeper than this are discarded; without the bound the stream of
/// configurations can be infinite.
pub const DEFAULT_MAX_DEPTH: usize = 60;

/// A substitution together with the postponed flex-flex equations. Sound,
/// but only a solved form once the residual is empty.
#[derive(Debug, Clone)]
pub struct PreUnifier {
    pub subst: Subst,
    pub residual: Vec<Eqn>,
}

impl Print for PreUnifier {
    fn print<'a>(
        &'a self,
        cfg: &printer::PrintCfg,
        alloc: &'a printer::Alloc<'a>,
    ) -> printer::Builder<'a> {
        let subst = self.subst.print(cfg, alloc);
        if self.residual.is_empty() {
            subst
        } else {
            subst.append(" ⊣ ").append(self.residual.print(cfg, alloc))
        }
    }
}

/// One node of the nondeterministic search space. Configurations are
/// immutable; expansion produces fresh ones.
#[derive(Debug, Clone)]
pub struct Config {
    pub unsolved: Vec<Eqn>,
    pub solved: Vec<Binding>,
    pub result: Option<PreUnifier>,
    pub terminal: bool,
    pub depth: usize,
}

impl Config {
    fn initial(unsolved: Vec<Eqn>) -> Config {
        Config { unsolved, solved: Vec::new(), result: None, terminal: false, depth: 0 }
    }

    fn child(unsolved: Vec<Eqn>, solved: Vec<Binding>, depth: usize) -> Config {
        Config { unsolved, solved, result: None, terminal: false, depth }
    }

    fn done(result: PreUnifier, depth: usize) -> Config {
        Config {
            unsolved: Vec::new(),
            solved: Vec::new(),
            result: Some(result),
            terminal: true,
            depth,
        }
    }
}

/// The lazy stream of pre-unifiers for a constraint set.
///
/// The search is breadth-first: one configuration is expanded per pull,
/// children are appended at the back of the queue, and the emission order
/// is therefore deterministic given the input and the fresh-variable
/// pool. Dropping the iterator cancels the search.
pub struct PreUnifiers<'a> {
    queue: VecDeque<Config>,
    sig: &'a mut Signature,
    vars: &'a mut VarPool,
    max_depth: usize,
}

/// Start a pre-unification attempt for the given constraints.
///
/// Both sides of every constraint must have the same type; the
/// constraints are brought into βη-normal form before the initial
/// configuration is enqueued. The fresh-variable pool must be private to
/// this attempt and is primed past every free variable in use.
pub fn pre_unify<'a>(
    sig: &'a mut Signature,
    vars: &'a mut VarPool,
    constraints: Vec<Eqn>,
    max_depth: Option<usize>,
) -> Result<PreUnifiers<'a>, UnifyError> {
    let mut normalized = Vec::with_capacity(constraints.len());
    for eqn in &constraints {
        let lhs_ty = ty_of(&eqn.lhs, &mut TypeCtx::empty())?;
        let rhs_ty = ty_of(&eqn.rhs, &mut TypeCtx::empty())?;
        if lhs_ty != rhs_ty {
            return Err(UnifyError::UnequalTypes {
                lhs: lhs_ty.print_to_string(None),
                rhs: rhs_ty.print_to_string(None),
            });
        }
        for idx in eqn.lhs.free_vars().iter().chain(eqn.rhs.free_vars().iter()) {
            vars.ensure_above(idx.0);
        }
        normalized.push(Eqn::new(eqn.lhs.normalize()?, eqn.rhs.normalize()?));
    }
    let mut queue = VecDeque::new();
    queue.push_back(Config::initial(normalized));
    Ok(PreUnifiers { queue, sig, vars, max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH) })
}

impl Iterator for PreUnifiers<'_> {
    type Item = PreUnifier;

    fn next(&mut self) -> Option<PreUnifier> {
        while let Some(config) = self.queue.pop_front() {
            if config.terminal {
                return config.result;
            }
            let Config { unsolved, solved, depth, .. } = config;
            let Exhausted { unsolved, solved } = exhaust(unsolved, solved, self.sig);

            if unsolved.is_empty() {
                // A solved configuration; its continuation goes to the
                // front so that the emission order tracks the queue order.
                let result = PreUnifier { subst: compute_subst(&solved), residual: Vec::new() };
                self.queue.push_front(Config::done(result, depth));
                continue;
            }

            match unsolved[0].classify() {
                EqnClass::RigidRigid => {
                    trace!("dead branch at {}", unsolved[0].print_to_string(None));
                    continue;
                }
                EqnClass::FlexFlex => {
                    // The sort invariant guarantees that every remaining
                    // equation is flex-flex; they are postponed.
                    let result =
                        PreUnifier { subst: compute_subst(&solved), residual: unsolved };
                    self.queue.push_front(Config::done(result, depth));
                    continue;
                }
                EqnClass::FlexRigid => {
                    if depth + 1 > self.max_depth {
                        trace!("depth cut at {depth}");
                        continue;
                    }
                    let head = &unsolved[0];
                    let mut bindings = Vec::new();
                    if Rule::Imitate.can_apply(head) {
                        match imitate(head, self.vars) {
                            Ok(eqn) => bindings.push(eqn),
                            Err(err) => warn!("imitation failed: {err}"),
                        }
                    }
                    for param in compatible_projections(head) {
                        match project(head, param, self.vars) {
                            Ok(eqn) => bindings.push(eqn),
                            Err(err) => warn!("projection failed: {err}"),
                        }
                    }
                    for binding_eqn in bindings {
                        let mut child = Vec::with_capacity(unsolved.len() + 1);
                        child.push(binding_eqn);
                        child.extend(unsolved.iter().cloned());
                        self.queue.push_back(Config::child(child, solved.clone(), depth + 1));
                    }
                    continue;
                }
            }
        }
        None
    }
}
