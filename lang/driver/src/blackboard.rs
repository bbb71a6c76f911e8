use log::{debug, info};
use printer::Print;

use ast::*;
use normalizer::{delta_expand, Normalize};
use unifier::{pre_unify, Eqn, PreUnifier, VarPool};

use crate::problem::Problem;
use crate::result::DriverError;
use crate::szs::SzsStatus;

/// The shared state the agents cooperate on: the clause store, the
/// unification tasks extracted from it, and their results.
///
/// The blackboard is single-threaded; agents run cooperatively and in a
/// fixed round-robin order until none of them makes progress.
pub struct Blackboard {
    pub signature: Signature,
    pub clauses: Vec<Clause>,
    pub tasks: Vec<UnificationTask>,
    pub preprocessed: bool,
}

/// An equality conjecture scheduled for pre-unification.
pub struct UnificationTask {
    pub clause_index: usize,
    pub eqn: Eqn,
    pub result: Option<Vec<PreUnifier>>,
}

impl Blackboard {
    pub fn new(problem: Problem) -> Blackboard {
        let Problem { signature, clauses, .. } = problem;
        Blackboard { signature, clauses, tasks: Vec::new(), preprocessed: false }
    }

    /// The verdict once every agent has finished.
    pub fn verdict(&self) -> SzsStatus {
        if self.tasks.is_empty() {
            return SzsStatus::Inappropriate;
        }
        let all_solved = self
            .tasks
            .iter()
            .all(|task| task.result.as_ref().is_some_and(|found| !found.is_empty()));
        if all_solved {
            SzsStatus::EquiSatisfiable
        } else {
            SzsStatus::GaveUp
        }
    }
}

/// An autonomous worker on the blackboard. `act` inspects the state and
/// either makes progress (returning `true`) or leaves it untouched.
pub trait Agent {
    fn name(&self) -> &'static str;

    fn act(&self, board: &mut Blackboard) -> Result<bool, DriverError>;
}

/// Run the agents round-robin until quiescence.
pub fn run_agents(board: &mut Blackboard, agents: &[Box<dyn Agent>]) -> Result<(), DriverError> {
    loop {
        let mut progressed = false;
        for agent in agents {
            if agent.act(board)? {
                debug!("agent {} made progress", agent.name());
                progressed = true;
            }
        }
        if !progressed {
            return Ok(());
        }
    }
}

// PreprocessAgent
//
//

/// Brings every clause into δβη-normal form and extracts the equality
/// conjectures as unification tasks.
pub struct PreprocessAgent;

impl Agent for PreprocessAgent {
    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn act(&self, board: &mut Blackboard) -> Result<bool, DriverError> {
        if board.preprocessed {
            return Ok(false);
        }
        for clause in &mut board.clauses {
            for lit in &mut clause.lits {
                let expanded = delta_expand(&lit.exp, &board.signature);
                lit.exp = expanded.normalize()?;
            }
        }
        let tasks: Vec<UnificationTask> = board
            .clauses
            .iter()
            .enumerate()
            .filter_map(|(clause_index, clause)| {
                let eqn = equality_conjecture(clause)?;
                Some(UnificationTask { clause_index, eqn, result: None })
            })
            .collect();
        info!("extracted {} unification tasks", tasks.len());
        board.tasks = tasks;
        board.preprocessed = true;
        Ok(true)
    }
}

/// The equation of a unit equality conjecture, if the clause is one.
fn equality_conjecture(clause: &Clause) -> Option<Eqn> {
    if !matches!(clause.origin, ClauseOrigin::Conjecture | ClauseOrigin::NegatedConjecture) {
        return None;
    }
    let [lit] = &clause.lits[..] else {
        return None;
    };
    let Exp::App(App { head, spine }) = &lit.exp else {
        return None;
    };
    let Exp::Sym(Sym { key, .. }) = &**head else {
        return None;
    };
    if *key != Signature::EQ {
        return None;
    }
    match &spine[..] {
        [SpineArg::Typ(_), SpineArg::Exp(lhs), SpineArg::Exp(rhs)] => {
            Some(Eqn::new((**lhs).clone(), (**rhs).clone()))
        }
        _ => None,
    }
}

// PreUnifyAgent
//
//

/// Runs the Huet driver on every open unification task, pulling at most
/// `limit` pre-unifiers per task.
pub struct PreUnifyAgent {
    pub max_depth: Option<usize>,
    pub limit: usize,
}

impl Agent for PreUnifyAgent {
    fn name(&self) -> &'static str {
        "pre-unify"
    }

    fn act(&self, board: &mut Blackboard) -> Result<bool, DriverError> {
        let mut progressed = false;
        for task in &mut board.tasks {
            if task.result.is_some() {
                continue;
            }
            // one attempt, one generator
            let mut vars = VarPool::new(1);
            let stream = pre_unify(
                &mut board.signature,
                &mut vars,
                vec![task.eqn.clone()],
                self.max_depth,
            )?;
            let found: Vec<PreUnifier> = stream.take(self.limit).collect();
            info!(
                "task {}: {} pre-unifier(s) for {}",
                task.clause_index,
                found.len(),
                task.eqn.print_to_string(None)
            );
            task.result = Some(found);
            progressed = true;
        }
        Ok(progressed)
    }
}
