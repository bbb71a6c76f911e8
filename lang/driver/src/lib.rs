mod blackboard;
mod problem;
mod result;
mod szs;

pub use blackboard::*;
pub use problem::*;
pub use result::*;
pub use szs::*;

use std::path::Path;

/// Options for one solver run.
#[derive(Debug, Clone)]
pub struct SolveOpts {
    /// Maximum search depth of the pre-unification driver
    pub max_depth: Option<usize>,
    /// How many pre-unifiers to pull per task
    pub limit: usize,
}

impl Default for SolveOpts {
    fn default() -> Self {
        SolveOpts { max_depth: None, limit: 1 }
    }
}

/// Load a problem, run the agents, and report the blackboard.
pub fn solve(path: &Path, opts: &SolveOpts) -> Result<Blackboard, DriverError> {
    let problem = load_problem(path)?;
    let mut board = Blackboard::new(problem);
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(PreprocessAgent),
        Box::new(PreUnifyAgent { max_depth: opts.max_depth, limit: opts.limit }),
    ];
    run_agents(&mut board, &agents)?;
    Ok(board)
}
