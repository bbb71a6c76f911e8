use std::path::PathBuf;

use driver::{solve, szs_line, SolveOpts};
use printer::Print;

#[derive(clap::Args)]
pub struct Args {
    /// The TPTP problem file
    #[clap(value_parser)]
    file: PathBuf,

    /// Maximum search depth of the pre-unification driver
    #[clap(long)]
    depth: Option<usize>,

    /// How many pre-unifiers to report per conjecture
    #[clap(long, default_value_t = 1)]
    limit: usize,
}

pub fn exec(args: Args) -> miette::Result<()> {
    let name = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let opts = SolveOpts { max_depth: args.depth, limit: args.limit };
    let board = match solve(&args.file, &opts) {
        Ok(board) => board,
        Err(err) => {
            println!("{}", szs_line(err.szs_status(), &name));
            return Err(err.into());
        }
    };
    println!("{}", szs_line(board.verdict(), &name));
    for task in &board.tasks {
        let Some(found) = &task.result else { continue };
        for (i, pre) in found.iter().enumerate() {
            println!("% pre-unifier {i}: {}", pre.print_to_string(None));
        }
    }
    Ok(())
}
