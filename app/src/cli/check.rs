use std::path::PathBuf;

use ast::well_typed;
use driver::{load_problem, szs_line, SzsStatus};

#[derive(clap::Args)]
pub struct Args {
    /// The TPTP problem file
    #[clap(value_parser)]
    file: PathBuf,
}

pub fn exec(args: Args) -> miette::Result<()> {
    let name = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let problem = match load_problem(&args.file) {
        Ok(problem) => problem,
        Err(err) => {
            println!("{}", szs_line(err.szs_status(), &name));
            return Err(err.into());
        }
    };
    let mut bad = 0;
    for clause in &problem.clauses {
        for lit in &clause.lits {
            if !well_typed(&lit.exp) {
                bad += 1;
            }
        }
    }
    if bad > 0 {
        println!("{}", szs_line(SzsStatus::TypeError, &name));
        miette::bail!("{bad} ill-typed literal(s)");
    }
    println!(
        "% {}: {} clause(s), signature of {} symbol(s), all literals well-typed",
        name,
        problem.clauses.len(),
        problem.signature.iter().count()
    );
    Ok(())
}
