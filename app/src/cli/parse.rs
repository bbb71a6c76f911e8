use std::fs;
use std::path::PathBuf;

use miette::{IntoDiagnostic, NamedSource};
use parser::cst::Input;

#[derive(clap::Args)]
pub struct Args {
    /// The TPTP file to parse
    #[clap(value_parser)]
    file: PathBuf,
}

pub fn exec(args: Args) -> miette::Result<()> {
    let source = fs::read_to_string(&args.file).into_diagnostic()?;
    let problem = parser::parse_problem(&source).map_err(|err| {
        miette::Report::new(err)
            .with_source_code(NamedSource::new(args.file.display().to_string(), source.clone()))
    })?;
    for input in &problem.inputs {
        match input {
            Input::Include(include) => {
                println!("include  {}", include.path);
            }
            Input::Formula(formula) => {
                println!(
                    "{:3}  {:18}  {:?}",
                    formula.dialect.keyword(),
                    formula.name,
                    formula.role
                );
            }
        }
    }
    println!("% {} input(s)", problem.inputs.len());
    Ok(())
}
