use std::fs;
use std::path::PathBuf;

use miette::IntoDiagnostic;

#[derive(clap::Args)]
pub struct Args {
    /// The file to lex
    #[clap(value_parser)]
    file: PathBuf,
}

pub fn exec(args: Args) -> miette::Result<()> {
    let source = fs::read_to_string(&args.file).into_diagnostic()?;
    let tokens = parser::tokenize(&source)?;
    for spanned in tokens {
        println!(
            "{:>5}..{:<5} {:20} {}",
            spanned.span.start.to_usize(),
            spanned.span.end.to_usize(),
            format!("{:?}", spanned.token),
            spanned.text
        );
    }
    Ok(())
}
