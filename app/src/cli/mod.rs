use clap::{Parser, Subcommand};

mod check;
mod lex;
mod parse;
mod solve;

pub fn exec() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize the logger based on the flags
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None).format_level(false).format_target(false);
    if cli.trace {
        builder.filter_level(log::LevelFilter::Trace);
    } else if cli.debug {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();

    use Command::*;
    match cli.command {
        Solve(args) => solve::exec(args),
        Parse(args) => parse::exec(args),
        Check(args) => check::exec(args),
        Lex(args) => lex::exec(args),
    }
}

#[derive(Parser)]
#[clap(version, author, about, long_about = None)]
struct Cli {
    /// Enable trace logging
    #[clap(long)]
    trace: bool,
    /// Enable debug logging
    #[clap(long)]
    debug: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pre-unification on the conjectures of a TPTP problem
    Solve(solve::Args),
    /// Parse a TPTP problem and print its statements
    Parse(parse::Args),
    /// Load a TPTP problem and check that every clause is well-typed
    Check(check::Args),
    /// Lex a file and print the resulting token stream for debugging
    #[clap(hide(true))]
    Lex(lex::Args),
}
