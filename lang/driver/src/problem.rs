use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use ast::{Clause, HashSet, Signature};
use lowering::lower_statement;
use parser::cst::{AnnotatedFormula, Input};
use parser::parse_problem;

use crate::result::DriverError;

/// A fully loaded problem: the statements of the main file and all its
/// includes, lowered in order against one signature.
#[derive(Debug)]
pub struct Problem {
    pub name: String,
    pub signature: Signature,
    pub clauses: Vec<Clause>,
}

/// Load a problem file, resolving `include` directives relative to the
/// including file. A selection list on an include keeps only the named
/// formulas of the included file.
pub fn load_problem(path: &Path) -> Result<Problem, DriverError> {
    let mut statements = Vec::new();
    let mut seen = HashSet::default();
    collect(path, None, &mut seen, &mut statements)?;

    let mut signature = Signature::new();
    let mut clauses = Vec::new();
    for statement in &statements {
        if let Some(clause) = lower_statement(statement, &mut signature)? {
            clauses.push(clause);
        }
    }
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("loaded {} statements from {}", statements.len(), path.display());
    Ok(Problem { name, signature, clauses })
}

fn collect(
    path: &Path,
    selection: Option<&[String]>,
    seen: &mut HashSet<PathBuf>,
    out: &mut Vec<AnnotatedFormula>,
) -> Result<(), DriverError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !seen.insert(canonical) {
        return Err(DriverError::CircularInclude { path: path.display().to_string() });
    }
    let source = fs::read_to_string(path)
        .map_err(|source| DriverError::Io { path: path.display().to_string(), source })?;
    let parsed = parse_problem(&source)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for input in parsed.inputs {
        match input {
            Input::Include(include) => {
                let nested = base.join(&include.path);
                let nested_selection =
                    if include.selection.is_empty() { None } else { Some(&include.selection[..]) };
                collect(&nested, nested_selection, seen, out)?;
            }
            Input::Formula(formula) => {
                if let Some(names) = selection {
                    if !names.iter().any(|name| *name == formula.name) {
                        continue;
                    }
                }
                out.push(formula);
            }
        }
    }
    Ok(())
}
