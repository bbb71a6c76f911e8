use miette::Diagnostic;
use thiserror::Error;

use ast::{LookupError, TypeError};

#[derive(Error, Diagnostic, Debug)]
pub enum UnifyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),
    #[error("The sides of a unification constraint have different types: {lhs} and {rhs}")]
    #[diagnostic(code("U-001"))]
    UnequalTypes { lhs: String, rhs: String },
    #[error("The flexible side of the constraint does not have a variable head")]
    #[diagnostic(code("U-002"))]
    NoFlexHead,
}
