use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use ast::{LookupError, TypeError};

#[derive(Error, Diagnostic, Debug)]
pub enum LoweringError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeError),
    #[error("Unknown symbol `{name}`")]
    #[diagnostic(code("L-001"))]
    UnknownSymbol {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("`{name}` does not name a type")]
    #[diagnostic(code("L-002"))]
    UnknownType {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("A type expression cannot appear in term position")]
    #[diagnostic(code("L-003"))]
    MisplacedType {
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("This binder is not supported by the reasoner")]
    #[diagnostic(code("L-004"))]
    UnsupportedBinder {
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("A `type` formula must have the shape `constant : type`")]
    #[diagnostic(code("L-005"))]
    BadTyping {
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("A `definition` formula must have the shape `constant = body`")]
    #[diagnostic(code("L-006"))]
    BadDefinition {
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The defined word `{name}` is not interpreted by the reasoner")]
    #[diagnostic(code("L-007"))]
    UnknownDefined {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
}
