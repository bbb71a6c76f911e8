use miette::Diagnostic;
use thiserror::Error;

use lowering::LoweringError;
use parser::ParseError;
use unifier::UnifyError;

use crate::szs::SzsStatus;

#[derive(Error, Diagnostic, Debug)]
pub enum DriverError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lowering(#[from] LoweringError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unify(#[from] UnifyError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] ast::TypeError),
    #[error("Cannot read `{path}`")]
    #[diagnostic(code("D-001"))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Circular include of `{path}`")]
    #[diagnostic(code("D-002"))]
    CircularInclude { path: String },
}

impl DriverError {
    /// The SZS status that describes this failure.
    pub fn szs_status(&self) -> SzsStatus {
        match self {
            DriverError::Parse(_) => SzsStatus::SyntaxError,
            DriverError::Lowering(LoweringError::Type(_)) => SzsStatus::TypeError,
            DriverError::Lowering(_) => SzsStatus::InputError,
            DriverError::Unify(_) | DriverError::Type(_) => SzsStatus::TypeError,
            DriverError::Io { .. } | DriverError::CircularInclude { .. } => {
                SzsStatus::InputError
            }
        }
    }
}
