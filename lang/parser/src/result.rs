use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use miette_util::codespan::Span;
use miette_util::ToMiette;

#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Unrecognised token `{token}`")]
    #[diagnostic(code("P-001"))]
    InvalidToken {
        token: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Expected {expected}, found `{actual}`")]
    #[diagnostic(code("P-002"))]
    UnexpectedToken {
        expected: String,
        actual: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Expected {expected}, found the end of the input")]
    #[diagnostic(code("P-003"))]
    UnexpectedEof { expected: String },
    #[error("`{word}` is not a TPTP input keyword")]
    #[diagnostic(code("P-004"), help("expected include, thf, tff, fof, tcf, cnf or tpi"))]
    UnknownKeyword {
        word: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl ParseError {
    pub fn invalid_token(token: &str, span: Span) -> ParseError {
        ParseError::InvalidToken { token: token.to_owned(), span: Some(span.to_miette()) }
    }

    pub fn unexpected(expected: &str, actual: &str, span: Span) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            actual: actual.to_owned(),
            span: Some(span.to_miette()),
        }
    }

    pub fn eof(expected: &str) -> ParseError {
        ParseError::UnexpectedEof { expected: expected.to_owned() }
    }
}
