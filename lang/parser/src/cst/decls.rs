use miette_util::codespan::Span;

use crate::cst::exp::Formula;

/// A parsed TPTP problem file: an ordered sequence of include directives
/// and annotated formulas.
#[derive(Debug, Clone)]
pub struct Problem {
    pub inputs: Vec<Input>,
}

#[derive(Debug, Clone)]
pub enum Input {
    Include(Include),
    Formula(AnnotatedFormula),
}

/// `include('filename'[, [name, ...]]).`
#[derive(Debug, Clone)]
pub struct Include {
    pub span: Span,
    /// The file name with the surrounding quotes stripped
    pub path: String,
    /// Empty means all formulas are selected
    pub selection: Vec<String>,
}

/// `<lang>(name, role, formula[, annotations]).`
#[derive(Debug, Clone)]
pub struct AnnotatedFormula {
    pub span: Span,
    pub dialect: Dialect,
    pub name: String,
    pub role: Role,
    pub formula: Formula,
    pub annotations: Option<Annotations>,
}

/// The six TPTP dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Thf,
    Tff,
    Fof,
    Tcf,
    Cnf,
    Tpi,
}

impl Dialect {
    pub fn from_keyword(word: &str) -> Option<Dialect> {
        match word {
            "thf" => Some(Dialect::Thf),
            "tff" => Some(Dialect::Tff),
            "fof" => Some(Dialect::Fof),
            "tcf" => Some(Dialect::Tcf),
            "cnf" => Some(Dialect::Cnf),
            "tpi" => Some(Dialect::Tpi),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Dialect::Thf => "thf",
            Dialect::Tff => "tff",
            Dialect::Fof => "fof",
            Dialect::Tcf => "tcf",
            Dialect::Cnf => "cnf",
            Dialect::Tpi => "tpi",
        }
    }
}

/// Formula roles. Roles not distinguished by the reasoner are kept
/// verbatim in [Role::Other].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Axiom,
    Hypothesis,
    Definition,
    Assumption,
    Lemma,
    Theorem,
    Conjecture,
    NegatedConjecture,
    Plain,
    Type,
    Other(String),
}

impl Role {
    pub fn from_keyword(word: &str) -> Role {
        match word {
            "axiom" => Role::Axiom,
            "hypothesis" => Role::Hypothesis,
            "definition" => Role::Definition,
            "assumption" => Role::Assumption,
            "lemma" => Role::Lemma,
            "theorem" => Role::Theorem,
            "conjecture" => Role::Conjecture,
            "negated_conjecture" => Role::NegatedConjecture,
            "plain" => Role::Plain,
            "type" => Role::Type,
            other => Role::Other(other.to_owned()),
        }
    }
}

/// The optional `(source, [info, ...])` tail of an annotated formula.
/// Annotations are carried through but not interpreted.
#[derive(Debug, Clone)]
pub struct Annotations {
    pub source: Formula,
    pub info: Vec<Formula>,
}
