use pretty::DocAllocator;
use printer::{Alloc, Builder, Print, PrintCfg};

use crate::exp::Exp;

/// Where a clause entered the search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseOrigin {
    Axiom,
    Conjecture,
    NegatedConjecture,
    Derived,
}

/// A boolean-typed term together with a polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub exp: Exp,
    pub positive: bool,
}

impl Literal {
    pub fn positive(exp: Exp) -> Literal {
        Literal { exp, positive: true }
    }

    pub fn negative(exp: Exp) -> Literal {
        Literal { exp, positive: false }
    }

    pub fn flip(self) -> Literal {
        Literal { positive: !self.positive, ..self }
    }
}

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub lits: Vec<Literal>,
    pub origin: ClauseOrigin,
}

impl Clause {
    pub fn unit(lit: Literal, origin: ClauseOrigin) -> Clause {
        Clause { lits: vec![lit], origin }
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl Print for Literal {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if self.positive {
            self.exp.print(cfg, alloc)
        } else {
            alloc.text("~ ").append(self.exp.print(cfg, alloc))
        }
    }
}

impl Print for Clause {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if self.lits.is_empty() {
            return alloc.text("$false");
        }
        let sep = alloc.text(" | ");
        alloc.intersperse(self.lits.iter().map(|lit| lit.print(cfg, alloc)), sep)
    }
}
