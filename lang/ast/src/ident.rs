use std::fmt;

use printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};

// Identifiers
//
//

/// A name as it occurs in the input problem. Identifiers are kept for
/// prettyprinting only and never participate in equality of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub id: String,
}

impl Ident {
    pub fn from_string(id: &str) -> Self {
        Ident { id: id.to_owned() }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Print for Ident {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(&self.id)
    }
}

// De Bruijn indices
//
//

/// A de Bruijn index, counting binders from the inside out, starting at 1.
///
/// Bound and free variables share this index space: an index that exceeds
/// the number of binders in scope refers to a free (meta) variable. The
/// distinction is therefore contextual and not recorded in the index itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Idx(pub usize);

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Print for Idx {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(format!("@{}", self.0))
    }
}

// Signature keys
//
//

/// An opaque key into the signature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymKey(pub u32);

impl fmt::Display for SymKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
