use miette::Diagnostic;
use thiserror::Error;

use crate::exp::Exp;
use crate::ident::{Ident, SymKey};
use crate::kind::Kind;
use crate::typ::Typ;
use crate::HashMap;

#[derive(Error, Diagnostic, Debug)]
pub enum LookupError {
    #[error("Undefined symbol {name}")]
    #[diagnostic(code("S-001"))]
    UndefinedSymbol { name: String },
    #[error("Unknown signature key {key}")]
    #[diagnostic(code("S-002"))]
    UnknownKey { key: u32 },
    #[error("Symbol {name} is already declared")]
    #[diagnostic(code("S-003"))]
    AlreadyDeclared { name: String },
}

/// The role of a symbol in the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymKind {
    /// A base type or type constructor
    TypeConstructor,
    /// A term constant without interpretation
    Uninterpreted,
    /// A term constant with an unfolding definition
    Defined,
    /// A built-in constant seeded at construction
    Fixed,
}

#[derive(Debug, Clone)]
pub struct SymEntry {
    pub name: Ident,
    pub kind: SymKind,
    /// The type of a term-level constant
    pub ty: Option<Typ>,
    /// The kind of a type constructor
    pub ty_kind: Option<Kind>,
    /// The unfolding of a [SymKind::Defined] constant
    pub definition: Option<Exp>,
}

/// The signature table: a registry of all constants known to the prover,
/// addressed by opaque keys. Consulted read-only during normalisation and
/// binding construction; extended when the input declares symbols and when
/// unification introduces Skolem constants.
#[derive(Debug, Clone)]
pub struct Signature {
    entries: Vec<SymEntry>,
    by_name: HashMap<String, SymKey>,
    skolem_count: usize,
}

impl Signature {
    // Keys of the fixed initial entries.
    pub const O: SymKey = SymKey(0);
    pub const I: SymKey = SymKey(1);
    pub const TRUE: SymKey = SymKey(2);
    pub const FALSE: SymKey = SymKey(3);
    pub const NOT: SymKey = SymKey(4);
    pub const AND: SymKey = SymKey(5);
    pub const OR: SymKey = SymKey(6);
    pub const IMPL: SymKey = SymKey(7);
    pub const IFF: SymKey = SymKey(8);
    pub const EQ: SymKey = SymKey(9);
    pub const FORALL: SymKey = SymKey(10);
    pub const EXISTS: SymKey = SymKey(11);

    /// A signature containing only the fixed entries: the base types of
    /// object truth and individuals, and the logical constants.
    pub fn new() -> Signature {
        let mut sig = Signature {
            entries: Vec::new(),
            by_name: HashMap::default(),
            skolem_count: 0,
        };
        let o = || Typ::Base(Self::O);
        let binary = || Typ::fun_from([o(), o()], o());
        // !> '1 > '1 > $o
        let eq_ty = Typ::Forall(Box::new(Typ::fun_from([Typ::Var(1), Typ::Var(1)], o())));
        // !> ('1 > $o) > $o
        let quant_ty =
            Typ::Forall(Box::new(Typ::fun(Typ::fun(Typ::Var(1), o()), o())));

        sig.push_fixed_type("$o", Kind::Star);
        sig.push_fixed_type("$i", Kind::Star);
        sig.push_fixed("$true", o());
        sig.push_fixed("$false", o());
        sig.push_fixed("~", Typ::fun(o(), o()));
        sig.push_fixed("&", binary());
        sig.push_fixed("|", binary());
        sig.push_fixed("=>", binary());
        sig.push_fixed("<=>", binary());
        sig.push_fixed("=", eq_ty);
        sig.push_fixed("!!", quant_ty.clone());
        sig.push_fixed("??", quant_ty);
        sig
    }

    fn push(&mut self, entry: SymEntry) -> SymKey {
        let key = SymKey(self.entries.len() as u32);
        self.by_name.insert(entry.name.id.clone(), key);
        self.entries.push(entry);
        key
    }

    fn push_fixed(&mut self, name: &str, ty: Typ) -> SymKey {
        self.push(SymEntry {
            name: Ident::from_string(name),
            kind: SymKind::Fixed,
            ty: Some(ty),
            ty_kind: None,
            definition: None,
        })
    }

    fn push_fixed_type(&mut self, name: &str, kind: Kind) -> SymKey {
        self.push(SymEntry {
            name: Ident::from_string(name),
            kind: SymKind::TypeConstructor,
            ty: None,
            ty_kind: Some(kind),
            definition: None,
        })
    }

    pub fn lookup(&self, key: SymKey) -> Result<&SymEntry, LookupError> {
        self.entries
            .get(key.0 as usize)
            .ok_or(LookupError::UnknownKey { key: key.0 })
    }

    pub fn key_of(&self, name: &str) -> Option<SymKey> {
        self.by_name.get(name).copied()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The type of a term-level constant.
    pub fn typ_of(&self, key: SymKey) -> Result<&Typ, LookupError> {
        let entry = self.lookup(key)?;
        entry.ty.as_ref().ok_or(LookupError::UndefinedSymbol {
            name: entry.name.id.clone(),
        })
    }

    /// The unfolding of a defined constant, if any.
    pub fn definition(&self, key: SymKey) -> Option<&Exp> {
        self.entries.get(key.0 as usize).and_then(|entry| entry.definition.as_ref())
    }

    fn declare(&mut self, entry: SymEntry) -> Result<SymKey, LookupError> {
        if self.exists(&entry.name.id) {
            return Err(LookupError::AlreadyDeclared { name: entry.name.id });
        }
        Ok(self.push(entry))
    }

    pub fn add_type_constructor(
        &mut self,
        name: Ident,
        kind: Kind,
    ) -> Result<SymKey, LookupError> {
        self.declare(SymEntry {
            name,
            kind: SymKind::TypeConstructor,
            ty: None,
            ty_kind: Some(kind),
            definition: None,
        })
    }

    pub fn add_uninterpreted(&mut self, name: Ident, ty: Typ) -> Result<SymKey, LookupError> {
        self.declare(SymEntry {
            name,
            kind: SymKind::Uninterpreted,
            ty: Some(ty),
            ty_kind: None,
            definition: None,
        })
    }

    pub fn add_defined(
        &mut self,
        name: Ident,
        ty: Typ,
        definition: Exp,
    ) -> Result<SymKey, LookupError> {
        self.declare(SymEntry {
            name,
            kind: SymKind::Defined,
            ty: Some(ty),
            ty_kind: None,
            definition: Some(definition),
        })
    }

    /// Introduce a fresh Skolem constant of the given type. The generated
    /// name is guaranteed not to collide with any declared symbol.
    pub fn fresh_skolem(&mut self, ty: Typ) -> SymKey {
        loop {
            self.skolem_count += 1;
            let name = format!("sk{}", self.skolem_count);
            if !self.exists(&name) {
                return self.push(SymEntry {
                    name: Ident::from_string(&name),
                    kind: SymKind::Uninterpreted,
                    ty: Some(ty),
                    ty_kind: None,
                    definition: None,
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymKey, &SymEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (SymKey(i as u32), e))
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature::new()
    }
}
