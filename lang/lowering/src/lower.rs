use log::debug;

use ast::*;
use miette_util::ToMiette;
use parser::cst;

use crate::result::LoweringError;

/// Lower one annotated formula against the signature.
///
/// Typing and definition roles extend the signature and produce no
/// clause; every other role produces a clause whose origin reflects the
/// role. TPI inputs are administrative and ignored.
pub fn lower_statement(
    af: &cst::AnnotatedFormula,
    sig: &mut Signature,
) -> Result<Option<Clause>, LoweringError> {
    if af.dialect == cst::Dialect::Tpi {
        debug!("ignoring tpi input {}", af.name);
        return Ok(None);
    }
    match &af.role {
        cst::Role::Type => {
            lower_typing(&af.formula, sig)?;
            Ok(None)
        }
        cst::Role::Definition => {
            lower_definition(&af.formula, sig)?;
            Ok(None)
        }
        role => {
            let origin = match role {
                cst::Role::Conjecture => ClauseOrigin::Conjecture,
                cst::Role::NegatedConjecture => ClauseOrigin::NegatedConjecture,
                _ => ClauseOrigin::Axiom,
            };
            let mut lowerer = Lowerer::new(sig);
            let clause = if af.dialect == cst::Dialect::Cnf {
                lowerer.clause(&af.formula, origin)?
            } else {
                let exp = lowerer.formula(&af.formula)?;
                Clause::unit(Literal::positive(exp), origin)
            };
            Ok(Some(clause))
        }
    }
}

/// `c : τ` — a typing into the signature. A declared type of (an arrow
/// into) `$tType` introduces a type constructor, everything else an
/// uninterpreted constant.
fn lower_typing(formula: &cst::Formula, sig: &mut Signature) -> Result<(), LoweringError> {
    let cst::Formula::Typed(cst::Typed { exp, ty, span }) = formula else {
        return Err(LoweringError::BadTyping { span: Some(formula.span().to_miette()) });
    };
    let cst::Formula::Ident(cst::Ident { name, .. }) = &**exp else {
        return Err(LoweringError::BadTyping { span: Some(span.to_miette()) });
    };
    if let Some(arity) = ttype_arity(ty) {
        sig.add_type_constructor(Ident::from_string(name), Kind::arrow(arity))?;
        return Ok(());
    }
    let mut lowerer = Lowerer::new(sig);
    let ty = lowerer.typ(ty)?;
    sig.add_uninterpreted(Ident::from_string(name), ty)?;
    Ok(())
}

/// `c = body` — a defined constant with an unfolding.
fn lower_definition(formula: &cst::Formula, sig: &mut Signature) -> Result<(), LoweringError> {
    let cst::Formula::Binary(cst::Binary { op: cst::BinOp::Equals, lhs, rhs, span }) = formula
    else {
        return Err(LoweringError::BadDefinition { span: Some(formula.span().to_miette()) });
    };
    let cst::Formula::Ident(cst::Ident { name, .. }) = &**lhs else {
        return Err(LoweringError::BadDefinition { span: Some(span.to_miette()) });
    };
    let mut lowerer = Lowerer::new(sig);
    let body = lowerer.formula(rhs)?;
    let ty = ty_of(&body, &mut TypeCtx::empty())?;
    sig.add_defined(Ident::from_string(name), ty, body)?;
    Ok(())
}

/// The arity of a `$tType`-valued declaration, if it is one.
fn ttype_arity(ty: &cst::Formula) -> Option<usize> {
    match ty {
        cst::Formula::Defined(cst::Defined { name, .. }) if name == "$tType" => Some(0),
        cst::Formula::Binary(cst::Binary { op: cst::BinOp::Arrow, lhs, rhs, .. }) => {
            match (ttype_arity(lhs), ttype_arity(rhs)) {
                (Some(0), Some(n)) => Some(n + 1),
                _ => None,
            }
        }
        _ => None,
    }
}

/// The working state for lowering one statement: the binder stack, the
/// type-variable stack and the implicitly quantified free variables of
/// the statement.
struct Lowerer<'a> {
    sig: &'a mut Signature,
    /// λ- and quantifier binders, innermost last
    binders: Vec<(String, Typ)>,
    /// type-variable binders, innermost last
    ty_binders: Vec<String>,
    /// implicitly quantified variables (CNF/FOF convention), with their
    /// absolute indices assigned in order of first occurrence
    free: Vec<(String, Typ)>,
    /// whether the current position is boolean (formula) or individual
    /// (term); decides the result type of implicit FOF declarations
    bool_pos: bool,
}

impl<'a> Lowerer<'a> {
    fn new(sig: &'a mut Signature) -> Lowerer<'a> {
        Lowerer {
            sig,
            binders: Vec::new(),
            ty_binders: Vec::new(),
            free: Vec::new(),
            bool_pos: true,
        }
    }

    fn with_pos<T>(&mut self, pos: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.bool_pos;
        self.bool_pos = pos;
        let result = f(self);
        self.bool_pos = saved;
        result
    }

    /// A CNF clause: `|`-separated literals with `~` polarity.
    fn clause(
        &mut self,
        formula: &cst::Formula,
        origin: ClauseOrigin,
    ) -> Result<Clause, LoweringError> {
        let mut lits = Vec::new();
        self.literals(formula, &mut lits)?;
        Ok(Clause { lits, origin })
    }

    fn literals(
        &mut self,
        formula: &cst::Formula,
        out: &mut Vec<Literal>,
    ) -> Result<(), LoweringError> {
        match formula {
            cst::Formula::Binary(cst::Binary { op: cst::BinOp::Or, lhs, rhs, .. }) => {
                self.literals(lhs, out)?;
                self.literals(rhs, out)?;
                Ok(())
            }
            cst::Formula::Unary(cst::Unary { op: cst::UnOp::Not, arg, .. }) => {
                let exp = self.formula(arg)?;
                out.push(Literal::negative(exp));
                Ok(())
            }
            other => {
                let exp = self.formula(other)?;
                out.push(Literal::positive(exp));
                Ok(())
            }
        }
    }

    fn formula(&mut self, formula: &cst::Formula) -> Result<Exp, LoweringError> {
        match formula {
            cst::Formula::Ident(ident) => self.ident(ident),
            cst::Formula::Defined(defined) => self.defined(defined),
            cst::Formula::Number(num) => self.object(&num.lit),
            cst::Formula::Distinct(obj) => self.object(&obj.text),
            cst::Formula::Binary(binary) => self.binary(binary),
            cst::Formula::Unary(cst::Unary { arg, .. }) => {
                let arg = self.formula(arg)?;
                Ok(self.connective1(Signature::NOT, arg))
            }
            cst::Formula::Quantified(quantified) => self.quantified(quantified),
            cst::Formula::Apply(apply) => self.apply(apply),
            cst::Formula::Typed(typed) => {
                Err(LoweringError::MisplacedType { span: Some(typed.span.to_miette()) })
            }
        }
    }

    fn ident(&mut self, ident: &cst::Ident) -> Result<Exp, LoweringError> {
        let cst::Ident { name, span } = ident;
        // bound variables shadow everything
        if let Some(pos) = self.binders.iter().rposition(|(n, _)| n == name) {
            let idx = self.binders.len() - pos;
            let ty = self.binders[pos].1.clone();
            return Ok(Exp::var(idx, ty));
        }
        if let Some(key) = self.sig.key_of(name) {
            let ty = self.sig.typ_of(key)?.clone();
            return Ok(Exp::sym(key, ty));
        }
        // implicitly quantified variable (upper word) or an undeclared
        // first-order symbol (lower word), typed by the FOF convention
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            let abs = match self.free.iter().position(|(n, _)| n == name) {
                Some(pos) => pos + 1,
                None => {
                    self.free.push((name.clone(), Typ::Base(Signature::I)));
                    self.free.len()
                }
            };
            return Ok(Exp::var(abs + self.binders.len(), Typ::Base(Signature::I)));
        }
        if name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            let ty = self.implicit_ty(0);
            debug!("implicitly declaring first-order symbol {name}");
            let key = self.sig.add_uninterpreted(Ident::from_string(name), ty.clone())?;
            return Ok(Exp::sym(key, ty));
        }
        Err(LoweringError::UnknownSymbol { name: name.clone(), span: Some(span.to_miette()) })
    }

    /// The rank-1 default type of an undeclared first-order symbol:
    /// `$i`-arguments into `$o` at formula position, into `$i` at term
    /// position.
    fn implicit_ty(&self, arity: usize) -> Typ {
        let result =
            if self.bool_pos { Typ::Base(Signature::O) } else { Typ::Base(Signature::I) };
        Typ::fun_from(vec![Typ::Base(Signature::I); arity], result)
    }

    fn defined(&mut self, defined: &cst::Defined) -> Result<Exp, LoweringError> {
        let cst::Defined { name, span } = defined;
        match name.as_str() {
            "$true" => Ok(Exp::sym(Signature::TRUE, Typ::Base(Signature::O))),
            "$false" => Ok(Exp::sym(Signature::FALSE, Typ::Base(Signature::O))),
            _ => Err(LoweringError::UnknownDefined {
                name: name.clone(),
                span: Some(span.to_miette()),
            }),
        }
    }

    /// Numbers and double-quoted objects are distinct constants: equal
    /// lexical form, equal object.
    fn object(&mut self, lit: &str) -> Result<Exp, LoweringError> {
        let ty = Typ::Base(Signature::I);
        let key = match self.sig.key_of(lit) {
            Some(key) => key,
            None => self.sig.add_uninterpreted(Ident::from_string(lit), ty.clone())?,
        };
        Ok(Exp::Obj(Obj { key, ty }))
    }

    fn binary(&mut self, binary: &cst::Binary) -> Result<Exp, LoweringError> {
        let cst::Binary { op, lhs, rhs, span } = binary;
        match op {
            cst::BinOp::Or => self.connective2f(Signature::OR, lhs, rhs),
            cst::BinOp::And => self.connective2f(Signature::AND, lhs, rhs),
            cst::BinOp::Iff => self.connective2f(Signature::IFF, lhs, rhs),
            cst::BinOp::Implies => self.connective2f(Signature::IMPL, lhs, rhs),
            cst::BinOp::If => self.connective2f(Signature::IMPL, rhs, lhs),
            cst::BinOp::Niff => {
                let inner = self.connective2f(Signature::IFF, lhs, rhs)?;
                Ok(self.connective1(Signature::NOT, inner))
            }
            cst::BinOp::Nor => {
                let inner = self.connective2f(Signature::OR, lhs, rhs)?;
                Ok(self.connective1(Signature::NOT, inner))
            }
            cst::BinOp::Nand => {
                let inner = self.connective2f(Signature::AND, lhs, rhs)?;
                Ok(self.connective1(Signature::NOT, inner))
            }
            cst::BinOp::Equals => self.equality(lhs, rhs, true),
            cst::BinOp::NotEquals => self.equality(lhs, rhs, false),
            cst::BinOp::Arrow | cst::BinOp::Star | cst::BinOp::Plus => {
                Err(LoweringError::MisplacedType { span: Some(span.to_miette()) })
            }
        }
    }

    fn connective1(&self, key: SymKey, arg: Exp) -> Exp {
        let o = Typ::Base(Signature::O);
        Exp::app(Exp::sym(key, Typ::fun(o.clone(), o)), vec![SpineArg::exp(arg)])
    }

    fn connective2f(
        &mut self,
        key: SymKey,
        lhs: &cst::Formula,
        rhs: &cst::Formula,
    ) -> Result<Exp, LoweringError> {
        let lhs = self.with_pos(true, |this| this.formula(lhs))?;
        let rhs = self.with_pos(true, |this| this.formula(rhs))?;
        let o = Typ::Base(Signature::O);
        Ok(Exp::app(
            Exp::sym(key, Typ::fun_from([o.clone(), o.clone()], o)),
            vec![SpineArg::exp(lhs), SpineArg::exp(rhs)],
        ))
    }

    /// Equality is the fixed polymorphic `=` applied to the type of its
    /// sides.
    fn equality(
        &mut self,
        lhs: &cst::Formula,
        rhs: &cst::Formula,
        positive: bool,
    ) -> Result<Exp, LoweringError> {
        let lhs = self.with_pos(false, |this| this.formula(lhs))?;
        let rhs = self.with_pos(false, |this| this.formula(rhs))?;
        let ty = self.ty_of_lowered(&lhs)?;
        let eq = Exp::app(
            Exp::sym(Signature::EQ, self.sig.typ_of(Signature::EQ)?.clone()),
            vec![SpineArg::Typ(ty), SpineArg::exp(lhs), SpineArg::exp(rhs)],
        );
        Ok(if positive { eq } else { self.connective1(Signature::NOT, eq) })
    }

    fn quantified(&mut self, quantified: &cst::Quantified) -> Result<Exp, LoweringError> {
        let cst::Quantified { quant, binders, body, span } = quantified;
        match quant {
            cst::Quantifier::Lambda => self.bind_many(binders, body, |_, lam| lam),
            cst::Quantifier::Forall => self.quantifier(Signature::FORALL, binders, body),
            cst::Quantifier::Exists => self.quantifier(Signature::EXISTS, binders, body),
            cst::Quantifier::TyForall => {
                for binder in binders {
                    self.ty_binders.push(binder.name.clone());
                }
                let body = self.formula(body)?;
                for _ in binders {
                    self.ty_binders.pop();
                }
                Ok((0..binders.len()).fold(body, |acc, _| Exp::ty_lam(acc)))
            }
            cst::Quantifier::TyExists | cst::Quantifier::Choice | cst::Quantifier::Description => {
                Err(LoweringError::UnsupportedBinder { span: Some(span.to_miette()) })
            }
        }
    }

    /// `! [X: τ]: φ` becomes `!! @ τ @ (λX:τ. φ)`, and likewise for `?`.
    fn quantifier(
        &mut self,
        key: SymKey,
        binders: &[cst::Binder],
        body: &cst::Formula,
    ) -> Result<Exp, LoweringError> {
        let quant_ty = self.sig.typ_of(key)?.clone();
        self.with_pos(true, |this| {
            this.bind_many(binders, body, |ty, lam| {
                Exp::app(
                    Exp::sym(key, quant_ty.clone()),
                    vec![SpineArg::Typ(ty.clone()), SpineArg::exp(lam)],
                )
            })
        })
    }

    /// λ-abstract the body over every binder, then close each layer
    /// with `wrap` (identity for a plain λ, a quantifier application
    /// for `!` and `?`).
    fn bind_many(
        &mut self,
        binders: &[cst::Binder],
        body: &cst::Formula,
        wrap: impl Fn(&Typ, Exp) -> Exp,
    ) -> Result<Exp, LoweringError> {
        let mut tys = Vec::with_capacity(binders.len());
        for binder in binders {
            let ty = match &binder.ty {
                Some(ty) => self.typ(ty)?,
                None => Typ::Base(Signature::I),
            };
            self.binders.push((binder.name.clone(), ty.clone()));
            tys.push((binder.name.clone(), ty));
        }
        let mut exp = self.formula(body)?;
        for (name, ty) in tys.into_iter().rev() {
            self.binders.pop();
            let lam = Exp::Lam(Lam {
                name: Some(Ident::from_string(&name)),
                param_ty: ty.clone(),
                body: Box::new(exp),
            });
            exp = wrap(&ty, lam);
        }
        Ok(exp)
    }

    fn apply(&mut self, apply: &cst::Apply) -> Result<Exp, LoweringError> {
        let cst::Apply { fun, args, .. } = apply;
        // A first-order application of an undeclared symbol declares it
        // with the rank-1 default type before the head is lowered.
        if let cst::Formula::Ident(cst::Ident { name, .. }) = &**fun {
            let shadowed = self.binders.iter().any(|(n, _)| n == name);
            if !shadowed
                && !self.sig.exists(name)
                && name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
            {
                let ty = self.implicit_ty(args.len());
                debug!("implicitly declaring first-order symbol {name}");
                self.sig.add_uninterpreted(Ident::from_string(name), ty)?;
            }
        }
        let head = self.formula(fun)?;
        let mut spine = Vec::with_capacity(args.len());
        for arg in args {
            if self.is_type_formula(arg) {
                spine.push(SpineArg::Typ(self.typ(arg)?));
            } else {
                spine.push(SpineArg::exp(self.with_pos(false, |this| this.formula(arg))?));
            }
        }
        Ok(Exp::app(head, spine))
    }

    /// Whether an argument position holds a type, for polymorphic
    /// application.
    fn is_type_formula(&self, formula: &cst::Formula) -> bool {
        match formula {
            cst::Formula::Defined(cst::Defined { name, .. }) => {
                matches!(name.as_str(), "$i" | "$o" | "$tType")
            }
            cst::Formula::Ident(cst::Ident { name, .. }) => {
                if self.ty_binders.contains(name) {
                    return true;
                }
                self.sig
                    .key_of(name)
                    .and_then(|key| self.sig.lookup(key).ok())
                    .is_some_and(|entry| entry.kind == SymKind::TypeConstructor)
            }
            cst::Formula::Binary(cst::Binary { op, .. }) => {
                matches!(op, cst::BinOp::Arrow | cst::BinOp::Star | cst::BinOp::Plus)
            }
            _ => false,
        }
    }

    /// Lower a type expression.
    fn typ(&mut self, formula: &cst::Formula) -> Result<Typ, LoweringError> {
        match formula {
            cst::Formula::Defined(cst::Defined { name, span }) => match name.as_str() {
                "$i" => Ok(Typ::Base(Signature::I)),
                "$o" => Ok(Typ::Base(Signature::O)),
                _ => Err(LoweringError::UnknownType {
                    name: name.clone(),
                    span: Some(span.to_miette()),
                }),
            },
            cst::Formula::Ident(cst::Ident { name, span }) => {
                if let Some(pos) = self.ty_binders.iter().rposition(|n| n == name) {
                    return Ok(Typ::Var(self.ty_binders.len() - pos));
                }
                match self.sig.key_of(name) {
                    Some(key)
                        if self.sig.lookup(key)?.kind == SymKind::TypeConstructor =>
                    {
                        Ok(Typ::Base(key))
                    }
                    _ => Err(LoweringError::UnknownType {
                        name: name.clone(),
                        span: Some(span.to_miette()),
                    }),
                }
            }
            cst::Formula::Binary(cst::Binary { op, lhs, rhs, span }) => {
                let lhs = self.typ(lhs)?;
                let rhs = self.typ(rhs)?;
                match op {
                    cst::BinOp::Arrow => Ok(Typ::fun(lhs, rhs)),
                    cst::BinOp::Star => Ok(Typ::Prod(Box::new(lhs), Box::new(rhs))),
                    cst::BinOp::Plus => Ok(Typ::Sum(Box::new(lhs), Box::new(rhs))),
                    _ => Err(LoweringError::UnknownType {
                        name: "a connective".to_owned(),
                        span: Some(span.to_miette()),
                    }),
                }
            }
            cst::Formula::Quantified(cst::Quantified {
                quant: cst::Quantifier::TyForall,
                binders,
                body,
                ..
            }) => {
                for binder in binders {
                    self.ty_binders.push(binder.name.clone());
                }
                let body = self.typ(body)?;
                for _ in binders {
                    self.ty_binders.pop();
                }
                Ok((0..binders.len()).fold(body, |acc, _| Typ::Forall(Box::new(acc))))
            }
            other => Err(LoweringError::UnknownType {
                name: "this expression".to_owned(),
                span: Some(other.span().to_miette()),
            }),
        }
    }

    /// The type of a lowered term, taking the current binder stack into
    /// account.
    fn ty_of_lowered(&self, exp: &Exp) -> Result<Typ, LoweringError> {
        let mut ctx = TypeCtx::empty();
        // rebuild the enclosing context so bound variables resolve
        fn with_binders<T>(
            binders: &[(String, Typ)],
            ctx: &mut TypeCtx,
            exp: &Exp,
            f: &impl Fn(&Exp, &mut TypeCtx) -> T,
        ) -> T {
            match binders.split_first() {
                None => f(exp, ctx),
                Some(((_, ty), rest)) => {
                    ctx.bind(ty.clone(), |ctx| with_binders(rest, ctx, exp, f))
                }
            }
        }
        Ok(with_binders(&self.binders, &mut ctx, exp, &|exp, ctx| ty_of(exp, ctx))?)
    }
}
