use miette_util::codespan::Span;

use crate::cst::*;
use crate::lexer::{Spanned, Token};
use crate::result::ParseError;

/// Recursive-descent parser over the token stream.
///
/// The grammar follows the TPTP syntax document: binary connectives are
/// non-associative except `|` and `&`, the type arrow associates to the
/// right, and THF application `@` associates to the left and binds
/// tightest of the operators.
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Parser {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|t| t.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, token: Token) -> bool {
        self.peek_token() == Some(token)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<Spanned, ParseError> {
        match self.advance() {
            Some(spanned) if spanned.token == token => Ok(spanned),
            Some(spanned) => Err(ParseError::unexpected(expected, &spanned.text, spanned.span)),
            None => Err(ParseError::eof(expected)),
        }
    }

    // Toplevel
    //
    //

    pub fn problem(&mut self) -> Result<Problem, ParseError> {
        let mut inputs = Vec::new();
        while self.peek().is_some() {
            inputs.push(self.input()?);
        }
        Ok(Problem { inputs })
    }

    fn input(&mut self) -> Result<Input, ParseError> {
        let keyword = self.expect(Token::LowerWord, "an input statement")?;
        if keyword.text == "include" {
            return Ok(Input::Include(self.include(keyword.span)?));
        }
        match Dialect::from_keyword(&keyword.text) {
            Some(dialect) => Ok(Input::Formula(self.annotated(dialect, keyword.span)?)),
            None => Err(ParseError::UnknownKeyword {
                word: keyword.text,
                span: Some(miette_util::ToMiette::to_miette(keyword.span)),
            }),
        }
    }

    /// `include('filename'[, [name, ...]]).`
    fn include(&mut self, start: Span) -> Result<Include, ParseError> {
        self.expect(Token::LParen, "`(`")?;
        let path = self.expect(Token::SingleQuoted, "a quoted file name")?;
        let mut selection = Vec::new();
        if self.eat(Token::Comma) {
            self.expect(Token::LBracket, "`[`")?;
            loop {
                let name = self.name()?;
                selection.push(name);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RBracket, "`]`")?;
        }
        self.expect(Token::RParen, "`)`")?;
        let end = self.expect(Token::Dot, "`.`")?;
        Ok(Include {
            span: Span { start: start.start, end: end.span.end },
            path: strip_quotes(&path.text),
            selection,
        })
    }

    /// `<lang>(name, role, formula[, annotations]).`
    fn annotated(&mut self, dialect: Dialect, start: Span) -> Result<AnnotatedFormula, ParseError> {
        self.expect(Token::LParen, "`(`")?;
        let name = self.name()?;
        self.expect(Token::Comma, "`,`")?;
        let role = self.expect(Token::LowerWord, "a formula role")?;
        self.expect(Token::Comma, "`,`")?;
        let formula = self.formula()?;
        let annotations = if self.eat(Token::Comma) { Some(self.annotations()?) } else { None };
        self.expect(Token::RParen, "`)`")?;
        let end = self.expect(Token::Dot, "`.`")?;
        Ok(AnnotatedFormula {
            span: Span { start: start.start, end: end.span.end },
            dialect,
            name,
            role: Role::from_keyword(&role.text),
            formula,
            annotations,
        })
    }

    /// A formula name: lower word, single-quoted or integer.
    fn name(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Some(spanned) if matches!(spanned.token, Token::LowerWord | Token::Integer) => {
                Ok(spanned.text)
            }
            Some(spanned) if spanned.token == Token::SingleQuoted => {
                Ok(strip_quotes(&spanned.text))
            }
            Some(spanned) => Err(ParseError::unexpected("a name", &spanned.text, spanned.span)),
            None => Err(ParseError::eof("a name")),
        }
    }

    fn annotations(&mut self) -> Result<Annotations, ParseError> {
        let source = self.formula()?;
        let mut info = Vec::new();
        if self.eat(Token::Comma) {
            self.expect(Token::LBracket, "`[`")?;
            if !self.at(Token::RBracket) {
                loop {
                    info.push(self.formula()?);
                    if !self.eat(Token::Comma) {
                        break;
                    }
                }
            }
            self.expect(Token::RBracket, "`]`")?;
        }
        Ok(Annotations { source, info })
    }

    // Formulas
    //
    //

    pub fn formula(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.unitary()?;

        // typing assertion
        if self.eat(Token::Colon) {
            let ty = self.formula()?;
            let span = Span { start: lhs.span().start, end: ty.span().end };
            return Ok(Formula::Typed(Typed {
                span,
                exp: Box::new(lhs),
                ty: Box::new(ty),
            }));
        }

        let Some(op) = self.peek_token().and_then(binop) else {
            return Ok(lhs);
        };
        match op {
            // associative chains
            BinOp::Or | BinOp::And | BinOp::Star | BinOp::Plus => {
                let mut acc = lhs;
                while self.peek_token().and_then(binop) == Some(op) {
                    self.advance();
                    let rhs = self.unitary()?;
                    let span = Span { start: acc.span().start, end: rhs.span().end };
                    acc = Formula::Binary(Binary {
                        span,
                        op,
                        lhs: Box::new(acc),
                        rhs: Box::new(rhs),
                    });
                }
                Ok(acc)
            }
            // the type arrow is right-associative
            BinOp::Arrow => {
                self.advance();
                let rhs = self.formula()?;
                let span = Span { start: lhs.span().start, end: rhs.span().end };
                Ok(Formula::Binary(Binary { span, op, lhs: Box::new(lhs), rhs: Box::new(rhs) }))
            }
            // the remaining binary connectives are non-associative
            _ => {
                self.advance();
                let rhs = self.unitary()?;
                let span = Span { start: lhs.span().start, end: rhs.span().end };
                Ok(Formula::Binary(Binary { span, op, lhs: Box::new(lhs), rhs: Box::new(rhs) }))
            }
        }
    }

    fn unitary(&mut self) -> Result<Formula, ParseError> {
        match self.peek_token() {
            Some(Token::Not) => {
                let start = self.expect(Token::Not, "`~`")?.span;
                let arg = self.unitary()?;
                let span = Span { start: start.start, end: arg.span().end };
                Ok(Formula::Unary(Unary { span, op: UnOp::Not, arg: Box::new(arg) }))
            }
            Some(tok) if quantifier(tok).is_some() => self.quantified(),
            _ => self.equality(),
        }
    }

    fn quantified(&mut self) -> Result<Formula, ParseError> {
        let Some(head) = self.advance() else {
            return Err(ParseError::eof("a quantifier"));
        };
        let Some(quant) = quantifier(head.token) else {
            return Err(ParseError::unexpected("a quantifier", &head.text, head.span));
        };
        self.expect(Token::LBracket, "`[`")?;
        let mut binders = Vec::new();
        loop {
            binders.push(self.binder()?);
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBracket, "`]`")?;
        self.expect(Token::Colon, "`:`")?;
        let body = self.unitary()?;
        let span = Span { start: head.span.start, end: body.span().end };
        Ok(Formula::Quantified(Quantified { span, quant, binders, body: Box::new(body) }))
    }

    fn binder(&mut self) -> Result<Binder, ParseError> {
        let name = match self.advance() {
            Some(spanned) if matches!(spanned.token, Token::UpperWord | Token::LowerWord) => {
                spanned
            }
            Some(spanned) => {
                return Err(ParseError::unexpected(
                    "a bound variable",
                    &spanned.text,
                    spanned.span,
                ));
            }
            None => return Err(ParseError::eof("a bound variable")),
        };
        let ty = if self.eat(Token::Colon) { Some(self.type_expr()?) } else { None };
        let end = ty.as_ref().map(|t| t.span().end).unwrap_or(name.span.end);
        Ok(Binder { span: Span { start: name.span.start, end }, name: name.text, ty })
    }

    /// A type expression inside a binder list: arrows, products and sums
    /// over type primaries.
    fn type_expr(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.equality()?;
        let Some(op) = self.peek_token().and_then(binop) else {
            return Ok(lhs);
        };
        match op {
            BinOp::Arrow => {
                self.advance();
                let rhs = self.type_expr()?;
                let span = Span { start: lhs.span().start, end: rhs.span().end };
                Ok(Formula::Binary(Binary { span, op, lhs: Box::new(lhs), rhs: Box::new(rhs) }))
            }
            BinOp::Star | BinOp::Plus => {
                let mut acc = lhs;
                while self.peek_token().and_then(binop) == Some(op) {
                    self.advance();
                    let rhs = self.equality()?;
                    let span = Span { start: acc.span().start, end: rhs.span().end };
                    acc = Formula::Binary(Binary {
                        span,
                        op,
                        lhs: Box::new(acc),
                        rhs: Box::new(rhs),
                    });
                }
                Ok(acc)
            }
            _ => Ok(lhs),
        }
    }

    fn equality(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.applied()?;
        let op = match self.peek_token() {
            Some(Token::Equals) => BinOp::Equals,
            Some(Token::NotEquals) => BinOp::NotEquals,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.applied()?;
        let span = Span { start: lhs.span().start, end: rhs.span().end };
        Ok(Formula::Binary(Binary { span, op, lhs: Box::new(lhs), rhs: Box::new(rhs) }))
    }

    /// Left-associative THF application `f @ a @ b`.
    fn applied(&mut self) -> Result<Formula, ParseError> {
        let fun = self.primary()?;
        if !self.at(Token::At) {
            return Ok(fun);
        }
        let mut args = Vec::new();
        while self.eat(Token::At) {
            args.push(self.primary()?);
        }
        let span = Span {
            start: fun.span().start,
            end: args.last().map(|a| a.span().end).unwrap_or(fun.span().end),
        };
        Ok(Formula::Apply(Apply { span, fun: Box::new(fun), args }))
    }

    fn primary(&mut self) -> Result<Formula, ParseError> {
        let Some(spanned) = self.peek().cloned() else {
            return Err(ParseError::eof("a formula"));
        };
        match spanned.token {
            Token::LParen => {
                self.advance();
                let inner = self.formula()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Token::LowerWord | Token::UpperWord => {
                self.advance();
                let head = Formula::Ident(Ident { span: spanned.span, name: spanned.text });
                self.fof_args(head)
            }
            Token::SingleQuoted => {
                self.advance();
                let head = Formula::Ident(Ident {
                    span: spanned.span,
                    name: strip_quotes(&spanned.text),
                });
                self.fof_args(head)
            }
            Token::DollarWord | Token::DollarDollarWord => {
                self.advance();
                let head = Formula::Defined(Defined { span: spanned.span, name: spanned.text });
                self.fof_args(head)
            }
            Token::Integer | Token::Rational | Token::Real => {
                self.advance();
                Ok(Formula::Number(Number { span: spanned.span, lit: spanned.text }))
            }
            Token::DoubleQuoted => {
                self.advance();
                Ok(Formula::Distinct(Distinct {
                    span: spanned.span,
                    text: strip_quotes(&spanned.text),
                }))
            }
            _ => Err(ParseError::unexpected("a formula", &spanned.text, spanned.span)),
        }
    }

    /// Optional first-order argument list `(a, b, c)` after an atom.
    fn fof_args(&mut self, head: Formula) -> Result<Formula, ParseError> {
        if !self.at(Token::LParen) {
            return Ok(head);
        }
        self.advance();
        let mut args = Vec::new();
        if !self.at(Token::RParen) {
            loop {
                args.push(self.formula()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(Token::RParen, "`)`")?;
        let span = Span { start: head.span().start, end: end.span.end };
        Ok(Formula::Apply(Apply { span, fun: Box::new(head), args }))
    }
}

fn binop(token: Token) -> Option<BinOp> {
    match token {
        Token::Or => Some(BinOp::Or),
        Token::And => Some(BinOp::And),
        Token::Iff => Some(BinOp::Iff),
        Token::Implies => Some(BinOp::Implies),
        Token::If => Some(BinOp::If),
        Token::Niff => Some(BinOp::Niff),
        Token::Nor => Some(BinOp::Nor),
        Token::Nand => Some(BinOp::Nand),
        Token::Arrow => Some(BinOp::Arrow),
        Token::Star => Some(BinOp::Star),
        Token::Plus => Some(BinOp::Plus),
        _ => None,
    }
}

fn quantifier(token: Token) -> Option<Quantifier> {
    match token {
        Token::Forall => Some(Quantifier::Forall),
        Token::Exists => Some(Quantifier::Exists),
        Token::Lambda => Some(Quantifier::Lambda),
        Token::TyForall => Some(Quantifier::TyForall),
        Token::TyExists => Some(Quantifier::TyExists),
        Token::Choice => Some(Quantifier::Choice),
        Token::Description => Some(Quantifier::Description),
        _ => None,
    }
}

fn strip_quotes(text: &str) -> String {
    text[1..text.len() - 1].to_owned()
}
