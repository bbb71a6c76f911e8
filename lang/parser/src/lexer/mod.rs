use logos::Logos;

use miette_util::codespan::Span;

use crate::result::ParseError;

/// The TPTP token vocabulary.
///
/// Longest match wins, so the multi-character connectives shadow their
/// prefixes (`<=>` before `<=`, `@@+` before `@+`, `!=` before `!`).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Punctuation
    //
    //
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":=")]
    Assign,
    #[token(":")]
    Colon,

    // Connectives
    //
    //
    #[token("<=>")]
    Iff,
    #[token("<~>")]
    Niff,
    #[token("<=")]
    If,
    #[token("=>")]
    Implies,
    #[token("~|")]
    Nor,
    #[token("~&")]
    Nand,
    #[token("|")]
    Or,
    #[token("&")]
    And,
    #[token("~")]
    Not,
    #[token("!=")]
    NotEquals,
    #[token("=")]
    Equals,
    #[token("!>")]
    TyForall,
    #[token("?*")]
    TyExists,
    #[token("!")]
    Forall,
    #[token("?")]
    Exists,
    #[token("^")]
    Lambda,
    #[token("@@+")]
    ChoiceCombinator,
    #[token("@@-")]
    DescriptionCombinator,
    #[token("@@=")]
    EqCombinator,
    #[token("@+")]
    Choice,
    #[token("@-")]
    Description,
    #[token("@")]
    At,
    #[token(">")]
    Arrow,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,

    // Words
    //
    //
    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    LowerWord,
    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    UpperWord,
    #[regex(r"\$[a-z][a-zA-Z0-9_]*")]
    DollarWord,
    #[regex(r"\$\$[a-z][a-zA-Z0-9_]*")]
    DollarDollarWord,
    #[regex(r"'([^'\\]|\\.)+'")]
    SingleQuoted,
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    // Numbers
    //
    //
    #[regex(r"[+-]?(0|[1-9][0-9]*)/[1-9][0-9]*")]
    Rational,
    #[regex(r"[+-]?(0|[1-9][0-9]*)\.[0-9]+([eE][+-]?[0-9]+)?")]
    Real,
    #[regex(r"[+-]?(0|[1-9][0-9]*)")]
    Integer,

    // Comments and whitespace
    //
    //
    #[regex(r"%[^\n\r]*")]
    Comment,
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub text: String,
    pub span: Span,
}

/// Lex a complete source, dropping whitespace and comments.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(Token::Whitespace) | Ok(Token::Comment) | Ok(Token::BlockComment) => {}
            Ok(token) => tokens.push(Spanned {
                token,
                text: lexer.slice().to_owned(),
                span,
            }),
            Err(()) => {
                return Err(ParseError::invalid_token(lexer.slice(), span));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn connectives_prefer_longest_match() {
        assert_eq!(kinds("<=> <= => <~> ~| ~& ~"), vec![
            Token::Iff,
            Token::If,
            Token::Implies,
            Token::Niff,
            Token::Nor,
            Token::Nand,
            Token::Not,
        ]);
        assert_eq!(kinds("@@+ @@- @@= @+ @- @"), vec![
            Token::ChoiceCombinator,
            Token::DescriptionCombinator,
            Token::EqCombinator,
            Token::Choice,
            Token::Description,
            Token::At,
        ]);
        assert_eq!(kinds("!> != ! ?* ?"), vec![
            Token::TyForall,
            Token::NotEquals,
            Token::Forall,
            Token::TyExists,
            Token::Exists,
        ]);
    }

    #[test]
    fn words_and_numbers() {
        assert_eq!(kinds("abc Abc $tType $$ext 'a b' \"obj\""), vec![
            Token::LowerWord,
            Token::UpperWord,
            Token::DollarWord,
            Token::DollarDollarWord,
            Token::SingleQuoted,
            Token::DoubleQuoted,
        ]);
        assert_eq!(kinds("42 -7 1/2 3.14 2.5e-3"), vec![
            Token::Integer,
            Token::Integer,
            Token::Rational,
            Token::Real,
            Token::Real,
        ]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("a % line comment\nb /* block */ c"), vec![
            Token::LowerWord,
            Token::LowerWord,
            Token::LowerWord,
        ]);
    }

    #[test]
    fn statement_shape() {
        let toks = kinds("thf(c_type, type, c: $i).");
        assert_eq!(toks, vec![
            Token::LowerWord,
            Token::LParen,
            Token::LowerWord,
            Token::Comma,
            Token::LowerWord,
            Token::Comma,
            Token::LowerWord,
            Token::Colon,
            Token::DollarWord,
            Token::RParen,
            Token::Dot,
        ]);
    }
}
