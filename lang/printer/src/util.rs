use super::types::*;

pub trait ParensIfExt<'a> {
    /// Wrap in parentheses when the expression's precedence is below
    /// the precedence required by the enclosing context.
    fn parens_if(self, required: Precedence, actual: Precedence) -> Builder<'a>;
}

impl<'a> ParensIfExt<'a> for Builder<'a> {
    fn parens_if(self, required: Precedence, actual: Precedence) -> Builder<'a> {
        if actual < required {
            self.parens()
        } else {
            self
        }
    }
}

pub trait IsNilExt {
    fn is_nil(&self) -> bool;
}

impl IsNilExt for Builder<'_> {
    fn is_nil(&self) -> bool {
        matches!(&*self.1, pretty::Doc::Nil)
    }
}
