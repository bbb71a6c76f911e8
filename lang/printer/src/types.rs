use pretty::DocAllocator;

use crate::render::RenderTermcolor;
use crate::tokens;
use crate::DEFAULT_WIDTH;

/// Annotations for semantic highlighting in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anno {
    Keyword,
    Symbol,
    Variable,
    Typ,
    Comment,
    Error,
}

pub type Alloc<'a> = pretty::Arena<'a, Anno>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, Anno>;

/// Operator precedence used to decide where parentheses are required.
///
/// Lower variants bind weaker; `Atom` never needs parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Binders and binary connectives
    Exp,
    /// Spine applications
    App,
    /// Leaves
    Atom,
}

#[derive(Debug, Clone)]
pub struct PrintCfg {
    pub width: usize,
    pub indent: isize,
    /// Print de Bruijn indices alongside binder names
    pub de_bruijn: bool,
}

impl Default for PrintCfg {
    fn default() -> Self {
        PrintCfg { width: DEFAULT_WIDTH, indent: crate::tokens::INDENT, de_bruijn: false }
    }
}

pub trait Print {
    /// At least one of `print` and `print_prec` must be implemented.
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_prec(cfg, alloc, Precedence::Exp)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.print(cfg, alloc)
    }

    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String {
        let alloc = Alloc::new();
        let mut buf = Vec::new();
        let def = PrintCfg::default();
        let cfg = cfg.unwrap_or(&def);
        self.print(cfg, &alloc)
            .1
            .render(cfg.width, &mut buf)
            .expect("Failed to print to string");
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn print_io<W: std::io::Write + pretty::termcolor::WriteColor>(
        &self,
        cfg: &PrintCfg,
        out: W,
    ) -> std::io::Result<()> {
        let alloc = Alloc::new();
        self.print(cfg, &alloc).1.render_raw(cfg.width, &mut RenderTermcolor::new(out))
    }
}

impl<T: Print> Print for Box<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        (**self).print(cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        (**self).print_prec(cfg, alloc, prec)
    }
}

impl<T: Print> Print for Option<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Some(inner) => inner.print(cfg, alloc),
            None => alloc.nil(),
        }
    }
}

/// Prints a comma-separated list.
impl<T: Print> Print for Vec<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let sep = alloc.text(tokens::COMMA).append(alloc.space());
        alloc.intersperse(self.iter().map(|x| x.print(cfg, alloc)), sep)
    }
}
