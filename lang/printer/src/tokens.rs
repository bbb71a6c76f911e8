// Default indentation size
pub const INDENT: isize = 4;

// Symbols

pub const COMMA: &str = ",";
pub const COLON: &str = ":";
pub const DOT: &str = ".";
pub const AT: &str = "@";
pub const EQ: &str = "=";
pub const ARROW: &str = ">";
pub const STAR: &str = "*";
pub const PLUS: &str = "+";
pub const LAMBDA: &str = "^";
pub const CARET_BRACKET: &str = "^[";
pub const TY_LAMBDA: &str = "!>";
pub const LBRACKET: &str = "[";
pub const RBRACKET: &str = "]";

// Keywords

pub const FORALL_TY: &str = "!>";
pub const MAPSTO: &str = ":=";
pub const INCLUDE: &str = "include";
