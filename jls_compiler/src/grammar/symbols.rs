//! Grammar symbols
//!
//! `Terminal` is the closed set of token categories the scanner can emit plus
//! the end-of-input marker. Fixed-symbol terminals (keywords, operators,
//! delimiters) are written as their lexeme; the literal classes use the short
//! names the parse table is written in: `ID`, `D`, `L` and `$`.
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    // === KEYWORDS ===
    Int,
    Float,
    Double,
    Boolean,
    Void,
    StringType,
    True,
    False,
    Null,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    Finally,
    Throw,
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
    Class,
    Interface,
    Extends,
    Implements,
    New,
    This,
    Super,
    Package,
    Import,

    // === OPERATORS ===
    EqEq,
    NotEq,
    GreaterEq,
    LessEq,
    AndAnd,
    OrOr,
    PlusPlus,
    MinusMinus,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    Assign,
    Not,
    Greater,
    Less,
    Plus,
    Minus,
    Star,
    Slash,

    // === DELIMITERS ===
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    At,

    // === LITERAL CLASSES ===
    Identifier,
    Number,
    StringLiteral,

    /// End-of-input marker; only ever matches itself
    End,
}

impl Terminal {
    pub const ALL: [Terminal; 74] = [
        Self::Int,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Void,
        Self::StringType,
        Self::True,
        Self::False,
        Self::Null,
        Self::If,
        Self::Else,
        Self::Switch,
        Self::Case,
        Self::Default,
        Self::For,
        Self::While,
        Self::Do,
        Self::Break,
        Self::Continue,
        Self::Return,
        Self::Try,
        Self::Catch,
        Self::Finally,
        Self::Throw,
        Self::Public,
        Self::Private,
        Self::Protected,
        Self::Static,
        Self::Final,
        Self::Abstract,
        Self::Class,
        Self::Interface,
        Self::Extends,
        Self::Implements,
        Self::New,
        Self::This,
        Self::Super,
        Self::Package,
        Self::Import,
        Self::EqEq,
        Self::NotEq,
        Self::GreaterEq,
        Self::LessEq,
        Self::AndAnd,
        Self::OrOr,
        Self::PlusPlus,
        Self::MinusMinus,
        Self::PlusAssign,
        Self::MinusAssign,
        Self::StarAssign,
        Self::SlashAssign,
        Self::Assign,
        Self::Not,
        Self::Greater,
        Self::Less,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::LBrace,
        Self::RBrace,
        Self::LParen,
        Self::RParen,
        Self::LBracket,
        Self::RBracket,
        Self::Semicolon,
        Self::Comma,
        Self::Dot,
        Self::Colon,
        Self::At,
        Self::Identifier,
        Self::Number,
        Self::StringLiteral,
        Self::End,
    ];

    /// The symbol as it appears in the parse table and the token listing
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Void => "void",
            Self::StringType => "string",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::If => "if",
            Self::Else => "else",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::For => "for",
            Self::While => "while",
            Self::Do => "do",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Return => "return",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Finally => "finally",
            Self::Throw => "throw",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Static => "static",
            Self::Final => "final",
            Self::Abstract => "abstract",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::New => "new",
            Self::This => "this",
            Self::Super => "super",
            Self::Package => "package",
            Self::Import => "import",

            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::GreaterEq => ">=",
            Self::LessEq => "<=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::Assign => "=",
            Self::Not => "!",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",

            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::At => "@",

            Self::Identifier => "ID",
            Self::Number => "D",
            Self::StringLiteral => "L",
            Self::End => "$",
        }
    }

    /// Inverse of `as_str`
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == symbol)
    }

    pub const fn is_keyword(self) -> bool {
        (self as u8) <= (Self::Import as u8)
    }

    pub const fn is_operator(self) -> bool {
        (self as u8) >= (Self::EqEq as u8) && (self as u8) <= (Self::Slash as u8)
    }

    pub const fn is_delimiter(self) -> bool {
        (self as u8) >= (Self::LBrace as u8) && (self as u8) <= (Self::At as u8)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Terminal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Grammar categories expanded through the parse table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    /// `S`: sequence of statements
    StatementList,
    /// `U`: a single statement
    Statement,
    /// `T'`: optional `[ ]` after a declared type
    ArraySuffix,
    /// `M`: declaration modifier
    Modifier,
    /// `K`: `class` or `interface`
    ClassKind,
    /// `C`: control-flow command or nested block
    Command,
    /// `H`: statements inside braces
    Block,
    /// `H'`: continuation of a block
    BlockTail,
    /// `G`: expression
    Expression,
    /// `G'`: continuation of an expression
    ExpressionTail,
    /// `I`: `{ ... }` initializer list
    InitializerList,
    /// `I'`: continuation of an initializer list
    InitializerTail,
    /// `A`: call argument list
    ArgumentList,
    /// `A'`: continuation of an argument list
    ArgumentTail,
}

impl NonTerminal {
    pub const START: NonTerminal = NonTerminal::StatementList;

    pub const ALL: [NonTerminal; 14] = [
        Self::StatementList,
        Self::Statement,
        Self::ArraySuffix,
        Self::Modifier,
        Self::ClassKind,
        Self::Command,
        Self::Block,
        Self::BlockTail,
        Self::Expression,
        Self::ExpressionTail,
        Self::InitializerList,
        Self::InitializerTail,
        Self::ArgumentList,
        Self::ArgumentTail,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StatementList => "S",
            Self::Statement => "U",
            Self::ArraySuffix => "T'",
            Self::Modifier => "M",
            Self::ClassKind => "K",
            Self::Command => "C",
            Self::Block => "H",
            Self::BlockTail => "H'",
            Self::Expression => "G",
            Self::ExpressionTail => "G'",
            Self::InitializerList => "I",
            Self::InitializerTail => "I'",
            Self::ArgumentList => "A",
            Self::ArgumentTail => "A'",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NonTerminal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A parse-stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminal(t) => t.as_str(),
            Self::NonTerminal(n) => n.as_str(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Self {
        Symbol::NonTerminal(n)
    }
}
