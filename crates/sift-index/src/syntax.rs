//! Language-neutral syntax model consumed by the extractor.
//!
//! A [`Grammar`] lowers source text into this owned model. Member bodies are
//! kept as classified token streams so that canonical printing does not
//! depend on the concrete parser.

use crate::error::Result;
use crate::printer;

/// Parsed file: top-level declarations in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

/// A namespace and the declarations it encloses.
///
/// `name` is `None` for the anonymous global namespace (`namespace { ... }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub name: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// A class-like declaration with its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Function,
    Property,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// 1-based line of the first token of the declaration.
    pub start_line: usize,
    /// Raw text of the nearest preceding doc block, delimiters included.
    pub doc_comment: Option<String>,
    pub tokens: Vec<Token>,
}

impl Member {
    /// Copy of this member with every visibility token spelled `keyword`
    /// removed. Other visibility keywords are kept.
    #[must_use]
    pub fn without_visibility(&self, keyword: &str) -> Self {
        Self {
            tokens: self
                .tokens
                .iter()
                .filter(|t| !(t.kind == TokenKind::Visibility && t.text.eq_ignore_ascii_case(keyword)))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

/// Layout class of a token, decided by the grammar from its syntactic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Keywords, identifiers, variables and literals.
    Word,
    /// `public`, `protected`, `private`.
    Visibility,
    /// Binary, assignment and ternary operators, spaced on both sides.
    Operator,
    /// Unary operators, nullable `?`, by-ref `&`, spread `...`.
    Prefix,
    /// Postfix `++` / `--`.
    Postfix,
    /// `->`, `?->`, `::`; never spaced.
    Access,
    Comma,
    Semicolon,
    /// Return-type and named-argument colon.
    Colon,
    /// Colon ending a `case` / `default` label.
    CaseColon,
    /// `(` directly after a callee or declared name.
    CallOpen,
    /// Any other `(`.
    OpenParen,
    CloseParen,
    /// `[` of a subscript.
    IndexOpen,
    /// `[` of an array literal or destructuring.
    OpenBracket,
    CloseBracket,
    /// `{` of a nested block, kept on the same line.
    OpenBrace,
    /// `{` of a function body, placed on its own line.
    BodyOpenBrace,
    CloseBrace,
    /// A whole attribute group, printed on its own line.
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Parsing capability the extractor depends on.
pub trait Grammar: Send + Sync {
    /// Parse `source` into the syntax model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IndexError::Parse`] if `source` is not valid for this
    /// grammar.
    fn parse(&self, source: &str) -> Result<SyntaxTree>;

    /// Regenerate the canonical text of a member.
    fn pretty_print(&self, member: &Member) -> String {
        printer::print(&member.tokens)
    }
}
