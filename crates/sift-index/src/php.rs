//! PHP grammar backed by tree-sitter-php.
//!
//! Lowers the concrete syntax tree into [`crate::syntax`]: top-level
//! namespaces and class-like declarations are kept, member bodies become
//! classified token streams, and class references inside members are
//! resolved to fully qualified names through the file's namespace and `use`
//! imports.

use std::collections::HashMap;

use tree_sitter::{Node, Parser};

use crate::error::{IndexError, Result};
use crate::syntax::{
    Grammar, Item, Member, MemberKind, NamespaceDecl, SyntaxTree, Token, TokenKind, TypeDecl,
    TypeKind,
};

/// Nodes printed verbatim as a single word.
const ATOMIC_KINDS: &[&str] = &[
    "variable_name",
    "string",
    "encapsed_string",
    "heredoc",
    "nowdoc",
    "integer",
    "float",
    "boolean",
    "null",
    "primitive_type",
    "cast_type",
    "shell_command_expression",
    "namespace_name",
    "relative_scope",
];

/// Nodes whose braces delimit an indented block.
const BLOCK_KINDS: &[&str] = &[
    "compound_statement",
    "declaration_list",
    "enum_declaration_list",
    "switch_block",
    "match_block",
];

const FUNCTION_KINDS: &[&str] = &["method_declaration", "function_definition"];

const CLOSURE_KINDS: &[&str] = &[
    "anonymous_function",
    "anonymous_function_creation_expression",
    "arrow_function",
];

/// Language constructs written like calls: `isset($a)`, `array(1)`.
const CALL_LIKE_KEYWORDS: &[&str] = &["isset", "empty", "unset", "list", "array", "exit", "die", "eval"];

/// Names never rewritten by resolution.
const SPECIAL_CLASS_NAMES: &[&str] = &[
    "self", "static", "parent", "bool", "int", "float", "string", "array", "object", "callable",
    "iterable", "mixed", "void", "null", "never", "false", "true",
];

/// tree-sitter backed [`Grammar`] for PHP source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpGrammar;

impl PhpGrammar {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Grammar for PhpGrammar {
    fn parse(&self, source: &str) -> Result<SyntaxTree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| IndexError::Grammar(format!("set_language failed: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| IndexError::Grammar("parser produced no tree".into()))?;
        let root = tree.root_node();

        if let Some(node) = first_error(root) {
            let err = parse_error(node, source);
            tracing::debug!("rejecting source: {err}");
            return Err(err);
        }

        let mut lowering = Lowering {
            source,
            namespace: None,
            imports: HashMap::new(),
        };
        Ok(SyntaxTree {
            items: lowering.statements(root),
        })
    }
}

/// First `ERROR` or missing node in pre-order, descending only into subtrees
/// that contain one.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    let mut depth = 0usize;
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if depth == 0 {
                return None;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
        }
    }
}

fn parse_error(node: Node<'_>, source: &str) -> IndexError {
    let pos = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let snippet: String = source[node.byte_range()]
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .chars()
            .take(40)
            .collect();
        if snippet.is_empty() {
            "unexpected end of input".to_owned()
        } else {
            format!("unexpected `{snippet}`")
        }
    };
    IndexError::Parse {
        line: pos.row + 1,
        column: pos.column + 1,
        message,
    }
}

/// Walk state: current namespace and its class imports (lowercased alias → target).
struct Lowering<'s> {
    source: &'s str,
    namespace: Option<String>,
    imports: HashMap<String, String>,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn statements(&mut self, parent: Node<'_>) -> Vec<Item> {
        let mut items = Vec::new();
        let mut open_ns: Option<NamespaceDecl> = None;

        let mut cursor = parent.walk();
        for child in parent.children(&mut cursor) {
            match child.kind() {
                "namespace_definition" => {
                    if let Some(ns) = open_ns.take() {
                        items.push(Item::Namespace(ns));
                    }
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| self.text(n).trim_start_matches('\\').to_owned());
                    self.namespace.clone_from(&name);
                    self.imports.clear();

                    if let Some(body) = child.child_by_field_name("body") {
                        let inner = self.statements(body);
                        items.push(Item::Namespace(NamespaceDecl { name, items: inner }));
                        self.namespace = None;
                        self.imports.clear();
                    } else {
                        open_ns = Some(NamespaceDecl {
                            name,
                            items: Vec::new(),
                        });
                    }
                }
                "namespace_use_declaration" => self.register_imports(child),
                kind => {
                    if let Some(type_kind) = type_kind(kind) {
                        let decl = Item::Type(self.type_decl(child, type_kind));
                        match open_ns.as_mut() {
                            Some(ns) => ns.items.push(decl),
                            None => items.push(decl),
                        }
                    }
                }
            }
        }

        if let Some(ns) = open_ns {
            items.push(Item::Namespace(ns));
        }
        items
    }

    fn register_imports(&mut self, node: Node<'_>) {
        for (alias, target) in parse_use_declaration(self.text(node)) {
            self.imports.insert(alias.to_lowercase(), target);
        }
    }

    fn type_decl(&self, node: Node<'_>, kind: TypeKind) -> TypeDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_owned())
            .unwrap_or_default();

        let mut members = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                let member_kind = match child.kind() {
                    "method_declaration" => MemberKind::Function,
                    "property_declaration" => MemberKind::Property,
                    "const_declaration" => MemberKind::Constant,
                    _ => continue,
                };
                let Some(member_name) = self.member_name(child, member_kind) else {
                    continue;
                };
                members.push(Member {
                    kind: member_kind,
                    name: member_name,
                    start_line: child.start_position().row + 1,
                    doc_comment: self.doc_comment_before(child),
                    tokens: self.tokens(child),
                });
            }
        }

        TypeDecl {
            kind,
            name,
            members,
        }
    }

    fn member_name(&self, node: Node<'_>, kind: MemberKind) -> Option<String> {
        match kind {
            MemberKind::Function => node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_owned()),
            MemberKind::Property => {
                let element = named_child_of_kind(node, "property_element")?;
                let var = named_child_of_kind(element, "variable_name")?;
                Some(self.text(var).trim_start_matches('$').to_owned())
            }
            MemberKind::Constant => {
                let element = named_child_of_kind(node, "const_element")?;
                let mut cursor = element.walk();
                let name = element.named_children(&mut cursor).next()?;
                Some(self.text(name).to_owned())
            }
        }
    }

    /// Nearest `/** */` block among the comments directly above `node`.
    fn doc_comment_before(&self, node: Node<'_>) -> Option<String> {
        let mut prev = node.prev_sibling();
        while let Some(sibling) = prev {
            if sibling.kind() != "comment" {
                break;
            }
            let text = self.text(sibling);
            if text.starts_with("/**") {
                return Some(text.to_owned());
            }
            prev = sibling.prev_sibling();
        }
        None
    }

    fn tokens(&self, node: Node<'_>) -> Vec<Token> {
        let mut out = Vec::new();
        self.emit(node, &mut out);
        out
    }

    /// Pre-order token emission over `root`.
    fn emit(&self, root: Node<'_>, out: &mut Vec<Token>) {
        let mut cursor = root.walk();
        let mut depth = 0usize;
        loop {
            if !self.emit_node(cursor.node(), out) && cursor.goto_first_child() {
                depth += 1;
                continue;
            }
            loop {
                if depth == 0 {
                    return;
                }
                if cursor.goto_next_sibling() {
                    break;
                }
                cursor.goto_parent();
                depth -= 1;
            }
        }
    }

    /// Push the token(s) for `node`; `false` means descend into its children.
    fn emit_node(&self, node: Node<'_>, out: &mut Vec<Token>) -> bool {
        let kind = node.kind();
        match kind {
            "comment" => {}
            "visibility_modifier" => {
                out.push(Token::new(compact(self.text(node)), TokenKind::Visibility));
            }
            "attribute_list" => {
                out.push(Token::new(compact(self.text(node)), TokenKind::Attribute));
            }
            "name" | "qualified_name" => {
                let text = self.text(node);
                let text = if self.is_class_reference(node) {
                    self.resolve_class_name(text)
                } else {
                    text.to_owned()
                };
                out.push(Token::new(text, TokenKind::Word));
            }
            _ if ATOMIC_KINDS.contains(&kind) => {
                out.push(Token::new(self.text(node), TokenKind::Word));
            }
            _ if node.child_count() == 0 => out.push(self.leaf(node)),
            _ => return false,
        }
        true
    }

    fn leaf(&self, node: Node<'_>) -> Token {
        let text = self.text(node);
        let kind = if text == "$" {
            TokenKind::Prefix
        } else if node.is_named() || is_wordlike(text) {
            TokenKind::Word
        } else {
            self.punct_kind(node, text)
        };
        Token::new(text, kind)
    }

    fn punct_kind(&self, node: Node<'_>, text: &str) -> TokenKind {
        let parent = node.parent();
        let parent_kind = parent.map_or("", |p| p.kind());

        match text {
            "," => TokenKind::Comma,
            ";" => TokenKind::Semicolon,
            "(" => self.open_paren_kind(node, parent),
            ")" => TokenKind::CloseParen,
            "[" if parent_kind == "subscript_expression" => TokenKind::IndexOpen,
            "[" => TokenKind::OpenBracket,
            "]" => TokenKind::CloseBracket,
            "{" if BLOCK_KINDS.contains(&parent_kind) => {
                let is_body = parent_kind == "compound_statement"
                    && parent
                        .and_then(|p| p.parent())
                        .is_some_and(|g| FUNCTION_KINDS.contains(&g.kind()));
                if is_body {
                    TokenKind::BodyOpenBrace
                } else {
                    TokenKind::OpenBrace
                }
            }
            "{" => TokenKind::IndexOpen,
            "}" if BLOCK_KINDS.contains(&parent_kind) => TokenKind::CloseBrace,
            "}" => TokenKind::CloseBracket,
            "->" | "?->" | "::" | "\\" => TokenKind::Access,
            ":" => match parent_kind {
                "case_statement" | "default_statement" => TokenKind::CaseColon,
                "conditional_expression" => TokenKind::Operator,
                _ => TokenKind::Colon,
            },
            "?" if parent_kind == "optional_type" => TokenKind::Prefix,
            "&" if parent_kind != "binary_expression" => TokenKind::Prefix,
            "..." | "!" | "~" | "@" => TokenKind::Prefix,
            "+" | "-" if parent_kind == "unary_op_expression" => TokenKind::Prefix,
            "++" | "--" => {
                if node.prev_sibling().is_none() {
                    TokenKind::Prefix
                } else {
                    TokenKind::Postfix
                }
            }
            _ => TokenKind::Operator,
        }
    }

    fn open_paren_kind(&self, node: Node<'_>, parent: Option<Node<'_>>) -> TokenKind {
        let Some(parent) = parent else {
            return TokenKind::OpenParen;
        };
        match parent.kind() {
            "arguments" => TokenKind::CallOpen,
            "formal_parameters" => {
                if parent
                    .parent()
                    .is_some_and(|g| CLOSURE_KINDS.contains(&g.kind()))
                {
                    TokenKind::OpenParen
                } else {
                    TokenKind::CallOpen
                }
            }
            _ => {
                let call_like = node.prev_sibling().is_some_and(|s| {
                    let keyword = self.text(s);
                    CALL_LIKE_KEYWORDS
                        .iter()
                        .any(|k| keyword.eq_ignore_ascii_case(k))
                });
                if call_like {
                    TokenKind::CallOpen
                } else {
                    TokenKind::OpenParen
                }
            }
        }
    }

    /// Whether a `name` / `qualified_name` node denotes a class.
    fn is_class_reference(&self, node: Node<'_>) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        match parent.kind() {
            "named_type" | "object_creation_expression" | "base_clause"
            | "class_interface_clause" | "type_list" | "attribute" => true,
            "scoped_call_expression" | "scoped_property_access_expression" => {
                parent.child_by_field_name("scope") == Some(node)
            }
            "class_constant_access_expression" => {
                let mut cursor = parent.walk();
                parent.named_children(&mut cursor).next() == Some(node)
            }
            "binary_expression" => node
                .prev_sibling()
                .is_some_and(|s| self.text(s).eq_ignore_ascii_case("instanceof")),
            _ => false,
        }
    }

    /// Fully qualify a class name the way PHP resolves it at compile time.
    fn resolve_class_name(&self, raw: &str) -> String {
        if SPECIAL_CLASS_NAMES
            .iter()
            .any(|s| raw.eq_ignore_ascii_case(s))
        {
            return raw.to_owned();
        }
        if let Some(rest) = raw.strip_prefix('\\') {
            return format!("\\{rest}");
        }
        if let Some(rest) = strip_keyword(raw, "namespace") {
            return self.qualify(rest.trim_start_matches('\\'));
        }

        let (first, rest) = match raw.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (raw, None),
        };
        if let Some(target) = self.imports.get(&first.to_lowercase()) {
            return match rest {
                Some(rest) => format!("\\{target}\\{rest}"),
                None => format!("\\{target}"),
            };
        }
        self.qualify(raw)
    }

    fn qualify(&self, name: &str) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("\\{ns}\\{name}"),
            _ => format!("\\{name}"),
        }
    }
}

fn type_kind(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "trait_declaration" => Some(TypeKind::Trait),
        "enum_declaration" => Some(TypeKind::Enum),
        _ => None,
    }
}

fn named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

fn is_wordlike(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '\'' | '"'))
}

fn compact(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a case-insensitive leading keyword followed by whitespace or `\`.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    let rest = &text[keyword.len()..];
    let boundary = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '\\');
    (head.eq_ignore_ascii_case(keyword) && boundary).then_some(rest)
}

/// Parse a `use` statement into `(alias, fully qualified target)` pairs.
///
/// Function and constant imports are ignored; group syntax
/// `use A\{B, C as D};` is expanded.
fn parse_use_declaration(text: &str) -> Vec<(String, String)> {
    let body = text.trim().trim_end_matches(';').trim();
    let body = strip_keyword(body, "use").unwrap_or(body).trim();
    if strip_keyword(body, "function").is_some() || strip_keyword(body, "const").is_some() {
        return Vec::new();
    }

    match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            let prefix = body[..open].trim().trim_matches('\\');
            body[open + 1..close]
                .split(',')
                .map(str::trim)
                .filter(|c| {
                    !c.is_empty()
                        && strip_keyword(c, "function").is_none()
                        && strip_keyword(c, "const").is_none()
                })
                .filter_map(use_clause)
                .map(|(alias, name)| (alias, format!("{prefix}\\{name}")))
                .collect()
        }
        _ => body.split(',').map(str::trim).filter_map(use_clause).collect(),
    }
}

fn use_clause(clause: &str) -> Option<(String, String)> {
    let mut parts = clause.split_whitespace();
    let name = parts.next()?.trim_start_matches('\\');
    if name.is_empty() {
        return None;
    }
    let alias = match (parts.next(), parts.next()) {
        (Some(kw), Some(alias)) if kw.eq_ignore_ascii_case("as") => alias.to_owned(),
        _ => name.rsplit('\\').next()?.to_owned(),
    };
    Some((alias, name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxTree {
        PhpGrammar::new().parse(source).unwrap()
    }

    fn only_type(tree: &SyntaxTree) -> &TypeDecl {
        fn find(items: &[Item]) -> Option<&TypeDecl> {
            items.iter().find_map(|item| match item {
                Item::Type(t) => Some(t),
                Item::Namespace(ns) => find(&ns.items),
            })
        }
        find(&tree.items).expect("type declaration")
    }

    #[test]
    fn parses_namespaced_interface() {
        let tree = parse(
            r"<?php

namespace App\Zed\Cart\Business;

interface CartFacadeInterface
{
    public function add(int $qty): void;

    public function remove(int $qty): void;
}
",
        );
        let Item::Namespace(ns) = &tree.items[0] else {
            panic!("expected namespace, got {:?}", tree.items[0]);
        };
        assert_eq!(ns.name.as_deref(), Some("App\\Zed\\Cart\\Business"));
        let decl = only_type(&tree);
        assert_eq!(decl.kind, TypeKind::Interface);
        assert_eq!(decl.name, "CartFacadeInterface");
        let names: Vec<_> = decl.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["add", "remove"]);
        assert_eq!(decl.members[0].start_line, 7);
        assert_eq!(decl.members[1].start_line, 9);
    }

    #[test]
    fn braced_namespace() {
        let tree = parse("<?php\nnamespace Shop { class Cart { public function total() { return 0; } } }\n");
        let Item::Namespace(ns) = &tree.items[0] else {
            panic!("expected namespace");
        };
        assert_eq!(ns.name.as_deref(), Some("Shop"));
        assert_eq!(only_type(&tree).name, "Cart");
    }

    #[test]
    fn top_level_class_without_namespace() {
        let tree = parse("<?php\nclass Foo\n{\n    public function bar()\n    {\n    }\n}\n");
        assert!(matches!(tree.items[0], Item::Type(_)));
        assert_eq!(only_type(&tree).members[0].name, "bar");
    }

    #[test]
    fn collects_properties_and_constants() {
        let tree = parse(
            "<?php\nclass Foo\n{\n    const LIMIT = 3;\n    private $items = [];\n    public function run() {}\n}\n",
        );
        let kinds: Vec<_> = only_type(&tree)
            .members
            .iter()
            .map(|m| (m.kind, m.name.as_str()))
            .collect();
        assert_eq!(
            kinds,
            [
                (MemberKind::Constant, "LIMIT"),
                (MemberKind::Property, "items"),
                (MemberKind::Function, "run"),
            ]
        );
    }

    #[test]
    fn nearest_doc_block_is_attached() {
        let tree = parse(
            r"<?php
class Foo
{
    /**
     * Old docs.
     */
    // regular comment
    /**
     * New docs.
     */
    public function bar() {}

    public function baz() {}
}
",
        );
        let members = &only_type(&tree).members;
        assert!(members[0].doc_comment.as_deref().unwrap().contains("New docs."));
        assert_eq!(members[1].doc_comment, None);
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = PhpGrammar::new()
            .parse("<?php\nclass Foo {\n    public function bar( {\n}\n")
            .unwrap_err();
        let IndexError::Parse { line, .. } = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert!(line >= 2, "line {line}");
    }

    fn deeply_nested(depth: usize, inner: &str) -> String {
        format!(
            "<?php\nclass Deep\n{{\n    public function f()\n    {{\n        return {}{inner}{};\n    }}\n}}\n",
            "(".repeat(depth),
            ")".repeat(depth)
        )
    }

    #[test]
    fn deep_nesting_is_lowered() {
        let tree = parse(&deeply_nested(10_000, "1"));
        let member = &only_type(&tree).members[0];
        let opens = member.tokens.iter().filter(|t| t.text == "(").count();
        assert_eq!(opens, 10_001);
    }

    #[test]
    fn deep_nesting_error_is_located() {
        let err = PhpGrammar::new()
            .parse(&deeply_nested(10_000, "1 +"))
            .unwrap_err();
        assert!(matches!(err, IndexError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn plain_text_without_php_tag_is_valid() {
        let tree = parse("just some text\n");
        assert!(tree.items.is_empty());
    }

    #[test]
    fn resolves_class_references_in_member_text() {
        let tree = parse(
            r"<?php
namespace App\Service;

use Vendor\Lib\Bar;
use Vendor\Lib\Widgets as W;

class Maker
{
    public function make(Bar $bar, W\Knob $knob): Result
    {
        return new Product(self::LIMIT, strlen('x'));
    }
}
",
        );
        let member = &only_type(&tree).members[0];
        let text = PhpGrammar::new().pretty_print(member);
        assert!(text.contains("\\Vendor\\Lib\\Bar $bar"), "{text}");
        assert!(text.contains("\\Vendor\\Lib\\Widgets\\Knob $knob"), "{text}");
        assert!(text.contains("): \\App\\Service\\Result"), "{text}");
        assert!(text.contains("new \\App\\Service\\Product("), "{text}");
        assert!(text.contains("self::LIMIT"), "{text}");
        assert!(text.contains("strlen('x')"), "{text}");
    }

    #[test]
    fn pretty_print_is_canonical_across_formatting() {
        let compact = parse("<?php class A { public function f($x){return $x+1;} }");
        let spread = parse(
            "<?php\nclass A\n{\n    public function f( $x )\n    {\n        return $x   +   1;\n    }\n}\n",
        );
        let g = PhpGrammar::new();
        let a = g.pretty_print(&only_type(&compact).members[0]);
        let b = g.pretty_print(&only_type(&spread).members[0]);
        assert_eq!(a, b);
        assert_eq!(a, "public function f($x)\n{\n    return $x + 1;\n}");
    }

    #[test]
    fn comments_are_not_part_of_tokens() {
        let tree = parse("<?php class A { public function f() { // note\n return 1; /* x */ } }");
        let member = &only_type(&tree).members[0];
        assert!(member.tokens.iter().all(|t| !t.text.contains("note")));
    }

    #[test]
    fn visibility_is_tagged() {
        let tree = parse("<?php class A { protected static function f() {} }");
        let member = &only_type(&tree).members[0];
        assert_eq!(member.tokens[0], Token::new("protected", TokenKind::Visibility));
    }

    #[test]
    fn parse_use_simple_and_alias() {
        assert_eq!(
            parse_use_declaration("use Foo\\Bar;"),
            vec![("Bar".to_owned(), "Foo\\Bar".to_owned())]
        );
        assert_eq!(
            parse_use_declaration("use \\Foo\\Bar as Baz, Qux;"),
            vec![
                ("Baz".to_owned(), "Foo\\Bar".to_owned()),
                ("Qux".to_owned(), "Qux".to_owned()),
            ]
        );
    }

    #[test]
    fn parse_use_group() {
        assert_eq!(
            parse_use_declaration("use Foo\\{Bar, Baz as B};"),
            vec![
                ("Bar".to_owned(), "Foo\\Bar".to_owned()),
                ("B".to_owned(), "Foo\\Baz".to_owned()),
            ]
        );
    }

    #[test]
    fn parse_use_function_is_ignored() {
        assert!(parse_use_declaration("use function Foo\\bar;").is_empty());
        assert!(parse_use_declaration("use const Foo\\BAR;").is_empty());
    }

    #[test]
    fn strip_keyword_requires_boundary() {
        assert_eq!(strip_keyword("use Foo", "use"), Some(" Foo"));
        assert_eq!(strip_keyword("namespace\\Foo", "namespace"), Some("\\Foo"));
        assert_eq!(strip_keyword("user", "use"), None);
        assert_eq!(strip_keyword("us", "use"), None);
    }

    #[test]
    fn resolution_rules() {
        let lowering = Lowering {
            source: "",
            namespace: Some("App".into()),
            imports: HashMap::from([("bar".to_owned(), "Vendor\\Bar".to_owned())]),
        };
        assert_eq!(lowering.resolve_class_name("\\Foo"), "\\Foo");
        assert_eq!(lowering.resolve_class_name("Foo"), "\\App\\Foo");
        assert_eq!(lowering.resolve_class_name("BAR"), "\\Vendor\\Bar");
        assert_eq!(lowering.resolve_class_name("Bar\\Baz"), "\\Vendor\\Bar\\Baz");
        assert_eq!(lowering.resolve_class_name("namespace\\Sub\\X"), "\\App\\Sub\\X");
        assert_eq!(lowering.resolve_class_name("self"), "self");
        assert_eq!(lowering.resolve_class_name("static"), "static");

        let global = Lowering {
            source: "",
            namespace: None,
            imports: HashMap::new(),
        };
        assert_eq!(global.resolve_class_name("Foo"), "\\Foo");
    }
}
