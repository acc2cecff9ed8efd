//! Canonical layout of a classified token stream.
//!
//! Output uses four-space indentation, one statement per line, function body
//! braces on their own line and control-structure braces on the same line.
//! Spacing depends only on the kinds of adjacent tokens, so the same token
//! stream always prints the same way.

use crate::syntax::{Token, TokenKind};

const INDENT: &str = "    ";

/// Keywords that stay on the closing-brace line: `} else {`.
const BRACE_CONTINUATIONS: &[&str] = &["else", "elseif", "catch", "finally"];

#[derive(Debug, Clone, Copy)]
enum Frame {
    Paren,
    Block { in_case: bool },
}

struct Printer {
    out: String,
    indent: usize,
    line_start: bool,
    prev: Option<TokenKind>,
    frames: Vec<Frame>,
    after_block_close: bool,
}

/// Print `tokens` in canonical layout, without a trailing newline.
pub(crate) fn print(tokens: &[Token]) -> String {
    let mut p = Printer {
        out: String::new(),
        indent: 0,
        line_start: true,
        prev: None,
        frames: Vec::new(),
        after_block_close: false,
    };
    for token in tokens {
        p.token(token);
    }
    let trimmed = p.out.trim_end().len();
    p.out.truncate(trimmed);
    p.out
}

impl Printer {
    fn token(&mut self, token: &Token) {
        if self.after_block_close {
            self.after_block_close = false;
            if !stays_on_brace_line(token) {
                self.newline();
            }
        }

        match token.kind {
            TokenKind::Semicolon => {
                self.write(&token.text);
                if !matches!(self.frames.last(), Some(Frame::Paren)) {
                    self.newline();
                }
            }
            TokenKind::Comma => {
                self.write(&token.text);
                if matches!(self.frames.last(), Some(Frame::Block { .. })) {
                    self.newline();
                }
            }
            TokenKind::CallOpen
            | TokenKind::OpenParen
            | TokenKind::IndexOpen
            | TokenKind::OpenBracket => {
                self.space_before(token.kind);
                self.write(&token.text);
                self.frames.push(Frame::Paren);
            }
            TokenKind::CloseParen | TokenKind::CloseBracket => {
                if matches!(self.frames.last(), Some(Frame::Paren)) {
                    self.frames.pop();
                }
                self.write(&token.text);
            }
            TokenKind::OpenBrace | TokenKind::BodyOpenBrace => {
                if token.kind == TokenKind::BodyOpenBrace {
                    self.newline();
                } else if !self.line_start {
                    self.out.push(' ');
                }
                self.write(&token.text);
                self.frames.push(Frame::Block { in_case: false });
                self.indent += 1;
                self.newline();
            }
            TokenKind::CloseBrace => {
                if let Some(Frame::Block { in_case }) = self.frames.last().copied() {
                    self.frames.pop();
                    if in_case {
                        self.indent = self.indent.saturating_sub(1);
                    }
                }
                self.indent = self.indent.saturating_sub(1);
                self.newline();
                self.write(&token.text);
                self.after_block_close = true;
            }
            TokenKind::CaseColon => {
                self.write(&token.text);
                if let Some(Frame::Block { in_case }) = self.frames.last_mut()
                    && !*in_case
                {
                    *in_case = true;
                    self.indent += 1;
                }
                self.newline();
            }
            TokenKind::Attribute => {
                self.newline();
                self.write(&token.text);
                self.newline();
            }
            TokenKind::Word if self.line_start && is_case_label(&token.text) => {
                if let Some(Frame::Block { in_case }) = self.frames.last_mut()
                    && *in_case
                {
                    *in_case = false;
                    self.indent = self.indent.saturating_sub(1);
                }
                self.write(&token.text);
            }
            _ => {
                self.space_before(token.kind);
                self.write(&token.text);
            }
        }

        self.prev = Some(token.kind);
    }

    fn space_before(&mut self, current: TokenKind) {
        if self.line_start {
            return;
        }
        if let Some(prev) = self.prev
            && needs_space(prev, current)
        {
            self.out.push(' ');
        }
    }

    fn write(&mut self, text: &str) {
        if self.line_start {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.line_start = false;
        }
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        if !self.line_start {
            self.out.push('\n');
            self.line_start = true;
        }
    }
}

fn stays_on_brace_line(token: &Token) -> bool {
    match token.kind {
        TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::CloseParen
        | TokenKind::CloseBracket
        | TokenKind::Access
        | TokenKind::CallOpen
        | TokenKind::Operator => true,
        TokenKind::Word => BRACE_CONTINUATIONS
            .iter()
            .any(|kw| token.text.eq_ignore_ascii_case(kw)),
        _ => false,
    }
}

fn is_case_label(text: &str) -> bool {
    text.eq_ignore_ascii_case("case") || text.eq_ignore_ascii_case("default")
}

fn needs_space(prev: TokenKind, current: TokenKind) -> bool {
    use TokenKind as K;

    match (prev, current) {
        (
            _,
            K::Comma
            | K::Semicolon
            | K::CloseParen
            | K::CloseBracket
            | K::Access
            | K::Postfix
            | K::Colon
            | K::CaseColon
            | K::CallOpen
            | K::IndexOpen,
        )
        | (K::CallOpen | K::OpenParen | K::IndexOpen | K::OpenBracket | K::Access | K::Prefix, _) => {
            false
        }
        (K::Operator, _)
        | (_, K::Operator)
        | (K::Comma | K::Semicolon | K::Colon | K::CloseBrace, _) => true,
        (
            K::Word | K::Visibility | K::Postfix | K::CloseParen | K::CloseBracket,
            K::Word | K::Visibility | K::Prefix | K::OpenParen | K::OpenBracket,
        ) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind as K;

    fn t(text: &str, kind: K) -> Token {
        Token::new(text, kind)
    }

    fn w(text: &str) -> Token {
        t(text, K::Word)
    }

    #[test]
    fn prints_method_with_body_on_new_line() {
        let tokens = vec![
            w("function"),
            w("bar"),
            t("(", K::CallOpen),
            t(")", K::CloseParen),
            t(":", K::Colon),
            w("int"),
            t("{", K::BodyOpenBrace),
            w("return"),
            w("1"),
            t(";", K::Semicolon),
            t("}", K::CloseBrace),
        ];
        assert_eq!(print(&tokens), "function bar(): int\n{\n    return 1;\n}");
    }

    #[test]
    fn prints_abstract_signature() {
        let tokens = vec![
            w("function"),
            w("get"),
            t("(", K::CallOpen),
            t("?", K::Prefix),
            w("string"),
            w("$key"),
            t(",", K::Comma),
            w("int"),
            w("$default"),
            t("=", K::Operator),
            w("0"),
            t(")", K::CloseParen),
            t(":", K::Colon),
            w("\\Foo\\Bar"),
            t(";", K::Semicolon),
        ];
        assert_eq!(
            print(&tokens),
            "function get(?string $key, int $default = 0): \\Foo\\Bar;"
        );
    }

    #[test]
    fn control_structures_keep_brace_on_line() {
        let tokens = vec![
            w("if"),
            t("(", K::OpenParen),
            t("!", K::Prefix),
            w("$ok"),
            t(")", K::CloseParen),
            t("{", K::OpenBrace),
            w("return"),
            t(";", K::Semicolon),
            t("}", K::CloseBrace),
            w("else"),
            t("{", K::OpenBrace),
            w("$this"),
            t("->", K::Access),
            w("run"),
            t("(", K::CallOpen),
            t(")", K::CloseParen),
            t(";", K::Semicolon),
            t("}", K::CloseBrace),
        ];
        assert_eq!(
            print(&tokens),
            "if (!$ok) {\n    return;\n} else {\n    $this->run();\n}"
        );
    }

    #[test]
    fn semicolons_inside_parens_do_not_break_lines() {
        let tokens = vec![
            w("for"),
            t("(", K::OpenParen),
            w("$i"),
            t("=", K::Operator),
            w("0"),
            t(";", K::Semicolon),
            w("$i"),
            t("<", K::Operator),
            w("3"),
            t(";", K::Semicolon),
            w("$i"),
            t("++", K::Postfix),
            t(")", K::CloseParen),
            t("{", K::OpenBrace),
            t("}", K::CloseBrace),
        ];
        assert_eq!(print(&tokens), "for ($i = 0; $i < 3; $i++) {\n}");
    }

    #[test]
    fn closure_argument_stays_inline_after_brace() {
        let tokens = vec![
            w("array_map"),
            t("(", K::CallOpen),
            w("function"),
            t("(", K::OpenParen),
            w("$x"),
            t(")", K::CloseParen),
            t("{", K::OpenBrace),
            w("return"),
            w("$x"),
            t(";", K::Semicolon),
            t("}", K::CloseBrace),
            t(",", K::Comma),
            w("$list"),
            t(")", K::CloseParen),
            t(";", K::Semicolon),
        ];
        assert_eq!(
            print(&tokens),
            "array_map(function ($x) {\n    return $x;\n}, $list);"
        );
    }

    #[test]
    fn switch_cases_are_indented() {
        let tokens = vec![
            w("switch"),
            t("(", K::OpenParen),
            w("$a"),
            t(")", K::CloseParen),
            t("{", K::OpenBrace),
            w("case"),
            w("1"),
            t(":", K::CaseColon),
            w("return"),
            w("1"),
            t(";", K::Semicolon),
            w("default"),
            t(":", K::CaseColon),
            w("return"),
            w("2"),
            t(";", K::Semicolon),
            t("}", K::CloseBrace),
        ];
        assert_eq!(
            print(&tokens),
            "switch ($a) {\n    case 1:\n        return 1;\n    default:\n        return 2;\n}"
        );
    }

    #[test]
    fn array_literal_and_subscript() {
        let tokens = vec![
            w("return"),
            t("[", K::OpenBracket),
            w("'a'"),
            t("=>", K::Operator),
            w("$b"),
            t("[", K::IndexOpen),
            w("0"),
            t("]", K::CloseBracket),
            t("]", K::CloseBracket),
            t(";", K::Semicolon),
        ];
        assert_eq!(print(&tokens), "return ['a' => $b[0]];");
    }

    #[test]
    fn attribute_gets_own_line() {
        let tokens = vec![
            t("#[Pure]", K::Attribute),
            w("function"),
            w("f"),
            t("(", K::CallOpen),
            t(")", K::CloseParen),
            t(";", K::Semicolon),
        ];
        assert_eq!(print(&tokens), "#[Pure]\nfunction f();");
    }

    #[test]
    fn empty_input() {
        assert_eq!(print(&[]), "");
    }

    #[test]
    fn printing_is_deterministic() {
        let tokens = vec![w("function"), w("a"), t("(", K::CallOpen), t(")", K::CloseParen), t(";", K::Semicolon)];
        assert_eq!(print(&tokens), print(&tokens));
    }
}
