//! A small tokenizer for TypeScript/TSX source.
//!
//! Only the pieces needed to recognise import statements and object literals
//! are produced: identifiers, single punctuation characters and string
//! literals. Comments and whitespace are dropped, template literals are
//! skipped whole. The lexer never fails; malformed input just yields fewer
//! tokens.

use std::ops::Range;

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword (`import`, `from`, `useState`, ...)
    Ident(String),
    /// A single punctuation character
    Punct(char),
    /// Quoted string literal with escapes resolved
    Str(String),
    /// Template literal (contents are not inspected)
    Template,
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// Returns the identifier text if this is an identifier.
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Check for a specific identifier.
    pub fn is_ident(&self, word: &str) -> bool {
        self.ident() == Some(word)
    }

    /// Check for a specific punctuation character.
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Returns the string value if this is a string literal.
    pub fn string(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Tokenize source text.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).run()
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        self.code(false);
        self.tokens
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Lex code until end of input, or until the `}` closing a template
    /// substitution when `in_substitution` is set.
    fn code(&mut self, in_substitution: bool) {
        let mut depth = 0usize;

        while let Some(b) = self.peek(0) {
            match b {
                b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment(),
                b'\'' | b'"' => self.string(b),
                b'`' => self.template(),
                b'{' => {
                    depth += 1;
                    self.punct('{');
                }
                b'}' => {
                    if in_substitution && depth == 0 {
                        self.pos += 1;
                        return;
                    }
                    depth = depth.saturating_sub(1);
                    self.punct('}');
                }
                b if b.is_ascii_whitespace() => self.pos += 1,
                b if is_ident_start(b) => self.ident(),
                b if b.is_ascii() => self.punct(b as char),
                _ => {
                    // Non-ASCII outside identifiers and strings: skip the whole char.
                    let len = self.src[self.pos..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    self.pos += len;
                }
            }
        }
    }

    fn punct(&mut self, c: char) {
        let start = self.pos;
        self.pos += 1;
        self.tokens.push(Token {
            kind: TokenKind::Punct(c),
            span: start..self.pos,
        });
    }

    fn ident(&mut self) {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if is_ident_continue(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.tokens.push(Token {
            kind: TokenKind::Ident(self.src[start..self.pos].to_string()),
            span: start..self.pos,
        });
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.peek(0) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.peek(0) == Some(b'*') && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    /// Quoted string. An unescaped newline ends the literal, which keeps a
    /// stray apostrophe in JSX text from swallowing the rest of the file.
    fn string(&mut self, quote: u8) {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        let mut segment = self.pos;

        while let Some(b) = self.peek(0) {
            match b {
                b'\\' => {
                    value.push_str(&self.src[segment..self.pos]);
                    self.pos += 1;
                    if let Some(escaped) = self.src[self.pos..].chars().next() {
                        value.push(unescape(escaped));
                        self.pos += escaped.len_utf8();
                    }
                    segment = self.pos;
                }
                b'\n' => break,
                b if b == quote => break,
                _ => self.pos += 1,
            }
        }

        value.push_str(&self.src[segment..self.pos]);
        if self.peek(0) == Some(quote) {
            self.pos += 1;
        }

        self.tokens.push(Token {
            kind: TokenKind::Str(value),
            span: start..self.pos,
        });
    }

    fn template(&mut self) {
        let start = self.pos;
        self.pos += 1;

        while let Some(b) = self.peek(0) {
            match b {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    break;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    // Tokens inside the substitution belong to the template.
                    let saved = self.tokens.len();
                    self.code(true);
                    self.tokens.truncate(saved);
                }
                _ => self.pos += 1,
            }
        }

        let end = self.pos.min(self.bytes.len());
        self.pos = end;
        self.tokens.push(Token {
            kind: TokenKind::Template,
            span: start..end,
        });
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds(r#"import { a } from "x";"#),
            vec![
                TokenKind::Ident("import".into()),
                TokenKind::Punct('{'),
                TokenKind::Ident("a".into()),
                TokenKind::Punct('}'),
                TokenKind::Ident("from".into()),
                TokenKind::Str("x".into()),
                TokenKind::Punct(';'),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let src = "// import a from 'x'\n/* import b from 'y' */ c";
        assert_eq!(kinds(src), vec![TokenKind::Ident("c".into())]);
    }

    #[test]
    fn test_string_escapes_and_spans() {
        let src = r#"x = "a\"b""#;
        let tokens = tokenize(src);
        assert_eq!(tokens[2].kind, TokenKind::Str("a\"b".into()));
        assert_eq!(&src[tokens[2].span.clone()], r#""a\"b""#);
    }

    #[test]
    fn test_string_stops_at_newline() {
        let src = "<p>Don't panic</p>\nimport a from 'b'";
        let tokens = tokenize(src);
        assert!(tokens.iter().any(|t| t.is_ident("import")));
        assert!(tokens.iter().any(|t| t.string() == Some("b")));
    }

    #[test]
    fn test_template_with_substitution() {
        let src = "const s = `a ${ `inner ${x}` } b {`; import y from 'z'";
        let tokens = tokenize(src);
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Template).count(),
            1
        );
        assert!(!tokens.iter().any(|t| t.is_ident("x")));
        assert!(tokens.iter().any(|t| t.string() == Some("z")));
    }

    #[test]
    fn test_unterminated_input_does_not_panic() {
        for src in ["\"abc", "`abc ${", "/* abc", "'\\"] {
            let _ = tokenize(src);
        }
    }

    #[test]
    fn test_non_ascii_is_skipped() {
        let tokens = tokenize("✨ a");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_ident("a"));
    }
}
