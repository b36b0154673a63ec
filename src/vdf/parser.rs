//! VDF Text Parser
//!
//! Tokenizes KeyValues text and builds a `VdfObject` tree. The parser
//! recovers from damage: a broken entry is dropped, an unclosed block keeps
//! what was read, and every problem is recorded with its 1-based line and,
//! when known, the key whose entry was lost.
//!
//! Quoted strings end at the line break, and a leaf value must sit on the
//! same line as its key, so one broken line never swallows the rest of the
//! document.

use super::types::{VdfObject, VdfValue};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct VdfSyntaxError {
    pub line: usize,
    pub message: String,
    /// Key of the entry that could not be read.
    pub key: Option<String>,
}

impl VdfSyntaxError {
    fn new<T: Into<String>>(line: usize, key: Option<&str>, message: T) -> Self {
        Self {
            line,
            message: message.into(),
            key: key.map(str::to_string),
        }
    }
}

/// Result of a recovering parse: whatever could be read, plus the damage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VdfDocument {
    pub root: VdfObject,
    pub errors: Vec<VdfSyntaxError>,
}

impl VdfDocument {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Str(String),
    /// Quoted string cut off by a line break or end of input.
    Unterminated,
    Open,
    Close,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, VdfSyntaxError> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(None);
            };
            let line = self.line;
            match c {
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                '{' => {
                    self.bump();
                    return Ok(Some(Token { kind: TokenKind::Open, line }));
                }
                '}' => {
                    self.bump();
                    return Ok(Some(Token { kind: TokenKind::Close, line }));
                }
                '"' => {
                    self.bump();
                    let kind = match self.quoted() {
                        Some(s) => TokenKind::Str(s),
                        None => TokenKind::Unterminated,
                    };
                    return Ok(Some(Token { kind, line }));
                }
                '/' => {
                    self.bump();
                    if self.chars.peek() == Some(&'/') {
                        self.skip_line();
                    } else {
                        let s = self.bare(Some('/'));
                        return Ok(Some(Token { kind: TokenKind::Str(s), line }));
                    }
                }
                // Platform conditionals such as [$WIN32] are not evaluated.
                '[' => self.conditional(line)?,
                _ => {
                    let s = self.bare(None);
                    return Ok(Some(Token { kind: TokenKind::Str(s), line }));
                }
            }
        }
    }

    /// Body of a quoted string; `None` if the line or input ends first.
    fn quoted(&mut self) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return None,
                Some('"') => return Some(out),
                Some('\\') => match self.chars.peek().copied() {
                    Some('\\') => {
                        self.bump();
                        out.push('\\');
                    }
                    Some('"') => {
                        self.bump();
                        out.push('"');
                    }
                    Some('n') => {
                        self.bump();
                        out.push('\n');
                    }
                    Some('t') => {
                        self.bump();
                        out.push('\t');
                    }
                    // Unknown escapes are literal, so `D:\Games` survives.
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn bare(&mut self, first: Option<char>) -> String {
        let mut out: String = first.into_iter().collect();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '"' | '{' | '}') {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn conditional(&mut self, start_line: usize) -> Result<(), VdfSyntaxError> {
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(VdfSyntaxError::new(
                        start_line,
                        None,
                        "unterminated conditional '['",
                    ));
                }
                Some(']') => return Ok(()),
                Some(_) => {}
            }
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    errors: Vec<VdfSyntaxError>,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.peeked.take() {
            return Some(token);
        }
        loop {
            match self.lexer.next_token() {
                Ok(token) => return token,
                Err(e) => self.errors.push(e),
            }
        }
    }

    fn error<T: Into<String>>(&mut self, line: usize, key: Option<&str>, message: T) {
        self.errors.push(VdfSyntaxError::new(line, key, message));
    }

    /// `opened` is the line and key of the `{` this block started at.
    fn parse_object(&mut self, opened: Option<(usize, Option<&str>)>) -> VdfObject {
        let mut obj = VdfObject::new();
        loop {
            let Some(token) = self.next() else {
                if let Some((line, key)) = opened {
                    self.error(line, key, "unclosed '{'");
                }
                return obj;
            };

            let key = match token.kind {
                TokenKind::Str(key) => key,
                TokenKind::Close if opened.is_some() => return obj,
                TokenKind::Close => {
                    self.error(token.line, None, "unexpected '}'");
                    continue;
                }
                TokenKind::Open => {
                    self.error(token.line, None, "expected a key, found '{'");
                    self.parse_object(Some((token.line, None)));
                    continue;
                }
                TokenKind::Unterminated => {
                    self.error(token.line, None, "unterminated quoted string");
                    continue;
                }
            };

            match self.next() {
                Some(Token { kind: TokenKind::Str(value), line }) if line == token.line => {
                    obj.push(key, VdfValue::String(value));
                }
                Some(Token { kind: TokenKind::Unterminated, line }) if line == token.line => {
                    self.error(line, Some(&key), "unterminated quoted string");
                }
                Some(Token { kind: TokenKind::Open, line }) => {
                    let child = self.parse_object(Some((line, Some(&key))));
                    obj.push(key, VdfValue::Object(child));
                }
                other => {
                    self.error(
                        token.line,
                        Some(&key),
                        format!("missing value for key \"{}\"", key),
                    );
                    self.peeked = other;
                }
            }
        }
    }
}

/// Parse KeyValues text, keeping everything readable around damaged entries.
pub fn parse_lenient(text: &str) -> VdfDocument {
    let mut parser = Parser {
        lexer: Lexer::new(text),
        peeked: None,
        errors: Vec::new(),
    };
    let root = parser.parse_object(None);
    debug!(
        "Parsed VDF document: {} top-level keys, {} error(s)",
        root.len(),
        parser.errors.len()
    );
    VdfDocument {
        root,
        errors: parser.errors,
    }
}

/// Parse KeyValues text into its top-level block, failing on the first
/// syntax error.
pub fn parse(text: &str) -> Result<VdfObject, VdfSyntaxError> {
    let doc = parse_lenient(text);
    match doc.errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(doc.root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#""AppState"
{
	"appid"		"730"
	"Universe"		"1"
	"name"		"Counter-Strike 2"
	"installdir"		"Counter-Strike Global Offensive"
	"UserConfig"
	{
		"language"		"english"
	}
}
"#;

    #[test]
    fn test_parse_nested_manifest() {
        let root = parse(MANIFEST).unwrap();
        let state = root.get_object("AppState").unwrap();
        assert_eq!(state.get_str("appid"), Some("730"));
        assert_eq!(state.get_str("name"), Some("Counter-Strike 2"));
        assert_eq!(
            state.get_object("UserConfig").unwrap().get_str("language"),
            Some("english")
        );
    }

    #[test]
    fn test_escapes() {
        let root = parse(r#""path" "D:\\Games" "quote" "say \"hi\"" "raw" "C:\Steam""#).unwrap();
        assert_eq!(root.get_str("path"), Some(r"D:\Games"));
        assert_eq!(root.get_str("quote"), Some(r#"say "hi""#));
        assert_eq!(root.get_str("raw"), Some(r"C:\Steam"));
    }

    #[test]
    fn test_comments_conditionals_and_bare_tokens() {
        let text = "// header comment\nroot\n{\n  key value [$WIN32]\n  other \"x\" // trailing\n}\n";
        let root = parse(text).unwrap();
        let obj = root.get_object("root").unwrap();
        assert_eq!(obj.get_str("key"), Some("value"));
        assert_eq!(obj.get_str("other"), Some("x"));
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\u{feff}  \n// only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_string_reports_line() {
        let err = parse("\"AppState\"\n{\n\t\"appid\"\t\t\"730\n}\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.key.as_deref(), Some("appid"));
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_missing_value() {
        let err = parse("\"AppState\"\n{\n\t\"name\"\n}\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.key.as_deref(), Some("name"));
        assert!(err.message.contains("\"name\""));
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = parse("\"a\"\n{\n\"b\" \"c\"\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unclosed"));

        let err = parse("\"b\" \"c\"\n}\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unexpected"));
    }

    #[test]
    fn test_lenient_skips_broken_leaf() {
        let doc = parse_lenient("\"AppState\"\n{\n\t\"appid\" \"730\"\n\t\"buildid\" \"123\n\t\"name\" \"Game\"\n}\n");
        let state = doc.root.get_object("AppState").unwrap();
        assert_eq!(state.get_str("appid"), Some("730"));
        assert_eq!(state.get_str("name"), Some("Game"));
        assert!(state.get("buildid").is_none());
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].line, 4);
        assert_eq!(doc.errors[0].key.as_deref(), Some("buildid"));
    }

    #[test]
    fn test_lenient_lone_key_does_not_eat_next_line() {
        let doc = parse_lenient("\"AppState\"\n{\n\t\"Universe\"\n\t\"name\" \"Game\"\n}\n");
        let state = doc.root.get_object("AppState").unwrap();
        assert_eq!(state.get_str("name"), Some("Game"));
        assert_eq!(state.len(), 1);
        assert_eq!(doc.errors[0].key.as_deref(), Some("Universe"));
    }

    #[test]
    fn test_lenient_keeps_unclosed_block() {
        let doc = parse_lenient("\"AppState\"\n{\n\t\"appid\" \"730\"\n");
        assert!(!doc.is_clean());
        assert_eq!(doc.errors[0].key.as_deref(), Some("AppState"));
        assert_eq!(
            doc.root.get_object("AppState").unwrap().get_str("appid"),
            Some("730")
        );
    }
}
