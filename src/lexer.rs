// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for the Stel programming language.
// Converts source code text into a stream of tokens for parsing.
//
// Supports:
// - Keywords: let, const, fn, def, if, else, while, for, in, break,
//   continue, return, match, struct, enum, try, catch, throw, import,
//   and, or, not, true, false, null
// - Identifiers, integer and float literals
// - String literals with escape sequences
// - Operators: + - * / % == != < <= > >= = .. :: =>
// - Punctuation: ( ) { } [ ] , : ; .
// - Comments starting with #
//
// Newlines count as whitespace; statements are separated structurally
// (or by optional semicolons). Lexing fails with a LexError on an
// unrecognized character, an unknown escape, or an unterminated string.

use crate::errors::{SourceLocation, StelError};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Keyword(String),
    Operator(String),
    Punctuation(char),
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

const KEYWORDS: &[&str] = &[
    "let", "const", "fn", "def", "if", "else", "while", "for", "in", "break", "continue",
    "return", "match", "struct", "enum", "try", "catch", "throw", "import", "and", "or", "not",
];

/// Tokenizes Stel source code into a vector of tokens terminated by Eof.
///
/// Processes the input character by character, recognizing keywords,
/// identifiers, numbers, strings, operators, and punctuation. Comments
/// starting with # are skipped until end of line.
pub fn tokenize(source: &str) -> Result<Vec<Token>, StelError> {
    Lexer::new(source).run()
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer { input: source.chars().collect(), pos: 0, line: 1, column: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn error(&self, message: String) -> StelError {
        StelError::lex_error(message, self.location())
    }

    fn run(mut self) -> Result<Vec<Token>, StelError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();
            let line = self.line;
            let column = self.column;

            let Some(c) = self.peek() else {
                tokens.push(Token { kind: TokenKind::Eof, line, column });
                return Ok(tokens);
            };

            let kind = match c {
                '"' => self.read_string()?,
                '0'..='9' => self.read_number()?,
                _ if c.is_alphabetic() || c == '_' => self.read_ident(),
                '(' | ')' | '{' | '}' | '[' | ']' | ',' | ';' => {
                    self.advance();
                    TokenKind::Punctuation(c)
                }
                ':' => {
                    self.advance();
                    if self.peek() == Some(':') {
                        self.advance();
                        TokenKind::Operator("::".into())
                    } else {
                        TokenKind::Punctuation(':')
                    }
                }
                '.' => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        TokenKind::Operator("..".into())
                    } else {
                        TokenKind::Punctuation('.')
                    }
                }
                '=' => {
                    self.advance();
                    match self.peek() {
                        Some('=') => {
                            self.advance();
                            TokenKind::Operator("==".into())
                        }
                        Some('>') => {
                            self.advance();
                            TokenKind::Operator("=>".into())
                        }
                        _ => TokenKind::Operator("=".into()),
                    }
                }
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Operator("!=".into())
                    } else {
                        return Err(self.error("unexpected character '!'".to_string()));
                    }
                }
                '<' | '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Operator(format!("{}=", c))
                    } else {
                        TokenKind::Operator(c.to_string())
                    }
                }
                '+' | '-' | '*' | '/' | '%' => {
                    self.advance();
                    TokenKind::Operator(c.to_string())
                }
                other => {
                    return Err(self.error(format!("unexpected character '{}'", other)));
                }
            };

            tokens.push(Token { kind, line, column });
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Result<TokenKind, StelError> {
        self.advance(); // opening quote
        let mut s = String::new();

        loop {
            match self.advance() {
                None => return Err(self.error("unterminated string literal".to_string())),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some(esc) => {
                        return Err(self.error(format!("unknown escape sequence '\\{}'", esc)));
                    }
                    None => return Err(self.error("unterminated string literal".to_string())),
                },
                Some(ch) => s.push(ch),
            }
        }

        Ok(TokenKind::Str(s))
    }

    fn read_number(&mut self) -> Result<TokenKind, StelError> {
        let mut num = String::new();
        let mut is_float = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num.push(ch);
                self.advance();
            } else if ch == '.' && !is_float {
                // A second dot means the range operator follows the number.
                if self.peek_ahead(1) == Some('.') {
                    break;
                }
                // Require a digit after the decimal point.
                if !self.peek_ahead(1).map(|c| c.is_ascii_digit()).unwrap_or(false) {
                    break;
                }
                is_float = true;
                num.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            num.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.error(format!("invalid float literal '{}'", num)))
        } else {
            num.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| self.error(format!("integer literal '{}' out of range", num)))
        }
    }

    fn read_ident(&mut self) -> TokenKind {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            _ if KEYWORDS.contains(&ident.as_str()) => TokenKind::Keyword(ident),
            _ => TokenKind::Identifier(ident),
        }
    }
}
