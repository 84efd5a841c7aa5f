// File: src/parser.rs
//
// Recursive descent parser for the Stel programming language.
// Transforms a sequence of tokens into an Abstract Syntax Tree (AST).
//
// Statements are parsed by leading-keyword dispatch; expressions use
// precedence climbing with the fixed table:
//   or < and < equality < relational < additive < multiplicative
//      < unary < call/index/field access
//
// The parser performs no error recovery: the first token that cannot
// extend the current production aborts parsing with a ParseError that
// carries the unexpected token and its position. No partial AST is
// returned on failure.

use crate::ast::{EnumVariantDecl, Expr, Literal, MatchArm, Param, Pattern, Stmt, TypeAnnotation};
use crate::errors::StelError;
use crate::lexer::{Token, TokenKind};

/// Parser maintains position in the token stream and provides methods to
/// parse statements and expressions
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from a vector of tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn peek_ahead(&self, offset: usize) -> &TokenKind {
        self.tokens.get(self.pos + offset).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn current_token(&self) -> Token {
        self.tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .cloned()
            .unwrap_or(Token { kind: TokenKind::Eof, line: 0, column: 0 })
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn error(&self, message: impl Into<String>) -> StelError {
        let token = self.current_token();
        StelError::parse_error(message.into(), token.location())
    }

    fn unexpected(&self, expected: &str) -> StelError {
        self.error(format!("expected {}, found {}", expected, describe(self.peek())))
    }

    fn expect_punct(&mut self, c: char) -> Result<(), StelError> {
        if matches!(self.peek(), TokenKind::Punctuation(p) if *p == c) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", c)))
        }
    }

    fn expect_operator(&mut self, op: &str) -> Result<(), StelError> {
        if matches!(self.peek(), TokenKind::Operator(o) if o == op) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", op)))
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<(), StelError> {
        if matches!(self.peek(), TokenKind::Keyword(k) if k == kw) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", kw)))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, StelError> {
        if let TokenKind::Identifier(name) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected(what))
        }
    }

    fn check_punct(&self, c: char) -> bool {
        matches!(self.peek(), TokenKind::Punctuation(p) if *p == c)
    }

    fn check_operator(&self, op: &str) -> bool {
        matches!(self.peek(), TokenKind::Operator(o) if o == op)
    }

    fn check_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), TokenKind::Keyword(k) if k == kw)
    }

    /// Parse the entire token stream into the program's statement list
    pub fn parse(&mut self) -> Result<Vec<Stmt>, StelError> {
        let mut stmts = Vec::new();
        loop {
            // Semicolons are optional statement separators
            while self.check_punct(';') {
                self.advance();
            }
            if matches!(self.peek(), TokenKind::Eof) {
                return Ok(stmts);
            }
            stmts.push(self.parse_stmt()?);
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, StelError> {
        match self.peek() {
            TokenKind::Keyword(k) => match k.as_str() {
                "let" => self.parse_let(false),
                "const" => self.parse_let(true),
                "fn" | "def" => self.parse_fn(),
                "if" => self.parse_if(),
                "while" => self.parse_while(),
                "for" => self.parse_for(),
                "return" => {
                    self.advance();
                    let value = if self.starts_expression() {
                        Some(self.parse_expr()?)
                    } else {
                        None
                    };
                    Ok(Stmt::Return(value))
                }
                "break" => {
                    self.advance();
                    Ok(Stmt::Break)
                }
                "continue" => {
                    self.advance();
                    Ok(Stmt::Continue)
                }
                "struct" => self.parse_struct(),
                "enum" => self.parse_enum(),
                "try" => self.parse_try_catch(),
                "throw" => {
                    self.advance();
                    let value = self.parse_expr()?;
                    Ok(Stmt::Throw(value))
                }
                "import" => self.parse_import(),
                _ => self.parse_expr_or_assign(),
            },
            TokenKind::Punctuation('{') if !self.looks_like_map_literal() => {
                let body = self.parse_block()?;
                Ok(Stmt::Block(body))
            }
            _ => self.parse_expr_or_assign(),
        }
    }

    /// True when the current token can begin an expression; used to decide
    /// whether `return` carries a value
    fn starts_expression(&self) -> bool {
        match self.peek() {
            TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Bool(_)
            | TokenKind::Null
            | TokenKind::Identifier(_) => true,
            TokenKind::Punctuation(p) => matches!(p, '(' | '[' | '{'),
            TokenKind::Operator(op) => op == "-",
            TokenKind::Keyword(k) => matches!(k.as_str(), "not" | "match"),
            _ => false,
        }
    }

    /// A `{` opens a map literal (rather than a block) when its first
    /// entry looks like `key :` — mirrors the struct-literal lookahead
    fn looks_like_map_literal(&self) -> bool {
        match self.peek_ahead(1) {
            TokenKind::Punctuation('}') => true,
            TokenKind::Str(_) | TokenKind::Int(_) | TokenKind::Identifier(_) => {
                matches!(self.peek_ahead(2), TokenKind::Punctuation(':'))
            }
            _ => false,
        }
    }

    /// Parses either an expression statement, a plain assignment, or a
    /// destructuring assignment. Assignment targets are names or tuples
    /// of names; anything else followed by `=` is a parse error.
    fn parse_expr_or_assign(&mut self) -> Result<Stmt, StelError> {
        let expr = self.parse_expr()?;

        if self.check_operator("=") {
            self.advance(); // =
            let value = self.parse_expr()?;
            return match expr {
                Expr::Identifier(name) => Ok(Stmt::Assign { name, value }),
                Expr::Tuple(elements) => {
                    let mut names = Vec::with_capacity(elements.len());
                    for element in elements {
                        match element {
                            Expr::Identifier(name) => names.push(name),
                            _ => {
                                return Err(self
                                    .error("destructuring targets must be plain names"))
                            }
                        }
                    }
                    Ok(Stmt::Destructure { names, value })
                }
                _ => Err(self.error("invalid assignment target")),
            };
        }

        Ok(Stmt::Expr(expr))
    }

    fn parse_let(&mut self, constant: bool) -> Result<Stmt, StelError> {
        self.advance(); // let or const
        let name = self.expect_identifier("a binding name")?;
        let type_annotation = self.parse_type_annotation()?;
        self.expect_operator("=")?;
        let value = self.parse_expr()?;

        if constant {
            Ok(Stmt::Const { name, type_annotation, value })
        } else {
            Ok(Stmt::Let { name, type_annotation, value })
        }
    }

    /// Parse a `: type` annotation if present. Annotations are advisory
    /// metadata; unknown names are recorded as user-declared type names.
    fn parse_type_annotation(&mut self) -> Result<Option<TypeAnnotation>, StelError> {
        if !self.check_punct(':') {
            return Ok(None);
        }
        self.advance(); // :

        let name = self.expect_identifier("a type name")?;
        let annotation = match name.as_str() {
            "int" => TypeAnnotation::Int,
            "float" => TypeAnnotation::Float,
            "string" => TypeAnnotation::Str,
            "bool" => TypeAnnotation::Bool,
            _ => TypeAnnotation::Named(name),
        };
        Ok(Some(annotation))
    }

    fn parse_fn(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // fn or def
        let name = self.expect_identifier("a function name")?;
        self.expect_punct('(')?;

        let mut params = Vec::new();
        while !self.check_punct(')') {
            let param_name = self.expect_identifier("a parameter name")?;
            let type_annotation = self.parse_type_annotation()?;
            let default = if self.check_operator("=") {
                self.advance(); // =
                Some(self.parse_expr()?)
            } else {
                None
            };
            params.push(Param { name: param_name, type_annotation, default });

            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct(')')?;

        let body = self.parse_block()?;
        Ok(Stmt::FnDef { name, params, body })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, StelError> {
        self.expect_punct('{')?;
        let mut stmts = Vec::new();
        loop {
            while self.check_punct(';') {
                self.advance();
            }
            if self.check_punct('}') {
                break;
            }
            if matches!(self.peek(), TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect_punct('}')?;
        Ok(stmts)
    }

    fn parse_if(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // if
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.check_keyword("else") {
            self.advance(); // else
            if self.check_keyword("if") {
                // else-if chains nest as a single-statement else branch
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn parse_while(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // while
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_for(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // for
        let var = self.expect_identifier("a loop variable")?;
        self.expect_keyword("in")?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::For { var, iterable, body })
    }

    fn parse_struct(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // struct
        let name = self.expect_identifier("a struct name")?;
        self.expect_punct('{')?;

        let mut fields = Vec::new();
        while !self.check_punct('}') {
            fields.push(self.expect_identifier("a field name")?);
            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct('}')?;
        Ok(Stmt::StructDef { name, fields })
    }

    fn parse_enum(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // enum
        let name = self.expect_identifier("an enum name")?;
        self.expect_punct('{')?;

        let mut variants = Vec::new();
        while !self.check_punct('}') {
            let variant_name = self.expect_identifier("a variant name")?;
            let mut payload = Vec::new();
            if self.check_punct('(') {
                self.advance(); // (
                while !self.check_punct(')') {
                    payload.push(self.expect_identifier("a payload name")?);
                    if self.check_punct(',') {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.expect_punct(')')?;
            }
            variants.push(EnumVariantDecl { name: variant_name, payload });

            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct('}')?;
        Ok(Stmt::EnumDef { name, variants })
    }

    fn parse_try_catch(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // try
        let try_block = self.parse_block()?;
        self.expect_keyword("catch")?;
        let catch_name = self.expect_identifier("a catch binding name")?;
        let catch_block = self.parse_block()?;
        Ok(Stmt::TryCatch { try_block, catch_name, catch_block })
    }

    fn parse_import(&mut self) -> Result<Stmt, StelError> {
        self.advance(); // import
        if let TokenKind::Str(path) = self.peek() {
            let path = path.clone();
            self.advance();
            Ok(Stmt::Import(path))
        } else {
            Err(self.unexpected("a file path string"))
        }
    }

    // --- Expressions ---

    fn parse_expr(&mut self) -> Result<Expr, StelError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_and()?;
        while self.check_keyword("or") {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary { left: Box::new(left), op: "or".into(), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_equality()?;
        while self.check_keyword("and") {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Binary { left: Box::new(left), op: "and".into(), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_relational()?;
        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "==" | "!=")) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_relational()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_additive()?;
        while matches!(
            self.peek(),
            TokenKind::Operator(op) if matches!(op.as_str(), "<" | "<=" | ">" | ">=")
        ) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_additive()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_multiplicative()?;
        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "+" | "-")) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_multiplicative()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, StelError> {
        let mut left = self.parse_unary()?;
        while matches!(self.peek(), TokenKind::Operator(op) if matches!(op.as_str(), "*" | "/" | "%"))
        {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_unary()?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, StelError> {
        if self.check_operator("-") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary { op: "-".into(), operand: Box::new(operand) });
        }
        if self.check_keyword("not") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary { op: "not".into(), operand: Box::new(operand) });
        }
        self.parse_postfix()
    }

    /// Call, index, and field access chains (the highest precedence tier),
    /// plus struct literals where an identifier is directly followed by
    /// `{ field : ... }`
    fn parse_postfix(&mut self) -> Result<Expr, StelError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek() {
                TokenKind::Punctuation('(') => {
                    self.advance(); // (
                    let mut args = Vec::new();
                    while !self.check_punct(')') {
                        args.push(self.parse_expr()?);
                        if self.check_punct(',') {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    self.expect_punct(')')?;
                    expr = Expr::Call { callee: Box::new(expr), args };
                }
                TokenKind::Punctuation('[') => {
                    self.advance(); // [
                    let index = self.parse_expr()?;
                    self.expect_punct(']')?;
                    expr = Expr::Index { object: Box::new(expr), index: Box::new(index) };
                }
                TokenKind::Punctuation('.') => {
                    self.advance(); // .
                    let field = self.expect_identifier("a field name")?;
                    expr = Expr::Field { object: Box::new(expr), field };
                }
                TokenKind::Punctuation('{') if matches!(expr, Expr::Identifier(_)) => {
                    // Only a struct literal when the braces open on field
                    // syntax; `if x { ... }` and `while x { }` must not be
                    // misparsed.
                    let is_struct = match self.peek_ahead(1) {
                        TokenKind::Identifier(_) => {
                            matches!(self.peek_ahead(2), TokenKind::Punctuation(':'))
                        }
                        _ => false,
                    };
                    if !is_struct {
                        break;
                    }

                    let name = match expr {
                        Expr::Identifier(name) => name,
                        _ => unreachable!(),
                    };
                    expr = self.parse_struct_literal(name)?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_struct_literal(&mut self, name: String) -> Result<Expr, StelError> {
        self.expect_punct('{')?;
        let mut fields = Vec::new();

        while !self.check_punct('}') {
            let field_name = self.expect_identifier("a field name")?;
            self.expect_punct(':')?;
            let value = self.parse_expr()?;
            fields.push((field_name, value));

            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct('}')?;
        Ok(Expr::StructLiteral { name, fields })
    }

    fn parse_primary(&mut self) -> Result<Expr, StelError> {
        match self.peek() {
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Int(n))
            }
            TokenKind::Float(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Float(n))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Str(s))
            }
            TokenKind::Bool(b) => {
                let b = *b;
                self.advance();
                Ok(Expr::Bool(b))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Null)
            }
            TokenKind::Keyword(k) if k == "match" => self.parse_match(),
            TokenKind::Identifier(_) => {
                // Enum-path lookahead: Name::Variant
                if matches!(self.peek_ahead(1), TokenKind::Operator(op) if op == "::") {
                    return self.parse_enum_variant();
                }
                let name = self.expect_identifier("an expression")?;
                Ok(Expr::Identifier(name))
            }
            TokenKind::Punctuation('(') => self.parse_paren_or_tuple(),
            TokenKind::Punctuation('[') => self.parse_list_literal(),
            TokenKind::Punctuation('{') => self.parse_map_literal(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_enum_variant(&mut self) -> Result<Expr, StelError> {
        let enum_name = self.expect_identifier("an enum name")?;
        self.expect_operator("::")?;
        let variant = self.expect_identifier("a variant name")?;

        let mut args = Vec::new();
        if self.check_punct('(') {
            self.advance(); // (
            while !self.check_punct(')') {
                args.push(self.parse_expr()?);
                if self.check_punct(',') {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect_punct(')')?;
        }

        Ok(Expr::EnumVariant { enum_name, variant, args })
    }

    /// `( expr )` is grouping; `( expr , ... )` is a tuple literal
    fn parse_paren_or_tuple(&mut self) -> Result<Expr, StelError> {
        self.expect_punct('(')?;
        let first = self.parse_expr()?;

        if self.check_punct(',') {
            let mut elements = vec![first];
            while self.check_punct(',') {
                self.advance(); // ,
                if self.check_punct(')') {
                    break; // trailing comma
                }
                elements.push(self.parse_expr()?);
            }
            self.expect_punct(')')?;
            return Ok(Expr::Tuple(elements));
        }

        self.expect_punct(')')?;
        Ok(first)
    }

    fn parse_list_literal(&mut self) -> Result<Expr, StelError> {
        self.expect_punct('[')?;
        let mut elements = Vec::new();

        while !self.check_punct(']') {
            elements.push(self.parse_expr()?);
            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct(']')?;
        Ok(Expr::List(elements))
    }

    fn parse_map_literal(&mut self) -> Result<Expr, StelError> {
        self.expect_punct('{')?;
        let mut pairs = Vec::new();

        while !self.check_punct('}') {
            let key = self.parse_expr()?;
            self.expect_punct(':')?;
            let value = self.parse_expr()?;
            pairs.push((key, value));

            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct('}')?;
        Ok(Expr::Map(pairs))
    }

    fn parse_match(&mut self) -> Result<Expr, StelError> {
        self.advance(); // match
        let subject = self.parse_expr()?;
        self.expect_punct('{')?;

        let mut arms = Vec::new();
        while !self.check_punct('}') {
            let pattern = self.parse_pattern()?;
            self.expect_operator("=>")?;

            let body = if self.check_punct('{') && !self.looks_like_map_literal() {
                self.parse_block()?
            } else {
                vec![Stmt::Expr(self.parse_expr()?)]
            };
            arms.push(MatchArm { pattern, body });

            if self.check_punct(',') {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct('}')?;

        Ok(Expr::Match { subject: Box::new(subject), arms })
    }

    fn parse_pattern(&mut self) -> Result<Pattern, StelError> {
        // Wildcard and enum-variant patterns start with an identifier
        if let TokenKind::Identifier(name) = self.peek() {
            if name == "_" {
                self.advance();
                return Ok(Pattern::Wildcard);
            }
            if matches!(self.peek_ahead(1), TokenKind::Operator(op) if op == "::") {
                let enum_name = self.expect_identifier("an enum name")?;
                self.expect_operator("::")?;
                let variant = self.expect_identifier("a variant name")?;

                let mut bindings = Vec::new();
                if self.check_punct('(') {
                    self.advance(); // (
                    while !self.check_punct(')') {
                        bindings.push(self.expect_identifier("a binding name")?);
                        if self.check_punct(',') {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    self.expect_punct(')')?;
                }
                return Ok(Pattern::EnumVariant { enum_name, variant, bindings });
            }
            return Err(self.unexpected("a pattern"));
        }

        let start = self.parse_pattern_literal()?;

        if self.check_operator("..") {
            self.advance(); // ..
            let end = self.parse_pattern_literal()?;
            if !matches!(start, Literal::Int(_) | Literal::Float(_))
                || !matches!(end, Literal::Int(_) | Literal::Float(_))
            {
                return Err(self.error("range patterns require numeric bounds"));
            }
            return Ok(Pattern::Range { start, end });
        }

        Ok(Pattern::Literal(start))
    }

    fn parse_pattern_literal(&mut self) -> Result<Literal, StelError> {
        let negate = if self.check_operator("-") {
            self.advance();
            true
        } else {
            false
        };

        let literal = match self.peek() {
            TokenKind::Int(n) => Literal::Int(if negate { -*n } else { *n }),
            TokenKind::Float(n) => Literal::Float(if negate { -*n } else { *n }),
            TokenKind::Str(_) | TokenKind::Bool(_) | TokenKind::Null if negate => {
                return Err(self.error("'-' applies only to numeric pattern literals"));
            }
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::Bool(b) => Literal::Bool(*b),
            TokenKind::Null => Literal::Null,
            _ => return Err(self.unexpected("a pattern literal")),
        };
        self.advance();
        Ok(literal)
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(name) => format!("identifier '{}'", name),
        TokenKind::Int(n) => format!("integer '{}'", n),
        TokenKind::Float(n) => format!("float '{}'", n),
        TokenKind::Str(_) => "a string literal".to_string(),
        TokenKind::Bool(b) => format!("'{}'", b),
        TokenKind::Null => "'null'".to_string(),
        TokenKind::Keyword(k) => format!("keyword '{}'", k),
        TokenKind::Operator(op) => format!("'{}'", op),
        TokenKind::Punctuation(c) => format!("'{}'", c),
        TokenKind::Eof => "end of input".to_string(),
    }
}
