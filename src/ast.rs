// File: src/ast.rs
//
// Abstract Syntax Tree (AST) definitions for the Stel programming language.
// Defines the structure of parsed Stel programs.
//
// Expressions (Expr) represent values and computations, while Statements
// (Stmt) represent actions and declarations. Each node owns its children
// exclusively; the tree has no sharing and no cycles.

/// Type annotations on bindings and parameters.
///
/// Stel is gradually typed: annotations are recorded as advisory metadata
/// and never enforced by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    Int,
    Float,
    Str,
    Bool,
    /// User-declared struct or enum name
    Named(String),
}

/// One function parameter: name, optional annotation, optional default
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub type_annotation: Option<TypeAnnotation>,
    pub default: Option<Expr>,
}

/// Literal values usable inside match patterns
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

/// One match-arm pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches anything: _
    Wildcard,
    /// Matches a value structurally equal to the literal
    Literal(Literal),
    /// Inclusive numeric range: a..b
    Range { start: Literal, end: Literal },
    /// Enum variant, optionally binding payload elements:
    /// Color::Red or Shape::Circle(r)
    EnumVariant { enum_name: String, variant: String, bindings: Vec<String> },
}

/// One `pattern => body` unit of a match expression
#[derive(Debug, Clone)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Vec<Stmt>,
}

/// An expression - something that evaluates to a value
#[derive(Debug, Clone)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Identifier(String),
    /// List literal: [1, 2, 3]
    List(Vec<Expr>),
    /// Map literal: {"k": v, ...} — keys evaluate to strings
    Map(Vec<(Expr, Expr)>),
    /// Tuple literal: (a, b, ...)
    Tuple(Vec<Expr>),
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Field {
        object: Box<Expr>,
        field: String,
    },
    /// Struct literal: Point { x: 1, y: 2 }
    StructLiteral {
        name: String,
        fields: Vec<(String, Expr)>,
    },
    /// Enum variant reference, with constructor arguments when the
    /// variant carries a payload: Color::Red, Shape::Circle(2.0)
    EnumVariant {
        enum_name: String,
        variant: String,
        args: Vec<Expr>,
    },
    /// Match expression: subject plus ordered arms; arm order determines
    /// match priority
    Match {
        subject: Box<Expr>,
        arms: Vec<MatchArm>,
    },
}

/// Declared arity for one enum variant
#[derive(Debug, Clone)]
pub struct EnumVariantDecl {
    pub name: String,
    /// Names of the payload slots; the count is the constructor arity
    pub payload: Vec<String>,
}

/// A statement - an action or declaration
#[derive(Debug, Clone)]
pub enum Stmt {
    Let {
        name: String,
        type_annotation: Option<TypeAnnotation>,
        value: Expr,
    },
    Const {
        name: String,
        type_annotation: Option<TypeAnnotation>,
        value: Expr,
    },
    /// Plain assignment: updates the nearest binding, or creates one in
    /// the current scope when the name is unbound
    Assign {
        name: String,
        value: Expr,
    },
    /// Destructuring assignment: (a, b) = expr
    Destructure {
        names: Vec<String>,
        value: Expr,
    },
    Expr(Expr),
    FnDef {
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    For {
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Break,
    Continue,
    StructDef {
        name: String,
        fields: Vec<String>,
    },
    EnumDef {
        name: String,
        variants: Vec<EnumVariantDecl>,
    },
    TryCatch {
        try_block: Vec<Stmt>,
        catch_name: String,
        catch_block: Vec<Stmt>,
    },
    Throw(Expr),
    /// Import statement: import "path.stl"
    Import(String),
    /// Bare braced block with its own scope
    Block(Vec<Stmt>),
}
