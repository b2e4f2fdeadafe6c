//! AST types produced by the parser.
//!
//! Nodes are plain data: the evaluator walks them by reference and function
//! declarations clone their body into the function value, so everything here
//! derives `Clone` and `PartialEq`.

/// A parsed script: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub body: Vec<Stmt>,
}

/// A statement together with the 1-based source line it starts on.
/// The line is what runtime errors report, so every statement carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub line: usize,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    Assign {
        target: AssignTarget,
        op: AssignOp,
        value: Expr,
    },
    FnDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    If {
        test: Expr,
        consequent: Vec<Stmt>,
        /// `else if` chains nest as a single `If` statement in here.
        alternate: Option<Vec<Stmt>>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    For {
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Return {
        value: Option<Expr>,
    },
    Break,
    Continue,
}

/// Assignment target: a name plus zero or more index steps, so `x`,
/// `xs[0]` and `grid[i][j]` all share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignTarget {
    pub name: String,
    pub indices: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    Set(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
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
}

/// Integer literals parse into the interpreter's full integer width so
/// magnitudes past 64 bits survive the trip from source to value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i128),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicalOp {
    And,
    Or,
}
