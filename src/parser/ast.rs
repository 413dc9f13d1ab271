use crate::lexer::Token;
use std::fmt;

/*
AST nodes are modeled as two sealed tagged unions -- Statement and
Expression -- rather than the base-class-plus-subclass pattern the
reference implementation uses. The evaluator then becomes an exhaustive
`match`, with no runtime type assertions scattered through it.

Block bodies (`if`/`else` arms, function bodies) are plain `Vec<Stmt>`
fields rather than a wrapped `Block` statement node: the grammar never
lets a bare `{ ... }` stand on its own as a `statement`, so there is
nothing for a dedicated node to represent beyond the vector itself.
*/

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Var {
        token: Token,
        name: String,
        declared_type: Option<Token>,
        value: Option<Box<Expr>>,
    },
    Return {
        token: Token,
        value: Box<Expr>,
    },
    Expression {
        token: Token,
        expr: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier {
        token: Token,
        name: String,
    },
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: Vec<Stmt>,
        alternative: Option<Vec<Stmt>>,
    },
    FunctionLiteral {
        token: Token,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    NamedFunction {
        token: Token,
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    Call {
        token: Token,
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Assign {
        token: Token,
        name: String,
        value: Box<Expr>,
    },
}

// An ordered sequence of statements; its `Display` form is used for the
// parenthesization round-trip tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Var {
                name,
                declared_type,
                value,
                ..
            } => {
                write!(f, "var {}", name)?;
                if let Some(ty) = declared_type {
                    write!(f, ": {}", ty.literal)?;
                }
                match value {
                    Some(v) => write!(f, " = {};", v),
                    None => write!(f, ";"),
                }
            }
            Stmt::Return { value, .. } => write!(f, "return {};", value),
            Stmt::Expression { expr, .. } => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name, .. } => write!(f, "{}", name),
            Expr::IntegerLiteral { value, .. } => write!(f, "{}", value),
            Expr::StringLiteral { value, .. } => write!(f, "{}", value),
            Expr::BooleanLiteral { value, .. } => write!(f, "{}", value),
            Expr::Prefix { operator, right, .. } => write!(f, "({}{})", operator, right),
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} ", condition)?;
                for stmt in consequence {
                    write!(f, "{}", stmt)?;
                }
                if let Some(alt) = alternative {
                    write!(f, "else ")?;
                    for stmt in alt {
                        write!(f, "{}", stmt)?;
                    }
                }
                Ok(())
            }
            Expr::FunctionLiteral { params, body, .. } => {
                write!(f, "func({}) {{", params.join(", "))?;
                for stmt in body {
                    write!(f, "{}", stmt)?;
                }
                write!(f, "}}")
            }
            Expr::NamedFunction {
                name, params, body, ..
            } => {
                write!(f, "func {}({}) {{", name, params.join(", "))?;
                for stmt in body {
                    write!(f, "{}", stmt)?;
                }
                write!(f, "}}")
            }
            Expr::Call { callee, args, .. } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", callee, args.join(", "))
            }
            Expr::Assign { name, value, .. } => write!(f, "{} = {}", name, value),
        }
    }
}
