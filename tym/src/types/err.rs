//! Error types returned by the compilation pipeline.
//!
//! Each stage of the pipeline (parsing, translation, ordering, query
//! abstraction, solving) has its own error enum; [ErrorKind] unions them so
//! a caller driving the whole pipeline can propagate with `?` regardless of
//! which stage failed.

use std::fmt;

/// The union of every error a caller of this crate may observe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse(ParseError),
    Translate(TranslateError),
    Order(OrderError),
    Query(QueryError),
    Solver(SolverError),

    /// The program contained no clauses at all.
    DevoidOfClauses,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "parse error: {e}"),
            ErrorKind::Translate(e) => write!(f, "translation error: {e}"),
            ErrorKind::Order(e) => write!(f, "ordering error: {e}"),
            ErrorKind::Query(e) => write!(f, "query error: {e}"),
            ErrorKind::Solver(e) => write!(f, "solver error: {e}"),
            ErrorKind::DevoidOfClauses => write!(f, "program is devoid of clauses"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors produced while lexing/parsing Datalog surface syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// `offset` is a byte offset into the source text.
    UnexpectedToken { offset: usize, message: String },
    UnexpectedEof { message: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { offset, message } => {
                write!(f, "at byte {offset}: {message}")
            }
            ParseError::UnexpectedEof { message } => write!(f, "unexpected end of input: {message}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors produced while building the term/atom database or translating
/// clauses into formulas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslateError {
    /// The same identifier was used for terms of two different kinds
    /// (e.g. once as a variable, once as a constant).
    TermKindConflict { name: String },

    /// The same predicate name was used with two different arities.
    ArityConflict {
        name: String,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::TermKindConflict { name } => {
                write!(f, "'{name}' is used as both a variable and a constant")
            }
            TranslateError::ArityConflict { name, first, second } => write!(
                f,
                "predicate '{name}' used with arity {first} and arity {second}"
            ),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<TranslateError> for ErrorKind {
    fn from(e: TranslateError) -> Self {
        ErrorKind::Translate(e)
    }
}

/// Errors produced by the statement orderer (C8).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError {
    /// A full pass over the waiting statements placed none of them.
    CyclicDependency,
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::CyclicDependency => {
                write!(f, "statement list contains a cyclic dependency")
            }
        }
    }
}

impl std::error::Error for OrderError {}

impl From<OrderError> for ErrorKind {
    fn from(e: OrderError) -> Self {
        ErrorKind::Order(e)
    }
}

/// Errors produced while translating a query (C9).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// A constant in the query does not appear anywhere in the program.
    UndeclaredConstant { name: String },

    /// Queries may not contain existential quantifiers.
    ExistentialInQuery,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UndeclaredConstant { name } => write!(
                f,
                "the constant '{name}' in the query doesn't appear in the program"
            ),
            QueryError::ExistentialInQuery => {
                write!(f, "queries may not contain an existential quantifier")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for ErrorKind {
    fn from(e: QueryError) -> Self {
        ErrorKind::Query(e)
    }
}

/// Errors produced while driving the external solver (C10).
#[derive(Debug)]
pub enum SolverError {
    /// The solver process could not be spawned, or I/O with it failed.
    Io(std::io::Error),

    /// The solver's reply could not be parsed as expected.
    Protocol(String),

    /// A solver session was begun twice without an intervening `end`.
    AlreadyBegun,
}

impl Clone for SolverError {
    fn clone(&self) -> Self {
        match self {
            SolverError::Io(e) => SolverError::Io(std::io::Error::new(e.kind(), e.to_string())),
            SolverError::Protocol(s) => SolverError::Protocol(s.clone()),
            SolverError::AlreadyBegun => SolverError::AlreadyBegun,
        }
    }
}

impl PartialEq for SolverError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SolverError::Io(a), SolverError::Io(b)) => a.kind() == b.kind(),
            (SolverError::Protocol(a), SolverError::Protocol(b)) => a == b,
            (SolverError::AlreadyBegun, SolverError::AlreadyBegun) => true,
            _ => false,
        }
    }
}

impl Eq for SolverError {}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Io(e) => write!(f, "{e}"),
            SolverError::Protocol(s) => write!(f, "unexpected solver reply: {s}"),
            SolverError::AlreadyBegun => write!(f, "solver session already begun"),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<SolverError> for ErrorKind {
    fn from(e: SolverError) -> Self {
        ErrorKind::Solver(e)
    }
}

impl From<std::io::Error> for SolverError {
    fn from(e: std::io::Error) -> Self {
        SolverError::Io(e)
    }
}
