/*!
Statements and models (C7): the handful of SMT-LIB2 statement shapes this
crate ever emits, and the ordered list ([Model]) that collects them. Order is
semantically significant — later statements may reference only names a
statement earlier in the list already declared — which is exactly what the
orderer (C8) restores after new statements are appended mid-solve.
*/

use crate::ast::Term;
use crate::formula::Fmla;
use crate::intern::{self, Str};
use std::fmt;

/// The two sorts this crate's theories ever mention.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sort {
    Universe,
    Bool,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Universe => write!(f, "Universe"),
            Sort::Bool => write!(f, "Bool"),
        }
    }
}

/// One SMT-LIB2-level statement.
///
/// `ConstDef` covers three shapes depending on its fields:
/// - `params = []`, `body = None` — a pure declaration (`declare-const`/`declare-fun`).
/// - `params != []` — a function definition (`define-fun`).
/// - `params = []`, `body = Some(_)` — an axiom-equivalent constant definition.
#[derive(Clone, Debug)]
pub enum Statement {
    /// `(declare-sort Universe 0)`. Introduces no `Const`-kind name of its
    /// own; it is always placed first by construction (see
    /// [Model::with_universe_preamble]).
    DeclareSort,
    Axiom(Fmla),
    ConstDef {
        name: Str,
        params: Vec<Term>,
        body: Option<Fmla>,
        sort: Sort,
    },
}

impl Statement {
    pub fn declare_const(name: Str, sort: Sort) -> Self {
        Statement::ConstDef {
            name,
            params: Vec::new(),
            body: None,
            sort,
        }
    }

    /// Every `Const`-kind term this statement references, including the
    /// synthetic pred-const carried by atoms inside its formula, needed so
    /// the orderer (C8) can treat predicate uses uniformly as term uses.
    pub fn consts(&self) -> Vec<Term> {
        let mut acc = Vec::new();
        match self {
            Statement::DeclareSort => {}
            Statement::Axiom(f) => f.consts(true, &mut acc),
            Statement::ConstDef { body: Some(f), .. } => f.consts(true, &mut acc),
            Statement::ConstDef { body: None, .. } => {}
        }
        acc
    }

    /// The name this statement introduces, if any (declarations and
    /// definitions introduce their own name; bare axioms and the sort
    /// declaration introduce nothing a term could reference).
    pub fn introduces(&self) -> Option<Term> {
        match self {
            Statement::DeclareSort | Statement::Axiom(_) => None,
            Statement::ConstDef { name, .. } => Some(Term::Const(*name)),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::DeclareSort => write!(f, "(declare-sort Universe 0)"),
            Statement::Axiom(fmla) => write!(f, "(assert {fmla})"),
            Statement::ConstDef {
                name,
                params,
                body: None,
                sort,
            } if params.is_empty() => {
                write!(f, "(declare-const {} {sort})", intern::decode(*name))
            }
            Statement::ConstDef {
                name,
                params,
                body: None,
                sort,
            } => {
                write!(f, "(declare-fun {} (", intern::decode(*name))?;
                for p in params {
                    write!(f, "{} ", sort)?;
                    let _ = p;
                }
                write!(f, ") {sort})")
            }
            Statement::ConstDef {
                name,
                params,
                body: Some(body),
                sort,
            } if !params.is_empty() => {
                write!(f, "(define-fun {} (", intern::decode(*name))?;
                for p in params {
                    write!(f, "({p} Universe) ")?;
                }
                write!(f, ") {sort} {body})")
            }
            Statement::ConstDef {
                name,
                body: Some(body),
                sort,
                ..
            } => {
                write!(f, "(define-fun {} () {sort} {body})", intern::decode(*name))
            }
        }
    }
}

/// A finite universe (in first-insertion order) plus the ordered statement
/// list describing it.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub universe: Vec<Term>,
    pub statements: Vec<Statement>,
}

impl Model {
    pub fn new(universe: Vec<Term>) -> Self {
        Model {
            universe,
            statements: Vec::new(),
        }
    }

    pub fn push(&mut self, s: Statement) {
        self.statements.push(s);
    }

    /// Builds the universe-declaration preamble required by every model:
    /// the sort declaration, one `declare-const` per element, and (when
    /// there are at least two elements — `distinct` of fewer is vacuous) a
    /// single `distinct` assertion over all of them.
    pub fn with_universe_preamble(mut self) -> Self {
        self.statements.insert(0, Statement::DeclareSort);
        let mut idx = 1;
        for e in self.universe.clone() {
            if let Term::Const(name) = e {
                self.statements
                    .insert(idx, Statement::declare_const(name, Sort::Universe));
                idx += 1;
            }
        }
        if self.universe.len() >= 2 {
            self.statements
                .insert(idx, Statement::Axiom(Fmla::Atom(crate::ast::Atom::new(
                    intern::encode_str("distinct"),
                    self.universe.clone(),
                ))));
        }
        self
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.statements {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}
